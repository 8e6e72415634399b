//! Alert system for displaying success and error messages to users.
//!
//! Alerts are short-lived toasts shown in the page's alert container. They are
//! either the target of a request (e.g., `hx-target-error="#alert-container"`)
//! or swapped in out-of-band next to other content with [Alert::into_oob_html].

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// The ID of the element in [base](crate::html::base) that holds alerts.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// How long an alert is shown before it is dismissed automatically.
pub const ALERT_DURATION_MS: u32 = 2000;

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message without details.
    SuccessSimple { message: String },
    /// An error message with extra details.
    Error { message: String, details: String },
    /// An error message without details.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as a standalone fragment.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        let style = if is_error {
            "flex items-start gap-3 p-4 text-sm rounded-lg shadow-lg \
            text-red-800 bg-red-50 border border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 text-sm rounded-lg shadow-lg \
            text-green-800 bg-green-50 border border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        html!(
            div
                role="alert"
                data-alert=(if is_error { "error" } else { "success" })
                data-dismiss-after=(ALERT_DURATION_MS)
                class=(style)
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if let Some(details) = details {
                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    data-dismiss-alert
                    class="ms-auto font-bold leading-none"
                {
                    "×"
                }
            }
        )
    }

    /// Render the alert so that HTMX swaps it into the alert container
    /// regardless of the request's target.
    pub fn into_oob_html(self) -> Markup {
        html!(
            div hx-swap-oob={ "innerHTML:#" (ALERT_CONTAINER_ID) }
            {
                (self.into_html())
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{ALERT_CONTAINER_ID, Alert};

    #[test]
    fn success_alert_shows_message() {
        let html = Html::parse_fragment(
            &Alert::SuccessSimple {
                message: "Saved".to_owned(),
            }
            .into_html()
            .into_string(),
        );

        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");

        assert_eq!(alert.value().attr("data-alert"), Some("success"));
        assert_eq!(alert.value().attr("data-dismiss-after"), Some("2000"));
        let text = alert.text().collect::<String>();
        assert!(text.contains("Saved"));
    }

    #[test]
    fn error_alert_shows_details() {
        let html = Html::parse_fragment(
            &Alert::Error {
                message: "Oops".to_owned(),
                details: "Try again".to_owned(),
            }
            .into_html()
            .into_string(),
        );

        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();

        assert_eq!(paragraphs, ["Oops", "Try again"]);
    }

    #[test]
    fn oob_alert_targets_alert_container() {
        let html = Html::parse_fragment(
            &Alert::SuccessSimple {
                message: "Rule deleted".to_owned(),
            }
            .into_oob_html()
            .into_string(),
        );

        let wrapper = html
            .select(&Selector::parse("[hx-swap-oob]").unwrap())
            .next()
            .expect("No out-of-band element found");

        assert_eq!(
            wrapper.value().attr("hx-swap-oob"),
            Some(format!("innerHTML:#{ALERT_CONTAINER_ID}").as_str())
        );
    }
}
