use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    account::{Account, get_all_accounts},
    alert::ALERT_CONTAINER_ID,
    auto_transaction::{
        db::create_auto_transaction,
        form::{AutoTransactionFormDefaults, auto_transaction_form_fields},
        models::{AutoTransactionFormData, AutoTransactionState, NewAutoTransaction},
    },
    category::{Category, get_all_categories},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles},
    navigation::NavBar,
};

/// Route handler for the new auto transaction page.
pub async fn get_new_auto_transaction_page(
    State(state): State<AutoTransactionState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let available_categories = get_all_categories(&connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve categories for new rule page: {error}")
    })?;
    let available_accounts = get_all_accounts(&connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve accounts for new rule page: {error}")
    })?;

    Ok(new_auto_transaction_view(&available_categories, &available_accounts).into_response())
}

/// A route handler for creating a new auto transaction, redirects to the
/// auto transactions table on success.
pub async fn create_auto_transaction_endpoint(
    State(state): State<AutoTransactionState>,
    Form(form_data): Form<AutoTransactionFormData>,
) -> Response {
    let new_auto_transaction = match NewAutoTransaction::try_from(form_data) {
        Ok(new_auto_transaction) => new_auto_transaction,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_auto_transaction(&new_auto_transaction, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::AUTO_TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::debug!("Could not create rule: {error}");
            error.into_alert_response()
        }
    }
}

fn new_auto_transaction_view(
    available_categories: &[Category],
    available_accounts: &[Account],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_AUTO_TRANSACTION_VIEW).into_html();
    let form_fields = auto_transaction_form_fields(
        &AutoTransactionFormDefaults::default(),
        available_categories,
        available_accounts,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            @if available_categories.is_empty() {
                p class="py-8 text-center"
                {
                    "A rule needs a category, but there are no categories yet. "
                    "Run "
                    code { "create_test_db" }
                    " or add categories to the database first, then go back to the "
                    a href=(endpoints::AUTO_TRANSACTIONS_VIEW) class=(LINK_STYLE) { "rules" }
                    "."
                }
            } @else {
                form
                    hx-post=(endpoints::POST_AUTO_TRANSACTION)
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    class="w-full space-y-4 md:space-y-6"
                {
                    (form_fields)

                    button type="submit" class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Create Rule"
                    }
                }
            }
        }
    };

    base("Create Rule", &[dollar_input_styles()], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        account::create_account,
        auto_transaction::{
            db::get_auto_transaction,
            models::{
                AccountRef, AutoTransaction, AutoTransactionFormData, AutoTransactionState,
                TransactionType,
            },
        },
        category::create_category,
        endpoints, initialize_db,
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_hx_redirect, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document, parse_html_fragment,
        },
    };

    use super::{create_auto_transaction_endpoint, get_new_auto_transaction_page};

    fn get_test_state() -> AutoTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        create_category("Groceries", &connection).unwrap();
        create_account("Everyday", &connection).unwrap();

        AutoTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn new_page_renders_form() {
        let response = get_new_auto_transaction_page(State(get_test_state()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_AUTO_TRANSACTION, "hx-post");
        assert_form_input(&form, "description", "text", true);
        assert_form_input(&form, "amount", "number", false);
        assert_form_submit_button_with_text(&form, "Create Rule");
    }

    #[tokio::test]
    async fn create_redirects_to_table() {
        let state = get_test_state();
        let form = AutoTransactionFormData {
            description: "COUNTDOWN".to_owned(),
            transaction_type: "debit".to_owned(),
            category_id: 1,
            amount: Some(0.0),
            account_id: Some(1),
        };

        let response = create_auto_transaction_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::AUTO_TRANSACTIONS_VIEW);
        assert_eq!(
            get_auto_transaction(1, &state.db_connection.lock().unwrap()),
            Ok(AutoTransaction {
                id: 1,
                description: "COUNTDOWN".to_owned(),
                transaction_type: TransactionType::Debit,
                category_id: 1,
                amount: None,
                account: Some(AccountRef {
                    id: 1,
                    name: "Everyday".to_owned(),
                }),
            })
        );
    }

    #[tokio::test]
    async fn create_with_invalid_transaction_type_shows_error_message() {
        let form = AutoTransactionFormData {
            description: "COUNTDOWN".to_owned(),
            transaction_type: "transfer".to_owned(),
            category_id: 1,
            amount: None,
            account_id: None,
        };

        let response = create_auto_transaction_endpoint(State(get_test_state()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("\"transfer\" is not a valid transaction type"));
    }
}
