//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/auto_transactions/{auto_transaction_id}', use [format_endpoint].

/// The root route which redirects to the auto transactions page.
pub const ROOT: &str = "/";
/// The page for listing all auto transactions.
pub const AUTO_TRANSACTIONS_VIEW: &str = "/auto_transactions";
/// The page for creating a new auto transaction.
pub const NEW_AUTO_TRANSACTION_VIEW: &str = "/auto_transactions/new";
/// The dialog for editing an existing auto transaction.
pub const EDIT_AUTO_TRANSACTION_VIEW: &str = "/auto_transactions/{auto_transaction_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an auto transaction.
pub const POST_AUTO_TRANSACTION: &str = "/api/auto_transactions";
/// The route to update an auto transaction.
pub const PUT_AUTO_TRANSACTION: &str = "/api/auto_transactions/{auto_transaction_id}";
/// The route to delete an auto transaction.
pub const DELETE_AUTO_TRANSACTION: &str = "/api/auto_transactions/{auto_transaction_id}";
/// The GraphQL endpoint, also serves the GraphQL Playground for GET requests.
pub const GRAPHQL: &str = "/graphql";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/rules/{rule_id}', '{rule_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Append the sort expression to `endpoint_path` as the `sort` query parameter.
///
/// If the sort expression cannot be encoded, the error is logged and
/// `endpoint_path` is returned without a query.
pub fn with_sort_query(endpoint_path: &str, sort: &str) -> String {
    match serde_urlencoded::to_string([("sort", sort)]) {
        Ok(query) => format!("{endpoint_path}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode sort expression {sort}: {error}");
            endpoint_path.to_owned()
        }
    }
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::{format_endpoint, with_sort_query};

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::AUTO_TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_AUTO_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_AUTO_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::POST_AUTO_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::PUT_AUTO_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::DELETE_AUTO_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::GRAPHQL);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn sort_query_is_valid_uri() {
        let formatted_path = with_sort_query("/hello", "amount desc, id desc");

        assert_eq!(formatted_path, "/hello?sort=amount+desc%2C+id+desc");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn sort_query_escapes_reserved_characters() {
        let formatted_path = with_sort_query("/hello", "a&b=c?d#e");

        assert_eq!(formatted_path, "/hello?sort=a%26b%3Dc%3Fd%23e");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
