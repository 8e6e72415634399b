//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auto_transaction::{
        create_auto_transaction_endpoint, delete_auto_transaction_endpoint,
        get_auto_transactions_page, get_edit_auto_transaction_dialog,
        get_new_auto_transaction_page, update_auto_transaction_endpoint,
    },
    endpoints,
    graphql::{graphql_handler, graphql_playground},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(
            endpoints::AUTO_TRANSACTIONS_VIEW,
            get(get_auto_transactions_page),
        )
        .route(
            endpoints::NEW_AUTO_TRANSACTION_VIEW,
            get(get_new_auto_transaction_page),
        )
        .route(
            endpoints::EDIT_AUTO_TRANSACTION_VIEW,
            get(get_edit_auto_transaction_dialog),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::POST_AUTO_TRANSACTION,
            post(create_auto_transaction_endpoint),
        )
        .route(
            endpoints::PUT_AUTO_TRANSACTION,
            put(update_auto_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_AUTO_TRANSACTION,
            delete(delete_auto_transaction_endpoint),
        )
        .route(
            endpoints::GRAPHQL,
            get(graphql_playground).post(graphql_handler),
        );

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the auto transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::AUTO_TRANSACTIONS_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, NewAutoTransaction, TransactionType, create_auto_transaction, create_category,
        endpoints,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap())
            .expect("Could not create app state");

        {
            let connection = state.db_connection.lock().unwrap();
            let category = create_category("Groceries", &connection).unwrap();
            create_auto_transaction(
                &NewAutoTransaction::new(
                    "COUNTDOWN",
                    TransactionType::Debit,
                    category.id,
                    Some(10.0),
                    None,
                )
                .unwrap(),
                &connection,
            )
            .unwrap();
        }

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_auto_transactions() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", endpoints::AUTO_TRANSACTIONS_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_returns_404_page() {
        let server = get_test_server();

        let response = server.get("/not-a-real-page").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }

    #[tokio::test]
    async fn auto_transactions_page_lists_rules() {
        let server = get_test_server();

        let response = server
            .get(endpoints::AUTO_TRANSACTIONS_VIEW)
            .add_query_param("sort", "amount desc, id desc")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("COUNTDOWN"));
    }

    #[tokio::test]
    async fn graphql_endpoint_updates_auto_transaction() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GRAPHQL)
            .json(&json!({
                "query": r#"mutation {
                    updateAutoTransaction(autoTransaction: {
                        id: "1",
                        description: "COUNTDOWN METRO",
                        categoryId: "1",
                        amount: 0,
                        transactionType: "debit",
                        accountId: null
                    }) { description amount }
                }"#
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "data": {
                "updateAutoTransaction": {
                    "description": "COUNTDOWN METRO",
                    "amount": null,
                }
            }
        }));
    }

    #[tokio::test]
    async fn graphql_endpoint_deletes_auto_transaction() {
        let server = get_test_server();

        let response = server
            .post(endpoints::GRAPHQL)
            .json(&json!({ "query": r#"mutation { deleteAutoTransaction(id: "1") }"# }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "data": { "deleteAutoTransaction": true } }));

        let page = server.get(endpoints::AUTO_TRANSACTIONS_VIEW).await;
        assert!(!page.text().contains("COUNTDOWN"));
    }

    #[tokio::test]
    async fn graphql_playground_is_served() {
        let server = get_test_server();

        let response = server.get(endpoints::GRAPHQL).await;

        response.assert_status_ok();
        assert!(response.text().contains(endpoints::GRAPHQL));
    }
}
