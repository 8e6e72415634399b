use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    auto_transaction::{
        db::delete_auto_transaction,
        models::{AutoTransactionId, AutoTransactionState},
    },
};

/// A route handler for deleting an auto transaction, responds with an alert.
pub async fn delete_auto_transaction_endpoint(
    Path(auto_transaction_id): Path<AutoTransactionId>,
    State(state): State<AutoTransactionState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_auto_transaction(auto_transaction_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => Alert::SuccessSimple {
            message: "Rule deleted".to_owned(),
        }
        .into_oob_html()
        .into_response(),
        Err(error) => {
            tracing::debug!("Could not delete auto transaction {auto_transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        Error,
        auto_transaction::{
            create_auto_transaction,
            db::get_auto_transaction,
            models::{AutoTransactionState, NewAutoTransaction, TransactionType},
        },
        category::create_category,
        initialize_db,
        test_utils::{assert_status_ok, parse_html_fragment},
    };

    use super::delete_auto_transaction_endpoint;

    fn get_test_state() -> AutoTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        let category = create_category("Groceries", &connection).unwrap();
        create_auto_transaction(
            &NewAutoTransaction::new("COUNTDOWN", TransactionType::Debit, category.id, None, None)
                .unwrap(),
            &connection,
        )
        .unwrap();

        AutoTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_auto_transaction_and_shows_toast() {
        let state = get_test_state();

        let response = delete_auto_transaction_endpoint(Path(1), State(state.clone())).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Rule deleted"), "got {text:?}");
        assert_eq!(
            get_auto_transaction(1, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn deleting_missing_auto_transaction_shows_error_message() {
        let state = get_test_state();

        let response = delete_auto_transaction_endpoint(Path(999), State(state)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("tried to delete a rule that is not in the database"),
            "got {text:?}"
        );
    }
}
