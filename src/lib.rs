//! Auto Transactions is a web app for managing the rules that automatically
//! categorise transactions in a personal finance ledger.
//!
//! A rule (an "auto transaction") matches a transaction description, type,
//! and optionally an amount and account, to a category.
//!
//! This library provides HTML pages driven by HTMX and a GraphQL endpoint for
//! updating and deleting rules.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod auto_transaction;
mod category;
mod database_id;
mod db;
mod endpoints;
mod graphql;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use account::{Account, AccountId, create_account};
pub use app_state::AppState;
pub use auto_transaction::{
    AutoTransaction, AutoTransactionId, NewAutoTransaction, TransactionType,
    create_auto_transaction,
};
pub use category::{Category, CategoryId, create_category};
pub use db::initialize as initialize_db;
pub use graphql::{AutoTransactionSchema, build_schema};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An empty (or whitespace only) string was used as the matching description.
    #[error("Description cannot be empty")]
    EmptyDescription,

    /// The transaction type was not one of the known types.
    #[error("\"{0}\" is not a valid transaction type, expected \"debit\" or \"credit\"")]
    InvalidTransactionType(String),

    /// A string could not be parsed as a database ID.
    #[error("\"{0}\" is not a valid ID")]
    InvalidId(String),

    /// The category or account referenced by a rule does not exist.
    #[error("the selected category or account does not exist")]
    InvalidReference,

    /// Tried to update an auto transaction that does not exist
    #[error("tried to update a rule that is not in the database")]
    UpdateMissingAutoTransaction,

    /// Tried to delete an auto transaction that does not exist
    #[error("tried to delete a rule that is not in the database")]
    DeleteMissingAutoTransaction,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::InvalidReference
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Whether the error is a fault of the server rather than the request.
    ///
    /// Internal errors are logged where they occur, so callers only need to
    /// log the remaining errors at a lower level.
    fn is_internal(&self) -> bool {
        matches!(self, Error::SqlError(_) | Error::DatabaseLockError)
    }

    /// Render the error as a toast alert.
    ///
    /// Errors caused by the client's input show the raw error message, while
    /// internal errors are replaced with a generic message.
    fn into_alert_response(self) -> Response {
        if self.is_internal() {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details: "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                },
            )
                .into_response();
        }

        let status_code = match self {
            Error::NotFound
            | Error::UpdateMissingAutoTransaction
            | Error::DeleteMissingAutoTransaction => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status_code,
            Alert::ErrorSimple {
                message: self.to_string(),
            },
        )
            .into_response()
    }
}
