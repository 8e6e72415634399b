//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    graphql::{AutoTransactionSchema, build_schema},
};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The GraphQL schema, which shares the database connection.
    pub graphql_schema: AutoTransactionSchema,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            graphql_schema: build_schema(connection.clone()),
            db_connection: connection,
        })
    }
}

impl FromRef<AppState> for AutoTransactionSchema {
    fn from_ref(state: &AppState) -> Self {
        state.graphql_schema.clone()
    }
}
