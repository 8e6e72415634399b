//! The GraphQL API for reading, updating and deleting auto transactions.
//!
//! `GET /graphql` serves the GraphQL Playground and `POST /graphql` executes
//! requests against [AutoTransactionSchema].

mod errors;
mod mutation;
mod query;
mod types;

use std::sync::{Arc, Mutex};

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, Schema,
    http::{GraphQLPlaygroundConfig, playground_source},
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use rusqlite::Connection;

use crate::{Error, endpoints};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// The schema served at [endpoints::GRAPHQL].
pub type AutoTransactionSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema, giving resolvers access to `db_connection`.
pub fn build_schema(db_connection: Arc<Mutex<Connection>>) -> AutoTransactionSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db_connection)
        .finish()
}

/// Route handler that executes GraphQL requests.
pub async fn graphql_handler(
    State(schema): State<AutoTransactionSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// Route handler for the GraphQL Playground.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new(
        endpoints::GRAPHQL,
    )))
}

/// Run `operation` with the database connection from the schema's data.
fn with_connection<T>(
    ctx: &Context<'_>,
    operation: impl FnOnce(&Connection) -> Result<T, Error>,
) -> async_graphql::Result<T> {
    let db_connection = ctx.data::<Arc<Mutex<Connection>>>()?;
    let connection = db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError.extend()
    })?;

    operation(&connection).map_err(|error| error.extend())
}
