use async_graphql::{Context, ID, Object};

use crate::{
    auto_transaction::{delete_auto_transaction, update_auto_transaction},
    graphql::{
        types::{AutoTransactionInput, AutoTransactionObject, parse_id},
        with_connection,
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Replace the fields of an existing rule and return the stored rule.
    async fn update_auto_transaction(
        &self,
        ctx: &Context<'_>,
        auto_transaction: AutoTransactionInput,
    ) -> async_graphql::Result<AutoTransactionObject> {
        with_connection(ctx, |connection| {
            let (id, auto_transaction) = auto_transaction.into_update()?;
            let updated = update_auto_transaction(id, &auto_transaction, connection)?;

            tracing::info!("Updated auto transaction #{id} through GraphQL");

            Ok(updated.into())
        })
    }

    /// Delete a rule, returns `true` on success.
    async fn delete_auto_transaction(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<bool> {
        with_connection(ctx, |connection| {
            let id = parse_id(&id)?;
            delete_auto_transaction(id, connection)?;

            tracing::info!("Deleted auto transaction #{id} through GraphQL");

            Ok(true)
        })
    }
}
