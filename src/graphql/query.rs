use async_graphql::{Context, ID, Object};

use crate::{
    Error,
    auto_transaction::{SortExpression, get_all_auto_transactions, get_auto_transaction},
    graphql::{
        types::{AutoTransactionObject, parse_id},
        with_connection,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All rules, ordered by a sort expression such as `"amount desc, id desc"`.
    ///
    /// Unknown sort expressions fall back to `"description asc, id asc"`.
    async fn auto_transactions(
        &self,
        ctx: &Context<'_>,
        sort: Option<String>,
    ) -> async_graphql::Result<Vec<AutoTransactionObject>> {
        let sort = SortExpression::from_query(sort.as_deref());

        with_connection(ctx, |connection| {
            let auto_transactions = get_all_auto_transactions(&sort, connection)?;

            Ok(auto_transactions
                .into_iter()
                .map(AutoTransactionObject::from)
                .collect())
        })
    }

    /// The rule with `id`, or `null` if there is no such rule.
    async fn auto_transaction(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<AutoTransactionObject>> {
        with_connection(ctx, |connection| {
            match get_auto_transaction(parse_id(&id)?, connection) {
                Ok(auto_transaction) => Ok(Some(auto_transaction.into())),
                Err(Error::NotFound) => Ok(None),
                Err(error) => Err(error),
            }
        })
    }
}
