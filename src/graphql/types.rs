use async_graphql::{ID, InputObject, SimpleObject};

use crate::{
    Error,
    auto_transaction::{AccountRef, AutoTransaction, AutoTransactionId, NewAutoTransaction},
    database_id::DatabaseId,
};

/// The account a rule is limited to.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "Account")]
pub struct AccountObject {
    pub id: ID,
    pub name: String,
}

impl From<AccountRef> for AccountObject {
    fn from(account: AccountRef) -> Self {
        Self {
            id: ID(account.id.to_string()),
            name: account.name,
        }
    }
}

/// A rule that assigns a category to matching transactions.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "AutoTransaction")]
pub struct AutoTransactionObject {
    pub id: ID,
    /// The transaction description to match.
    pub description: String,
    /// Either `debit` or `credit`.
    pub transaction_type: String,
    pub category_id: ID,
    /// The amount to match, `null` matches any amount.
    pub amount: Option<f64>,
    /// The account to match, `null` matches any account.
    pub account: Option<AccountObject>,
}

impl From<AutoTransaction> for AutoTransactionObject {
    fn from(auto_transaction: AutoTransaction) -> Self {
        Self {
            id: ID(auto_transaction.id.to_string()),
            description: auto_transaction.description,
            transaction_type: auto_transaction.transaction_type.to_string(),
            category_id: ID(auto_transaction.category_id.to_string()),
            amount: auto_transaction.amount,
            account: auto_transaction.account.map(AccountObject::from),
        }
    }
}

/// The new fields for an existing rule.
///
/// An `amount` of zero is stored as `null`.
#[derive(Debug, InputObject)]
pub struct AutoTransactionInput {
    pub id: ID,
    pub description: String,
    pub category_id: ID,
    pub amount: Option<f64>,
    pub transaction_type: String,
    pub account_id: Option<ID>,
}

impl AutoTransactionInput {
    /// Validate the input, returning the ID of the rule to update and its new fields.
    pub fn into_update(self) -> Result<(AutoTransactionId, NewAutoTransaction), Error> {
        let id = parse_id(&self.id)?;
        let account_id = self.account_id.as_ref().map(parse_id).transpose()?;
        let auto_transaction = NewAutoTransaction::new(
            &self.description,
            self.transaction_type.parse()?,
            parse_id(&self.category_id)?,
            self.amount,
            account_id,
        )?;

        Ok((id, auto_transaction))
    }
}

pub fn parse_id(id: &ID) -> Result<DatabaseId, Error> {
    id.parse().map_err(|_| Error::InvalidId(id.to_string()))
}
