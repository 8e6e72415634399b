use std::{
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;
use rusqlite::{
    Connection,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Deserializer};

use crate::{
    AppState, Error,
    account::AccountId,
    category::CategoryId,
    database_id::DatabaseId,
};

/// The ID of an auto transaction in the database.
pub type AutoTransactionId = DatabaseId;

/// Whether money leaves (debit) or enters (credit) an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Money leaving an account, e.g. a purchase.
    Debit,
    /// Money entering an account, e.g. a salary payment.
    Credit,
}

impl TransactionType {
    /// Every transaction type, in the order they are shown in forms.
    pub const ALL: [TransactionType; 2] = [TransactionType::Debit, TransactionType::Credit];

    /// The string stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
        }
    }

    /// The human readable name for forms.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Debit => "Debit",
            TransactionType::Credit => "Credit",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(TransactionType::Debit),
            "credit" => Ok(TransactionType::Credit),
            _ => Err(Error::InvalidTransactionType(s.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// The account an auto transaction is limited to.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRef {
    /// The ID of the account.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
}

/// A rule that maps transactions matching a description, type, and optionally
/// an amount and account, to a category.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoTransaction {
    /// The ID of the rule.
    pub id: AutoTransactionId,
    /// The text that transaction descriptions are matched against.
    pub description: String,
    /// The type of transaction the rule applies to.
    pub transaction_type: TransactionType,
    /// The category to assign to matching transactions.
    pub category_id: CategoryId,
    /// The amount a transaction must have to match, `None` matches any amount.
    pub amount: Option<f64>,
    /// The account a transaction must belong to, `None` matches any account.
    pub account: Option<AccountRef>,
}

/// The validated fields for creating or updating an [AutoTransaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAutoTransaction {
    description: String,
    transaction_type: TransactionType,
    category_id: CategoryId,
    amount: Option<f64>,
    account_id: Option<AccountId>,
}

impl NewAutoTransaction {
    /// Create the fields for an auto transaction.
    ///
    /// The description is trimmed and an amount of zero is treated as no amount.
    ///
    /// # Errors
    /// Returns [Error::EmptyDescription] if `description` is empty or only whitespace.
    pub fn new(
        description: &str,
        transaction_type: TransactionType,
        category_id: CategoryId,
        amount: Option<f64>,
        account_id: Option<AccountId>,
    ) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            description: description.to_owned(),
            transaction_type,
            category_id,
            amount: normalize_amount(amount),
            account_id,
        })
    }

    /// The trimmed matching description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The type of transaction to match.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The category to assign.
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// The amount to match, never zero.
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// The account to match.
    pub fn account_id(&self) -> Option<AccountId> {
        self.account_id
    }
}

/// An amount of zero means the rule matches any amount.
pub fn normalize_amount(amount: Option<f64>) -> Option<f64> {
    amount.filter(|amount| *amount != 0.0)
}

/// Unified state for all auto transaction route handlers.
#[derive(Debug, Clone)]
pub struct AutoTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AutoTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Form data for creating and editing auto transactions.
///
/// Optional fields are submitted as empty strings when left blank.
#[derive(Debug, Deserialize)]
pub struct AutoTransactionFormData {
    pub description: String,
    pub transaction_type: String,
    pub category_id: CategoryId,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub account_id: Option<AccountId>,
}

impl TryFrom<AutoTransactionFormData> for NewAutoTransaction {
    type Error = Error;

    fn try_from(form: AutoTransactionFormData) -> Result<Self, Self::Error> {
        NewAutoTransaction::new(
            &form.description,
            form.transaction_type.parse()?,
            form.category_id,
            form.amount,
            form.account_id,
        )
    }
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let maybe_text = Option::<String>::deserialize(deserializer)?;

    match maybe_text.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
