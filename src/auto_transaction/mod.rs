//! Auto transactions are rules that match a transaction's description, type,
//! and optionally its amount and account, and assign it a category.
//!
//! This module holds the rule store, the sortable table page, the edit dialog
//! and the create page.

mod create;
mod db;
mod delete;
mod edit;
mod form;
mod list;
mod models;
mod sort;

pub use create::{create_auto_transaction_endpoint, get_new_auto_transaction_page};
pub use db::{create_auto_transaction, create_auto_transaction_table};
pub use delete::delete_auto_transaction_endpoint;
pub use edit::{get_edit_auto_transaction_dialog, update_auto_transaction_endpoint};
pub use list::get_auto_transactions_page;
pub use models::{
    AccountRef, AutoTransaction, AutoTransactionId, NewAutoTransaction, TransactionType,
};
pub use sort::SortExpression;

pub(crate) use db::{
    delete_auto_transaction, get_all_auto_transactions, get_auto_transaction,
    update_auto_transaction,
};
