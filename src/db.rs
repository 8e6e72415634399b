//! Database initialization.

use rusqlite::Connection;

use crate::{
    Error, account::create_account_table, auto_transaction::create_auto_transaction_table,
    category::create_category_table,
};

/// Create the application's tables if they do not exist and enable foreign
/// key enforcement for `connection`.
///
/// # Errors
/// Returns an error if any of the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = connection.unchecked_transaction()?;

    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_auto_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
