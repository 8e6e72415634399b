//! Bank accounts and credit cards that an auto transaction may be limited to.

use rusqlite::{Connection, Row};

use crate::{Error, database_id::DatabaseId};

/// The ID of an account in the database.
pub type AccountId = DatabaseId;

/// A bank account or credit card.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name of the account, e.g. "Everyday".
    pub name: String,
}

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

/// Create an account in the database.
///
/// # Errors
/// This function will return an error if there is an SQL error, e.g. if an
/// account with the same name already exists.
pub fn create_account(name: &str, connection: &Connection) -> Result<Account, Error> {
    connection.execute("INSERT INTO account (name) VALUES (?1)", (name,))?;

    Ok(Account {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
    })
}

/// Retrieve all accounts ordered by name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare("SELECT id, name FROM account ORDER BY name ASC")?
        .query_map([], map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;

    Ok(Account { id, name })
}
