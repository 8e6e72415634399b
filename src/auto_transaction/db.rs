use rusqlite::{Connection, Row};

use crate::{
    Error,
    auto_transaction::{
        models::{AccountRef, AutoTransaction, AutoTransactionId, NewAutoTransaction},
        sort::SortExpression,
    },
};

const SELECT_AUTO_TRANSACTION: &str = "SELECT a.id, a.description, a.transaction_type, \
    a.category_id, a.amount, acc.id, acc.name \
    FROM auto_transaction a \
    LEFT JOIN account acc ON a.account_id = acc.id";

/// Create an auto transaction in the database.
///
/// # Errors
/// This function will return an error if there is an SQL error or
/// [Error::InvalidReference] if the category or account does not exist.
pub fn create_auto_transaction(
    auto_transaction: &NewAutoTransaction,
    connection: &Connection,
) -> Result<AutoTransaction, Error> {
    connection.execute(
        "INSERT INTO auto_transaction (description, transaction_type, category_id, amount, account_id)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            auto_transaction.description(),
            auto_transaction.transaction_type(),
            auto_transaction.category_id(),
            auto_transaction.amount(),
            auto_transaction.account_id(),
        ),
    )?;

    get_auto_transaction(connection.last_insert_rowid(), connection)
}

/// Retrieve an auto transaction, with its account, by `id`.
///
/// # Errors
/// This function will return [Error::NotFound] if there is no auto transaction
/// with `id`, or an error if there is an SQL error.
pub(crate) fn get_auto_transaction(
    id: AutoTransactionId,
    connection: &Connection,
) -> Result<AutoTransaction, Error> {
    connection
        .prepare(&format!("{SELECT_AUTO_TRANSACTION} WHERE a.id = :id;"))?
        .query_row(&[(":id", &id)], map_auto_transaction_row)
        .map_err(Error::from)
}

/// Retrieve all auto transactions ordered by `sort`.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub(crate) fn get_all_auto_transactions(
    sort: &SortExpression,
    connection: &Connection,
) -> Result<Vec<AutoTransaction>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_AUTO_TRANSACTION} ORDER BY {};",
            sort.order_by_sql()
        ))?
        .query_map([], map_auto_transaction_row)?
        .map(|maybe_auto_transaction| maybe_auto_transaction.map_err(Error::from))
        .collect()
}

/// Replace the fields of the auto transaction with `id`.
///
/// # Errors
/// This function will return [Error::UpdateMissingAutoTransaction] if the
/// auto transaction doesn't exist, [Error::InvalidReference] if the category
/// or account does not exist, or an error if there is an SQL error.
pub(crate) fn update_auto_transaction(
    id: AutoTransactionId,
    auto_transaction: &NewAutoTransaction,
    connection: &Connection,
) -> Result<AutoTransaction, Error> {
    let rows_affected = connection.execute(
        "UPDATE auto_transaction
         SET description = ?1, transaction_type = ?2, category_id = ?3, amount = ?4, account_id = ?5
         WHERE id = ?6",
        (
            auto_transaction.description(),
            auto_transaction.transaction_type(),
            auto_transaction.category_id(),
            auto_transaction.amount(),
            auto_transaction.account_id(),
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingAutoTransaction);
    }

    get_auto_transaction(id, connection)
}

/// Delete an auto transaction from the database.
///
/// # Errors
/// This function will return [Error::DeleteMissingAutoTransaction] if the
/// auto transaction doesn't exist, or an error if there is an SQL error.
pub(crate) fn delete_auto_transaction(
    id: AutoTransactionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM auto_transaction WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingAutoTransaction);
    }

    Ok(())
}

pub fn create_auto_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS auto_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                transaction_type TEXT NOT NULL CHECK (transaction_type IN ('debit', 'credit')),
                category_id INTEGER NOT NULL,
                amount REAL,
                account_id INTEGER,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE SET NULL
            );",
        (),
    )?;

    // Create indexes for foreign keys to improve query performance
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_auto_transaction_category_id ON auto_transaction(category_id)",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_auto_transaction_account_id ON auto_transaction(account_id)",
        (),
    )?;

    Ok(())
}

fn map_auto_transaction_row(row: &Row) -> Result<AutoTransaction, rusqlite::Error> {
    let id = row.get(0)?;
    let description = row.get(1)?;
    let transaction_type = row.get(2)?;
    let category_id = row.get(3)?;
    let amount = row.get(4)?;
    let account_id: Option<_> = row.get(5)?;
    let account_name: Option<String> = row.get(6)?;

    let account = match (account_id, account_name) {
        (Some(id), Some(name)) => Some(AccountRef { id, name }),
        _ => None,
    };

    Ok(AutoTransaction {
        id,
        description,
        transaction_type,
        category_id,
        amount,
        account,
    })
}
