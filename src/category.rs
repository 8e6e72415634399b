//! Categories that auto transactions assign to matching transactions.

use rusqlite::{Connection, Row};

use crate::{Error, database_id::DatabaseId};

/// The ID of a category in the database.
pub type CategoryId = DatabaseId;

/// A category for grouping transactions, e.g. "Groceries".
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// The id for the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
}

pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
        (),
    )?;

    Ok(())
}

/// Create a category in the database.
///
/// # Errors
/// This function will return an error if there is an SQL error, e.g. if a
/// category with the same name already exists.
pub fn create_category(name: &str, connection: &Connection) -> Result<Category, Error> {
    connection.execute("INSERT INTO category (name) VALUES (?1)", (name,))?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
    })
}

/// Retrieve all categories ordered by name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC")?
        .query_map([], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;

    Ok(Category { id, name })
}
