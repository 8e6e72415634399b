use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use auto_transactions::{
    NewAutoTransaction, TransactionType, create_account, create_auto_transaction, create_category,
    initialize_db,
};

/// A utility for creating a test database for the auto transactions server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test accounts and categories...");

    let everyday = create_account("Everyday", &conn)?;
    let credit_card = create_account("Credit Card", &conn)?;

    let groceries = create_category("Groceries", &conn)?;
    let transport = create_category("Transport", &conn)?;
    let salary = create_category("Salary", &conn)?;
    let subscriptions = create_category("Subscriptions", &conn)?;

    println!("Creating test rules...");

    let rules = [
        ("COUNTDOWN", TransactionType::Debit, groceries.id, None, None),
        (
            "PAK N SAVE",
            TransactionType::Debit,
            groceries.id,
            None,
            Some(everyday.id),
        ),
        ("AT HOP", TransactionType::Debit, transport.id, None, None),
        (
            "ACME LTD PAYROLL",
            TransactionType::Credit,
            salary.id,
            None,
            Some(everyday.id),
        ),
        (
            "NETFLIX",
            TransactionType::Debit,
            subscriptions.id,
            Some(22.99),
            Some(credit_card.id),
        ),
        (
            "SPOTIFY",
            TransactionType::Debit,
            subscriptions.id,
            Some(16.99),
            Some(credit_card.id),
        ),
    ];

    for (description, transaction_type, category_id, amount, account_id) in rules {
        let rule =
            NewAutoTransaction::new(description, transaction_type, category_id, amount, account_id)?;
        create_auto_transaction(&rule, &conn)?;
    }

    println!("Success!");

    Ok(())
}
