use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    alert::ALERT_CONTAINER_ID,
    auto_transaction::{
        db::get_all_auto_transactions,
        models::{AutoTransaction, AutoTransactionId, AutoTransactionState},
        sort::{SortColumn, SortExpression, is_descending, is_sorted_by, toggle_sort},
    },
    endpoints::{self, format_endpoint, with_sort_query},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_EDIT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles,
        format_currency,
    },
    navigation::NavBar,
};

/// The element the edit dialog is loaded into.
pub(super) const DIALOG_CONTAINER_ID: &str = "dialog-container";

const SORTABLE_HEADERS: [(SortColumn, &str); 5] = [
    (SortColumn::Description, "Matching Description"),
    (SortColumn::TransactionType, "Matching Type"),
    (SortColumn::CategoryId, "Matching category"),
    (SortColumn::Amount, "Matching amount"),
    (SortColumn::AccountName, "Account"),
];

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    sort: Option<String>,
}

/// Route handler for the auto transactions table.
pub async fn get_auto_transactions_page(
    State(state): State<AutoTransactionState>,
    Query(query): Query<SortQuery>,
) -> Result<Response, Error> {
    let sort = SortExpression::from_query(query.sort.as_deref());

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let auto_transactions = get_all_auto_transactions(&sort, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve auto transactions: {error}"))?;

    Ok(auto_transactions_view(&auto_transactions, &sort.to_string()).into_response())
}

fn auto_transactions_view(auto_transactions: &[AutoTransaction], current_sort: &str) -> Markup {
    let new_auto_transaction_route = endpoints::NEW_AUTO_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::AUTO_TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Auto Transactions" }

                    a href=(new_auto_transaction_route) class=(LINK_STYLE)
                    {
                        "Create Rule"
                    }
                }

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    span class="sr-only" { "Actions" }
                                }

                                @for (column, title) in SORTABLE_HEADERS {
                                    (sortable_header(column, title, current_sort))
                                }
                            }
                        }

                        tbody
                        {
                            @for auto_transaction in auto_transactions {
                                (auto_transaction_row(auto_transaction, false))
                            }

                            @if auto_transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="6"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No rules created yet. "
                                        a href=(new_auto_transaction_route) class=(LINK_STYLE)
                                        {
                                            "Create your first rule"
                                        }
                                        "."
                                    }
                                }
                            }
                        }
                    }
                }

                div id=(DIALOG_CONTAINER_ID) {}
            }
        }
    );

    base("Auto Transactions", &[dollar_input_styles()], &content)
}

fn sortable_header(column: SortColumn, title: &str, current_sort: &str) -> Markup {
    let key = column.key();
    let href = with_sort_query(endpoints::AUTO_TRANSACTIONS_VIEW, &toggle_sort(current_sort, key));
    let (arrow, aria_sort) = match (is_sorted_by(current_sort, key), is_descending(current_sort)) {
        (false, _) => (None, None),
        (true, true) => (Some("↓"), Some("descending")),
        (true, false) => (Some("↑"), Some("ascending")),
    };

    html! {
        th
            scope="col"
            class=(TABLE_CELL_STYLE)
            aria-sort=[aria_sort]
        {
            a href=(href) class="inline-flex items-center gap-1 hover:underline"
            {
                (title)

                @if let Some(arrow) = arrow {
                    span aria-hidden="true" { (arrow) }
                }
            }
        }
    }
}

/// The HTML id of the table row for the auto transaction with `id`.
pub(super) fn row_id(id: AutoTransactionId) -> String {
    format!("auto-transaction-{id}")
}

/// A table row for `auto_transaction`.
///
/// Set `oob` to replace the existing row with the same id in an out-of-band swap.
pub(super) fn auto_transaction_row(auto_transaction: &AutoTransaction, oob: bool) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_AUTO_TRANSACTION_VIEW, auto_transaction.id);
    let delete_url = format_endpoint(endpoints::DELETE_AUTO_TRANSACTION, auto_transaction.id);
    let amount = auto_transaction.amount.map(format_currency);
    let account_name = auto_transaction
        .account
        .as_ref()
        .map(|account| account.name.as_str());

    html!(
        tr
            id=(row_id(auto_transaction.id))
            class=(TABLE_ROW_STYLE)
            hx-swap-oob=[oob.then_some("true")]
        {
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    button
                        type="button"
                        hx-get=(edit_url)
                        hx-target={ "#" (DIALOG_CONTAINER_ID) }
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                        class=(BUTTON_EDIT_STYLE)
                    {
                        "Edit"
                    }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm={
                            "Are you sure you want to delete the rule '"
                            (auto_transaction.description) "'?"
                        }
                        hx-target="closest tr"
                        hx-swap="delete"
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                code class="bg-gray-100 dark:bg-gray-700 px-2.5 py-0.5 rounded-sm text-xs"
                {
                    (auto_transaction.description)
                }
            }

            td class=(TABLE_CELL_STYLE) { (auto_transaction.transaction_type.label()) }

            td class=(TABLE_CELL_STYLE) { (auto_transaction.category_id) }

            td class="px-6 py-4 text-right tabular-nums"
            {
                @if let Some(amount) = amount {
                    (amount)
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(account_name) = account_name {
                    (account_name)
                }
            }
        }
    )
}
