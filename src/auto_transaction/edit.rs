use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    account::{Account, get_all_accounts},
    alert::{ALERT_CONTAINER_ID, Alert},
    auto_transaction::{
        db::{get_auto_transaction, update_auto_transaction},
        form::{AutoTransactionFormDefaults, auto_transaction_form_fields},
        list::{DIALOG_CONTAINER_ID, auto_transaction_row},
        models::{
            AutoTransaction, AutoTransactionFormData, AutoTransactionId, AutoTransactionState,
            NewAutoTransaction,
        },
    },
    category::{Category, get_all_categories},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE},
};

/// Route handler for the edit dialog, responds with a dialog fragment
/// pre-populated with the auto transaction's fields.
pub async fn get_edit_auto_transaction_dialog(
    Path(auto_transaction_id): Path<AutoTransactionId>,
    State(state): State<AutoTransactionState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let dialog = get_auto_transaction(auto_transaction_id, &connection).and_then(|auto_transaction| {
        let categories = get_all_categories(&connection)?;
        let accounts = get_all_accounts(&connection)?;

        Ok(edit_dialog_view(&auto_transaction, &categories, &accounts))
    });

    match dialog {
        Ok(dialog) => dialog.into_response(),
        Err(error) => {
            tracing::debug!("Could not fetch auto transaction #{auto_transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for updating an auto transaction.
///
/// On success the dialog is cleared, the table row is replaced out-of-band and
/// a toast confirms the save.
pub async fn update_auto_transaction_endpoint(
    Path(auto_transaction_id): Path<AutoTransactionId>,
    State(state): State<AutoTransactionState>,
    Form(form_data): Form<AutoTransactionFormData>,
) -> Response {
    let auto_transaction = match NewAutoTransaction::try_from(form_data) {
        Ok(auto_transaction) => auto_transaction,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_auto_transaction(auto_transaction_id, &auto_transaction, &connection) {
        Ok(updated) => saved_view(&updated).into_response(),
        Err(error) => {
            tracing::debug!("Could not update auto transaction {auto_transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn saved_view(auto_transaction: &AutoTransaction) -> Markup {
    // Table rows must be wrapped in a template to be swapped out-of-band.
    html! {
        template
        {
            (auto_transaction_row(auto_transaction, true))
        }

        (Alert::SuccessSimple { message: "Saved".to_owned() }.into_oob_html())
    }
}

fn edit_dialog_view(
    auto_transaction: &AutoTransaction,
    available_categories: &[Category],
    available_accounts: &[Account],
) -> Markup {
    let update_endpoint =
        endpoints::format_endpoint(endpoints::PUT_AUTO_TRANSACTION, auto_transaction.id);
    let defaults = AutoTransactionFormDefaults {
        description: Some(&auto_transaction.description),
        transaction_type: Some(auto_transaction.transaction_type),
        category_id: Some(auto_transaction.category_id),
        amount: auto_transaction.amount,
        account_id: auto_transaction.account.as_ref().map(|account| account.id),
    };

    html! {
        div
            class="fixed inset-0 z-40 flex items-center justify-center bg-gray-900/50"
        {
            dialog
                open
                aria-labelledby="edit-dialog-title"
                class="relative w-full max-w-md p-6 rounded-lg shadow-lg
                    bg-white dark:bg-gray-800 text-gray-900 dark:text-white"
            {
                h2 id="edit-dialog-title" class="mb-4 text-lg font-bold"
                {
                    "Edit Rule"
                }

                form
                    hx-put=(update_endpoint)
                    hx-target={ "#" (DIALOG_CONTAINER_ID) }
                    hx-swap="innerHTML"
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    class="w-full space-y-4 md:space-y-6"
                {
                    (auto_transaction_form_fields(&defaults, available_categories, available_accounts))

                    div class="flex gap-4"
                    {
                        button
                            type="button"
                            data-close-dialog={ "#" (DIALOG_CONTAINER_ID) }
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Cancel"
                        }

                        button type="submit" class=(BUTTON_PRIMARY_STYLE)
                        {
                            "Save"
                        }
                    }
                }
            }
        }
    }
}
