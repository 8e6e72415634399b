use maud::{Markup, html};

use crate::{
    account::{Account, AccountId},
    auto_transaction::models::TransactionType,
    category::{Category, CategoryId},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The values to pre-populate the auto transaction form with.
#[derive(Debug, Default)]
pub struct AutoTransactionFormDefaults<'a> {
    pub description: Option<&'a str>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<CategoryId>,
    pub amount: Option<f64>,
    pub account_id: Option<AccountId>,
}

/// The inputs shared by the create page and the edit dialog.
pub fn auto_transaction_form_fields(
    defaults: &AutoTransactionFormDefaults<'_>,
    available_categories: &[Category],
    available_accounts: &[Account],
) -> Markup {
    let amount_str = defaults.amount.map(|amount| amount.to_string());

    html! {
        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                id="description"
                type="text"
                name="description"
                placeholder="e.g., COUNTDOWN"
                value=[defaults.description]
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);

            p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "Transactions with this description will be assigned the category below"
            }
        }

        div
        {
            label
                for="transaction_type"
                class=(FORM_LABEL_STYLE)
            {
                "Type"
            }

            select
                id="transaction_type"
                name="transaction_type"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for transaction_type in TransactionType::ALL {
                    option
                        value=(transaction_type.as_str())
                        selected[defaults.transaction_type == Some(transaction_type)]
                    {
                        (transaction_type.label())
                    }
                }
            }
        }

        div
        {
            label
                for="category_id"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                id="category_id"
                name="category_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @if defaults.category_id.is_none() {
                    option value="" { "Select a category" }
                }

                @for category in available_categories {
                    option
                        value=(category.id)
                        selected[defaults.category_id == Some(category.id)]
                    {
                        (category.name)
                    }
                }
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="any"
                    placeholder="Any amount"
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
            {
                "Leave blank or set to zero to match any amount"
            }
        }

        div
        {
            label
                for="account_id"
                class=(FORM_LABEL_STYLE)
            {
                "Account"
            }

            select
                id="account_id"
                name="account_id"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" selected[defaults.account_id.is_none()] { "No account" }

                @for account in available_accounts {
                    option
                        value=(account.id)
                        selected[defaults.account_id == Some(account.id)]
                    {
                        (account.name)
                    }
                }
            }
        }
    }
}
