//! Sort expressions for the auto transactions table.
//!
//! A sort expression has the form `"<column> <dir>, id <dir>"`, where the
//! trailing `id` term breaks ties between rows with equal values in `<column>`.

use std::fmt::Display;

/// The columns the auto transactions table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Description,
    TransactionType,
    CategoryId,
    Amount,
    AccountName,
}

impl SortColumn {
    /// The key used for the column in sort expressions.
    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::Description => "description",
            SortColumn::TransactionType => "transaction_type",
            SortColumn::CategoryId => "category_id",
            SortColumn::Amount => "amount",
            SortColumn::AccountName => "account.account_name",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "description" => Some(SortColumn::Description),
            "transaction_type" => Some(SortColumn::TransactionType),
            "category_id" => Some(SortColumn::CategoryId),
            "amount" => Some(SortColumn::Amount),
            "account.account_name" => Some(SortColumn::AccountName),
            _ => None,
        }
    }

    /// The SQL column to order by, see [get_all_auto_transactions](super::db::get_all_auto_transactions)
    /// for the table aliases.
    pub(super) fn sql_column(&self) -> &'static str {
        match self {
            SortColumn::Description => "a.description",
            SortColumn::TransactionType => "a.transaction_type",
            SortColumn::CategoryId => "a.category_id",
            SortColumn::Amount => "a.amount",
            SortColumn::AccountName => "acc.name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    fn from_keyword(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub(super) fn sql_keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// A parsed sort expression, e.g. `"amount desc, id desc"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortExpression {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortExpression {
    fn default() -> Self {
        Self {
            column: SortColumn::Description,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortExpression {
    /// Parse a sort expression of the form `"<column> <dir>, id <dir>"`.
    ///
    /// Only the first term decides the order, the database always breaks ties
    /// by ID in the same direction. The direction may be omitted, in which
    /// case it is ascending.
    ///
    /// Returns `None` if the column or direction is not recognised.
    pub fn parse(text: &str) -> Option<Self> {
        let first_term = text.split(',').next()?;
        let mut words = first_term.split_whitespace();

        let column = SortColumn::from_key(words.next()?)?;
        let direction = match words.next() {
            Some(direction) => SortDirection::from_keyword(direction)?,
            None => SortDirection::Ascending,
        };

        if words.next().is_some() {
            return None;
        }

        Some(Self { column, direction })
    }

    /// Parse the sort expression from a query parameter, falling back to the
    /// default order if it is missing or invalid.
    pub fn from_query(sort: Option<&str>) -> Self {
        match sort {
            Some(text) => Self::parse(text).unwrap_or_else(|| {
                tracing::debug!("Ignoring invalid sort expression {text:?}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// The SQL `ORDER BY` terms for the expression.
    pub(super) fn order_by_sql(&self) -> String {
        let direction = self.direction.sql_keyword();

        format!(
            "{} {direction}, a.id {direction}",
            self.column.sql_column()
        )
    }
}

impl Display for SortExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = self.direction.as_str();

        write!(f, "{} {direction}, id {direction}", self.column.key())
    }
}

/// Whether the table is currently sorted in descending order.
pub fn is_descending(current: &str) -> bool {
    current.contains(" desc")
}

/// Whether the table is currently sorted by the column with `column_key`.
pub fn is_sorted_by(current: &str, column_key: &str) -> bool {
    current.starts_with(column_key)
}

/// The sort expression to use after the header for `clicked_key` is clicked
/// while the table is sorted by `current`.
///
/// Clicking the sorted column flips the direction. Clicking another column
/// sorts by that column and keeps the current direction.
pub fn toggle_sort(current: &str, clicked_key: &str) -> String {
    let same_column = is_sorted_by(current, clicked_key);
    let new_direction = if same_column == is_descending(current) {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    }
    .as_str();

    format!("{clicked_key} {new_direction}, id {new_direction}")
}

#[cfg(test)]
mod tests {
    use super::{SortColumn, SortDirection, SortExpression, is_sorted_by, toggle_sort};

    #[test]
    fn clicking_sorted_ascending_column_sorts_descending() {
        let got = toggle_sort("description asc, id asc", "description");

        assert_eq!(got, "description desc, id desc");
    }

    #[test]
    fn clicking_sorted_descending_column_sorts_ascending() {
        let got = toggle_sort("amount desc, id desc", "amount");

        assert_eq!(got, "amount asc, id asc");
    }

    #[test]
    fn clicking_other_column_keeps_ascending_direction() {
        let got = toggle_sort("description asc, id asc", "category_id");

        assert_eq!(got, "category_id asc, id asc");
    }

    #[test]
    fn clicking_other_column_keeps_descending_direction() {
        let got = toggle_sort("description desc, id desc", "account.account_name");

        assert_eq!(got, "account.account_name desc, id desc");
    }

    #[test]
    fn clicking_column_with_empty_sort_sorts_ascending() {
        let got = toggle_sort("", "transaction_type");

        assert_eq!(got, "transaction_type asc, id asc");
    }

    #[test]
    fn sorted_column_is_matched_by_prefix() {
        assert!(is_sorted_by("amount desc, id desc", "amount"));
        assert!(!is_sorted_by("amount desc, id desc", "account.account_name"));
    }

    #[test]
    fn parses_expression() {
        let got = SortExpression::parse("account.account_name desc, id desc");

        assert_eq!(
            got,
            Some(SortExpression {
                column: SortColumn::AccountName,
                direction: SortDirection::Descending,
            })
        );
    }

    #[test]
    fn parses_expression_without_direction() {
        let got = SortExpression::parse("amount");

        assert_eq!(
            got,
            Some(SortExpression {
                column: SortColumn::Amount,
                direction: SortDirection::Ascending,
            })
        );
    }

    #[test]
    fn rejects_unknown_column() {
        assert_eq!(SortExpression::parse("password asc, id asc"), None);
        assert_eq!(SortExpression::parse("amount; DROP TABLE account"), None);
        assert_eq!(SortExpression::parse("amount sideways"), None);
        assert_eq!(SortExpression::parse(""), None);
    }

    #[test]
    fn invalid_query_falls_back_to_default() {
        assert_eq!(
            SortExpression::from_query(Some("bogus")),
            SortExpression::default()
        );
        assert_eq!(SortExpression::from_query(None), SortExpression::default());
    }

    #[test]
    fn display_round_trips_toggled_expression() {
        let toggled = toggle_sort("description asc, id asc", "amount");

        let expression = SortExpression::parse(&toggled).expect("Could not parse expression");

        assert_eq!(expression.to_string(), toggled);
    }

    #[test]
    fn order_by_breaks_ties_by_id() {
        let expression = SortExpression {
            column: SortColumn::CategoryId,
            direction: SortDirection::Descending,
        };

        assert_eq!(expression.order_by_sql(), "a.category_id DESC, a.id DESC");
    }
}
