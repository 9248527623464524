//! Line-item expansion for the financial report.

use buildbook_shared::types::ExpenseId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::types::{ExpenseCategory, ExpenseRecord};

/// One printable row of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    /// Source expense.
    pub expense_id: ExpenseId,
    /// Expense date.
    pub date: NaiveDateTime,
    /// Expense title.
    pub description: String,
    /// Material name; `None` for expenses without items.
    pub material_name: Option<String>,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// Row amount.
    pub amount: Decimal,
    /// Expense category.
    pub category: ExpenseCategory,
}

/// Expands an expense into report rows.
///
/// Every item becomes one row with `amount = quantity × unit_price`. An
/// expense without items yields exactly one row built from its own title and
/// amount. Its stored quantity and unit cost are shown only when both are
/// present; otherwise the row reads `1 × amount`.
///
/// # Errors
///
/// Returns [`LedgerError::Overflow`] if an item amount leaves the decimal range.
pub fn expand_expense(expense: &ExpenseRecord) -> Result<Vec<ExpenseLine>, LedgerError> {
    if expense.items.is_empty() {
        let (quantity, unit_price) = match (expense.quantity, expense.unit_cost) {
            (Some(quantity), Some(unit_cost)) => (quantity, unit_cost),
            _ => (Decimal::ONE, expense.amount),
        };
        return Ok(vec![ExpenseLine {
            expense_id: expense.id,
            date: expense.expense_date,
            description: expense.title.clone(),
            material_name: None,
            quantity,
            unit_price,
            amount: expense.amount,
            category: expense.category,
        }]);
    }

    expense
        .items
        .iter()
        .map(|item| {
            Ok(ExpenseLine {
                expense_id: expense.id,
                date: expense.expense_date,
                description: expense.title.clone(),
                material_name: Some(item.material_name.clone()),
                quantity: item.quantity,
                unit_price: item.unit_price,
                amount: item.amount()?,
                category: expense.category,
            })
        })
        .collect()
}
