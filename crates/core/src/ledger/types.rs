//! Ledger record types.

use std::fmt;
use std::str::FromStr;

use buildbook_shared::types::{
    AssetId, ClientId, DepositId, ExpenseId, InstallmentId, ProjectId, TenantId,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked;
use super::error::LedgerError;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    /// Building materials.
    Material,
    /// Wages.
    Labor,
    /// Equipment rental or purchase.
    Equipment,
    /// Subcontracted work.
    Subcontract,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// All categories in report order.
    pub const ALL: [Self; 5] = [
        Self::Material,
        Self::Labor,
        Self::Equipment,
        Self::Subcontract,
        Self::Other,
    ];

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "MATERIAL",
            Self::Labor => "LABOR",
            Self::Equipment => "EQUIPMENT",
            Self::Subcontract => "SUBCONTRACT",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown expense category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Not started.
    Planning,
    /// In progress.
    Active,
    /// Paused.
    OnHold,
    /// Finished.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "PLANNING",
            Self::Active => "ACTIVE",
            Self::OnHold => "ON_HOLD",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset category on the balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    /// Long-lived assets.
    Fixed,
    /// Short-lived assets.
    Current,
}

/// A non-deleted project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project ID.
    pub id: ProjectId,
    /// Owning client, if any.
    pub client_id: Option<ClientId>,
    /// Display name.
    pub name: String,
    /// Status.
    pub status: ProjectStatus,
    /// Contract value.
    pub budget: Decimal,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned end.
    pub end_date: Option<NaiveDate>,
}

/// One material line of an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Material name as entered.
    pub material_name: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
}

impl ExpenseItem {
    /// `quantity × unit_price`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the product leaves the decimal range.
    pub fn amount(&self) -> Result<Decimal, LedgerError> {
        checked::mul("item amount", self.quantity, self.unit_price)
    }
}

/// A non-deleted expense with its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID.
    pub id: ExpenseId,
    /// Project charged.
    pub project_id: ProjectId,
    /// Category.
    pub category: ExpenseCategory,
    /// Short description.
    pub title: String,
    /// Quantity for expenses without items.
    pub quantity: Option<Decimal>,
    /// Unit cost for expenses without items.
    pub unit_cost: Option<Decimal>,
    /// Stored amount.
    pub amount: Decimal,
    /// When the expense was incurred.
    pub expense_date: NaiveDateTime,
    /// Material lines.
    pub items: Vec<ExpenseItem>,
}

impl ExpenseRecord {
    /// Effective amount: the sum of the items when there are any, the stored
    /// amount otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if an item amount or their sum
    /// leaves the decimal range.
    pub fn total(&self) -> Result<Decimal, LedgerError> {
        if self.items.is_empty() {
            Ok(self.amount)
        } else {
            checked::try_sum("expense total", self.items.iter().map(ExpenseItem::amount))
        }
    }
}

/// Money received against a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRecord {
    /// Deposit ID.
    pub id: DepositId,
    /// Project credited.
    pub project_id: ProjectId,
    /// Amount (> 0).
    pub amount: Decimal,
    /// Payment timestamp.
    pub paid_at: NaiveDateTime,
    /// Receipt number.
    pub receipt_number: Option<String>,
    /// Free-form reference.
    pub reference: Option<String>,
    /// Payment method.
    pub payment_method: Option<String>,
}

/// A scheduled payment. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    /// Installment ID.
    pub id: InstallmentId,
    /// Project.
    pub project_id: ProjectId,
    /// Label, e.g. "Termin 1".
    pub label: String,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Position in the schedule.
    pub sort_order: i32,
}

/// A company asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Asset ID.
    pub id: AssetId,
    /// Name.
    pub name: String,
    /// Category.
    pub category: AssetCategory,
    /// Acquisition cost.
    pub cost: Decimal,
}

/// Every record a report needs for one tenant.
///
/// Callers load it through the tenant-scoped accessor; nothing in here can
/// belong to another tenant.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    /// Tenant the records belong to.
    pub tenant_id: TenantId,
    /// Non-deleted projects.
    pub projects: Vec<ProjectRecord>,
    /// Non-deleted expenses of non-deleted projects.
    pub expenses: Vec<ExpenseRecord>,
    /// Deposits of non-deleted projects.
    pub deposits: Vec<DepositRecord>,
    /// Installments of non-deleted projects.
    pub installments: Vec<InstallmentRecord>,
    /// Non-deleted assets.
    pub assets: Vec<AssetRecord>,
}

impl LedgerSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn empty(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            projects: Vec::new(),
            expenses: Vec::new(),
            deposits: Vec::new(),
            installments: Vec::new(),
            assets: Vec::new(),
        }
    }
}
