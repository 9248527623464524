//! Dimensional filtering for reports.

use buildbook_shared::types::{ClientId, ProjectId};
use serde::{Deserialize, Serialize};

use super::types::{ExpenseCategory, ExpenseRecord, ProjectRecord};

/// Optional report dimensions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Only this project.
    pub project_id: Option<ProjectId>,
    /// Only projects of this client.
    pub client_id: Option<ClientId>,
    /// Only expenses of this category.
    pub category: Option<ExpenseCategory>,
    /// Only expenses with an item of this material (case-insensitive).
    pub material: Option<String>,
}

impl ReportFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts to one client's projects.
    #[must_use]
    pub const fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restricts expenses to one category.
    #[must_use]
    pub const fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts expenses to those carrying `material`. Blank names are ignored.
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        let material = material.into().trim().to_string();
        self.material = (!material.is_empty()).then_some(material);
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.client_id.is_none()
            && self.category.is_none()
            && self.material.is_none()
    }

    /// Project and client dimensions.
    #[must_use]
    pub fn matches_project(&self, project: &ProjectRecord) -> bool {
        self.project_id.is_none_or(|id| id == project.id)
            && self
                .client_id
                .is_none_or(|id| project.client_id == Some(id))
    }

    /// Category and material dimensions. The project set is checked separately.
    #[must_use]
    pub fn matches_expense(&self, expense: &ExpenseRecord) -> bool {
        if self.category.is_some_and(|c| c != expense.category) {
            return false;
        }
        match &self.material {
            None => true,
            Some(material) => {
                let wanted = material.to_lowercase();
                expense
                    .items
                    .iter()
                    .any(|item| item.material_name.trim().to_lowercase() == wanted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{ExpenseItem, ProjectStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn project(client_id: Option<ClientId>) -> ProjectRecord {
        ProjectRecord {
            id: ProjectId::new(),
            client_id,
            name: "Ruko Blok A".to_string(),
            status: ProjectStatus::Active,
            budget: dec!(1000),
            start_date: None,
            end_date: None,
        }
    }

    fn expense(category: ExpenseCategory, materials: &[&str]) -> ExpenseRecord {
        ExpenseRecord {
            id: buildbook_shared::types::ExpenseId::new(),
            project_id: ProjectId::new(),
            category,
            title: "Belanja".to_string(),
            quantity: None,
            unit_cost: None,
            amount: dec!(100),
            expense_date: NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            items: materials
                .iter()
                .map(|name| ExpenseItem {
                    material_name: (*name).to_string(),
                    quantity: dec!(1),
                    unit_price: dec!(10),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ReportFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches_project(&project(None)));
        assert!(filter.matches_expense(&expense(ExpenseCategory::Other, &[])));
    }

    #[test]
    fn test_client_filter() {
        let client = ClientId::new();
        let filter = ReportFilter::new().with_client(client);

        assert!(filter.matches_project(&project(Some(client))));
        assert!(!filter.matches_project(&project(Some(ClientId::new()))));
        assert!(!filter.matches_project(&project(None)));
    }

    #[test]
    fn test_project_filter() {
        let p = project(None);
        let filter = ReportFilter::new().with_project(p.id);

        assert!(filter.matches_project(&p));
        assert!(!filter.matches_project(&project(None)));
    }

    #[test]
    fn test_category_filter() {
        let filter = ReportFilter::new().with_category(ExpenseCategory::Labor);

        assert!(filter.matches_expense(&expense(ExpenseCategory::Labor, &[])));
        assert!(!filter.matches_expense(&expense(ExpenseCategory::Material, &[])));
    }

    #[test]
    fn test_material_filter_is_case_insensitive() {
        let filter = ReportFilter::new().with_material(" semen ");

        assert!(filter.matches_expense(&expense(ExpenseCategory::Material, &["Pasir", "Semen"])));
        assert!(!filter.matches_expense(&expense(ExpenseCategory::Material, &["Pasir"])));
        assert!(!filter.matches_expense(&expense(ExpenseCategory::Material, &[])));
    }

    #[test]
    fn test_material_filter_folds_non_ascii_case() {
        let filter = ReportFilter::new().with_material("ÉMAIL KERAMIK");

        assert!(filter.matches_expense(&expense(ExpenseCategory::Material, &["émail keramik"])));
        assert!(filter.matches_expense(&expense(ExpenseCategory::Material, &["Émail Keramik"])));
        assert!(!filter.matches_expense(&expense(ExpenseCategory::Material, &["email keramik"])));
    }

    #[test]
    fn test_blank_material_is_ignored() {
        assert!(ReportFilter::new().with_material("  ").is_empty());
    }
}
