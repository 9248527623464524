//! Snapshot builders shared by the unit tests.

use buildbook_shared::types::{
    AssetId, ClientId, DepositId, ExpenseId, InstallmentId, ProjectId, TenantId,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::ledger::{
    AssetCategory, AssetRecord, DepositRecord, ExpenseCategory, ExpenseItem, ExpenseRecord,
    InstallmentRecord, LedgerSnapshot, ProjectRecord, ProjectStatus,
};

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn noon(s: &str) -> NaiveDateTime {
    date(s).and_hms_opt(12, 0, 0).unwrap()
}

pub(crate) struct SnapshotBuilder {
    snapshot: LedgerSnapshot,
}

impl SnapshotBuilder {
    pub(crate) fn new() -> Self {
        Self {
            snapshot: LedgerSnapshot::empty(TenantId::new()),
        }
    }

    pub(crate) fn project(&mut self, name: &str, budget: Decimal) -> ProjectId {
        self.project_for(name, budget, None)
    }

    pub(crate) fn project_for(
        &mut self,
        name: &str,
        budget: Decimal,
        client_id: Option<ClientId>,
    ) -> ProjectId {
        let id = ProjectId::new();
        self.snapshot.projects.push(ProjectRecord {
            id,
            client_id,
            name: name.to_string(),
            status: ProjectStatus::Active,
            budget,
            start_date: None,
            end_date: None,
        });
        id
    }

    pub(crate) fn set_status(&mut self, project_id: ProjectId, status: ProjectStatus) {
        if let Some(p) = self.snapshot.projects.iter_mut().find(|p| p.id == project_id) {
            p.status = status;
        }
    }

    pub(crate) fn expense(
        &mut self,
        project_id: ProjectId,
        category: ExpenseCategory,
        amount: Decimal,
        on: &str,
    ) -> ExpenseId {
        self.expense_with_items(project_id, category, amount, on, Vec::new())
    }

    pub(crate) fn expense_with_items(
        &mut self,
        project_id: ProjectId,
        category: ExpenseCategory,
        amount: Decimal,
        on: &str,
        items: Vec<ExpenseItem>,
    ) -> ExpenseId {
        let id = ExpenseId::new();
        self.snapshot.expenses.push(ExpenseRecord {
            id,
            project_id,
            category,
            title: format!("{category} {on}"),
            quantity: None,
            unit_cost: None,
            amount,
            expense_date: noon(on),
            items,
        });
        id
    }

    pub(crate) fn deposit(&mut self, project_id: ProjectId, amount: Decimal, on: &str) {
        self.snapshot.deposits.push(DepositRecord {
            id: DepositId::new(),
            project_id,
            amount,
            paid_at: noon(on),
            receipt_number: None,
            reference: None,
            payment_method: None,
        });
    }

    pub(crate) fn installment(
        &mut self,
        project_id: ProjectId,
        label: &str,
        sort_order: i32,
        due: Option<&str>,
    ) {
        self.snapshot.installments.push(InstallmentRecord {
            id: InstallmentId::new(),
            project_id,
            label: label.to_string(),
            amount: Decimal::ONE_HUNDRED,
            due_date: due.map(date),
            sort_order,
        });
    }

    pub(crate) fn asset(&mut self, category: AssetCategory, cost: Decimal) {
        self.snapshot.assets.push(AssetRecord {
            id: AssetId::new(),
            name: "Excavator".to_string(),
            category,
            cost,
        });
    }

    pub(crate) fn build(self) -> LedgerSnapshot {
        self.snapshot
    }
}

pub(crate) fn item(material: &str, quantity: Decimal, unit_price: Decimal) -> ExpenseItem {
    ExpenseItem {
        material_name: material.to_string(),
        quantity,
        unit_price,
    }
}
