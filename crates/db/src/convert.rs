//! Conversions between `SeaORM` models and core records.

use buildbook_core::ledger::{
    AssetCategory, AssetRecord, DepositRecord, ExpenseCategory, ExpenseItem, ExpenseRecord,
    InstallmentRecord, ProjectRecord, ProjectStatus,
};
use buildbook_core::tenant::{Tenant, TenantStatus};
use buildbook_shared::types::{
    AssetId, ClientId, DepositId, ExpenseId, InstallmentId, ProjectId, TenantId,
};
use chrono::Utc;

use crate::entities::{
    assets, expense_items, expenses, project_deposits, project_installments, projects,
    sea_orm_active_enums as db_enums, tenants,
};

impl From<db_enums::TenantStatus> for TenantStatus {
    fn from(status: db_enums::TenantStatus) -> Self {
        match status {
            db_enums::TenantStatus::Trial => Self::Trial,
            db_enums::TenantStatus::Active => Self::Active,
            db_enums::TenantStatus::Suspended => Self::Suspended,
            db_enums::TenantStatus::Expired => Self::Expired,
        }
    }
}

impl From<db_enums::ProjectStatus> for ProjectStatus {
    fn from(status: db_enums::ProjectStatus) -> Self {
        match status {
            db_enums::ProjectStatus::Planning => Self::Planning,
            db_enums::ProjectStatus::Active => Self::Active,
            db_enums::ProjectStatus::OnHold => Self::OnHold,
            db_enums::ProjectStatus::Completed => Self::Completed,
            db_enums::ProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ProjectStatus> for db_enums::ProjectStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Planning => Self::Planning,
            ProjectStatus::Active => Self::Active,
            ProjectStatus::OnHold => Self::OnHold,
            ProjectStatus::Completed => Self::Completed,
            ProjectStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<db_enums::ExpenseCategory> for ExpenseCategory {
    fn from(category: db_enums::ExpenseCategory) -> Self {
        match category {
            db_enums::ExpenseCategory::Material => Self::Material,
            db_enums::ExpenseCategory::Labor => Self::Labor,
            db_enums::ExpenseCategory::Equipment => Self::Equipment,
            db_enums::ExpenseCategory::Subcontract => Self::Subcontract,
            db_enums::ExpenseCategory::Other => Self::Other,
        }
    }
}

impl From<db_enums::AssetCategory> for AssetCategory {
    fn from(category: db_enums::AssetCategory) -> Self {
        match category {
            db_enums::AssetCategory::Fixed => Self::Fixed,
            db_enums::AssetCategory::Current => Self::Current,
        }
    }
}

impl From<tenants::Model> for Tenant {
    fn from(model: tenants::Model) -> Self {
        Self {
            id: TenantId::from_uuid(model.id),
            subdomain: model.subdomain,
            name: model.name,
            status: model.status.into(),
            subscription_expiry_at: model.subscription_expiry_at.map(|at| at.with_timezone(&Utc)),
            trial_ends_at: model.trial_ends_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}

impl From<projects::Model> for ProjectRecord {
    fn from(model: projects::Model) -> Self {
        Self {
            id: ProjectId::from_uuid(model.id),
            client_id: model.client_id.map(ClientId::from_uuid),
            name: model.name,
            status: model.status.into(),
            budget: model.budget,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}

impl From<expense_items::Model> for ExpenseItem {
    fn from(model: expense_items::Model) -> Self {
        Self {
            material_name: model.material_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
        }
    }
}

/// Builds an expense record from its row and its items.
pub(crate) fn expense_record(model: expenses::Model, items: Vec<ExpenseItem>) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseId::from_uuid(model.id),
        project_id: ProjectId::from_uuid(model.project_id),
        category: model.category.into(),
        title: model.title,
        quantity: model.quantity,
        unit_cost: model.unit_cost,
        amount: model.amount,
        expense_date: model.expense_date,
        items,
    }
}

impl From<project_deposits::Model> for DepositRecord {
    fn from(model: project_deposits::Model) -> Self {
        Self {
            id: DepositId::from_uuid(model.id),
            project_id: ProjectId::from_uuid(model.project_id),
            amount: model.amount,
            paid_at: model.paid_at,
            receipt_number: model.receipt_number,
            reference: model.reference,
            payment_method: model.payment_method,
        }
    }
}

impl From<project_installments::Model> for InstallmentRecord {
    fn from(model: project_installments::Model) -> Self {
        Self {
            id: InstallmentId::from_uuid(model.id),
            project_id: ProjectId::from_uuid(model.project_id),
            label: model.label,
            amount: model.amount,
            due_date: model.due_date,
            sort_order: model.sort_order,
        }
    }
}

impl From<assets::Model> for AssetRecord {
    fn from(model: assets::Model) -> Self {
        Self {
            id: AssetId::from_uuid(model.id),
            name: model.name,
            category: model.category.into(),
            cost: model.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    #[test]
    fn test_tenant_model_converts_to_utc() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let expiry = offset.with_ymd_and_hms(2026, 1, 1, 7, 0, 0).unwrap();
        let model = tenants::Model {
            id: Uuid::new_v4(),
            subdomain: "acme".to_string(),
            name: "Acme Konstruksi".to_string(),
            status: db_enums::TenantStatus::Active,
            subscription_expiry_at: Some(expiry),
            trial_ends_at: None,
            created_at: expiry,
            updated_at: expiry,
            deleted_at: None,
        };

        let tenant = Tenant::from(model);

        assert_eq!(tenant.status, TenantStatus::Active);
        assert_eq!(
            tenant.subscription_expiry_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_project_status_roundtrip() {
        for status in ProjectStatus::ALL {
            let stored: db_enums::ProjectStatus = status.into();
            assert_eq!(ProjectStatus::from(stored), status);
        }
    }
}
