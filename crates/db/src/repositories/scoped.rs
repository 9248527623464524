//! Tenant-scoped data access.
//!
//! Every query built here carries the tenant id, and every default query
//! excludes soft-deleted rows. Writes match `(id, tenant_id)` jointly, so an
//! id owned by another tenant behaves exactly like an unknown id.

use std::collections::HashMap;

use buildbook_core::ledger::{
    DepositRecord, ExpenseItem, InstallmentRecord, LedgerSnapshot, ProjectRecord, ProjectStatus,
};
use buildbook_shared::config::FeatureFlags;
use buildbook_shared::types::{DepositId, ExpenseId, MaterialId, ProjectId, TenantId};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, Set,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::convert::expense_record;
use crate::entities::{
    assets, clients, expense_items, expenses, material_catalog, project_deposits,
    project_documents, project_installments, projects,
};

/// Error types for scoped operations.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// No row with this id exists for the tenant.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name.
        entity: &'static str,
        /// Requested id.
        id: Uuid,
    },

    /// Input rejected before reaching the database.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeposit {
    /// Amount received (> 0).
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

/// A project with its receipts and schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    /// The project.
    pub project: ProjectRecord,
    /// Deposits, oldest first.
    pub deposits: Vec<DepositRecord>,
    /// Installments by sort order.
    pub installments: Vec<InstallmentRecord>,
    /// Documents; `None` when the capability is disabled.
    pub documents: Option<Vec<project_documents::Model>>,
}

/// Data access bound to one tenant.
#[derive(Debug)]
pub struct TenantScope<'a, C> {
    conn: &'a C,
    tenant_id: TenantId,
}

impl<'a, C: ConnectionTrait> TenantScope<'a, C> {
    /// Binds `conn` to `tenant_id`.
    #[must_use]
    pub const fn new(conn: &'a C, tenant_id: TenantId) -> Self {
        Self { conn, tenant_id }
    }

    /// The tenant every query is filtered by.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn tenant(&self) -> Uuid {
        self.tenant_id.into_inner()
    }

    // ------------------------------------------------------------------
    // Query builders
    // ------------------------------------------------------------------

    /// Live projects.
    #[must_use]
    pub fn projects(&self) -> Select<projects::Entity> {
        projects::Entity::find()
            .filter(projects::Column::TenantId.eq(self.tenant()))
            .filter(projects::Column::DeletedAt.is_null())
    }

    /// Live clients.
    #[must_use]
    pub fn clients(&self) -> Select<clients::Entity> {
        clients::Entity::find()
            .filter(clients::Column::TenantId.eq(self.tenant()))
            .filter(clients::Column::DeletedAt.is_null())
    }

    /// Live expenses of live projects.
    #[must_use]
    pub fn expenses(&self) -> Select<expenses::Entity> {
        expenses::Entity::find()
            .join(JoinType::InnerJoin, expenses::Relation::Projects.def())
            .filter(expenses::Column::TenantId.eq(self.tenant()))
            .filter(expenses::Column::DeletedAt.is_null())
            .filter(projects::Column::DeletedAt.is_null())
    }

    /// Items of live expenses. Items have no tenant column of their own.
    #[must_use]
    pub fn expense_items(&self) -> Select<expense_items::Entity> {
        expense_items::Entity::find()
            .join(JoinType::InnerJoin, expense_items::Relation::Expenses.def())
            .filter(expenses::Column::TenantId.eq(self.tenant()))
            .filter(expenses::Column::DeletedAt.is_null())
    }

    /// Deposits of live projects.
    #[must_use]
    pub fn deposits(&self) -> Select<project_deposits::Entity> {
        project_deposits::Entity::find()
            .join(JoinType::InnerJoin, project_deposits::Relation::Projects.def())
            .filter(project_deposits::Column::TenantId.eq(self.tenant()))
            .filter(projects::Column::DeletedAt.is_null())
    }

    /// Installments of live projects.
    #[must_use]
    pub fn installments(&self) -> Select<project_installments::Entity> {
        project_installments::Entity::find()
            .join(
                JoinType::InnerJoin,
                project_installments::Relation::Projects.def(),
            )
            .filter(project_installments::Column::TenantId.eq(self.tenant()))
            .filter(projects::Column::DeletedAt.is_null())
    }

    /// Live assets.
    #[must_use]
    pub fn assets(&self) -> Select<assets::Entity> {
        assets::Entity::find()
            .filter(assets::Column::TenantId.eq(self.tenant()))
            .filter(assets::Column::DeletedAt.is_null())
    }

    /// Live catalog materials.
    #[must_use]
    pub fn materials(&self) -> Select<material_catalog::Entity> {
        material_catalog::Entity::find()
            .filter(material_catalog::Column::TenantId.eq(self.tenant()))
            .filter(material_catalog::Column::DeletedAt.is_null())
    }

    /// Project documents.
    #[must_use]
    pub fn documents(&self) -> Select<project_documents::Entity> {
        project_documents::Entity::find()
            .filter(project_documents::Column::TenantId.eq(self.tenant()))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Loads every record the reports need.
    ///
    /// The six queries are independent and run concurrently; any failure
    /// fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn load_ledger(&self) -> Result<LedgerSnapshot, DbErr> {
        let (projects, expenses, items, deposits, installments, assets) = tokio::try_join!(
            self.projects()
                .order_by_asc(projects::Column::Name)
                .order_by_asc(projects::Column::Id)
                .all(self.conn),
            self.expenses()
                .order_by_asc(expenses::Column::ExpenseDate)
                .order_by_asc(expenses::Column::CreatedAt)
                .all(self.conn),
            self.expense_items()
                .order_by_asc(expense_items::Column::CreatedAt)
                .order_by_asc(expense_items::Column::Id)
                .all(self.conn),
            self.deposits()
                .order_by_asc(project_deposits::Column::PaidAt)
                .all(self.conn),
            self.installments()
                .order_by_asc(project_installments::Column::SortOrder)
                .all(self.conn),
            self.assets().all(self.conn),
        )?;

        let mut items_by_expense: HashMap<Uuid, Vec<ExpenseItem>> = HashMap::new();
        for item in items {
            items_by_expense
                .entry(item.expense_id)
                .or_default()
                .push(item.into());
        }

        Ok(LedgerSnapshot {
            tenant_id: self.tenant_id,
            projects: projects.into_iter().map(Into::into).collect(),
            expenses: expenses
                .into_iter()
                .map(|e| {
                    let items = items_by_expense.remove(&e.id).unwrap_or_default();
                    expense_record(e, items)
                })
                .collect(),
            deposits: deposits.into_iter().map(Into::into).collect(),
            installments: installments.into_iter().map(Into::into).collect(),
            assets: assets.into_iter().map(Into::into).collect(),
        })
    }

    /// Finds a live project.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] for unknown or foreign ids.
    pub async fn find_project(&self, id: ProjectId) -> Result<projects::Model, ScopeError> {
        self.projects()
            .filter(projects::Column::Id.eq(id.into_inner()))
            .one(self.conn)
            .await?
            .ok_or(ScopeError::NotFound {
                entity: "Project",
                id: id.into_inner(),
            })
    }

    /// Returns the catalog name of a material.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] for unknown or foreign ids.
    pub async fn material_name(&self, id: MaterialId) -> Result<String, ScopeError> {
        self.materials()
            .filter(material_catalog::Column::Id.eq(id.into_inner()))
            .one(self.conn)
            .await?
            .map(|m| m.name)
            .ok_or(ScopeError::NotFound {
                entity: "Material",
                id: id.into_inner(),
            })
    }

    /// Loads a project with its deposits, installments and, when the
    /// capability is enabled, documents.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] for unknown or foreign ids.
    pub async fn project_detail(
        &self,
        id: ProjectId,
        features: FeatureFlags,
    ) -> Result<ProjectDetail, ScopeError> {
        let project = self.find_project(id).await?;
        let project_id = project.id;

        let deposits = self
            .deposits()
            .filter(project_deposits::Column::ProjectId.eq(project_id))
            .order_by_asc(project_deposits::Column::PaidAt)
            .all(self.conn)
            .await?;
        let installments = self
            .installments()
            .filter(project_installments::Column::ProjectId.eq(project_id))
            .order_by_asc(project_installments::Column::SortOrder)
            .order_by_asc(project_installments::Column::DueDate)
            .all(self.conn)
            .await?;
        let documents = if features.project_documents {
            Some(
                self.documents()
                    .filter(project_documents::Column::ProjectId.eq(project_id))
                    .order_by_desc(project_documents::Column::CreatedAt)
                    .all(self.conn)
                    .await?,
            )
        } else {
            None
        };

        Ok(ProjectDetail {
            project: project.into(),
            deposits: deposits.into_iter().map(Into::into).collect(),
            installments: installments.into_iter().map(Into::into).collect(),
            documents,
        })
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Soft-deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] if no live expense matches `(id, tenant)`.
    pub async fn soft_delete_expense(&self, id: ExpenseId) -> Result<(), ScopeError> {
        let result = expenses::Entity::update_many()
            .set(expenses::ActiveModel {
                deleted_at: Set(Some(chrono::Utc::now().into())),
                ..Default::default()
            })
            .filter(expenses::Column::Id.eq(id.into_inner()))
            .filter(expenses::Column::TenantId.eq(self.tenant()))
            .filter(expenses::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        affected(self.tenant_id, result.rows_affected, "Expense", id.into_inner())
    }

    /// Soft-deletes a project. Its expenses and deposits drop out of every
    /// report with it.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] if no live project matches `(id, tenant)`.
    pub async fn soft_delete_project(&self, id: ProjectId) -> Result<(), ScopeError> {
        let result = projects::Entity::update_many()
            .set(projects::ActiveModel {
                deleted_at: Set(Some(chrono::Utc::now().into())),
                ..Default::default()
            })
            .filter(projects::Column::Id.eq(id.into_inner()))
            .filter(projects::Column::TenantId.eq(self.tenant()))
            .filter(projects::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        affected(self.tenant_id, result.rows_affected, "Project", id.into_inner())
    }

    /// Changes a project's status.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] if no live project matches `(id, tenant)`.
    pub async fn update_project_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<(), ScopeError> {
        let result = projects::Entity::update_many()
            .set(projects::ActiveModel {
                status: Set(status.into()),
                updated_at: Set(chrono::Utc::now().into()),
                ..Default::default()
            })
            .filter(projects::Column::Id.eq(id.into_inner()))
            .filter(projects::Column::TenantId.eq(self.tenant()))
            .filter(projects::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        affected(self.tenant_id, result.rows_affected, "Project", id.into_inner())
    }

    /// Deletes a deposit.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::NotFound`] if no deposit matches `(id, tenant)`.
    pub async fn delete_deposit(&self, id: DepositId) -> Result<(), ScopeError> {
        let result = project_deposits::Entity::delete_many()
            .filter(project_deposits::Column::Id.eq(id.into_inner()))
            .filter(project_deposits::Column::TenantId.eq(self.tenant()))
            .exec(self.conn)
            .await?;

        affected(self.tenant_id, result.rows_affected, "Deposit", id.into_inner())
    }

    /// Records a deposit against a live project of this tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Validation`] for a non-positive amount and
    /// [`ScopeError::NotFound`] for unknown or foreign projects.
    pub async fn create_deposit(
        &self,
        project_id: ProjectId,
        input: NewDeposit,
    ) -> Result<DepositRecord, ScopeError> {
        if input.amount <= Decimal::ZERO {
            return Err(ScopeError::Validation(
                "Deposit amount must be greater than zero".to_string(),
            ));
        }

        let project = self.find_project(project_id).await?;

        let deposit = project_deposits::ActiveModel {
            id: Set(DepositId::new().into_inner()),
            tenant_id: Set(self.tenant()),
            project_id: Set(project.id),
            amount: Set(input.amount),
            paid_at: Set(input.paid_at),
            receipt_number: Set(input.receipt_number),
            reference: Set(input.reference),
            payment_method: Set(input.payment_method),
            created_at: Set(chrono::Utc::now().into()),
        };

        Ok(deposit.insert(self.conn).await?.into())
    }
}

fn affected(
    tenant_id: TenantId,
    rows: u64,
    entity: &'static str,
    id: Uuid,
) -> Result<(), ScopeError> {
    if rows == 0 {
        warn!(%tenant_id, entity, %id, "Scoped write matched no rows");
        Err(ScopeError::NotFound { entity, id })
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "scoped_tests.rs"]
mod tests;
