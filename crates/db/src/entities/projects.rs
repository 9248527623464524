//! `SeaORM` Entity for projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProjectStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub status: ProjectStatus,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub budget: Decimal,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tenants::Entity",
        from = "Column::TenantId",
        to = "super::tenants::Column::Id"
    )]
    Tenants,
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id"
    )]
    Clients,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::project_deposits::Entity")]
    ProjectDeposits,
    #[sea_orm(has_many = "super::project_installments::Entity")]
    ProjectInstallments,
    #[sea_orm(has_many = "super::project_documents::Entity")]
    ProjectDocuments,
}

impl Related<super::tenants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::project_deposits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectDeposits.def()
    }
}

impl Related<super::project_installments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectInstallments.def()
    }
}

impl Related<super::project_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectDocuments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
