//! `SeaORM` entity definitions.

pub mod prelude;

pub mod assets;
pub mod clients;
pub mod expense_items;
pub mod expenses;
pub mod material_catalog;
pub mod project_deposits;
pub mod project_documents;
pub mod project_installments;
pub mod projects;
pub mod sea_orm_active_enums;
pub mod tenants;
