//! Entity aliases.

pub use super::assets::Entity as Assets;
pub use super::clients::Entity as Clients;
pub use super::expense_items::Entity as ExpenseItems;
pub use super::expenses::Entity as Expenses;
pub use super::material_catalog::Entity as MaterialCatalog;
pub use super::project_deposits::Entity as ProjectDeposits;
pub use super::project_documents::Entity as ProjectDocuments;
pub use super::project_installments::Entity as ProjectInstallments;
pub use super::projects::Entity as Projects;
pub use super::tenants::Entity as Tenants;
