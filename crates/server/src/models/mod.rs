//! Domain models.
//!
//! Validated domain structs for the entities this backend manages, plus the
//! session-stored identity type.

pub mod inventory;
pub mod operator;
pub mod person;
pub mod product;
pub mod session;

pub use inventory::{Inventory, InventoryPatch, NewInventory};
pub use operator::{NewOperator, Operator, OperatorCredentials, OperatorPatch};
pub use person::{NewPerson, Person, PersonPatch};
pub use product::{
    NewProduct, NewProductCategory, Product, ProductCategory, ProductFilter, ProductPatch,
};
pub use session::{CurrentOperator, keys as session_keys};
