//! Infrastructure adapters for the collaborators the scheduler consumes.

pub mod catalog;

pub use catalog::{Catalog, DishTemplate};
