//! Builders to construct a kitchen from configuration.

pub mod kitchen_builder;

pub use kitchen_builder::KitchenBuilder;
