//! Configuration models for the kitchen scheduler.

pub mod kitchen;

pub use kitchen::KitchenConfig;
