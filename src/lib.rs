//! # Kitchen Dispatch
//!
//! A priority dispatch and timed execution scheduler for a simulated kitchen.
//!
//! Orders are bundles of dishes. Each dish must be prepared by exactly one chef,
//! and each chef prepares one dish at a time. The scheduler decides which
//! pending dish goes to which free chef, tracks live progress while the dish
//! cooks, and when it is done frees the chef and dispatches again so the
//! backlog drains without any outside prompt.
//!
//! ## Key Features
//!
//! - **Priority dispatch**: higher priority first, FIFO within a priority tier
//! - **Single assignment**: one chef per dish and one dish per chef, enforced by
//!   a timer registry keyed by chef
//! - **Live progress**: progress and remaining time written to both the dish and
//!   the chef's view on every tick
//! - **Self-draining backlog**: completions trigger a deferred re-dispatch, with
//!   an optional periodic backstop
//! - **Deterministic testing**: all timestamps come from an injectable clock
//!
//! ```rust,ignore
//! use kitchen_dispatch::builders::KitchenBuilder;
//! use kitchen_dispatch::config::KitchenConfig;
//! use kitchen_dispatch::runtime::TokioSpawner;
//! use kitchen_dispatch::util::Priority;
//!
//! let kitchen = KitchenBuilder::new(KitchenConfig::default())
//!     .build(TokioSpawner::current())?;
//!
//! let order = kitchen.submit_order(&["dish1", "dish2"], Priority::VIP)?;
//! let chef = kitchen.add_chef("Chef Casey")?;
//!
//! // Later, from a dashboard:
//! let snapshot = kitchen.snapshot();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling: model, selector, assignment engine, timers and triggers.
pub mod core;
/// Configuration models and environment loading.
pub mod config;
/// Builders to construct a kitchen from configuration.
pub mod builders;
/// Collaborators consumed by the scheduler, such as the dish catalog.
pub mod infra;
/// Runtime adapters and API surface.
pub mod runtime;
/// Shared utilities.
pub mod util;
