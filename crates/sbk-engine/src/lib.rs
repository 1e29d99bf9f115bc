//! # sbk-engine
//!
//! Rate catalog and cost aggregation for Sitebook dashboards.
//!
//! The engine is pure: it takes project records and timeline entries that
//! were already fetched, prices them against a [`RateCatalog`], and returns a
//! [`DashboardSnapshot`](sbk_core::entities::DashboardSnapshot). Storage and
//! persistence live in `sbk-db`.
//!
//! Pricing pipeline, bottom up:
//! - [`labor`], [`resources`]: one timeline entry's crew, materials, tools
//!   and expenses
//! - [`multiplier`]: a project's base cost and cost factor
//! - [`rollup`]: one project's entries into a breakdown
//! - [`portfolio`]: every selected project into grand totals and analytics
//! - [`snapshot`]: summary figures and identity
//!
//! Missing catalog keys and malformed numbers never fail a calculation. They
//! contribute zero and are reported as diagnostics on the snapshot.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod labor;
pub mod multiplier;
pub mod portfolio;
pub mod resources;
pub mod rollup;
pub mod snapshot;

pub use catalog::RateCatalog;
pub use engine::CostEngine;
pub use error::{BudgetLimit, CatalogError, EngineError};
pub use portfolio::{ComputeBudget, EngineOptions, Portfolio};
pub use snapshot::SnapshotStamp;
