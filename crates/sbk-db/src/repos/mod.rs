//! Repository modules implementing storage operations for Sitebook entities.
//!
//! Each module adds methods to `SiteService` via `impl SiteService` blocks.

pub mod dashboard;
pub mod project;
pub mod snapshot;
pub mod timeline;

pub use timeline::TimelineFilter;
