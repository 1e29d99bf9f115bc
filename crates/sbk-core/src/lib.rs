//! # sbk-core
//!
//! Core types, ID formatting, and error types for Sitebook.
//!
//! This crate provides the foundational types shared across all Sitebook crates:
//! - Project records and daily timeline entries as read from storage
//! - The dashboard snapshot produced by the cost engine, with its breakdowns
//!   and analytics
//! - The [`Measure`](measure::Measure) numeric field that keeps "absent" and
//!   "malformed" apart
//! - Calculation requests and their validation
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod measure;
pub mod request;
