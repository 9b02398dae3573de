//! Core business logic for aduan.
//!
//! - [`validation`]: intake and administrative-update rules with the
//!   resident-facing message catalog
//! - [`lifecycle`]: the `resolved_at` transition rule
//! - [`stats`]: status and category counts for list headers and the dashboard
//! - [`listing`]: page envelopes shared by the public and administrative lists
//! - [`services`]: complaint and account services used by the HTTP layer

pub mod lifecycle;
pub mod listing;
pub mod services;
pub mod stats;
pub mod validation;

pub use services::*;
