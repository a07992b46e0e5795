//! CampusLink Platform
//!
//! Core platform providing:
//! - Capability-based access control (ordered rules, last match wins)
//! - Cursor-windowed connection queries over MongoDB collections
//! - Generic resource services composed per entity
//! - Schools, institutes, subjects, users, discussions, calendar events
//! - Follow edges with denormalized follower counters

pub mod access;
pub mod api;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use domain::*;
pub use error::PlatformError;
