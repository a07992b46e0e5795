//! Resource-Access Layer
//!
//! The generic core every entity service delegates to: per-request capability
//! checks fused with cursor-based windowed pagination. Authorization and
//! paging are orthogonal here and neither weakens the other - the gate never
//! returns data the caller may not see, and the window never miscounts
//! `has_next_page` to do so.
//!
//! - `policy` derives an ordered rule list from the principal (pure, no I/O)
//! - `ability` evaluates rules last-match-wins against a subject
//! - `gate` loads-then-checks a record, keeping NotFound and Forbidden apart
//! - `cursor` encodes/decodes opaque resume tokens over creation timestamps
//! - `pagination` builds the bounded scan and shapes the `Connection`
//! - `resource` is the facade composing all of the above per entity

pub mod ability;
pub mod cursor;
pub mod gate;
pub mod pagination;
pub mod policy;
pub mod resource;

pub use ability::{Ability, Action, CapabilityRule, Condition, Effect, FieldValue, Subject, SubjectRef};
pub use pagination::{Connection, Edge, PageArgs, PageInfo};
pub use resource::ResourceService;
