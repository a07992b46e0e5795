//! Repository Layer
//!
//! The generic `RecordAccessor` boundary plus MongoDB-backed repositories
//! for entities that need finders beyond it.

pub mod accessor;
pub mod follower;
pub mod school;
pub mod user;

pub use accessor::{MongoAccessor, RecordAccessor};
pub use follower::FollowerRepository;
pub use school::SchoolRepository;
pub use user::UserRepository;
