//! Life Reel backend: age/pregnancy bucketing for a photo-journaling
//! timeline, plus the person store behind it.
//!
//! The domain services are pure and synchronous; any UI layer calls them
//! in-process and renders the `shared` DTOs they return.

pub mod domain;
pub mod storage;

pub use domain::{AgeService, PersonService, StackService, TimelineService};
pub use storage::yaml::YamlConnection;
