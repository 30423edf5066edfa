pub mod age_service;
pub mod commands;
pub mod models;
pub mod person_service;
pub mod stack_service;
pub mod timeline_service;

pub use age_service::{AgeService, ExactAge};
pub use person_service::PersonService;
pub use stack_service::{DateRange, StackService};
pub use timeline_service::TimelineService;
