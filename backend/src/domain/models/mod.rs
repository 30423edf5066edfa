pub mod person;
pub mod photo;
pub mod stack;
