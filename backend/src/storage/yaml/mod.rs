//! YAML-file storage backend: one directory per person holding the person
//! record and their photo list.

mod connection;
mod person_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::YamlConnection;
pub use person_repository::PersonRepository;
