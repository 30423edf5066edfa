//! Test utilities providing RAII-based cleanup so store data is removed
//! even when tests panic or fail.

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::YamlConnection;
use super::person_repository::PersonRepository;
use crate::domain::models::person::{
    AgeFormat, BirthMonthsDisplay, Person as DomainPerson, PregnancyTracking,
};
use crate::storage::traits::PersonStorage;

/// Test environment with a temporary store directory that is cleaned up
/// when the environment is dropped.
pub struct TestEnvironment {
    pub connection: YamlConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = YamlConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper bundling a fresh environment with a person repository and
/// collision-free ID generation for rapid test inserts.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub person_repo: PersonRepository,
    next_id: AtomicU64,
}

impl TestHelper {
    /// Create a new test helper with a fresh environment
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let person_repo = PersonRepository::new(Arc::new(env.connection.clone()));
        Ok(Self {
            env,
            person_repo,
            next_id: AtomicU64::new(1702516122000),
        })
    }

    /// Store and return a person with default display settings
    pub fn create_test_person(&self, name: &str, date_of_birth: &str) -> Result<DomainPerson> {
        let sequence = self.next_id.fetch_add(1, Ordering::SeqCst);
        let offset = sequence - 1702516122000;
        let created_at = Utc::now() + Duration::milliseconds(offset as i64);
        let person = DomainPerson {
            id: DomainPerson::generate_id(sequence),
            name: name.to_string(),
            date_of_birth: NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d")?,
            birth_months_display: BirthMonthsDisplay::TwelveMonths,
            pregnancy_tracking: PregnancyTracking::None,
            age_format: AgeFormat::Full,
            created_at,
            updated_at: created_at,
        };
        self.person_repo.store_person(&person)?;
        Ok(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleans_up_on_drop() {
        let base_path;
        {
            let env = TestEnvironment::new().unwrap();
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
    }

    #[test]
    fn test_helper_generates_distinct_ids() {
        let helper = TestHelper::new().unwrap();
        let first = helper.create_test_person("Emma", "2020-01-15").unwrap();
        let second = helper.create_test_person("Emma", "2020-01-15").unwrap();

        assert_ne!(first.id, second.id);
    }
}
