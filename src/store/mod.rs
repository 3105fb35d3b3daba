//! Storage module
//!
//! The query layer reads records through [`RecordStore`]. Writes, id
//! assignment and timestamps belong to the concrete store.

mod memory;
mod model;
pub mod seed;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryStore;
pub use model::{Company, CompanyChanges, Employee, NewCompany, NewEmployee, MAX_FIELD_LEN};

/// Read access to company and employee records
pub trait RecordStore: Send + Sync {
    /// Company by id, `None` when absent
    fn company(&self, id: u64) -> Option<Company>;

    /// All companies, id ascending
    fn companies(&self) -> Vec<Company>;

    /// Employees accepted by `predicate`, id ascending
    fn employees_matching(&self, predicate: &dyn Fn(&Employee) -> bool) -> Vec<Employee>;
}

/// What happens to employees when their company is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete a company that still has employees
    #[default]
    Restrict,
    /// Delete the company's employees along with it
    Cascade,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a company with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("company {0} does not exist")]
    MissingCompany(u64),

    #[error("company {id} still has {count} employee(s)")]
    HasEmployees { id: u64, count: usize },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed data: {0}")]
    Seed(String),
}
