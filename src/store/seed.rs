//! Seed data loader
//!
//! Builds a [`MemoryStore`] from a TOML document:
//!
//! ```toml
//! [[companies]]
//! name = "Acme"
//! email = "hello@acme.test"
//! description = "Anvils"
//!
//! [[companies.employees]]
//! first_name = "Anna"
//! last_name = "Berg"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::{DeletePolicy, MemoryStore, NewCompany, NewEmployee, StoreError};
use crate::logger;

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    companies: Vec<SeedCompany>,
}

#[derive(Debug, Deserialize)]
struct SeedCompany {
    name: String,
    email: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    employees: Vec<SeedEmployee>,
}

#[derive(Debug, Deserialize)]
struct SeedEmployee {
    first_name: String,
    last_name: String,
}

/// Load a seed file. A missing file yields an empty store.
pub fn load(path: &Path, policy: DeletePolicy) -> Result<MemoryStore, StoreError> {
    if !path.exists() {
        logger::log_warning(&format!(
            "Seed file {} not found, starting with an empty directory",
            path.display()
        ));
        return Ok(MemoryStore::new(policy));
    }

    let content = fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
        path: path.display().to_string(),
        source,
    })?;
    let store = from_toml_str(&content, policy)?;
    logger::log_info(&format!(
        "Loaded {} companies and {} employees from {}",
        store.company_count(),
        store.employee_count(),
        path.display()
    ));
    Ok(store)
}

pub fn from_toml_str(content: &str, policy: DeletePolicy) -> Result<MemoryStore, StoreError> {
    let seed: SeedFile = toml::from_str(content).map_err(|e| StoreError::Seed(e.to_string()))?;

    let mut store = MemoryStore::new(policy);
    for entry in seed.companies {
        let company = store.insert_company(NewCompany {
            name: entry.name,
            email: entry.email,
            description: entry.description,
        })?;
        for employee in entry.employees {
            store.insert_employee(NewEmployee::new(
                &employee.first_name,
                &employee.last_name,
                company.id,
            ))?;
        }
    }
    Ok(store)
}
