// Record types owned by the storage layer

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Maximum length of a company name or email
pub const MAX_FIELD_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub company_id: u64,
}

/// Fields supplied when creating a company; the store assigns the rest
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub email: String,
    pub description: String,
}

impl NewCompany {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub company_id: u64,
}

impl NewEmployee {
    pub fn new(first_name: &str, last_name: &str, company_id: u64) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            company_id,
        }
    }
}
