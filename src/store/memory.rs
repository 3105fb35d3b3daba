// In-memory record store
// Seeded at startup and shared read-only while serving

use chrono::Utc;
use std::collections::BTreeMap;

use super::model::{Company, CompanyChanges, Employee, NewCompany, NewEmployee, MAX_FIELD_LEN};
use super::{DeletePolicy, RecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    companies: BTreeMap<u64, Company>,
    employees: BTreeMap<u64, Employee>,
    next_company_id: u64,
    next_employee_id: u64,
    delete_policy: DeletePolicy,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DeletePolicy::default())
    }
}

impl MemoryStore {
    pub const fn new(delete_policy: DeletePolicy) -> Self {
        Self {
            companies: BTreeMap::new(),
            employees: BTreeMap::new(),
            next_company_id: 1,
            next_employee_id: 1,
            delete_policy,
        }
    }

    pub const fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    pub fn insert_company(&mut self, new: NewCompany) -> Result<Company, StoreError> {
        check_length("name", &new.name)?;
        check_length("email", &new.email)?;
        self.check_email_free(&new.email, None)?;

        let now = Utc::now();
        let company = Company {
            id: self.next_company_id,
            name: new.name,
            email: new.email,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        self.next_company_id += 1;
        self.companies.insert(company.id, company.clone());
        Ok(company)
    }

    /// Apply `changes` and refresh `updated_at`
    pub fn update_company(
        &mut self,
        id: u64,
        changes: CompanyChanges,
    ) -> Result<Company, StoreError> {
        if !self.companies.contains_key(&id) {
            return Err(StoreError::MissingCompany(id));
        }
        if let Some(name) = &changes.name {
            check_length("name", name)?;
        }
        if let Some(email) = &changes.email {
            check_length("email", email)?;
            self.check_email_free(email, Some(id))?;
        }

        let company = self
            .companies
            .get_mut(&id)
            .ok_or(StoreError::MissingCompany(id))?;
        if let Some(name) = changes.name {
            company.name = name;
        }
        if let Some(email) = changes.email {
            company.email = email;
        }
        if let Some(description) = changes.description {
            company.description = description;
        }
        company.updated_at = Utc::now().max(company.created_at);
        Ok(company.clone())
    }

    pub fn insert_employee(&mut self, new: NewEmployee) -> Result<Employee, StoreError> {
        if !self.companies.contains_key(&new.company_id) {
            return Err(StoreError::MissingCompany(new.company_id));
        }

        let employee = Employee {
            id: self.next_employee_id,
            first_name: new.first_name,
            last_name: new.last_name,
            company_id: new.company_id,
        };
        self.next_employee_id += 1;
        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    /// Remove a company according to the configured [`DeletePolicy`].
    ///
    /// Returns the number of employees removed alongside it.
    pub fn delete_company(&mut self, id: u64) -> Result<usize, StoreError> {
        if !self.companies.contains_key(&id) {
            return Err(StoreError::MissingCompany(id));
        }

        let owned: Vec<u64> = self
            .employees
            .values()
            .filter(|e| e.company_id == id)
            .map(|e| e.id)
            .collect();

        match self.delete_policy {
            DeletePolicy::Restrict if !owned.is_empty() => {
                return Err(StoreError::HasEmployees {
                    id,
                    count: owned.len(),
                });
            }
            DeletePolicy::Restrict => {}
            DeletePolicy::Cascade => {
                for employee_id in &owned {
                    self.employees.remove(employee_id);
                }
            }
        }

        self.companies.remove(&id);
        Ok(owned.len())
    }

    pub fn company_count(&self) -> usize {
        self.companies.len()
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    fn check_email_free(&self, email: &str, except: Option<u64>) -> Result<(), StoreError> {
        let taken = self
            .companies
            .values()
            .any(|c| Some(c.id) != except && c.email.eq_ignore_ascii_case(email));
        if taken {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }
}

fn check_length(field: &'static str, value: &str) -> Result<(), StoreError> {
    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(StoreError::Invalid {
            field,
            reason: format!("{len} characters exceeds the limit of {MAX_FIELD_LEN}"),
        });
    }
    Ok(())
}

impl RecordStore for MemoryStore {
    fn company(&self, id: u64) -> Option<Company> {
        self.companies.get(&id).cloned()
    }

    fn companies(&self) -> Vec<Company> {
        self.companies.values().cloned().collect()
    }

    fn employees_matching(&self, predicate: &dyn Fn(&Employee) -> bool) -> Vec<Employee> {
        self.employees
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}
