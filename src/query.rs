//! Query service
//!
//! Answers the read queries behind the views:
//! - static pet type lookup against the injected catalogue
//! - company list and detail
//! - case-insensitive employee name search under a company, compared after
//!   full Unicode case folding

use caseless::default_case_fold_str;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{PetCatalog, PetType};
use crate::error::AppError;
use crate::store::{Company, Employee, RecordStore};

/// Which employees an employee search looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Every employee in the store
    #[default]
    All,
    /// Only employees of the company named in the request
    Company,
}

/// Result of an employee search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeSearch {
    pub company: Company,
    pub query: String,
    pub employees: Vec<Employee>,
}

pub struct QueryService {
    catalog: PetCatalog,
    store: Arc<dyn RecordStore>,
    scope: SearchScope,
}

impl QueryService {
    pub fn new(catalog: PetCatalog, store: Arc<dyn RecordStore>) -> Self {
        Self {
            catalog,
            store,
            scope: SearchScope::default(),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Pet type by key; `None` is a normal outcome the caller renders
    pub fn lookup(&self, key: &str) -> Option<&PetType> {
        self.catalog.get(key)
    }

    pub fn pet_types(&self) -> &[PetType] {
        self.catalog.entries()
    }

    pub fn company(&self, id: u64) -> Result<Company, AppError> {
        self.store
            .company(id)
            .ok_or(AppError::CompanyNotFound { id })
    }

    /// Every company, id ascending
    pub fn list_all(&self) -> Vec<Company> {
        self.store.companies()
    }

    /// Employees whose first or last name contains `query`, ignoring case.
    ///
    /// The company must exist even when the query is empty. An empty or
    /// absent query returns no employees without touching the store.
    pub fn search(&self, company_id: u64, query: Option<&str>) -> Result<EmployeeSearch, AppError> {
        let company = self.company(company_id)?;
        let query = query.unwrap_or_default();

        let employees = if query.is_empty() {
            Vec::new()
        } else {
            let needle = default_case_fold_str(query);
            let scope = self.scope;
            self.store.employees_matching(&|e: &Employee| {
                (scope == SearchScope::All || e.company_id == company_id)
                    && (contains_ignore_case(&e.first_name, &needle)
                        || contains_ignore_case(&e.last_name, &needle))
            })
        };

        Ok(EmployeeSearch {
            company,
            query: query.to_string(),
            employees,
        })
    }
}

/// `needle` must already be case-folded
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    default_case_fold_str(haystack).contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LifestyleFit;
    use crate::store::{MemoryStore, NewCompany, NewEmployee};

    fn service(scope: SearchScope) -> (QueryService, u64, u64) {
        let mut store = MemoryStore::default();
        let acme = store
            .insert_company(NewCompany::new("Acme", "hello@acme.test"))
            .unwrap();
        let globex = store
            .insert_company(NewCompany::new("Globex", "info@globex.test"))
            .unwrap();
        for (first, last, company) in [
            ("Anna", "Berg", acme.id),
            ("Bob", "Stone", acme.id),
            ("Maria", "Susan", globex.id),
            ("andrew", "Lee", acme.id),
            ("Zoë", "ÅNGSTRÖM", globex.id),
            ("Jonas", "Straße", globex.id),
        ] {
            store
                .insert_employee(NewEmployee::new(first, last, company))
                .unwrap();
        }
        let service =
            QueryService::new(PetCatalog::builtin(), Arc::new(store)).with_scope(scope);
        (service, acme.id, globex.id)
    }

    fn names(search: &EmployeeSearch) -> Vec<&str> {
        search
            .employees
            .iter()
            .map(|e| e.first_name.as_str())
            .collect()
    }

    #[test]
    fn test_lookup() {
        let (service, _, _) = service(SearchScope::All);
        assert_eq!(
            service.lookup("dog").unwrap().lifestyle_fit,
            LifestyleFit::Active
        );
        assert!(service.lookup("unknown").is_none());
        assert_eq!(service.pet_types().len(), 4);
    }

    #[test]
    fn test_search_empty_query() {
        let (service, acme, globex) = service(SearchScope::All);
        for id in [acme, globex] {
            let result = service.search(id, Some("")).unwrap();
            assert!(result.employees.is_empty());
            assert_eq!(result.query, "");
            assert!(service.search(id, None).unwrap().employees.is_empty());
        }
    }

    #[test]
    fn test_search_empty_query_does_not_scan() {
        struct CountingStore {
            inner: MemoryStore,
            scans: std::sync::atomic::AtomicUsize,
        }
        impl RecordStore for CountingStore {
            fn company(&self, id: u64) -> Option<Company> {
                self.inner.company(id)
            }
            fn companies(&self) -> Vec<Company> {
                self.inner.companies()
            }
            fn employees_matching(&self, predicate: &dyn Fn(&Employee) -> bool) -> Vec<Employee> {
                self.scans
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                self.inner.employees_matching(predicate)
            }
        }

        let mut inner = MemoryStore::default();
        let acme = inner
            .insert_company(NewCompany::new("Acme", "hello@acme.test"))
            .unwrap();
        let store = Arc::new(CountingStore {
            inner,
            scans: std::sync::atomic::AtomicUsize::new(0),
        });
        let service = QueryService::new(PetCatalog::builtin(), store.clone());

        service.search(acme.id, Some("")).unwrap();
        service.search(acme.id, None).unwrap();
        assert_eq!(store.scans.load(std::sync::atomic::Ordering::SeqCst), 0);

        service.search(acme.id, Some("a")).unwrap();
        assert_eq!(store.scans.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_search_substring_either_field() {
        let (service, acme, _) = service(SearchScope::All);
        let result = service.search(acme, Some("an")).unwrap();
        // Anna (first), Maria Susan (last), andrew (first); Bob Stone has no "an"
        assert_eq!(names(&result), ["Anna", "Maria", "andrew"]);
        assert_eq!(result.company.name, "Acme");
        assert_eq!(result.query, "an");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (service, acme, _) = service(SearchScope::All);
        assert_eq!(
            names(&service.search(acme, Some("AN")).unwrap()),
            ["Anna", "Maria", "andrew"]
        );
        assert_eq!(names(&service.search(acme, Some("bOb")).unwrap()), ["Bob"]);
        assert_eq!(names(&service.search(acme, Some("ångström")).unwrap()), ["Zoë"]);
        assert_eq!(names(&service.search(acme, Some("ZOË")).unwrap()), ["Zoë"]);
        // ß folds to "ss"
        assert_eq!(names(&service.search(acme, Some("STRASSE")).unwrap()), ["Jonas"]);
        assert_eq!(names(&service.search(acme, Some("straß")).unwrap()), ["Jonas"]);
        assert!(service.search(acme, Some("xyz")).unwrap().employees.is_empty());
    }

    #[test]
    fn test_search_company_scope() {
        let (service, acme, globex) = service(SearchScope::Company);
        assert_eq!(
            names(&service.search(acme, Some("an")).unwrap()),
            ["Anna", "andrew"]
        );
        assert_eq!(names(&service.search(globex, Some("an")).unwrap()), ["Maria"]);
    }

    #[test]
    fn test_search_unknown_company() {
        let (service, _, _) = service(SearchScope::All);
        for query in [Some("x"), Some(""), None] {
            let err = service.search(999, query).unwrap_err();
            assert!(matches!(err, AppError::CompanyNotFound { id: 999 }));
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let (service, acme, _) = service(SearchScope::All);
        let first = service.search(acme, Some("o")).unwrap();
        let second = service.search(acme, Some("o")).unwrap();
        assert_eq!(first, second);
        assert_eq!(service.lookup("cat"), service.lookup("cat"));
    }

    #[test]
    fn test_list_all() {
        let (service, acme, globex) = service(SearchScope::All);
        let ids: Vec<u64> = service.list_all().iter().map(|c| c.id).collect();
        assert_eq!(ids, [acme, globex]);
        assert_eq!(service.list_all(), service.list_all());
    }

    #[test]
    fn test_company() {
        let (service, acme, _) = service(SearchScope::All);
        assert_eq!(service.company(acme).unwrap().email, "hello@acme.test");
        assert!(service.company(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_contains_ignore_case() {
        for (hay, needle, expected) in [
            ("Susan", "an", true),
            ("ANNA", "an", true),
            ("Bob", "an", false),
            ("Straße", "strasse", true),
            ("", "a", false),
        ] {
            assert_eq!(contains_ignore_case(hay, needle), expected, "{hay} / {needle}");
        }
    }
}
