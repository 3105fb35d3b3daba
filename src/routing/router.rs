//! Route table
//!
//! Routes are matched in registration order against the whole path. The
//! first pattern that matches wins; registration rejects patterns that would
//! shadow an existing one exactly.

use super::pattern::{decode_path, Params, RoutePattern};
use crate::error::{AppError, ConfigurationError};

struct Route<H> {
    name: Option<String>,
    pattern: RoutePattern,
    handler: H,
}

/// Result of a successful `resolve`
#[derive(Debug)]
pub struct Resolved<'a, H> {
    pub handler: &'a H,
    pub params: Params,
    pub name: Option<&'a str>,
}

/// Path router generic over the handler type
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register(&mut self, pattern: &str, handler: H) -> Result<(), ConfigurationError> {
        self.insert(None, pattern, handler)
    }

    /// Register a route that can later be rebuilt with [`Router::reverse`]
    pub fn register_named(
        &mut self,
        name: &str,
        pattern: &str,
        handler: H,
    ) -> Result<(), ConfigurationError> {
        self.insert(Some(name), pattern, handler)
    }

    fn insert(
        &mut self,
        name: Option<&str>,
        pattern: &str,
        handler: H,
    ) -> Result<(), ConfigurationError> {
        let pattern = RoutePattern::parse(pattern)?;

        if let Some(existing) = self.routes.iter().find(|r| r.pattern.same_shape(&pattern)) {
            return Err(ConfigurationError::DuplicatePattern(
                existing.pattern.as_str().to_string(),
            ));
        }
        if let Some(name) = name {
            if self.routes.iter().any(|r| r.name.as_deref() == Some(name)) {
                return Err(ConfigurationError::DuplicateName(name.to_string()));
            }
        }

        self.routes.push(Route {
            name: name.map(ToString::to_string),
            pattern,
            handler,
        });
        Ok(())
    }

    /// Find the handler for a path and extract its parameters
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_, H>, AppError> {
        let not_found = || AppError::RouteNotFound {
            path: path.to_string(),
        };
        let segments = decode_path(path).ok_or_else(not_found)?;

        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| Resolved {
                    handler: &route.handler,
                    params,
                    name: route.name.as_deref(),
                })
            })
            .ok_or_else(not_found)
    }

    /// Build the path of a named route
    pub fn reverse(&self, name: &str, params: &Params) -> Option<String> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))?
            .pattern
            .build(params)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered patterns in match order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ParamValue;

    fn sample_router() -> Router<&'static str> {
        let mut router = Router::new();
        router.register_named("home", "", "home").unwrap();
        router
            .register_named("pet_type_details", "pet_type/<str:pet_type>/", "pet")
            .unwrap();
        router.register("/clients/", "companies").unwrap();
        router
            .register_named("company_detail", "/clients/<int:company_id>/", "company")
            .unwrap();
        router
            .register("/clients/<int:company_id>/employees/search/", "search")
            .unwrap();
        router
    }

    #[test]
    fn test_resolve_registered_patterns() {
        let router = sample_router();

        let hit = router.resolve("/").unwrap();
        assert_eq!(*hit.handler, "home");
        assert!(hit.params.is_empty());
        assert_eq!(hit.name, Some("home"));

        let hit = router.resolve("/pet_type/parrot/").unwrap();
        assert_eq!(*hit.handler, "pet");
        assert_eq!(hit.params.str("pet_type"), Some("parrot"));

        let hit = router.resolve("/clients").unwrap();
        assert_eq!(*hit.handler, "companies");
        assert_eq!(hit.name, None);

        let hit = router.resolve("/clients/42/").unwrap();
        assert_eq!(*hit.handler, "company");
        assert_eq!(hit.params.int("company_id"), Some(42));

        let hit = router.resolve("/clients/3/employees/search/").unwrap();
        assert_eq!(*hit.handler, "search");
        assert_eq!(hit.params.get("company_id"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_resolve_unregistered_path() {
        let router = sample_router();
        for path in [
            "/unknown/",
            "/pet_type/",
            "/pet_type/dog/extra/",
            "/clients/abc/",
            "/clients/1/employees/",
            "/clients//",
        ] {
            let err = router.resolve(path).unwrap_err();
            assert!(err.is_not_found(), "{path} should not resolve");
            assert!(matches!(err, AppError::RouteNotFound { .. }));
        }
    }

    #[test]
    fn test_resolve_decodes_segments() {
        let router = sample_router();

        let hit = router.resolve("/pet_type/d%6Fg/").unwrap();
        assert_eq!(*hit.handler, "pet");
        assert_eq!(hit.params.str("pet_type"), Some("dog"));

        let hit = router.resolve("/pet_type/%C3%A9l%C3%A9phant/").unwrap();
        assert_eq!(hit.params.str("pet_type"), Some("éléphant"));

        let hit = router.resolve("/clients/%34%32/").unwrap();
        assert_eq!(*hit.handler, "company");
        assert_eq!(hit.params.int("company_id"), Some(42));

        let err = router.resolve("/pet_type/%C3%28/").unwrap_err();
        assert!(matches!(err, AppError::RouteNotFound { .. }));
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = Router::new();
        router.register("/items/<int:id>/", "by_id").unwrap();
        router.register("/items/<str:slug>/", "by_slug").unwrap();

        assert_eq!(*router.resolve("/items/5/").unwrap().handler, "by_id");
        assert_eq!(*router.resolve("/items/five/").unwrap().handler, "by_slug");
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let mut router = sample_router();
        let err = router.register("/pet_type/<str:kind>", "again").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicatePattern("pet_type/<str:pet_type>/".to_string())
        );
        assert_eq!(router.len(), 5);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut router = sample_router();
        let err = router
            .register_named("home", "/elsewhere/", "other")
            .unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateName("home".to_string()));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut router: Router<()> = Router::new();
        assert!(matches!(
            router.register("/a/<uuid:id>/", ()),
            Err(ConfigurationError::InvalidPattern { .. })
        ));
        assert!(router.is_empty());
    }

    #[test]
    fn test_reverse() {
        let router = sample_router();
        let params = Params::new().with("pet_type", ParamValue::Str("dog".to_string()));
        assert_eq!(
            router.reverse("pet_type_details", &params).as_deref(),
            Some("/pet_type/dog/")
        );
        assert_eq!(router.reverse("home", &Params::new()).as_deref(), Some("/"));
        assert_eq!(router.reverse("missing", &Params::new()), None);
        assert_eq!(router.reverse("company_detail", &params), None);
    }

    #[test]
    fn test_reverse_then_resolve() {
        let router = sample_router();
        let params = Params::new().with("company_id", ParamValue::Int(9));
        let path = router.reverse("company_detail", &params).unwrap();
        let hit = router.resolve(&path).unwrap();
        assert_eq!(hit.params, params);
    }
}
