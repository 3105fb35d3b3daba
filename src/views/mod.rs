//! View module
//!
//! Each view turns route parameters and query parameters into a [`Page`]: the
//! template to render and the context to render it with. Markup is produced
//! downstream; views only build the context.

mod params;

use serde::Serialize;
use serde_json::{json, Value};

pub use params::QueryParams;

use crate::error::{AppError, ConfigurationError};
use crate::query::QueryService;
use crate::routing::{ParamValue, Params, Router};

/// Rendering input produced by a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub template: &'static str,
    pub context: Value,
}

/// Everything a view can read
pub struct ViewContext<'a> {
    pub queries: &'a QueryService,
    pub urls: &'a Router<View>,
}

/// Request data handed to a view
pub struct ViewRequest<'a> {
    pub params: &'a Params,
    pub query: &'a QueryParams,
}

pub type View = fn(&ViewContext<'_>, &ViewRequest<'_>) -> Result<Page, AppError>;

/// Build the application route table
pub fn routes() -> Result<Router<View>, ConfigurationError> {
    let mut router: Router<View> = Router::new();
    router.register_named("home_page", "", home_page)?;
    router.register_named(
        "pet_type_details",
        "pet_type/<str:pet_type>/",
        pet_type_details,
    )?;
    router.register_named("list_companies", "clients/", list_companies)?;
    router.register_named("company_detail", "clients/<int:company_id>/", company_detail)?;
    router.register_named(
        "employees_search_results",
        "clients/<int:company_id>/employees/search/",
        employees_search_results,
    )?;
    Ok(router)
}

/// Resolve `path` and run the matching view
pub fn dispatch(
    router: &Router<View>,
    queries: &QueryService,
    path: &str,
    query: Option<&str>,
) -> Result<Page, AppError> {
    let resolved = router.resolve(path)?;
    let query = QueryParams::parse(query);
    let ctx = ViewContext {
        queries,
        urls: router,
    };
    let request = ViewRequest {
        params: &resolved.params,
        query: &query,
    };
    (resolved.handler)(&ctx, &request)
}

fn home_page(ctx: &ViewContext<'_>, _req: &ViewRequest<'_>) -> Result<Page, AppError> {
    let pet_types: Vec<Value> = ctx
        .queries
        .pet_types()
        .iter()
        .map(|pet| {
            let params = Params::new().with("pet_type", ParamValue::Str(pet.key.clone()));
            json!({
                "key": pet.key,
                "name": pet.name,
                "url": ctx.urls.reverse("pet_type_details", &params),
            })
        })
        .collect();

    Ok(Page {
        template: "pet_adoption/home_page.html",
        context: json!({ "pet_types": pet_types }),
    })
}

fn pet_type_details(ctx: &ViewContext<'_>, req: &ViewRequest<'_>) -> Result<Page, AppError> {
    let pet_type = req.params.str("pet_type").unwrap_or_default();
    // An unknown key renders as a "not found" page, not an error
    let pet_data = ctx.queries.lookup(pet_type);

    Ok(Page {
        template: "pet_adoption/pet_details.html",
        context: json!({
            "pet_type": pet_type,
            "pet_data": pet_data,
        }),
    })
}

fn list_companies(ctx: &ViewContext<'_>, _req: &ViewRequest<'_>) -> Result<Page, AppError> {
    let companies: Vec<Value> = ctx
        .queries
        .list_all()
        .into_iter()
        .map(|company| {
            let params = Params::new().with("company_id", ParamValue::Int(company.id));
            let url = ctx.urls.reverse("company_detail", &params);
            let mut value = json!(company);
            value["url"] = json!(url);
            value
        })
        .collect();

    Ok(Page {
        template: "clients/companies_list.html",
        context: json!({ "companies": companies }),
    })
}

fn company_id(req: &ViewRequest<'_>) -> Result<u64, AppError> {
    // Route patterns guarantee the parameter; a mismatch means the table is miswired
    req.params
        .int("company_id")
        .ok_or_else(|| {
            AppError::Configuration(ConfigurationError::InvalidPattern {
                pattern: "company_id".to_string(),
                reason: "route does not bind <int:company_id>".to_string(),
            })
        })
}

fn company_detail(ctx: &ViewContext<'_>, req: &ViewRequest<'_>) -> Result<Page, AppError> {
    let company = ctx.queries.company(company_id(req)?)?;
    let params = Params::new().with("company_id", ParamValue::Int(company.id));

    Ok(Page {
        template: "clients/company_detail.html",
        context: json!({
            "company": company,
            "search_url": ctx.urls.reverse("employees_search_results", &params),
        }),
    })
}

fn employees_search_results(
    ctx: &ViewContext<'_>,
    req: &ViewRequest<'_>,
) -> Result<Page, AppError> {
    let result = ctx.queries.search(company_id(req)?, req.query.get("q"))?;

    Ok(Page {
        template: "clients/employees_search_results.html",
        context: json!({
            "employees": result.employees,
            "query": result.query,
            "company": result.company,
        }),
    })
}
