//! Route table.

use explorer_router::{LoggingMiddleware, Router, RouterError};

use crate::handlers::{self, AppState};

/// Builds the router serving every endpoint over `state`.
///
/// # Errors
///
/// [`RouterError::InvalidPattern`] if a route pattern does not parse.
pub fn build_router(state: AppState) -> Result<Router, RouterError> {
    let s1 = state.clone();
    let s2 = state.clone();
    let s3 = state.clone();
    let s4 = state.clone();
    let s5 = state.clone();

    Router::new()
        .middleware(LoggingMiddleware)
        .get("/", move |req| {
            let st = state.clone();
            async move { handlers::list_tables(req, st).await }
        })?
        .get("/{table}", move |req| {
            let st = s1.clone();
            async move { handlers::list_records(req, st).await }
        })?
        .put("/{table}", move |req| {
            let st = s2.clone();
            async move { handlers::create_record(req, st).await }
        })?
        .get("/{table}/{id}", move |req| {
            let st = s3.clone();
            async move { handlers::get_record(req, st).await }
        })?
        .post("/{table}/{id}", move |req| {
            let st = s4.clone();
            async move { handlers::update_record(req, st).await }
        })?
        .delete("/{table}/{id}", move |req| {
            let st = s5.clone();
            async move { handlers::delete_record(req, st).await }
        })
}
