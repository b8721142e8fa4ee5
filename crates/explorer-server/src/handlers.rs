//! Request handlers for the record endpoints.
//!
//! Reads answer with JSON, writes with a plain-text confirmation. Failures
//! the client caused are echoed back; anything else is logged and answered
//! with a generic message naming the operation.

use std::sync::Arc;

use explorer_core::{Page, RecordService, ServiceError};
use explorer_router::{Request, Response};
use tracing::error;

/// Shared state handed to every handler.
pub type AppState = Arc<RecordService>;

/// `GET /`: names of all discovered tables.
pub async fn list_tables(_req: Request, state: AppState) -> Response {
    Response::json(&state.table_names())
}

/// `GET /{table}`: one page of records.
pub async fn list_records(req: Request, state: AppState) -> Response {
    let table = table_param(&req);
    let page = Page::from_params(req.get_query("limit"), req.get_query("offset"));

    match state.list(table, page).await {
        Ok(records) => Response::json(&records),
        Err(err) => error_response(&err, "unable to get records"),
    }
}

/// `GET /{table}/{id}`: a single record.
pub async fn get_record(req: Request, state: AppState) -> Response {
    let Some(id) = id_param(&req) else {
        return invalid_id();
    };

    match state.get(table_param(&req), id).await {
        Ok(record) => Response::json(&record),
        Err(err) => error_response(&err, "unable to get record"),
    }
}

/// `PUT /{table}`: insert a record from a form body.
pub async fn create_record(req: Request, state: AppState) -> Response {
    let form = req.form();

    match state.create(table_param(&req), &form).await {
        Ok(id) => Response::text(format!("last insert id {id}")),
        Err(err) => error_response(&err, "unable to insert record"),
    }
}

/// `POST /{table}/{id}`: partial update from a form body.
pub async fn update_record(req: Request, state: AppState) -> Response {
    let Some(id) = id_param(&req) else {
        return invalid_id();
    };
    let form = req.form();

    match state.update(table_param(&req), id, &form).await {
        Ok(()) => Response::text(format!("updated record id {id}")),
        Err(err) => error_response(&err, "unable to update record"),
    }
}

/// `DELETE /{table}/{id}`: remove a record.
pub async fn delete_record(req: Request, state: AppState) -> Response {
    let Some(id) = id_param(&req) else {
        return invalid_id();
    };

    match state.delete(table_param(&req), id).await {
        Ok(()) => Response::text(format!("deleted record id {id}")),
        Err(err) => error_response(&err, "unable to delete record"),
    }
}

fn table_param(req: &Request) -> &str {
    req.params.get("table").unwrap_or_default()
}

fn id_param(req: &Request) -> Option<i64> {
    req.params.parse("id")
}

fn invalid_id() -> Response {
    Response::error(400, "invalid id")
}

/// Maps a service failure to a response; `fallback` is what the client sees
/// for failures it did not cause.
fn error_response(err: &ServiceError, fallback: &'static str) -> Response {
    match err {
        ServiceError::TableNotFound => Response::error(404, "unknown table"),
        ServiceError::RecordNotFound => Response::error(404, "record not found"),
        ServiceError::Validation(validation) => Response::error(400, validation.to_string()),
        ServiceError::Store(_) | ServiceError::Extraction(_) => {
            error!(error = %err, "{fallback}");
            Response::error(500, fallback)
        }
    }
}
