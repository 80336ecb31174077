//! JSON HTTP surface over the client service.

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::dto::api::StandardError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod client;

/// Registers every client route together with JSON/query error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        let response = error_response(StatusCode::BAD_REQUEST, "Malformed body", &err.to_string(), req);
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        let response =
            error_response(StatusCode::BAD_REQUEST, "Malformed query", &err.to_string(), req);
        InternalError::from_response(err, response).into()
    }))
    .service(client::list_clients)
    .service(client::clients_by_income)
    .service(client::clients_by_income_greater_than)
    .service(client::clients_by_cpf)
    .service(client::show_client)
    .service(client::create_client)
    .service(client::update_client)
    .service(client::delete_client);
}

/// Builds a [`StandardError`] response for the current request path.
pub fn error_response(
    status: StatusCode,
    error: &str,
    message: &str,
    req: &HttpRequest,
) -> HttpResponse {
    HttpResponse::build(status).json(StandardError::new(
        status.as_u16(),
        error,
        message,
        req.path(),
    ))
}

pub fn service_error_response(err: &ServiceError, req: &HttpRequest) -> HttpResponse {
    match err {
        ServiceError::NotFound(message) => {
            error_response(StatusCode::NOT_FOUND, "Resource not found", message, req)
        }
        ServiceError::Repository(RepositoryError::ConstraintViolation(message)) => {
            error_response(StatusCode::CONFLICT, "Constraint violation", message, req)
        }
        ServiceError::Repository(RepositoryError::ValidationError(message)) => {
            error_response(StatusCode::BAD_REQUEST, "Validation error", message, req)
        }
        ServiceError::Repository(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "Unexpected storage failure",
            req,
        ),
    }
}

pub fn form_error_response(err: &FormError, req: &HttpRequest) -> HttpResponse {
    log::debug!("Rejected request to {}: {err}", req.path());
    error_response(StatusCode::BAD_REQUEST, "Validation error", &err.to_string(), req)
}
