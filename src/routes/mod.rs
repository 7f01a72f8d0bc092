use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod account;
pub mod admin;
pub mod catalog;

/// Maps a failed service call onto the JSON error contract of the API.
///
/// Failures without a dedicated status are logged with `action` and
/// reported as `500`.
pub(crate) fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({ "error": message })),
        ServiceError::Conflict => HttpResponse::Conflict().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(
            error_response(ServiceError::Unauthorized, "test").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_response(ServiceError::NotFound, "test").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(ServiceError::Form("bad".to_string()), "test").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(ServiceError::Conflict, "test").status(),
            StatusCode::CONFLICT
        );
    }
}
