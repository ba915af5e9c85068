//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidTransition | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InsufficientBalance | ErrorCode::CurrencyMismatch => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad payload"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("no such booking"), StatusCode::NOT_FOUND)]
    #[case(Error::invalid_transition("already confirmed"), StatusCode::CONFLICT)]
    #[case(Error::conflict("dates taken"), StatusCode::CONFLICT)]
    #[case(
        Error::insufficient_balance("10 EUR short"),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(
        Error::currency_mismatch("EUR wallet, USD charge"),
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn internal_errors_are_redacted() {
        let redacted = redact_if_internal(&Error::internal("wallet table exploded"));
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[test]
    fn other_errors_pass_through_verbatim() {
        let passed = redact_if_internal(&Error::conflict("dates taken"));
        assert_eq!(passed.message(), "dates taken");
    }
}
