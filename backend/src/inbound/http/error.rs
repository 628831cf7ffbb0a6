//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON envelopes and status codes.
//! Internal errors are redacted so implementation detail never leaks.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire envelope for error responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        let redact = matches!(self.code(), ErrorCode::InternalError);
        builder.json(ErrorBody {
            code: self.code(),
            message: if redact {
                "Internal server error"
            } else {
                self.message()
            },
            details: if redact { None } else { self.details() },
            trace_id,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Status mapping and redaction coverage.

    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("duplicate"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_onto_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_rt::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("secret database detail").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(json["code"], "internal_error");
        assert_eq!(json["message"], "Internal server error");
    }

    #[actix_rt::test]
    async fn client_errors_keep_their_message() {
        let response = Error::invalid_request("ordering 'rating' is not orderable")
            .error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");

        assert_eq!(json["message"], "ordering 'rating' is not orderable");
    }
}
