//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into plain-text responses with a
//! consistent status code and `trace-id` header.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder
            .content_type(ContentType::plaintext())
            .body(self.message().to_owned())
    }
}

/// Log a store failure and replace it with the fixed client-facing message.
///
/// The underlying error text never reaches the response body.
pub fn store_failure(err: Error, message: &'static str) -> Error {
    error!(
        error = %err,
        trace_id = err.trace_id().unwrap_or_default(),
        "store operation failed"
    );
    let mut public = Error::internal(message);
    if let Some(id) = err.trace_id() {
        public = public.with_trace_id(id.to_owned());
    }
    public
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Not Found"))
}
