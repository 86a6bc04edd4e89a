use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use serde::Serialize;
use std::error::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Maps an error kind to the HTTP status it is reported with.
/// Implemented by each service's error type; this is the only place kinds become statuses.
pub trait StatusMapping {
    fn status(&self) -> StatusCode;
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(thiserror::Error)]
#[error("there was an error running the endpoint")]
pub struct EndpointError<T: Error + Send + Sync + 'static>(Report<T>);

impl<T: Error + Send + Sync + 'static> EndpointError<T> {
    pub fn report(&self) -> &Report<T> {
        &self.0
    }
}

impl<T: Error + Send + Sync + 'static> std::fmt::Debug for EndpointError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.0, f)
    }
}

impl<T> From<Report<T>> for EndpointError<T>
where
    T: Error + Send + Sync + 'static,
{
    fn from(value: Report<T>) -> Self {
        Self(value)
    }
}

impl<T> IntoResponse for EndpointError<T>
where
    T: Error + StatusMapping + Send + Sync + 'static,
{
    fn into_response(self) -> axum::response::Response {
        let kind = self.0.current_context();
        let status = kind.status();

        if status.is_server_error() {
            error!("request failed: {:?}", self.0);
        } else {
            warn!("request rejected with {status}: {kind}");
        }

        let body = ErrorBody {
            message: kind.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error("gone")]
        Gone,
        #[error("broken")]
        Broken,
    }

    impl StatusMapping for TestError {
        fn status(&self) -> StatusCode {
            match self {
                TestError::Gone => StatusCode::NOT_FOUND,
                TestError::Broken => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    #[test]
    fn response_status_comes_from_current_context() {
        let res = EndpointError::from(Report::new(TestError::Gone)).into_response();
        assert_eq!(StatusCode::NOT_FOUND, res.status());

        let res = EndpointError::from(Report::new(TestError::Broken)).into_response();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
    }
}
