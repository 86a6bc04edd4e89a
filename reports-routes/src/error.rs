use axum::http::StatusCode;
use engine::error::StatusMapping;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportServiceError {
    #[error("report id is empty")]
    IdEmpty,
    #[error("report content is empty")]
    ContentEmpty,
    #[error("report type is empty")]
    TypeEmpty,
    #[error("report type id is empty")]
    TypeIdEmpty,
    #[error("report reason is empty")]
    ReasonEmpty,
    #[error("report status is empty")]
    StatusEmpty,
    #[error("report creator id is empty")]
    CreatorIdEmpty,
    #[error("page must be 1 or greater")]
    InvalidReportPage,
    #[error("size must not be negative")]
    InvalidReportSize,
    #[error("report was not created")]
    ReportNotCreated,
    #[error("report was not updated")]
    ReportNotUpdated,
    #[error("report not found")]
    ReportNotFound,
    #[error("report storage failed")]
    Repository,
}

impl ReportServiceError {
    /// Name of the empty field a validation kind stands for.
    pub fn empty_field(&self) -> Option<&'static str> {
        match self {
            ReportServiceError::IdEmpty => Some("id"),
            ReportServiceError::ContentEmpty => Some("content"),
            ReportServiceError::TypeEmpty => Some("type"),
            ReportServiceError::TypeIdEmpty => Some("type_id"),
            ReportServiceError::ReasonEmpty => Some("reason"),
            ReportServiceError::StatusEmpty => Some("status"),
            ReportServiceError::CreatorIdEmpty => Some("creator_id"),
            _ => None,
        }
    }
}

impl StatusMapping for ReportServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ReportServiceError::IdEmpty
            | ReportServiceError::ContentEmpty
            | ReportServiceError::TypeEmpty
            | ReportServiceError::TypeIdEmpty
            | ReportServiceError::ReasonEmpty
            | ReportServiceError::StatusEmpty
            | ReportServiceError::CreatorIdEmpty
            | ReportServiceError::InvalidReportPage
            | ReportServiceError::InvalidReportSize => StatusCode::UNPROCESSABLE_ENTITY,
            ReportServiceError::ReportNotFound => StatusCode::NOT_FOUND,
            ReportServiceError::ReportNotCreated
            | ReportServiceError::ReportNotUpdated
            | ReportServiceError::Repository => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
