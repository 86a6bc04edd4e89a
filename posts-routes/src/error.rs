use axum::http::StatusCode;
use engine::error::StatusMapping;

#[derive(Debug, thiserror::Error)]
pub enum PostServiceError {
    #[error("credential is missing or could not be verified")]
    Unauthorized,
    #[error("the requested post does not exist")]
    NotFound,
    #[error("post id does not match the stored post")]
    PostRequiredId,
    #[error("creator id does not match the post's creator")]
    PostRequiredCreatorId,
    #[error("post storage failed")]
    Repository,
}

impl StatusMapping for PostServiceError {
    fn status(&self) -> StatusCode {
        match self {
            PostServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            PostServiceError::NotFound => StatusCode::NOT_FOUND,
            PostServiceError::PostRequiredId | PostServiceError::PostRequiredCreatorId => {
                StatusCode::FORBIDDEN
            }
            PostServiceError::Repository => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
