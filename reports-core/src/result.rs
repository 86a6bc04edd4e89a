use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<ReportRepoError>>;

#[derive(Debug, thiserror::Error)]
pub enum ReportRepoError {
    #[error("failed to get report")]
    Get,
    #[error("failed to list reports")]
    List,
    #[error("failed to create report")]
    Create,
    #[error("failed to update report")]
    Update,
    #[error("failed to delete report")]
    Delete,
    #[error("no report exists with the given id")]
    NotFound,
}
