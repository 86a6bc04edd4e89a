use error_stack::Report;

pub type RepoResult<T> = Result<T, Report<PostRepoError>>;
pub type OptRepoResult<T> = Result<Option<T>, Report<PostRepoError>>;

#[derive(Debug, thiserror::Error)]
pub enum PostRepoError {
    #[error("failed to get post")]
    Get,
    #[error("failed to list posts")]
    List,
    #[error("failed to create post")]
    Create,
    #[error("failed to update post")]
    Update,
    #[error("failed to delete post")]
    Delete,
}
