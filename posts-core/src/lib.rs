use engine::auth::AuthPort;
use engine::{Page, QueryOpts};
use model::{Post, PostQueryStyle};
use result::{OptRepoResult, RepoResult};
use std::sync::Arc;

pub mod model;
pub mod result;

pub trait PostEngine: Clone + Send + Sync + 'static {
    type Auth: AuthPort + Send + Sync + 'static;
    type Repo: PostRepository + Send + Sync + 'static;

    fn auth(&self) -> Self::Auth;
    fn repo(&self) -> Self::Repo;
}

/// Storage for posts.
///
/// Implementations receive records that already satisfy every post invariant; they only
/// store and query. Paging in `opts` is passed through as given.
pub trait PostRepository {
    fn list(&self, opts: QueryOpts) -> impl Future<Output = RepoResult<Page<Post>>> + Send;

    fn create(&self, post: Post) -> impl Future<Output = RepoResult<()>> + Send;

    /// Removes the post, returning `None` if nothing was stored under `id`.
    ///
    /// The caller has been authenticated but nobody has checked that they own the post.
    /// Implementations that need delete to be owner-only must enforce it themselves.
    fn delete(&self, id: String) -> impl Future<Output = OptRepoResult<()>> + Send;

    fn get_detail(&self, id: String) -> impl Future<Output = OptRepoResult<Post>> + Send;

    fn get_by_uid(
        &self,
        uid: String,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> impl Future<Output = RepoResult<Page<Post>>> + Send;

    fn get_other(
        &self,
        uid: String,
        opts: QueryOpts,
    ) -> impl Future<Output = RepoResult<Page<Post>>> + Send;

    fn get_by_category(
        &self,
        category_id: String,
        opts: QueryOpts,
    ) -> impl Future<Output = RepoResult<Page<Post>>> + Send;

    /// Replaces the stored post that has `post.id`.
    fn update(&self, post: Post) -> impl Future<Output = RepoResult<()>> + Send;

    /// Replaces the stored post under `id` with `post`, whose comments are already merged.
    fn update_post_comment(
        &self,
        id: String,
        post: Post,
    ) -> impl Future<Output = RepoResult<()>> + Send;
}

impl<T> PostRepository for Arc<T>
where
    T: PostRepository + Send + Sync,
{
    async fn list(&self, opts: QueryOpts) -> RepoResult<Page<Post>> {
        (**self).list(opts).await
    }

    async fn create(&self, post: Post) -> RepoResult<()> {
        (**self).create(post).await
    }

    async fn delete(&self, id: String) -> OptRepoResult<()> {
        (**self).delete(id).await
    }

    async fn get_detail(&self, id: String) -> OptRepoResult<Post> {
        (**self).get_detail(id).await
    }

    async fn get_by_uid(
        &self,
        uid: String,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> RepoResult<Page<Post>> {
        (**self).get_by_uid(uid, opts, style).await
    }

    async fn get_other(&self, uid: String, opts: QueryOpts) -> RepoResult<Page<Post>> {
        (**self).get_other(uid, opts).await
    }

    async fn get_by_category(
        &self,
        category_id: String,
        opts: QueryOpts,
    ) -> RepoResult<Page<Post>> {
        (**self).get_by_category(category_id, opts).await
    }

    async fn update(&self, post: Post) -> RepoResult<()> {
        (**self).update(post).await
    }

    async fn update_post_comment(&self, id: String, post: Post) -> RepoResult<()> {
        (**self).update_post_comment(id, post).await
    }
}
