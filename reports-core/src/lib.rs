use engine::{Page, QueryOpts};
use model::Report;
use result::RepoResult;
use std::sync::Arc;

pub mod model;
pub mod result;

pub trait ReportEngine: Clone + Send + Sync + 'static {
    type Repo: ReportRepository + Send + Sync + 'static;

    fn repo(&self) -> Self::Repo;
}

/// Storage for reports. Records reaching `create` and `update` have already been validated.
pub trait ReportRepository {
    fn create(&self, report: Report) -> impl Future<Output = RepoResult<()>> + Send;

    fn get(&self, opts: QueryOpts) -> impl Future<Output = RepoResult<Page<Report>>> + Send;

    fn get_by_id(&self, id: String) -> impl Future<Output = RepoResult<Report>> + Send;

    fn get_all_by_status_completed(
        &self,
        opts: QueryOpts,
    ) -> impl Future<Output = RepoResult<Page<Report>>> + Send;

    fn get_all_by_status_pending(
        &self,
        opts: QueryOpts,
    ) -> impl Future<Output = RepoResult<Page<Report>>> + Send;

    /// Replaces the report stored under `id`.
    fn update(&self, report: Report, id: String) -> impl Future<Output = RepoResult<()>> + Send;

    fn delete(&self, id: String) -> impl Future<Output = RepoResult<()>> + Send;
}

impl<T> ReportRepository for Arc<T>
where
    T: ReportRepository + Send + Sync,
{
    async fn create(&self, report: Report) -> RepoResult<()> {
        (**self).create(report).await
    }

    async fn get(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        (**self).get(opts).await
    }

    async fn get_by_id(&self, id: String) -> RepoResult<Report> {
        (**self).get_by_id(id).await
    }

    async fn get_all_by_status_completed(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        (**self).get_all_by_status_completed(opts).await
    }

    async fn get_all_by_status_pending(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        (**self).get_all_by_status_pending(opts).await
    }

    async fn update(&self, report: Report, id: String) -> RepoResult<()> {
        (**self).update(report, id).await
    }

    async fn delete(&self, id: String) -> RepoResult<()> {
        (**self).delete(id).await
    }
}
