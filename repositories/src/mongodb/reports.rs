use super::find_options;
use bson::{Document, doc};
use engine::{Page, QueryOpts};
use error_stack::{Report as ErrorReport, ResultExt};
use mongodb::{Collection, Database};
use reports_core::ReportRepository;
use reports_core::model::{Report, ReportStatus};
use reports_core::result::{RepoResult, ReportRepoError};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tracing::debug;

const REPORTS_COLLECTION_NAME: &str = "reports";

/// A report stored under the key it was written with. For updates that key can differ
/// from `report.id`.
#[derive(Debug, Serialize, Deserialize)]
struct MongoReport {
    #[serde(rename = "_id")]
    key: String,
    #[serde(flatten)]
    report: Report,
}

#[derive(Debug, Clone)]
pub struct ReportRepo {
    db: Database,
}

impl ReportRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn reports(&self) -> Collection<MongoReport> {
        self.db.collection(REPORTS_COLLECTION_NAME)
    }

    async fn find_page(&self, filter: Document, opts: QueryOpts) -> RepoResult<Page<Report>> {
        let total = self
            .reports()
            .count_documents(filter.clone())
            .await
            .change_context(ReportRepoError::List)?;

        let Some(options) = find_options(&opts) else {
            return Ok(Page::new(Vec::new(), total, &opts));
        };

        let items = self
            .reports()
            .find(filter)
            .with_options(options)
            .await
            .change_context(ReportRepoError::List)?
            .map(|r| r.map(|r| r.report))
            .collect::<Result<Vec<Report>, _>>()
            .await
            .change_context(ReportRepoError::List)?;

        Ok(Page::new(items, total, &opts))
    }

    async fn find_by_status(
        &self,
        status: ReportStatus,
        opts: QueryOpts,
    ) -> RepoResult<Page<Report>> {
        self.find_page(doc! { "status": status.as_str() }, opts)
            .await
    }
}

fn not_found(id: &str) -> ErrorReport<ReportRepoError> {
    ErrorReport::new(ReportRepoError::NotFound).attach(format!("report '{id}'"))
}

impl ReportRepository for ReportRepo {
    async fn create(&self, report: Report) -> RepoResult<()> {
        let document = MongoReport {
            key: report.id.clone(),
            report,
        };

        self.reports()
            .insert_one(document)
            .await
            .change_context(ReportRepoError::Create)?;
        Ok(())
    }

    async fn get(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        self.find_page(Document::new(), opts).await
    }

    async fn get_by_id(&self, id: String) -> RepoResult<Report> {
        self.reports()
            .find_one(doc! { "_id": id.as_str() })
            .await
            .change_context(ReportRepoError::Get)?
            .map(|r| r.report)
            .ok_or_else(|| not_found(&id))
    }

    async fn get_all_by_status_completed(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        self.find_by_status(ReportStatus::Completed, opts).await
    }

    async fn get_all_by_status_pending(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        self.find_by_status(ReportStatus::Pending, opts).await
    }

    async fn update(&self, report: Report, id: String) -> RepoResult<()> {
        let document = MongoReport {
            key: id.clone(),
            report,
        };

        let result = self
            .reports()
            .replace_one(doc! { "_id": id.as_str() }, document)
            .await
            .change_context(ReportRepoError::Update)?;

        if result.matched_count == 0 {
            return Err(not_found(&id));
        }
        Ok(())
    }

    async fn delete(&self, id: String) -> RepoResult<()> {
        let result = self
            .reports()
            .delete_one(doc! { "_id": id.as_str() })
            .await
            .change_context(ReportRepoError::Delete)?;

        debug!("deleted {} reports with id '{id}'", result.deleted_count);
        if result.deleted_count == 0 {
            return Err(not_found(&id));
        }
        Ok(())
    }
}
