use super::paginate;
use engine::{Page, QueryOpts};
use error_stack::Report as ErrorReport;
use reports_core::ReportRepository;
use reports_core::model::{Report, ReportStatus};
use reports_core::result::{RepoResult, ReportRepoError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Reports keyed by the id they were written under.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportRepo {
    reports: Arc<RwLock<BTreeMap<String, Report>>>,
}

fn sort_field<'a>(report: &'a Report, field: &str) -> Option<&'a str> {
    match field {
        "id" => Some(report.id.as_str()),
        "type" => Some(report.kind.as_str()),
        "type_id" => Some(report.type_id.as_str()),
        "reason" => Some(report.reason.as_str()),
        "status" => Some(report.status.as_str()),
        "creator_id" => Some(report.creator_id.as_str()),
        _ => None,
    }
}

fn not_found(id: &str) -> ErrorReport<ReportRepoError> {
    ErrorReport::new(ReportRepoError::NotFound).attach(format!("report '{id}'"))
}

impl MemoryReportRepo {
    async fn find_page<F>(&self, opts: QueryOpts, filter: F) -> Page<Report>
    where
        F: Fn(&Report) -> bool,
    {
        let reports = self
            .reports
            .read()
            .await
            .values()
            .filter(|r| filter(r))
            .cloned()
            .collect();

        paginate(reports, &opts, sort_field)
    }
}

impl ReportRepository for MemoryReportRepo {
    async fn create(&self, report: Report) -> RepoResult<()> {
        let mut reports = self.reports.write().await;
        if reports.contains_key(&report.id) {
            return Err(ErrorReport::new(ReportRepoError::Create)
                .attach(format!("report '{}' already exists", report.id)));
        }

        reports.insert(report.id.clone(), report);
        Ok(())
    }

    async fn get(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        Ok(self.find_page(opts, |_| true).await)
    }

    async fn get_by_id(&self, id: String) -> RepoResult<Report> {
        self.reports
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(&id))
    }

    async fn get_all_by_status_completed(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        Ok(self
            .find_page(opts, |r| r.has_status(ReportStatus::Completed))
            .await)
    }

    async fn get_all_by_status_pending(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        Ok(self
            .find_page(opts, |r| r.has_status(ReportStatus::Pending))
            .await)
    }

    async fn update(&self, report: Report, id: String) -> RepoResult<()> {
        let mut reports = self.reports.write().await;
        match reports.get_mut(&id) {
            Some(stored) => {
                *stored = report;
                Ok(())
            }
            None => Err(not_found(&id)),
        }
    }

    async fn delete(&self, id: String) -> RepoResult<()> {
        self.reports
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(&id))
    }
}
