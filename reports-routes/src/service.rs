use crate::ServiceResult;
use crate::error::ReportServiceError;
use crate::metrics;
use engine::{Page, QueryOpts};
use reports_core::model::{Report, ReportStatus};
use reports_core::result::ReportRepoError;
use reports_core::{ReportEngine, ReportRepository};
use error_stack::ResultExt;
use tracing::{debug, instrument, warn};

/// Report triage. Reports carry no credential; callers are trusted by the deployment.
///
/// Persistence failures behind create, update, delete and the lookups are reported with a
/// fixed kind and a fresh report. The original report is only logged. A failed listing of
/// every report keeps its cause.
#[derive(Debug, Clone)]
pub struct ReportService<T> {
    engine: T,
}

impl<T> ReportService<T>
where
    T: ReportEngine,
{
    pub fn new(engine: T) -> Self {
        ReportService { engine }
    }

    #[instrument(skip_all, name = "service#create_report", fields(report.id = %report.id))]
    pub async fn create(&self, report: Report) -> ServiceResult<()> {
        self.validate(&report)?;

        self.engine
            .repo()
            .create(report)
            .await
            .map_err(|e| masked(ReportServiceError::ReportNotCreated, e))?;

        metrics::increment_reports_created();
        Ok(())
    }

    #[instrument(skip_all, name = "service#get_reports", fields(page = opts.page, size = opts.size))]
    pub async fn get(&self, opts: QueryOpts) -> ServiceResult<Page<Report>> {
        check_paging(&opts)?;

        let reports = self
            .engine
            .repo()
            .get(opts)
            .await
            .change_context(ReportServiceError::Repository)?;

        metrics::increment_reports_retrieved_by(reports.items.len());
        Ok(reports)
    }

    #[instrument(skip_all, name = "service#get_report", fields(report.id = %id))]
    pub async fn get_by_id(&self, id: String) -> ServiceResult<Report> {
        let report = self
            .engine
            .repo()
            .get_by_id(id)
            .await
            .map_err(|e| masked(ReportServiceError::ReportNotFound, e))?;

        metrics::increment_reports_retrieved_by(1);
        Ok(report)
    }

    pub async fn get_all_by_status_completed(&self, opts: QueryOpts) -> ServiceResult<Page<Report>> {
        self.get_all_by_status(ReportStatus::Completed, opts).await
    }

    pub async fn get_all_by_status_pending(&self, opts: QueryOpts) -> ServiceResult<Page<Report>> {
        self.get_all_by_status(ReportStatus::Pending, opts).await
    }

    #[instrument(skip_all, name = "service#get_reports_by_status", fields(status = %status, page = opts.page, size = opts.size))]
    async fn get_all_by_status(
        &self,
        status: ReportStatus,
        opts: QueryOpts,
    ) -> ServiceResult<Page<Report>> {
        check_paging(&opts)?;

        let repo = self.engine.repo();
        let reports = match status {
            ReportStatus::Completed => repo.get_all_by_status_completed(opts).await,
            ReportStatus::Pending => repo.get_all_by_status_pending(opts).await,
        }
        .map_err(|e| masked(ReportServiceError::ReportNotFound, e))?;

        metrics::increment_reports_retrieved_by(reports.items.len());
        Ok(reports)
    }

    /// Replaces the report under `id` with `report`. Nothing is merged, so `report` has to
    /// be complete.
    #[instrument(skip_all, name = "service#update_report", fields(report.id = %id))]
    pub async fn update(&self, report: Report, id: String) -> ServiceResult<()> {
        self.validate(&report)?;

        self.engine
            .repo()
            .update(report, id)
            .await
            .map_err(|e| masked(ReportServiceError::ReportNotUpdated, e))?;

        metrics::increment_reports_updated();
        Ok(())
    }

    #[instrument(skip_all, name = "service#delete_report", fields(report.id = %id))]
    pub async fn delete(&self, id: String) -> ServiceResult<()> {
        self.engine
            .repo()
            .delete(id)
            .await
            .map_err(|e| masked(ReportServiceError::ReportNotFound, e))?;

        metrics::increment_reports_deleted();
        Ok(())
    }

    pub fn validate(&self, report: &Report) -> ServiceResult<()> {
        validate(report).inspect_err(|e| {
            if let Some(field) = e.current_context().empty_field() {
                debug!("rejecting report with empty {field}");
                metrics::increment_reports_rejected(field);
            }
        })
    }
}

/// Checks the required fields in a fixed order and fails on the first empty one.
pub fn validate(report: &Report) -> ServiceResult<()> {
    let fields = [
        (&report.id, ReportServiceError::IdEmpty),
        (&report.content, ReportServiceError::ContentEmpty),
        (&report.kind, ReportServiceError::TypeEmpty),
        (&report.type_id, ReportServiceError::TypeIdEmpty),
        (&report.reason, ReportServiceError::ReasonEmpty),
        (&report.status, ReportServiceError::StatusEmpty),
        (&report.creator_id, ReportServiceError::CreatorIdEmpty),
    ];

    match fields.into_iter().find(|(value, _)| value.is_empty()) {
        Some((_, kind)) => Err(error_stack::Report::new(kind)),
        None => Ok(()),
    }
}

fn check_paging(opts: &QueryOpts) -> ServiceResult<()> {
    if opts.page < 1 {
        return Err(error_stack::Report::new(ReportServiceError::InvalidReportPage)
            .attach(format!("page {}", opts.page)));
    }
    if opts.size < 0 {
        return Err(error_stack::Report::new(ReportServiceError::InvalidReportSize)
            .attach(format!("size {}", opts.size)));
    }
    Ok(())
}

fn masked(
    kind: ReportServiceError,
    cause: error_stack::Report<ReportRepoError>,
) -> error_stack::Report<ReportServiceError> {
    warn!("{kind}: {cause:?}");
    error_stack::Report::new(kind)
}
