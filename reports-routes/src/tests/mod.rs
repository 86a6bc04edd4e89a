use engine::{Page, QueryOpts};
use mockall::automock;
use reports_core::model::Report;
use reports_core::result::RepoResult;
use reports_core::{ReportEngine, ReportRepository};
use std::sync::Arc;

mod service;

#[derive(Clone)]
struct TestEngine {
    repo: Arc<MockReportRepo>,
}

impl TestEngine {
    fn new(repo: MockReportRepo) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

impl ReportEngine for TestEngine {
    type Repo = Arc<MockReportRepo>;

    fn repo(&self) -> Self::Repo {
        Arc::clone(&self.repo)
    }
}

struct ReportRepo;

#[automock]
#[allow(unused_variables)]
impl ReportRepository for ReportRepo {
    async fn create(&self, report: Report) -> RepoResult<()> {
        unreachable!()
    }

    async fn get(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        unreachable!()
    }

    async fn get_by_id(&self, id: String) -> RepoResult<Report> {
        unreachable!()
    }

    async fn get_all_by_status_completed(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        unreachable!()
    }

    async fn get_all_by_status_pending(&self, opts: QueryOpts) -> RepoResult<Page<Report>> {
        unreachable!()
    }

    async fn update(&self, report: Report, id: String) -> RepoResult<()> {
        unreachable!()
    }

    async fn delete(&self, id: String) -> RepoResult<()> {
        unreachable!()
    }
}

fn report(id: &str, status: &str) -> Report {
    Report {
        id: id.into(),
        content: "buy followers here".into(),
        kind: "post".into(),
        type_id: "abcdefghij1700000000000".into(),
        reason: "spam".into(),
        status: status.into(),
        creator_id: "abcdefghijklmnop".into(),
    }
}
