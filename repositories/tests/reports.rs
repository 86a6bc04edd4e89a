use common::{TestRuntime, memory_reports, mongo_reports};
use engine::QueryOpts;
use reports_core::ReportRepository;
use reports_core::model::Report;
use reports_core::result::ReportRepoError;
use rstest::rstest;

mod common;

fn report(id: &str, status: &str) -> Report {
    Report {
        id: id.into(),
        content: "spam".into(),
        kind: "post".into(),
        type_id: "p1".into(),
        reason: "spam".into(),
        status: status.into(),
        creator_id: "u1".into(),
    }
}

#[rstest]
#[case::memory(memory_reports())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_reports())]
#[tokio::test]
async fn create_then_get_by_id<R: ReportRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(report("r1", "pending")).await.unwrap();

    assert_eq!(report("r1", "pending"), repo.get_by_id("r1".into()).await.unwrap());
}

#[rstest]
#[case::memory(memory_reports())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_reports())]
#[tokio::test]
async fn missing_report_is_not_found<R: ReportRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;

    let err = repo.get_by_id("nope".into()).await.unwrap_err();
    assert!(matches!(err.current_context(), ReportRepoError::NotFound));

    assert!(repo.delete("nope".into()).await.is_err());
    assert!(repo.update(report("nope", "pending"), "nope".into()).await.is_err());
}

#[rstest]
#[case::memory(memory_reports())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_reports())]
#[tokio::test]
async fn status_listings_filter_on_status<R: ReportRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(report("r1", "pending")).await.unwrap();
    repo.create(report("r2", "completed")).await.unwrap();
    repo.create(report("r3", "pending")).await.unwrap();

    let all = repo.get(QueryOpts::default()).await.unwrap();
    assert_eq!(3, all.total);

    let pending = repo
        .get_all_by_status_pending(QueryOpts::default())
        .await
        .unwrap();
    assert_eq!(2, pending.total);

    let completed = repo
        .get_all_by_status_completed(QueryOpts::default())
        .await
        .unwrap();
    assert_eq!("r2", completed.items[0].id);
}

#[rstest]
#[case::memory(memory_reports())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_reports())]
#[tokio::test]
async fn update_replaces_and_delete_removes<R: ReportRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(report("r1", "pending")).await.unwrap();

    repo.update(report("r1", "completed"), "r1".into())
        .await
        .unwrap();
    assert_eq!("completed", repo.get_by_id("r1".into()).await.unwrap().status);

    repo.delete("r1".into()).await.unwrap();
    assert!(repo.get_by_id("r1".into()).await.is_err());
}
