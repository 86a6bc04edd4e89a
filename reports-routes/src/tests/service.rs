use super::*;
use crate::error::ReportServiceError;
use crate::service::ReportService;
use error_stack::Report as ErrorReport;
use mockall::predicate;
use reports_core::result::ReportRepoError;
use rstest::rstest;

fn service(repo: MockReportRepo) -> ReportService<TestEngine> {
    ReportService::new(TestEngine::new(repo))
}

#[tokio::test]
async fn create_persists_valid_report() {
    let mut repo = MockReportRepo::new();
    repo.expect_create()
        .with(predicate::eq(report("r1", "pending")))
        .once()
        .returning(|_| Ok(()));

    service(repo).create(report("r1", "pending")).await.unwrap();
}

#[tokio::test]
async fn invalid_report_never_reaches_persistence() {
    let mut repo = MockReportRepo::new();
    repo.expect_create().never();
    repo.expect_update().never();
    let service = service(repo);

    let incomplete = Report {
        reason: String::new(),
        ..report("r1", "pending")
    };

    let err = service.create(incomplete.clone()).await.unwrap_err();
    assert_eq!(&ReportServiceError::ReasonEmpty, err.current_context());

    let err = service.update(incomplete, "r1".into()).await.unwrap_err();
    assert_eq!(&ReportServiceError::ReasonEmpty, err.current_context());
}

#[tokio::test]
async fn failed_create_is_masked() {
    let mut repo = MockReportRepo::new();
    repo.expect_create()
        .returning(|_| Err(ErrorReport::new(ReportRepoError::Create)));

    let err = service(repo)
        .create(report("r1", "pending"))
        .await
        .unwrap_err();

    assert_eq!(&ReportServiceError::ReportNotCreated, err.current_context());
    assert!(!err.contains::<ReportRepoError>());
}

#[rstest]
#[case::page_zero(QueryOpts::with_size(0, 10), ReportServiceError::InvalidReportPage)]
#[case::negative_size(QueryOpts::with_size(1, -1), ReportServiceError::InvalidReportSize)]
#[tokio::test]
async fn bad_paging_is_rejected_before_any_read(
    #[case] opts: QueryOpts,
    #[case] expected: ReportServiceError,
) {
    let mut repo = MockReportRepo::new();
    repo.expect_get().never();
    repo.expect_get_all_by_status_completed().never();
    repo.expect_get_all_by_status_pending().never();
    let service = service(repo);

    let err = service.get(opts.clone()).await.unwrap_err();
    assert_eq!(&expected, err.current_context());

    let err = service
        .get_all_by_status_completed(opts.clone())
        .await
        .unwrap_err();
    assert_eq!(&expected, err.current_context());

    let err = service.get_all_by_status_pending(opts).await.unwrap_err();
    assert_eq!(&expected, err.current_context());
}

#[tokio::test]
async fn status_listings_use_their_own_query() {
    let mut repo = MockReportRepo::new();
    repo.expect_get_all_by_status_completed()
        .once()
        .returning(|opts| Ok(Page::new(vec![report("r1", "completed")], 1, &opts)));
    repo.expect_get_all_by_status_pending()
        .once()
        .returning(|opts| Ok(Page::new(vec![report("r2", "pending")], 1, &opts)));
    let service = service(repo);

    let completed = service
        .get_all_by_status_completed(QueryOpts::default())
        .await
        .unwrap();
    assert_eq!("r1", completed.items[0].id);

    let pending = service
        .get_all_by_status_pending(QueryOpts::default())
        .await
        .unwrap();
    assert_eq!("r2", pending.items[0].id);
}

#[tokio::test]
async fn failed_listing_keeps_its_cause() {
    let mut repo = MockReportRepo::new();
    repo.expect_get()
        .once()
        .returning(|_| Err(ErrorReport::new(ReportRepoError::List)));

    let err = service(repo).get(QueryOpts::default()).await.unwrap_err();

    assert_eq!(&ReportServiceError::Repository, err.current_context());
    assert!(err.contains::<ReportRepoError>());
}

#[tokio::test]
async fn failed_status_listing_is_not_found() {
    let mut repo = MockReportRepo::new();
    repo.expect_get_all_by_status_pending()
        .returning(|_| Err(ErrorReport::new(ReportRepoError::List)));

    let err = service(repo)
        .get_all_by_status_pending(QueryOpts::default())
        .await
        .unwrap_err();

    assert_eq!(&ReportServiceError::ReportNotFound, err.current_context());
}

#[tokio::test]
async fn lookup_failures_are_not_found() {
    let mut repo = MockReportRepo::new();
    repo.expect_get_by_id()
        .with(predicate::eq("gone".to_string()))
        .returning(|_| Err(ErrorReport::new(ReportRepoError::NotFound)));
    repo.expect_delete()
        .returning(|_| Err(ErrorReport::new(ReportRepoError::Delete)));
    let service = service(repo);

    let err = service.get_by_id("gone".into()).await.unwrap_err();
    assert_eq!(&ReportServiceError::ReportNotFound, err.current_context());

    let err = service.delete("gone".into()).await.unwrap_err();
    assert_eq!(&ReportServiceError::ReportNotFound, err.current_context());
}

#[tokio::test]
async fn update_is_keyed_by_the_given_id() {
    let mut repo = MockReportRepo::new();
    repo.expect_update()
        .with(
            predicate::eq(report("r1", "completed")),
            predicate::eq("r1".to_string()),
        )
        .once()
        .returning(|_, _| Ok(()));

    service(repo)
        .update(report("r1", "completed"), "r1".into())
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_update_is_not_updated() {
    let mut repo = MockReportRepo::new();
    repo.expect_update()
        .returning(|_, _| Err(ErrorReport::new(ReportRepoError::Update)));

    let err = service(repo)
        .update(report("r1", "completed"), "r1".into())
        .await
        .unwrap_err();

    assert_eq!(&ReportServiceError::ReportNotUpdated, err.current_context());
}
