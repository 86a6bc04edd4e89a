use crate::error::ReportServiceError;
use crate::service::ReportService;
use crate::state::ReportAppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response, Result},
};
use engine::error::{EndpointError, ErrorBody};
use engine::{Page, QueryOpts};
use reports_core::ReportEngine;
use reports_core::model::Report;
use routing::router::RouterBuilder;
use tracing::instrument;
use utoipa::OpenApi;

const REPORT_ROOT_PATH: &str = "/reports";

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = REPORT_ROOT_PATH, api = ReportDocs),
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    list_reports,
    create_report,
    list_completed_reports,
    list_pending_reports,
    get_report,
    update_report,
    delete_report,
))]
struct ReportDocs;

const REPORT_LIST_PATH: &str = "/";
const REPORT_CREATE_PATH: &str = "/";
const REPORT_COMPLETED_PATH: &str = "/completed";
const REPORT_PENDING_PATH: &str = "/pending";
const REPORT_ID_PATH: &str = "/{id}";

pub fn build<T: ReportEngine>(app_state: ReportAppState<T>) -> Router {
    let metrics = app_state.metrics.clone();

    RouterBuilder::new(REPORT_ROOT_PATH)
        .get(REPORT_LIST_PATH, list_reports::<T>)
        .post(REPORT_CREATE_PATH, create_report::<T>)
        .get(REPORT_COMPLETED_PATH, list_completed_reports::<T>)
        .get(REPORT_PENDING_PATH, list_pending_reports::<T>)
        .get(REPORT_ID_PATH, get_report::<T>)
        .put(REPORT_ID_PATH, update_report::<T>)
        .delete(REPORT_ID_PATH, delete_report::<T>)
        .build(app_state, ApiDoc::openapi(), metrics)
}

type Endpoint = Result<Response, EndpointError<ReportServiceError>>;

fn page_response(reports: Page<Report>) -> Response {
    if reports.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(reports).into_response()
    }
}

#[utoipa::path(
    get,
    path = REPORT_LIST_PATH,
    responses(
        (status = OK, description = "Reports were found on the given page", body = Page<Report>),
        (status = NO_CONTENT, description = "No reports exist on the given page"),
        (status = UNPROCESSABLE_ENTITY, description = "Page is below 1 or size is negative", body = ErrorBody),
    ),
    params(QueryOpts)
)]
#[instrument(skip(service), err(Debug))]
async fn list_reports<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    Ok(page_response(service.get(opts).await?))
}

/// File a report. Every field is required.
#[utoipa::path(
    post,
    path = REPORT_CREATE_PATH,
    responses(
        (status = CREATED, description = "The report was stored", body = Report),
        (status = UNPROCESSABLE_ENTITY, description = "A required field is empty", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "The report was not created", body = ErrorBody),
    ),
    request_body = Report
)]
#[instrument(skip_all, err(Debug), fields(report.id = %report.id))]
async fn create_report<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Json(report): Json<Report>,
) -> Endpoint {
    service.create(report.clone()).await?;
    Ok((StatusCode::CREATED, Json(report)).into_response())
}

#[utoipa::path(
    get,
    path = REPORT_COMPLETED_PATH,
    responses(
        (status = OK, description = "Completed reports on the given page", body = Page<Report>),
        (status = NO_CONTENT, description = "No completed reports exist on the given page"),
        (status = UNPROCESSABLE_ENTITY, description = "Page is below 1 or size is negative", body = ErrorBody),
    ),
    params(QueryOpts)
)]
#[instrument(skip(service), err(Debug))]
async fn list_completed_reports<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    Ok(page_response(
        service.get_all_by_status_completed(opts).await?,
    ))
}

#[utoipa::path(
    get,
    path = REPORT_PENDING_PATH,
    responses(
        (status = OK, description = "Pending reports on the given page", body = Page<Report>),
        (status = NO_CONTENT, description = "No pending reports exist on the given page"),
        (status = UNPROCESSABLE_ENTITY, description = "Page is below 1 or size is negative", body = ErrorBody),
    ),
    params(QueryOpts)
)]
#[instrument(skip(service), err(Debug))]
async fn list_pending_reports<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    Ok(page_response(service.get_all_by_status_pending(opts).await?))
}

#[utoipa::path(
    get,
    path = REPORT_ID_PATH,
    responses(
        (status = OK, description = "The report was found", body = Report),
        (status = NOT_FOUND, description = "The report could not be loaded", body = ErrorBody),
    ),
    params(("id" = String, Path, description = "The report id"))
)]
#[instrument(skip(service), err(Debug))]
async fn get_report<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Path(id): Path<String>,
) -> Endpoint {
    let report = service.get_by_id(id).await?;
    Ok(Json(report).into_response())
}

/// Replace a report. The body has to be the complete record.
#[utoipa::path(
    put,
    path = REPORT_ID_PATH,
    responses(
        (status = OK, description = "The report was replaced", body = Report),
        (status = UNPROCESSABLE_ENTITY, description = "A required field is empty", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "The report was not updated", body = ErrorBody),
    ),
    params(("id" = String, Path, description = "The report id")),
    request_body = Report
)]
#[instrument(skip(service, report), err(Debug))]
async fn update_report<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Path(id): Path<String>,
    Json(report): Json<Report>,
) -> Endpoint {
    service.update(report.clone(), id).await?;
    Ok(Json(report).into_response())
}

#[utoipa::path(
    delete,
    path = REPORT_ID_PATH,
    responses(
        (status = NO_CONTENT, description = "The report was deleted"),
        (status = NOT_FOUND, description = "The report could not be deleted", body = ErrorBody),
    ),
    params(("id" = String, Path, description = "The report id"))
)]
#[instrument(skip(service), err(Debug))]
async fn delete_report<T: ReportEngine>(
    State(service): State<ReportService<T>>,
    Path(id): Path<String>,
) -> Endpoint {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
