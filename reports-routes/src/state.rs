use crate::service::ReportService;
use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use reports_core::ReportEngine;

#[derive(Clone)]
pub struct ReportAppState<T: ReportEngine> {
    pub service: ReportService<T>,
    pub metrics: Option<PrometheusHandle>,
}

impl<T: ReportEngine> ReportAppState<T> {
    pub fn new(engine: T, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            service: ReportService::new(engine),
            metrics,
        }
    }
}

impl<T: ReportEngine> FromRef<ReportAppState<T>> for ReportService<T> {
    fn from_ref(input: &ReportAppState<T>) -> Self {
        input.service.clone()
    }
}
