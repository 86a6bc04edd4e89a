use crate::service::PostService;
use axum::extract::FromRef;
use metrics_exporter_prometheus::PrometheusHandle;
use posts_core::PostEngine;

#[derive(Clone)]
pub struct PostAppState<T: PostEngine> {
    pub service: PostService<T>,
    pub metrics: Option<PrometheusHandle>,
}

impl<T: PostEngine> PostAppState<T> {
    pub fn new(engine: T, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            service: PostService::new(engine),
            metrics,
        }
    }
}

impl<T: PostEngine> FromRef<PostAppState<T>> for PostService<T> {
    fn from_ref(input: &PostAppState<T>) -> Self {
        input.service.clone()
    }
}
