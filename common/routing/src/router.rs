use std::fmt::Display;

use axum::{
    Router,
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::metrics;

const METRICS_PATH: &str = "/metrics";

struct Route {
    method: &'static str,
    root_path: &'static str,
    relative_path: &'static str,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}{}",
            self.method, self.root_path, self.relative_path
        )
    }
}

/// Collects the routes of one service under a shared root path, then nests them with
/// swagger docs and an optional `/metrics` endpoint.
pub struct RouterBuilder<S> {
    inner: OpenApiRouter<S>,
    root_path: &'static str,
    routes: Vec<Route>,
}

impl<S> RouterBuilder<S>
where
    S: Send + Sync + Clone + 'static,
{
    pub fn new(root_path: &'static str) -> Self {
        Self {
            inner: OpenApiRouter::new(),
            root_path,
            routes: Vec::new(),
        }
    }

    fn route(
        mut self,
        method: &'static str,
        path: &'static str,
        method_router: MethodRouter<S>,
    ) -> Self {
        self.inner = self.inner.route(path, method_router);
        self.routes.push(Route {
            method,
            root_path: self.root_path,
            relative_path: path,
        });
        self
    }

    pub fn get<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.route("GET", path, get(handler))
    }

    pub fn post<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.route("POST", path, post(handler))
    }

    pub fn put<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.route("PUT", path, put(handler))
    }

    pub fn delete<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.route("DELETE", path, delete(handler))
    }

    /// Nests everything under the root path. With a metrics handle, requests are tracked
    /// and `/metrics` renders them; without one, `/metrics` answers 503.
    pub fn build(
        self,
        app_state: S,
        api_doc: OpenApi,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Router {
        for route in &self.routes {
            debug!("Building route - {route}")
        }

        let routes = match metrics_handle {
            Some(handle) => self
                .inner
                .route(METRICS_PATH, get(|| async move { handle.render() }))
                .route_layer(middleware::from_fn(metrics::track_http)),
            None => self.inner.route(
                METRICS_PATH,
                get(|| async {
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Metrics are disabled. Set METRICS_ENABLED and restart the service",
                    )
                }),
            ),
        };

        nest(self.root_path, routes, app_state, api_doc)
    }
}

fn nest<S>(
    root_path: &'static str,
    routes: OpenApiRouter<S>,
    app_state: S,
    api_doc: OpenApi,
) -> Router
where
    S: Send + Sync + Clone + 'static,
{
    let main_routes = OpenApiRouter::new()
        .nest(root_path, routes)
        .with_state(app_state);
    let (router, api) = OpenApiRouter::with_openapi(api_doc)
        .merge(main_routes)
        .split_for_parts();

    router.merge(
        SwaggerUi::new(format!("{}/swagger-ui", root_path))
            .url(format!("{}/api-docs/openapi.json", root_path), api),
    )
}
