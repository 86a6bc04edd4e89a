use axum::Router;
use dotenv::dotenv;
use engine::app::{self, AppError, AppProperties, AppResult};
use engine::auth::AuthPort;
use error_stack::ResultExt;
use error_stack::fmt::ColorMode;
use metrics_exporter_prometheus::PrometheusHandle;
use posts_core::{PostEngine, PostRepository};
use posts_routes::state::PostAppState;
use reports_core::{ReportEngine, ReportRepository};
use reports_routes::state::ReportAppState;
use repositories::mongodb::{self, ConnectionDetails};
use repositories::{MemoryPostRepo, MemoryReportRepo};
use routing::JwtVerifier;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DB_NAME: &str = "content";

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("content service shutting down"),
        Err(e) => {
            error!("content service exited with error: {e:?}");
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("CONTENT_LOG"))
        .init();
}

async fn try_main() -> AppResult<()> {
    init_logging();

    if let Err(e) = dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let properties = AppProperties::from_env()?;
    let verifier = build_verifier().await?;
    let metrics = build_metrics()?;

    let routes = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let db_name =
                std::env::var("CONTENT_DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());

            debug!("initializing mongodb repositories");
            let db = mongodb::connect(ConnectionDetails::Url(url), &db_name)
                .await
                .change_context(AppError)?;

            build_routes(
                ContentEngine {
                    auth: verifier,
                    posts: mongodb::PostRepo::new(db.clone()),
                    reports: mongodb::ReportRepo::new(db),
                },
                metrics,
            )
        }
        Err(_) => {
            warn!("DATABASE_URL not specified, content is kept in memory and lost on shutdown");
            build_routes(
                ContentEngine {
                    auth: verifier,
                    posts: MemoryPostRepo::default(),
                    reports: MemoryReportRepo::default(),
                },
                metrics,
            )
        }
    };

    app::run(routes, properties).await
}

#[instrument]
async fn build_verifier() -> AppResult<JwtVerifier> {
    let verifier = JwtVerifier::create().await.change_context(AppError)?;
    verifier.spawn_refresh();
    Ok(verifier)
}

fn build_metrics() -> AppResult<Option<PrometheusHandle>> {
    let enabled = std::env::var("METRICS_ENABLED")
        .map(|v| !v.eq_ignore_ascii_case("false"))
        .unwrap_or(true);

    if !enabled {
        info!("metrics are disabled");
        return Ok(None);
    }

    routing::metrics::setup_recorder()
        .change_context(AppError)
        .map(Some)
}

fn build_routes<E>(engine: E, metrics: Option<PrometheusHandle>) -> Router
where
    E: PostEngine + ReportEngine,
{
    debug!("building routes..");
    let posts = posts_routes::routes::build(PostAppState::new(engine.clone(), metrics.clone()));
    let reports = reports_routes::routes::build(ReportAppState::new(engine, metrics));
    debug!("routes built");

    posts.merge(reports)
}

/// Hands the same verifier and repositories to both services.
#[derive(Debug, Clone)]
struct ContentEngine<A, P, R> {
    auth: A,
    posts: P,
    reports: R,
}

impl<A, P, R> PostEngine for ContentEngine<A, P, R>
where
    A: AuthPort + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
{
    type Auth = A;
    type Repo = P;

    fn auth(&self) -> Self::Auth {
        self.auth.clone()
    }

    fn repo(&self) -> Self::Repo {
        self.posts.clone()
    }
}

impl<A, P, R> ReportEngine for ContentEngine<A, P, R>
where
    A: Clone + Send + Sync + 'static,
    P: Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    type Repo = R;

    fn repo(&self) -> Self::Repo {
        self.reports.clone()
    }
}
