#![allow(dead_code)]

use repositories::mongodb::{self, ConnectionDetails};
use repositories::{MemoryPostRepo, MemoryReportRepo};
use testcontainers_modules::mongo::Mongo;
use testcontainers_modules::testcontainers::ContainerAsync;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

/// A repository and whatever keeps its backing store alive.
pub struct TestRuntime<R> {
    _container: Option<ContainerAsync<Mongo>>,
    pub repo: R,
}

pub async fn memory_posts() -> TestRuntime<MemoryPostRepo> {
    TestRuntime {
        _container: None,
        repo: MemoryPostRepo::default(),
    }
}

pub async fn memory_reports() -> TestRuntime<MemoryReportRepo> {
    TestRuntime {
        _container: None,
        repo: MemoryReportRepo::default(),
    }
}

async fn mongo_db() -> (ContainerAsync<Mongo>, ::mongodb::Database) {
    let container = Mongo::default()
        .start()
        .await
        .expect("mongo container starts");
    let host = container.get_host().await.expect("container host");
    let port = container
        .get_host_port_ipv4(27017)
        .await
        .expect("mongo port is mapped");

    let db = mongodb::connect(
        ConnectionDetails::Url(format!("mongodb://{host}:{port}/")),
        "content-test",
    )
    .await
    .expect("mongo connection");

    (container, db)
}

pub async fn mongo_posts() -> TestRuntime<mongodb::PostRepo> {
    let (container, db) = mongo_db().await;
    TestRuntime {
        _container: Some(container),
        repo: mongodb::PostRepo::new(db),
    }
}

pub async fn mongo_reports() -> TestRuntime<mongodb::ReportRepo> {
    let (container, db) = mongo_db().await;
    TestRuntime {
        _container: Some(container),
        repo: mongodb::ReportRepo::new(db),
    }
}
