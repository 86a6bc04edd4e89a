use crate::{RepoInitErr, RepoInitResult};
use bson::{Document, doc};
use engine::{QueryOpts, SortOrder};
use error_stack::ResultExt;
use mongodb::options::FindOptions;
use mongodb::{Client, Database};
use tracing::debug;

pub mod posts;
pub mod reports;

pub use posts::PostRepo;
pub use reports::ReportRepo;

pub enum ConnectionDetails {
    Url(String),
}

/// Opens a client and checks the server answers before handing out the database.
pub async fn connect(
    connection_details: ConnectionDetails,
    db_name: &str,
) -> RepoInitResult<Database> {
    let client = match connection_details {
        ConnectionDetails::Url(url) => Client::with_uri_str(url)
            .await
            .change_context(RepoInitErr)
            .attach("failed to create client connection to mongodb instance")?,
    };

    let db = client.database(db_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .change_context(RepoInitErr)
        .attach_with(|| format!("mongodb database '{db_name}' did not answer ping"))?;

    debug!("connected to mongodb database '{db_name}'");
    Ok(db)
}

/// Skip, limit and sort for one page. `None` means the page is empty by definition
/// (size 0), since a zero limit means "no limit" to mongodb.
fn find_options(opts: &QueryOpts) -> Option<FindOptions> {
    let limit = i64::try_from(opts.limit()).ok().filter(|l| *l > 0)?;

    Some(
        FindOptions::builder()
            .skip(opts.offset())
            .limit(limit)
            .sort(sort_document(opts))
            .build(),
    )
}

fn sort_document(opts: &QueryOpts) -> Option<Document> {
    let field = match opts.sort_by.as_deref()? {
        "id" => "_id",
        other => other,
    };
    let direction = match opts.order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };
    Some(doc! { field: direction })
}
