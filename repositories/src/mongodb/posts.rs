use super::find_options;
use bson::{Document, doc};
use engine::{Page, QueryOpts};
use error_stack::ResultExt;
use mongodb::{Collection, Database};
use posts_core::PostRepository;
use posts_core::model::{Post, PostQueryStyle, PostStatus};
use posts_core::result::{OptRepoResult, PostRepoError, RepoResult};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tracing::{debug, warn};

const POSTS_COLLECTION_NAME: &str = "posts";

#[derive(Debug, Serialize, Deserialize)]
struct MongoPost {
    #[serde(rename = "_id")]
    id: String,
    creator_id: String,
    content: String,
    category_id: Option<String>,
    #[serde(default)]
    image_urls: Vec<String>,
    #[serde(default)]
    comment: Vec<String>,
    #[serde(default)]
    like: Vec<String>,
    #[serde(default)]
    hash_tag: Vec<String>,
    #[serde(default)]
    mention: Vec<String>,
    #[serde(default)]
    share: Vec<String>,
    #[serde(default)]
    status: PostStatus,
}

impl From<Post> for MongoPost {
    fn from(value: Post) -> Self {
        Self {
            id: value.id,
            creator_id: value.creator_id,
            content: value.content,
            category_id: value.category_id,
            image_urls: value.image_urls,
            comment: value.comment,
            like: value.like,
            hash_tag: value.hash_tag,
            mention: value.mention,
            share: value.share,
            status: value.status,
        }
    }
}

impl From<MongoPost> for Post {
    fn from(value: MongoPost) -> Self {
        Self {
            id: value.id,
            creator_id: value.creator_id,
            content: value.content,
            category_id: value.category_id,
            image_urls: value.image_urls,
            comment: value.comment,
            like: value.like,
            hash_tag: value.hash_tag,
            mention: value.mention,
            share: value.share,
            status: value.status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostRepo {
    db: Database,
}

impl PostRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn posts(&self) -> Collection<MongoPost> {
        self.db.collection(POSTS_COLLECTION_NAME)
    }

    async fn find_page(&self, filter: Document, opts: QueryOpts) -> RepoResult<Page<Post>> {
        let total = self
            .posts()
            .count_documents(filter.clone())
            .await
            .change_context(PostRepoError::List)?;

        let Some(options) = find_options(&opts) else {
            return Ok(Page::new(Vec::new(), total, &opts));
        };

        let items = self
            .posts()
            .find(filter)
            .with_options(options)
            .await
            .change_context(PostRepoError::List)?
            .map(|p| p.map(From::from))
            .collect::<Result<Vec<Post>, _>>()
            .await
            .change_context(PostRepoError::List)?;

        Ok(Page::new(items, total, &opts))
    }

    async fn replace(&self, id: String, post: Post) -> RepoResult<()> {
        let result = self
            .posts()
            .replace_one(doc! { "_id": id.as_str() }, MongoPost::from(post))
            .await
            .change_context(PostRepoError::Update)?;

        if result.matched_count == 0 {
            warn!("no post '{id}' to replace");
            return Err(error_stack::Report::new(PostRepoError::Update)
                .attach(format!("post '{id}' does not exist")));
        }
        Ok(())
    }
}

fn style_filter(uid: String, style: PostQueryStyle) -> Document {
    match style {
        PostQueryStyle::Authored => doc! { "creator_id": uid },
        PostQueryStyle::Interacted => doc! {
            "$or": [
                { "like": uid.as_str() },
                { "share": uid.as_str() },
                { "mention": uid.as_str() },
            ]
        },
    }
}

impl PostRepository for PostRepo {
    async fn list(&self, opts: QueryOpts) -> RepoResult<Page<Post>> {
        self.find_page(Document::new(), opts).await
    }

    async fn create(&self, post: Post) -> RepoResult<()> {
        self.posts()
            .insert_one(MongoPost::from(post))
            .await
            .change_context(PostRepoError::Create)?;
        Ok(())
    }

    async fn delete(&self, id: String) -> OptRepoResult<()> {
        let result = self
            .posts()
            .delete_one(doc! { "_id": id.as_str() })
            .await
            .change_context(PostRepoError::Delete)?;

        debug!("deleted {} posts with id '{id}'", result.deleted_count);
        Ok((result.deleted_count > 0).then_some(()))
    }

    async fn get_detail(&self, id: String) -> OptRepoResult<Post> {
        self.posts()
            .find_one(doc! { "_id": id })
            .await
            .change_context(PostRepoError::Get)
            .map(|p| p.map(From::from))
    }

    async fn get_by_uid(
        &self,
        uid: String,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> RepoResult<Page<Post>> {
        self.find_page(style_filter(uid, style), opts).await
    }

    async fn get_other(&self, uid: String, opts: QueryOpts) -> RepoResult<Page<Post>> {
        self.find_page(doc! { "creator_id": uid }, opts).await
    }

    async fn get_by_category(
        &self,
        category_id: String,
        opts: QueryOpts,
    ) -> RepoResult<Page<Post>> {
        self.find_page(doc! { "category_id": category_id }, opts)
            .await
    }

    async fn update(&self, post: Post) -> RepoResult<()> {
        self.replace(post.id.clone(), post).await
    }

    async fn update_post_comment(&self, id: String, post: Post) -> RepoResult<()> {
        self.replace(id, post).await
    }
}
