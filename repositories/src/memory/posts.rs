use super::paginate;
use engine::{Page, QueryOpts};
use error_stack::Report;
use posts_core::PostRepository;
use posts_core::model::{Post, PostQueryStyle};
use posts_core::result::{OptRepoResult, PostRepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MemoryPostRepo {
    posts: Arc<RwLock<BTreeMap<String, Post>>>,
}

fn sort_field<'a>(post: &'a Post, field: &str) -> Option<&'a str> {
    match field {
        "id" => Some(post.id.as_str()),
        "creator_id" => Some(post.creator_id.as_str()),
        "content" => Some(post.content.as_str()),
        "category_id" => post.category_id.as_deref(),
        _ => None,
    }
}

impl MemoryPostRepo {
    async fn find_page<F>(&self, opts: QueryOpts, filter: F) -> Page<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let posts = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| filter(p))
            .cloned()
            .collect();

        paginate(posts, &opts, sort_field)
    }

    async fn replace(&self, id: String, post: Post) -> RepoResult<()> {
        let mut posts = self.posts.write().await;
        match posts.get_mut(&id) {
            Some(stored) => {
                *stored = post;
                Ok(())
            }
            None => Err(Report::new(PostRepoError::Update)
                .attach(format!("post '{id}' does not exist"))),
        }
    }
}

impl PostRepository for MemoryPostRepo {
    async fn list(&self, opts: QueryOpts) -> RepoResult<Page<Post>> {
        Ok(self.find_page(opts, |_| true).await)
    }

    async fn create(&self, post: Post) -> RepoResult<()> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(Report::new(PostRepoError::Create)
                .attach(format!("post '{}' already exists", post.id)));
        }

        debug!("storing post '{}'", post.id);
        posts.insert(post.id.clone(), post);
        Ok(())
    }

    async fn delete(&self, id: String) -> OptRepoResult<()> {
        Ok(self.posts.write().await.remove(&id).map(|_| ()))
    }

    async fn get_detail(&self, id: String) -> OptRepoResult<Post> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn get_by_uid(
        &self,
        uid: String,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> RepoResult<Page<Post>> {
        let page = match style {
            PostQueryStyle::Authored => self.find_page(opts, |p| p.creator_id == uid).await,
            PostQueryStyle::Interacted => {
                self.find_page(opts, |p| {
                    p.like.contains(&uid) || p.share.contains(&uid) || p.mention.contains(&uid)
                })
                .await
            }
        };
        Ok(page)
    }

    async fn get_other(&self, uid: String, opts: QueryOpts) -> RepoResult<Page<Post>> {
        Ok(self.find_page(opts, |p| p.creator_id == uid).await)
    }

    async fn get_by_category(
        &self,
        category_id: String,
        opts: QueryOpts,
    ) -> RepoResult<Page<Post>> {
        Ok(self
            .find_page(opts, |p| p.category_id.as_deref() == Some(category_id.as_str()))
            .await)
    }

    async fn update(&self, post: Post) -> RepoResult<()> {
        self.replace(post.id.clone(), post).await
    }

    async fn update_post_comment(&self, id: String, post: Post) -> RepoResult<()> {
        self.replace(id, post).await
    }
}
