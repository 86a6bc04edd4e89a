use crate::ServiceResult;
use crate::error::PostServiceError;
use crate::metrics;
use chrono::Utc;
use engine::auth::{AuthGateway, Credential, Identity};
use engine::{Page, QueryOpts};
use error_stack::{Report, ResultExt};
use posts_core::model::{CommentAddition, Post, PostDraft, PostPatch, PostQueryStyle, PostStatus};
use posts_core::{PostEngine, PostRepository};
use tracing::{debug, instrument, warn};

/// How many characters of the creator's uid lead every post id.
pub const CREATOR_PREFIX_LEN: usize = 10;

/// Business rules for posts. Holds no state of its own beyond the engine handle.
#[derive(Debug, Clone)]
pub struct PostService<T> {
    engine: T,
}

impl<T> PostService<T>
where
    T: PostEngine,
{
    pub fn new(engine: T) -> Self {
        PostService { engine }
    }

    async fn identify(&self, credential: &Credential) -> ServiceResult<Identity> {
        AuthGateway::new(self.engine.auth())
            .verify(credential)
            .await
            .change_context(PostServiceError::Unauthorized)
    }

    #[instrument(skip_all, name = "service#list", fields(page = opts.page, size = opts.size))]
    pub async fn list(&self, opts: QueryOpts) -> ServiceResult<Page<Post>> {
        let posts = self
            .engine
            .repo()
            .list(opts)
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_retrieved_by(posts.items.len());
        Ok(posts)
    }

    #[instrument(skip_all, name = "service#create")]
    pub async fn create(&self, credential: Credential, draft: PostDraft) -> ServiceResult<Post> {
        let identity = self.identify(&credential).await?;

        let post = Post {
            id: post_id(&identity.uid, Utc::now().timestamp_millis()),
            creator_id: identity.uid.to_string(),
            content: draft.content,
            category_id: draft.category_id,
            image_urls: draft.image_urls,
            comment: Vec::new(),
            like: Vec::new(),
            hash_tag: draft.hash_tag.unwrap_or_default(),
            mention: draft.mention.unwrap_or_default(),
            share: Vec::new(),
            status: PostStatus::Active,
        };

        debug!("creating post '{}'", post.id);
        self.engine
            .repo()
            .create(post.clone())
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_created();
        Ok(post)
    }

    /// Deletes by id for any verified caller. Whether the caller owns the post is left to
    /// the repository, see [`PostRepository::delete`].
    #[instrument(skip_all, name = "service#delete", fields(post.id = %id))]
    pub async fn delete(&self, credential: Credential, id: String) -> ServiceResult<()> {
        self.identify(&credential).await?;

        let deleted = self
            .engine
            .repo()
            .delete(id.clone())
            .await
            .change_context(PostServiceError::Repository)?;

        match deleted {
            Some(()) => {
                metrics::increment_posts_deleted();
                Ok(())
            }
            None => Err(not_found(&id)),
        }
    }

    #[instrument(skip_all, name = "service#get_detail", fields(post.id = %id))]
    pub async fn get_detail(&self, credential: Credential, id: String) -> ServiceResult<Post> {
        self.identify(&credential).await?;
        let post = self.load(id).await?;
        metrics::increment_posts_retrieved_by(1);
        Ok(post)
    }

    #[instrument(skip_all, name = "service#get_by_uid", fields(style = ?style))]
    pub async fn get_by_uid(
        &self,
        credential: Credential,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> ServiceResult<Page<Post>> {
        let identity = self.identify(&credential).await?;

        let posts = self
            .engine
            .repo()
            .get_by_uid(identity.uid.to_string(), opts, style)
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_retrieved_by(posts.items.len());
        Ok(posts)
    }

    #[instrument(skip_all, name = "service#get_other", fields(target.uid = %uid))]
    pub async fn get_other(
        &self,
        credential: Credential,
        uid: String,
        opts: QueryOpts,
    ) -> ServiceResult<Page<Post>> {
        self.identify(&credential).await?;

        let posts = self
            .engine
            .repo()
            .get_other(uid, opts)
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_retrieved_by(posts.items.len());
        Ok(posts)
    }

    #[instrument(skip_all, name = "service#get_by_category", fields(category.id = %category_id))]
    pub async fn get_by_category(
        &self,
        credential: Credential,
        category_id: String,
        opts: QueryOpts,
    ) -> ServiceResult<Page<Post>> {
        self.identify(&credential).await?;

        let posts = self
            .engine
            .repo()
            .get_by_category(category_id, opts)
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_retrieved_by(posts.items.len());
        Ok(posts)
    }

    /// Replaces the fields given in `patch`, keeping the stored value of every field left out.
    ///
    /// Only the post's creator can update it: `patch.creator_id` has to match both the stored
    /// creator and the verified caller. The status is set back to active on every update.
    /// There is no version check between the load and the write, so of two concurrent
    /// updates the later one wins.
    #[instrument(skip_all, name = "service#update", fields(post.id = %patch.id))]
    pub async fn update(&self, credential: Credential, patch: PostPatch) -> ServiceResult<Post> {
        let identity = self.identify(&credential).await?;
        let stored = self.load(patch.id.clone()).await?;

        if stored.id != patch.id {
            return Err(Report::new(PostServiceError::PostRequiredId)
                .attach(format!("expected '{}', found '{}'", patch.id, stored.id)));
        }

        if stored.creator_id != patch.creator_id || patch.creator_id != *identity.uid {
            warn!("uid '{}' attempted to update a post it does not own", identity.uid);
            return Err(Report::new(PostServiceError::PostRequiredCreatorId));
        }

        let post = merge(stored, patch);

        self.engine
            .repo()
            .update(post.clone())
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_updated();
        Ok(post)
    }

    /// Appends `addition.comment` to the stored comments. Existing comments are never
    /// removed or reordered. Same last-write-wins caveat as [`PostService::update`].
    #[instrument(skip_all, name = "service#update_post_comment", fields(post.id = %id))]
    pub async fn update_post_comment(
        &self,
        credential: Credential,
        id: String,
        addition: CommentAddition,
    ) -> ServiceResult<Post> {
        self.identify(&credential).await?;
        let mut post = self.load(id.clone()).await?;

        debug!("appending {} comments", addition.comment.len());
        post.comment.extend(addition.comment);

        self.engine
            .repo()
            .update_post_comment(id, post.clone())
            .await
            .change_context(PostServiceError::Repository)?;

        metrics::increment_posts_updated();
        Ok(post)
    }

    async fn load(&self, id: String) -> ServiceResult<Post> {
        self.engine
            .repo()
            .get_detail(id.clone())
            .await
            .change_context(PostServiceError::Repository)?
            .ok_or_else(|| not_found(&id))
    }
}

fn not_found(id: &str) -> Report<PostServiceError> {
    Report::new(PostServiceError::NotFound).attach(format!("post id '{id}'"))
}

/// Leading characters of the creator's uid followed by the creation time in epoch millis.
/// Two creates by the same user within one millisecond collide.
fn post_id(uid: &str, epoch_millis: i64) -> String {
    let prefix: String = uid.chars().take(CREATOR_PREFIX_LEN).collect();
    format!("{prefix}{epoch_millis}")
}

fn merge(stored: Post, patch: PostPatch) -> Post {
    Post {
        id: stored.id,
        creator_id: stored.creator_id,
        content: patch.content.unwrap_or(stored.content),
        category_id: patch.category_id.or(stored.category_id),
        image_urls: patch.image_urls.unwrap_or(stored.image_urls),
        comment: patch.comment.unwrap_or(stored.comment),
        like: patch.like.unwrap_or(stored.like),
        hash_tag: patch.hash_tag.unwrap_or(stored.hash_tag),
        mention: patch.mention.unwrap_or(stored.mention),
        share: patch.share.unwrap_or(stored.share),
        // TODO confirm with product whether an update should really re-activate hidden posts
        status: PostStatus::Active,
    }
}
