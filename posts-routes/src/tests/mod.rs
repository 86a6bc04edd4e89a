//! Service tests check the rules around the repository calls (who may write what, and
//! what gets written). Endpoint tests check the contract made by the API: status codes,
//! query and path parameters, bodies.
use engine::auth::{AuthError, AuthPort, AuthResult, Credential, Identity};
use engine::{Page, QueryOpts};
use error_stack::Report;
use mockall::automock;
use posts_core::model::{Post, PostQueryStyle, PostStatus};
use posts_core::result::{OptRepoResult, RepoResult};
use posts_core::{PostEngine, PostRepository};
use std::sync::Arc;


const OWNER_UID: &str = "abcdefghijklmnop";
const OTHER_UID: &str = "zyxwvutsrqponm";
const OWNER_TOKEN: &str = "Bearer owner-token";

#[derive(Clone)]
struct TestEngine {
    auth: Arc<MockAuth>,
    repo: Arc<MockPostRepo>,
}

impl TestEngine {
    fn new(auth: MockAuth, repo: MockPostRepo) -> Self {
        Self {
            auth: Arc::new(auth),
            repo: Arc::new(repo),
        }
    }
}

impl PostEngine for TestEngine {
    type Auth = Arc<MockAuth>;
    type Repo = Arc<MockPostRepo>;

    fn auth(&self) -> Self::Auth {
        Arc::clone(&self.auth)
    }

    fn repo(&self) -> Self::Repo {
        Arc::clone(&self.repo)
    }
}

struct Auth;

#[automock]
#[allow(unused_variables)]
impl AuthPort for Auth {
    async fn verify(&self, credential: &Credential) -> AuthResult<Identity> {
        unreachable!()
    }
}

struct PostRepo;

#[automock]
#[allow(unused_variables)]
impl PostRepository for PostRepo {
    async fn list(&self, opts: QueryOpts) -> RepoResult<Page<Post>> {
        unreachable!()
    }

    async fn create(&self, post: Post) -> RepoResult<()> {
        unreachable!()
    }

    async fn delete(&self, id: String) -> OptRepoResult<()> {
        unreachable!()
    }

    async fn get_detail(&self, id: String) -> OptRepoResult<Post> {
        unreachable!()
    }

    async fn get_by_uid(
        &self,
        uid: String,
        opts: QueryOpts,
        style: PostQueryStyle,
    ) -> RepoResult<Page<Post>> {
        unreachable!()
    }

    async fn get_other(&self, uid: String, opts: QueryOpts) -> RepoResult<Page<Post>> {
        unreachable!()
    }

    async fn get_by_category(
        &self,
        category_id: String,
        opts: QueryOpts,
    ) -> RepoResult<Page<Post>> {
        unreachable!()
    }

    async fn update(&self, post: Post) -> RepoResult<()> {
        unreachable!()
    }

    async fn update_post_comment(&self, id: String, post: Post) -> RepoResult<()> {
        unreachable!()
    }
}

/// Resolves every non-blank credential to `uid`.
fn auth_as(uid: &'static str) -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_verify()
        .returning(move |_| Ok(Identity::new(uid)));
    auth
}

fn auth_rejecting() -> MockAuth {
    let mut auth = MockAuth::new();
    auth.expect_verify()
        .returning(|_| Err(Report::new(AuthError::Unauthorized)));
    auth
}

fn stored_post(id: &str, creator_id: &str) -> Post {
    Post {
        id: id.into(),
        creator_id: creator_id.into(),
        content: "first post".into(),
        category_id: Some("news".into()),
        image_urls: vec![],
        comment: vec!["nice".into()],
        like: vec![OTHER_UID.into()],
        hash_tag: vec!["rust".into()],
        mention: vec![],
        share: vec![],
        status: PostStatus::Active,
    }
}
