use common::{TestRuntime, memory_posts, mongo_posts};
use engine::{QueryOpts, SortOrder};
use posts_core::PostRepository;
use posts_core::model::{Post, PostQueryStyle, PostStatus};
use rstest::rstest;

mod common;

fn post(id: &str, creator_id: &str) -> Post {
    Post {
        id: id.into(),
        creator_id: creator_id.into(),
        content: format!("content of {id}"),
        category_id: Some("news".into()),
        image_urls: vec![],
        comment: vec![],
        like: vec![],
        hash_tag: vec![],
        mention: vec![],
        share: vec![],
        status: PostStatus::Active,
    }
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn create_then_get_returns_created_post<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;

    repo.create(post("p1", "u1")).await.unwrap();

    let found = repo
        .get_detail("p1".into())
        .await
        .unwrap()
        .expect("recently created post exists");
    assert_eq!(post("p1", "u1"), found);
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn get_missing_post_returns_none<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    assert!(runtime.repo.get_detail("nope".into()).await.unwrap().is_none());
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn list_pages_through_all_posts<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    for i in 0..5 {
        repo.create(post(&format!("p{i}"), "u1")).await.unwrap();
    }

    let opts = QueryOpts::with_size(2, 2).sorted_by("id", SortOrder::Asc);
    let page = repo.list(opts).await.unwrap();

    assert_eq!(5, page.total);
    let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(vec!["p2", "p3"], ids);
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn filters_select_by_creator_interaction_and_category<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(post("p1", "u1")).await.unwrap();
    repo.create(Post {
        like: vec!["u1".into()],
        category_id: Some("sports".into()),
        ..post("p2", "u2")
    })
    .await
    .unwrap();
    repo.create(post("p3", "u2")).await.unwrap();

    let authored = repo
        .get_by_uid("u1".into(), QueryOpts::default(), PostQueryStyle::Authored)
        .await
        .unwrap();
    assert_eq!(1, authored.total);
    assert_eq!("p1", authored.items[0].id);

    let interacted = repo
        .get_by_uid("u1".into(), QueryOpts::default(), PostQueryStyle::Interacted)
        .await
        .unwrap();
    assert_eq!("p2", interacted.items[0].id);

    let others = repo
        .get_other("u2".into(), QueryOpts::default())
        .await
        .unwrap();
    assert_eq!(2, others.total);

    let sports = repo
        .get_by_category("sports".into(), QueryOpts::default())
        .await
        .unwrap();
    assert_eq!(1, sports.total);
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn update_replaces_stored_post<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(post("p1", "u1")).await.unwrap();

    let updated = Post {
        hash_tag: vec!["rust".into()],
        ..post("p1", "u1")
    };
    repo.update(updated.clone()).await.unwrap();

    let commented = Post {
        comment: vec!["first".into()],
        ..updated
    };
    repo.update_post_comment("p1".into(), commented.clone())
        .await
        .unwrap();

    assert_eq!(Some(commented), repo.get_detail("p1".into()).await.unwrap());
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn update_of_missing_post_fails<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    assert!(runtime.repo.update(post("ghost", "u1")).await.is_err());
}

#[rstest]
#[case::memory(memory_posts())]
#[ignore = "mongo case needs a docker daemon"]
#[case::mongo(mongo_posts())]
#[tokio::test]
async fn delete_reports_whether_anything_was_removed<R: PostRepository>(
    #[future(awt)]
    #[case]
    runtime: TestRuntime<R>,
) {
    let repo = runtime.repo;
    repo.create(post("p1", "u1")).await.unwrap();

    assert_eq!(Some(()), repo.delete("p1".into()).await.unwrap());
    assert_eq!(None, repo.delete("p1".into()).await.unwrap());
}
