use crate::error::PostServiceError;
use crate::service::PostService;
use crate::state::PostAppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response, Result},
};
use engine::auth::Credential;
use engine::error::{EndpointError, ErrorBody};
use engine::{Page, QueryOpts};
use posts_core::PostEngine;
use posts_core::model::{CommentAddition, Post, PostDraft, PostPatch, PostQueryStyle};
use routing::router::RouterBuilder;
use serde::Deserialize;
use tracing::instrument;
use utoipa::{IntoParams, OpenApi};

const POST_ROOT_PATH: &str = "/posts";

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = POST_ROOT_PATH, api = PostDocs),
    )
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    list_posts,
    create_post,
    get_my_posts,
    get_other_posts,
    get_posts_by_category,
    get_post,
    update_post,
    update_post_comment,
    delete_post,
))]
struct PostDocs;

const POST_LIST_PATH: &str = "/";
const POST_CREATE_PATH: &str = "/";
const POST_UPDATE_PATH: &str = "/";
const POST_MINE_PATH: &str = "/mine";
const POST_OTHER_PATH: &str = "/user/{uid}";
const POST_CATEGORY_PATH: &str = "/category/{category_id}";
const POST_GET_PATH: &str = "/{id}";
const POST_DELETE_PATH: &str = "/{id}";
const POST_COMMENT_PATH: &str = "/{id}/comments";

pub fn build<T: PostEngine>(app_state: PostAppState<T>) -> Router {
    let metrics = app_state.metrics.clone();

    RouterBuilder::new(POST_ROOT_PATH)
        .get(POST_LIST_PATH, list_posts::<T>)
        .post(POST_CREATE_PATH, create_post::<T>)
        .put(POST_UPDATE_PATH, update_post::<T>)
        .get(POST_MINE_PATH, get_my_posts::<T>)
        .get(POST_OTHER_PATH, get_other_posts::<T>)
        .get(POST_CATEGORY_PATH, get_posts_by_category::<T>)
        .get(POST_GET_PATH, get_post::<T>)
        .delete(POST_DELETE_PATH, delete_post::<T>)
        .put(POST_COMMENT_PATH, update_post_comment::<T>)
        .build(app_state, ApiDoc::openapi(), metrics)
}

type Endpoint = Result<Response, EndpointError<PostServiceError>>;

fn page_response(posts: Page<Post>) -> Response {
    if posts.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(posts).into_response()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct StyleParam {
    /// Which of the caller's posts to return
    #[serde(default)]
    style: PostQueryStyle,
}

/// List all posts. No credential needed.
#[utoipa::path(
    get,
    path = POST_LIST_PATH,
    responses(
        (status = OK, description = "Posts were found on the given page", body = Page<Post>),
        (status = NO_CONTENT, description = "No posts exist on the given page"),
    ),
    params(QueryOpts)
)]
#[instrument(skip(service), err(Debug))]
async fn list_posts<T: PostEngine>(
    State(service): State<PostService<T>>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    let posts = service.list(opts).await?;
    Ok(page_response(posts))
}

/// Create a post owned by the caller. Id, creator, and status are assigned here.
#[utoipa::path(
    post,
    path = POST_CREATE_PATH,
    responses(
        (status = CREATED, description = "The post was created", body = Post),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(("Authorization" = String, Header, description = "Bearer token")),
    request_body = PostDraft
)]
#[instrument(skip_all, err(Debug))]
async fn create_post<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Json(draft): Json<PostDraft>,
) -> Endpoint {
    let post = service.create(credential, draft).await?;
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

/// List the caller's own posts, or the posts they interacted with.
#[utoipa::path(
    get,
    path = POST_MINE_PATH,
    responses(
        (status = OK, description = "Posts were found on the given page", body = Page<Post>),
        (status = NO_CONTENT, description = "No posts exist on the given page"),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        QueryOpts,
        StyleParam,
    )
)]
#[instrument(skip(service, credential), err(Debug))]
async fn get_my_posts<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Query(opts): Query<QueryOpts>,
    Query(style): Query<StyleParam>,
) -> Endpoint {
    let posts = service.get_by_uid(credential, opts, style.style).await?;
    Ok(page_response(posts))
}

/// List the posts of another user.
#[utoipa::path(
    get,
    path = POST_OTHER_PATH,
    responses(
        (status = OK, description = "Posts were found on the given page", body = Page<Post>),
        (status = NO_CONTENT, description = "No posts exist on the given page"),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        ("uid" = String, Path, description = "The user whose posts to list"),
        QueryOpts,
    )
)]
#[instrument(skip(service, credential), err(Debug))]
async fn get_other_posts<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Path(uid): Path<String>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    let posts = service.get_other(credential, uid, opts).await?;
    Ok(page_response(posts))
}

/// List the posts in a category.
#[utoipa::path(
    get,
    path = POST_CATEGORY_PATH,
    responses(
        (status = OK, description = "Posts were found on the given page", body = Page<Post>),
        (status = NO_CONTENT, description = "No posts exist on the given page"),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        ("category_id" = String, Path, description = "The category to list"),
        QueryOpts,
    )
)]
#[instrument(skip(service, credential), err(Debug))]
async fn get_posts_by_category<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Path(category_id): Path<String>,
    Query(opts): Query<QueryOpts>,
) -> Endpoint {
    let posts = service
        .get_by_category(credential, category_id, opts)
        .await?;
    Ok(page_response(posts))
}

/// Get a single post.
#[utoipa::path(
    get,
    path = POST_GET_PATH,
    responses(
        (status = OK, description = "The post was found", body = Post),
        (status = NOT_FOUND, description = "No post has the given id", body = ErrorBody),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        ("id" = String, Path, description = "The post id"),
    )
)]
#[instrument(skip(service, credential), err(Debug))]
async fn get_post<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Path(id): Path<String>,
) -> Endpoint {
    let post = service.get_detail(credential, id).await?;
    Ok(Json(post).into_response())
}

/// Update a post owned by the caller. Fields left out keep their stored values.
#[utoipa::path(
    put,
    path = POST_UPDATE_PATH,
    responses(
        (status = OK, description = "The post was updated", body = Post),
        (status = FORBIDDEN, description = "The id or creator id does not match the stored post", body = ErrorBody),
        (status = NOT_FOUND, description = "No post has the given id", body = ErrorBody),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(("Authorization" = String, Header, description = "Bearer token")),
    request_body = PostPatch
)]
#[instrument(skip_all, err(Debug), fields(post.id = %patch.id))]
async fn update_post<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Json(patch): Json<PostPatch>,
) -> Endpoint {
    let post = service.update(credential, patch).await?;
    Ok(Json(post).into_response())
}

/// Append comments to a post.
#[utoipa::path(
    put,
    path = POST_COMMENT_PATH,
    responses(
        (status = OK, description = "The comments were appended", body = Post),
        (status = NOT_FOUND, description = "No post has the given id", body = ErrorBody),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        ("id" = String, Path, description = "The post id"),
    ),
    request_body = CommentAddition
)]
#[instrument(skip(service, credential, addition), err(Debug))]
async fn update_post_comment<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Path(id): Path<String>,
    Json(addition): Json<CommentAddition>,
) -> Endpoint {
    let post = service
        .update_post_comment(credential, id, addition)
        .await?;
    Ok(Json(post).into_response())
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = POST_DELETE_PATH,
    responses(
        (status = NO_CONTENT, description = "The post was deleted"),
        (status = NOT_FOUND, description = "No post has the given id", body = ErrorBody),
        (status = UNAUTHORIZED, description = "The credential is missing or invalid", body = ErrorBody),
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token"),
        ("id" = String, Path, description = "The post id"),
    )
)]
#[instrument(skip(service, credential), err(Debug))]
async fn delete_post<T: PostEngine>(
    State(service): State<PostService<T>>,
    credential: Credential,
    Path(id): Path<String>,
) -> Endpoint {
    service.delete(credential, id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
