//! Post handlers - public listing/detail plus the guarded lifecycle routes.
//!
//! The mutating routes hand everything past DTO validation to the lifecycle
//! manager and return its outcome verbatim; per-operation authorization
//! lives there, not here.

use actix_web::{web, HttpRequest, HttpResponse};

use quill_core::domain::{Post, PostWithAuthor, RequestContext};
use quill_core::PostInput;
use quill_shared::dto::{PostPayload, PostResponse};
use quill_shared::ApiResponse;

use crate::middleware::auth::SESSION_COOKIE;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET / - all posts, newest first.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Some(body) = state.views.get("/").await {
        return Ok(json_body(body));
    }

    let posts = state.posts.list_recent().await?;
    let items: Vec<PostResponse> = posts.into_iter().map(to_joined_response).collect();

    let body = render(&ApiResponse::ok(items))?;
    state.views.put("/", &body).await;
    Ok(json_body(body))
}

/// GET /post/{slug} - a single post with its author.
pub async fn detail(state: web::Data<AppState>, slug: web::Path<String>) -> AppResult<HttpResponse> {
    let path = format!("/post/{slug}");
    if let Some(body) = state.views.get(&path).await {
        return Ok(json_body(body));
    }

    let post = state
        .posts
        .get_detail(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with slug '{slug}'")))?;

    let body = render(&ApiResponse::ok(to_joined_response(post)))?;
    state.views.put(&path, &body).await;
    Ok(json_body(body))
}

/// POST /post/create
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    let outcome = state
        .lifecycle
        .create(to_input(payload), &request_context(&req))
        .await;

    Ok(HttpResponse::Ok().json(outcome))
}

/// POST /post/edit/{id}
pub async fn edit(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Json<PostPayload>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let payload = body.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    let outcome = state
        .lifecycle
        .edit(*id, to_input(payload), &request_context(&req))
        .await;

    Ok(HttpResponse::Ok().json(outcome))
}

/// POST /post/delete/{id}
pub async fn delete(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let outcome = state.lifecycle.delete(*id, &request_context(&req)).await;

    Ok(HttpResponse::Ok().json(outcome))
}

/// The lifecycle manager resolves identity itself; the handlers only pass
/// the raw cookie value along.
pub(crate) fn request_context(req: &HttpRequest) -> RequestContext {
    RequestContext::new(req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
}

pub(crate) fn to_response(post: Post, author: Option<String>) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        description: post.description,
        content: post.content,
        slug: post.slug,
        author,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn to_joined_response(row: PostWithAuthor) -> PostResponse {
    to_response(row.post, row.author_name)
}

fn to_input(payload: PostPayload) -> PostInput {
    PostInput {
        title: payload.title,
        description: payload.description,
        content: payload.content,
    }
}

fn render<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(e.to_string()))
}

fn json_body(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(body)
}
