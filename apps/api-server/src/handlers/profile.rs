//! Profile handler - the signed-in account's own posts.

use actix_web::{web, HttpResponse};

use quill_shared::dto::PostResponse;
use quill_shared::ApiResponse;

use crate::handlers::posts::to_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /profile - requires a valid session, not just a cookie.
pub async fn my_posts(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_author(identity.account_id).await?;

    let author = Some(identity.name);
    let items: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| to_response(post, author.clone()))
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(items)))
}
