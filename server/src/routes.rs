use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    error::Result,
    models::{NewPost, PostView},
    store::Database,
};

/// Router serving `/posts` over `db`.
pub fn app(db: Database) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

/// GET /posts
async fn list_posts(State(db): State<Database>) -> Result<Json<Vec<PostView>>> {
    let posts = db.find_all().await?;
    Ok(Json(posts.iter().map(PostView::from).collect()))
}

/// POST /posts
async fn create_post(
    State(db): State<Database>,
    input: std::result::Result<Json<NewPost>, JsonRejection>,
) -> Result<(StatusCode, Json<PostView>)> {
    let Json(input) = input?;
    let post = db.insert_one(input).await?;
    tracing::info!(id = %post.id, "created post");
    Ok((StatusCode::CREATED, Json(post.view())))
}
