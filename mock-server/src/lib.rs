use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Payload for `POST /posts` and the full replacement sent by `PUT`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Payload for `PATCH /posts/{id}`. Omitted fields are left unchanged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub user_id: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// What `/anything` reports back about the request it received.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub data: String,
}

#[derive(Debug)]
pub struct Posts {
    items: BTreeMap<u64, Post>,
    next_id: u64,
}

impl Posts {
    /// A store holding post 1, so reads work without setup.
    pub fn seeded() -> Self {
        let first = Post {
            user_id: 1,
            id: 1,
            title: "sunt aut facere repellat provident".to_string(),
            body: "quia et suscipit".to_string(),
        };
        Self {
            items: BTreeMap::from([(first.id, first)]),
            next_id: 2,
        }
    }
}

pub type Db = Arc<RwLock<Posts>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Posts::seeded()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post)
                .put(replace_post)
                .patch(update_post)
                .delete(delete_post),
        )
        .route("/anything", any(anything))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let posts = db.read().await;
    Json(posts.items.values().cloned().collect())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> (StatusCode, Json<Post>) {
    let mut posts = db.write().await;
    let post = Post {
        user_id: input.user_id,
        id: posts.next_id,
        title: input.title,
        body: input.body,
    };
    posts.next_id += 1;
    posts.items.insert(post.id, post.clone());
    debug!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, StatusCode> {
    let posts = db.read().await;
    posts.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<NewPost>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    let post = posts.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *post = Post {
        user_id: input.user_id,
        id,
        title: input.title,
        body: input.body,
    };
    Ok(Json(post.clone()))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PostPatch>,
) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    let post = posts.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(user_id) = input.user_id {
        post.user_id = user_id;
    }
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut posts = db.write().await;
    let removed = posts.items.remove(&id);
    debug!(id, found = removed.is_some(), "delete post");
    removed.map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn anything(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    Json(Echo {
        method: method.to_string(),
        url: uri.to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect(),
        data: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Return the request body untouched, labelled with the request's content
/// type.
async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));
    ([(header::CONTENT_TYPE, content_type)], body)
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.canonical_reason().unwrap_or_default().to_string()).into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
