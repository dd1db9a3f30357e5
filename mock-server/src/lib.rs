use std::{
    collections::BTreeMap,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
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

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFilter {
    pub post_id: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub posts: BTreeMap<u64, Post>,
    pub comments: Vec<Comment>,
    next_post_id: u64,
}

/// Number of posts a fresh store starts with; each has two comments.
pub const SEEDED_POSTS: u64 = 3;

impl Store {
    pub fn seeded() -> Self {
        let mut store = Store::default();
        for id in 1..=SEEDED_POSTS {
            store.posts.insert(
                id,
                Post {
                    user_id: 1,
                    id,
                    title: format!("post {id}"),
                    body: format!("body of post {id}"),
                },
            );
            for n in 0..2 {
                let comment_id = (id - 1) * 2 + n + 1;
                store.comments.push(Comment {
                    post_id: id,
                    id: comment_id,
                    name: format!("comment {comment_id}"),
                    email: format!("user{comment_id}@example.com"),
                    body: format!("comment {comment_id} on post {id}"),
                });
            }
        }
        store.next_post_id = SEEDED_POSTS + 1;
        store
    }
}

pub type Db = Arc<RwLock<Store>>;

type NotFound = (StatusCode, &'static str);

const NOT_FOUND: NotFound = (StatusCode::NOT_FOUND, "Not Found");

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(replace_post).patch(patch_post).delete(delete_post),
        )
        .route("/posts/{id}/comments", get(post_comments))
        .route("/comments", get(list_comments))
        .with_state(db)
}

pub const DEFAULT_PORT: u16 = 3000;

/// Loopback address to bind, on `port` or [`DEFAULT_PORT`].
pub fn listen_addr(port: Option<u16>) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, port.unwrap_or(DEFAULT_PORT)))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(store.posts.values().cloned().collect())
}

async fn create_post(State(db): State<Db>, Json(input): Json<CreatePost>) -> (StatusCode, Json<Post>) {
    let mut store = db.write().await;
    let id = store.next_post_id;
    store.next_post_id += 1;
    let post = Post {
        user_id: input.user_id,
        id,
        title: input.title,
        body: input.body,
    };
    store.posts.insert(id, post.clone());
    debug!(id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, NotFound> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(NOT_FOUND)
}

async fn replace_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReplacePost>,
) -> Result<Json<Post>, NotFound> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(NOT_FOUND)?;
    *post = Post {
        user_id: input.user_id,
        id,
        title: input.title,
        body: input.body,
    };
    Ok(Json(post.clone()))
}

async fn patch_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PatchPost>,
) -> Result<Json<Post>, NotFound> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(NOT_FOUND)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    if let Some(user_id) = input.user_id {
        post.user_id = user_id;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, NotFound> {
    let mut store = db.write().await;
    store.posts.remove(&id).ok_or(NOT_FOUND)?;
    store.comments.retain(|c| c.post_id != id);
    debug!(id, "deleted post");
    Ok(StatusCode::NO_CONTENT)
}

async fn post_comments(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Vec<Comment>>, NotFound> {
    let store = db.read().await;
    if !store.posts.contains_key(&id) {
        return Err(NOT_FOUND);
    }
    Ok(Json(
        store.comments.iter().filter(|c| c.post_id == id).cloned().collect(),
    ))
}

async fn list_comments(State(db): State<Db>, Query(filter): Query<CommentFilter>) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(
        store
            .comments
            .iter()
            .filter(|c| filter.post_id.is_none_or(|id| c.post_id == id))
            .cloned()
            .collect(),
    )
}
