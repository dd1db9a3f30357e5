//! Issues every request the endpoint schema declares, once, in order.
//!
//! Reads `API_URL` (and optionally `.env`) at startup and exits with status 1
//! if the environment is invalid or any request fails.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use typed_client::schema;
use typed_client::{
    ApiClient, Comment, Config, MutationOptions, NewPost, Post, PostPatch, QueryOptions, Result,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_exit();

    info!("starting requests");
    info!(api_url = %config.api_url, "api url");

    let client = ApiClient::new(config.api_url.as_str());
    if let Err(e) = run(&client) {
        error!(error = %e, "request failed");
        std::process::exit(1);
    }

    info!("requests finished");
}

fn run(client: &ApiClient) -> Result<()> {
    let none: [&str; 0] = [];

    // GET /posts
    let posts: Vec<Post> = client.client(schema::POSTS, &none)?.get(&QueryOptions::new())?;
    info!(count = posts.len(), "GET /posts");

    // GET /posts/1
    let post: Post = client.client(schema::POST, &["1"])?.get(&QueryOptions::new())?;
    info!(id = post.id, title = %post.title, "GET /posts/1");

    // GET /posts/1/comments
    let comments: Vec<Comment> = client.client(schema::POST_COMMENTS, &["1"])?.get(&QueryOptions::new())?;
    info!(count = comments.len(), "GET /posts/1/comments");

    // GET /comments?postId=1
    let comments: Vec<Comment> = client
        .client(schema::COMMENTS, &none)?
        .get(&QueryOptions::new().query("postId", 1))?;
    info!(count = comments.len(), "GET /comments?postId=1");

    // POST /posts
    let created: Post = client.client(schema::POSTS, &none)?.post(&MutationOptions::new(NewPost {
        title: "foo".to_string(),
        body: "bar".to_string(),
        user_id: 1,
    }))?;
    info!(id = created.id, "POST /posts");

    // PUT /posts/1
    let replaced: Post = client.client(schema::POST, &["1"])?.put(&MutationOptions::new(Post {
        id: 1,
        title: "foo".to_string(),
        body: "bar".to_string(),
        user_id: 1,
    }))?;
    info!(id = replaced.id, "PUT /posts/1");

    // PATCH /posts/1
    let patched: Post = client
        .client(schema::POST, &["1"])?
        .patch(&MutationOptions::new(PostPatch { title: "foo".to_string() }))?;
    info!(id = patched.id, title = %patched.title, "PATCH /posts/1");

    // DELETE /posts/1
    client
        .client(schema::POST, &["1"])?
        .delete::<()>(&QueryOptions::new())?;
    info!("DELETE /posts/1");

    Ok(())
}
