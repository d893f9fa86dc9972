use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use serde::Serialize;
use spdlog::{error, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::content::{PostRecord, Slug};
use crate::feed::{emit_feeds, FeedConfig, Feeds};
use crate::ordering::Limit;
use crate::post_processor::retrieve_post_list;
use crate::query_string::QueryString;
use crate::text_utils::format_date_time;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not found</title></head>
<body><h1>Not found</h1><p>There is nothing here.</p><a href="/">Back to the blog</a></body>
</html>
"#;

struct AppState {
    catalog: Catalog,
    feed_config: FeedConfig,
    cache_control: String,
    home_post_count: usize,
}

/// `url` is where the page layer shows the post. The JSON of the post itself
/// lives at `api_url`.
#[derive(Serialize)]
struct PostSummary<'a> {
    slug: &'a Slug,
    url: String,
    api_url: String,
    title: &'a str,
    description: &'a str,
    date: String,
    tags: &'a [String],
}

impl<'a> From<&'a PostRecord> for PostSummary<'a> {
    fn from(post: &'a PostRecord) -> Self {
        let (date, _time) = format_date_time(&post.date);
        PostSummary {
            slug: &post.slug,
            url: format!("/blog/{}", post.slug),
            api_url: format!("/posts/{}", post.slug),
            title: &post.title,
            description: &post.description,
            date,
            tags: &post.tags,
        }
    }
}

#[derive(Serialize)]
struct PostListPage<'a> {
    posts: Vec<PostSummary<'a>>,
    tags: Vec<String>,
}

fn render_post_list(catalog: &Catalog, query: &QueryString, default_limit: Limit) -> serde_json::Result<String> {
    let post_list = retrieve_post_list(catalog, query.get_tag(), query.get_order(), query.get_limit(default_limit));
    serde_json::to_string(&PostListPage {
        posts: post_list.posts.into_iter().map(PostSummary::from).collect(),
        tags: post_list.tags,
    })
}

fn render_post(catalog: &Catalog, slug: &str) -> Option<serde_json::Result<String>> {
    catalog.find(slug).map(serde_json::to_string)
}

fn get_query(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

fn json_response(rendered: serde_json::Result<String>) -> web::HttpResponse {
    match rendered {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("application/json; charset=utf-8")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error listing posts: {}", e)),
    }
}

// Rendered per request so `updated` and the copyright year follow the clock.
fn render_feeds(state: &AppState) -> Result<Feeds> {
    emit_feeds(&state.feed_config, &state.catalog.newest_first(), Utc::now())
}

fn feed_response(state: &AppState, content_type: &str, select: fn(Feeds) -> String) -> web::HttpResponse {
    match render_feeds(state) {
        Ok(feeds) => web::HttpResponse::Ok()
            .header("Cache-Control", state.cache_control.as_str())
            .content_type(content_type)
            .body(select(feeds)),
        Err(e) => {
            error!("Error rendering feeds: {}", e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering feeds: {}", e))
        }
    }
}

fn not_found() -> web::HttpResponse {
    web::HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(NOT_FOUND_PAGE)
}

#[web::get("/rss/feed.xml")]
async fn rss_feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    feed_response(&state, "application/rss+xml; charset=utf-8", |feeds| feeds.rss)
}

#[web::get("/rss/atom.xml")]
async fn atom_feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    feed_response(&state, "application/atom+xml; charset=utf-8", |feeds| feeds.atom)
}

#[web::get("/rss/feed.json")]
async fn json_feed(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    feed_response(&state, "application/feed+json; charset=utf-8", |feeds| feeds.json)
}

// Most recent posts for the home page
#[web::get("/")]
async fn index(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let default_limit = Limit::AtMost(state.home_post_count);
    json_response(render_post_list(&state.catalog, &get_query(&req), default_limit))
}

#[web::get("/posts")]
async fn list_posts(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    json_response(render_post_list(&state.catalog, &get_query(&req), Limit::Unbounded))
}

#[web::get("/posts/{slug}")]
async fn view(slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = slug.into_inner();
    match render_post(&state.catalog, &slug) {
        Some(rendered) => json_response(rendered),
        None => {
            warn!("Post not found: {}", slug);
            not_found()
        }
    }
}

async fn fallback() -> web::HttpResponse {
    not_found()
}

pub async fn server_run(config: Config) -> Result<()> {
    let catalog = Catalog::load(&config.paths.posts_dir, config.index_base_name())?;
    for post in catalog.newest_first() {
        info!("Post: {} ({})", post.slug, post.date);
    }

    let feed_config = FeedConfig::from_config(&config);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        catalog,
        feed_config,
        cache_control: config.cache.header_value(),
        home_post_count: config.defaults.home_post_count,
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(list_posts)
            .service(view)
            .service(rss_feed)
            .service(atom_feed)
            .service(json_feed)
            .default_service(web::route().to(fallback))
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await?;

    Ok(())
}
