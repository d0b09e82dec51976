use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use test_utils::document_root_fixture;
use test_utils::APP_CSS;
use test_utils::APP_JS;
use test_utils::INDEX_HTML;
use tower::ServiceExt;

use super::content_type;
use super::normalize;
use super::StaticHost;

struct Fetched {
    status: StatusCode,
    content_type: String,
    body: Vec<u8>,
}

async fn fetch(host: StaticHost, path: &str) -> Result<Fetched> {
    let res = host
        .router()
        .oneshot(Request::builder().uri(path).body(Body::empty())?)
        .await?;

    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|val| return val.to_str().unwrap_or("").to_string())
        .unwrap_or_default();
    let body = res.into_body().collect().await?.to_bytes().to_vec();

    return Ok(Fetched {
        status,
        content_type,
        body,
    });
}

#[test]
fn it_maps_extensions_to_content_types() {
    assert_eq!(content_type(Path::new("index.html")), "text/html");
    assert_eq!(content_type(Path::new("a/b/app.js")), "text/javascript");
    assert_eq!(content_type(Path::new("app.css")), "text/css");
    assert_eq!(content_type(Path::new("manifest.json")), "application/json");
    assert_eq!(content_type(Path::new("logo.svg")), "image/svg+xml");
    assert_eq!(content_type(Path::new("logo.png")), "image/png");
    assert_eq!(content_type(Path::new("favicon.ico")), "image/x-icon");
    assert_eq!(content_type(Path::new("font.woff2")), "application/octet-stream");
    assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
}

#[test]
fn it_strips_base_paths() {
    let host = StaticHost::new("dist".into(), "/apps/2");
    assert_eq!(host.strip_base_path("/apps/2/foo.js"), "/foo.js");
    assert_eq!(host.strip_base_path("/apps/2"), "/");
    assert_eq!(host.strip_base_path("/apps/2?x=1"), "/");
    assert_eq!(host.strip_base_path("/other/foo.js"), "/other/foo.js");

    let host = StaticHost::new("dist".into(), "");
    assert_eq!(host.strip_base_path("/foo.js?v=3"), "/foo.js");
}

#[tokio::test]
async fn it_serves_the_root_document_for_slash() -> Result<()> {
    let dir = document_root_fixture();

    let root = fetch(StaticHost::new(dir.path().into(), ""), "/").await?;
    let index = fetch(StaticHost::new(dir.path().into(), ""), "/index.html").await?;

    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.content_type, "text/html");
    assert_eq!(root.body, INDEX_HTML.as_bytes());
    assert_eq!(root.body, index.body);

    return Ok(());
}

#[tokio::test]
async fn it_serves_existing_files() -> Result<()> {
    let dir = document_root_fixture();

    let js = fetch(StaticHost::new(dir.path().into(), ""), "/foo.js").await?;
    assert_eq!(js.status, StatusCode::OK);
    assert_eq!(js.content_type, "text/javascript");
    assert_eq!(js.body, APP_JS.as_bytes());

    let css = fetch(StaticHost::new(dir.path().into(), ""), "/assets/app.css?v=1").await?;
    assert_eq!(css.status, StatusCode::OK);
    assert_eq!(css.content_type, "text/css");
    assert_eq!(css.body, APP_CSS.as_bytes());

    let bin = fetch(StaticHost::new(dir.path().into(), ""), "/assets/logo.bin").await?;
    assert_eq!(bin.content_type, "application/octet-stream");
    assert_eq!(bin.body, vec![0, 1, 2, 3]);

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_the_root_document() -> Result<()> {
    let dir = document_root_fixture();

    for path in ["/chat/42", "/missing.js", "/empty", "/assets/", "/../../etc/passwd"] {
        let res = fetch(StaticHost::new(dir.path().into(), ""), path).await?;
        assert_eq!(res.status, StatusCode::OK, "{path}");
        assert_eq!(res.content_type, "text/html", "{path}");
        assert_eq!(res.body, INDEX_HTML.as_bytes(), "{path}");
    }

    return Ok(());
}

#[test]
fn it_normalizes_dot_segments() {
    assert_eq!(normalize("/assets/../foo.js"), Some(PathBuf::from("foo.js")));
    assert_eq!(normalize("/./foo.js"), Some(PathBuf::from("foo.js")));
    assert_eq!(
        normalize("/assets/./app.css"),
        Some(PathBuf::from("assets/app.css"))
    );
    assert_eq!(normalize("/assets/.."), Some(PathBuf::new()));
    assert_eq!(normalize("/../foo.js"), None);
    assert_eq!(normalize("/assets/../../foo.js"), None);
}

#[tokio::test]
async fn it_serves_files_reached_through_dot_segments() -> Result<()> {
    let dir = document_root_fixture();

    for path in ["/assets/../foo.js", "/./foo.js"] {
        let res = fetch(StaticHost::new(dir.path().into(), ""), path).await?;
        assert_eq!(res.status, StatusCode::OK, "{path}");
        assert_eq!(res.content_type, "text/javascript", "{path}");
        assert_eq!(res.body, APP_JS.as_bytes(), "{path}");
    }

    let css = fetch(StaticHost::new(dir.path().into(), ""), "/empty/../assets/app.css").await?;
    assert_eq!(css.body, APP_CSS.as_bytes());

    let escaped = fetch(StaticHost::new(dir.path().into(), ""), "/assets/../../foo.js").await?;
    assert_eq!(escaped.body, INDEX_HTML.as_bytes());

    return Ok(());
}

#[tokio::test]
async fn it_resolves_under_a_base_path() -> Result<()> {
    let dir = document_root_fixture();

    let prefixed = fetch(StaticHost::new(dir.path().into(), "/apps/2"), "/apps/2/foo.js").await?;
    let plain = fetch(StaticHost::new(dir.path().into(), ""), "/foo.js").await?;
    assert_eq!(prefixed.status, StatusCode::OK);
    assert_eq!(prefixed.content_type, plain.content_type);
    assert_eq!(prefixed.body, plain.body);

    let root = fetch(StaticHost::new(dir.path().into(), "/apps/2"), "/apps/2").await?;
    assert_eq!(root.body, INDEX_HTML.as_bytes());

    return Ok(());
}

#[tokio::test]
async fn it_returns_not_found_without_a_root_document() -> Result<()> {
    let dir = document_root_fixture();
    std::fs::remove_file(dir.path().join("index.html"))?;

    let res = fetch(StaticHost::new(dir.path().into(), ""), "/some/route").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.content_type, "text/plain");
    insta::assert_snapshot!(String::from_utf8(res.body)?, @"Not found: /some/route");

    return Ok(());
}

#[tokio::test]
async fn it_answers_every_method_the_same() -> Result<()> {
    let dir = document_root_fixture();
    let res = StaticHost::new(dir.path().into(), "")
        .router()
        .oneshot(
            Request::builder()
                .method("HEAD")
                .uri("/foo.js")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    return Ok(());
}
