use axum::http::{header, StatusCode};
use serde_json::json;

mod common;
use common::{body_json, body_text, broken_cms, build_test_app, content_dir, fake_cms, get};

#[tokio::test]
async fn content_api_returns_projects_newest_first() {
    let dir = content_dir();
    let response = get(build_test_app(dir.path(), None), "/api/content?type=projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let projects = json.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["slug"], "firewall");
    assert_eq!(projects[0]["date"], "2024-07-12");
    assert_eq!(projects[0]["status"], "completed");
    assert_eq!(projects[1]["slug"], "homelab");
    assert_eq!(projects[1]["readingTime"], "1 min read");
}

#[tokio::test]
async fn content_api_rejects_unknown_types() {
    let dir = content_dir();
    for uri in ["/api/content?type=videos", "/api/content"] {
        let response = get(build_test_app(dir.path(), None), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid content type" }));
    }
}

#[tokio::test]
async fn content_api_with_empty_collection_is_empty_array() {
    let dir = tempfile::TempDir::new().unwrap();
    let response = get(build_test_app(dir.path(), None), "/api/content?type=notes").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn robots_points_at_sitemap() {
    let dir = content_dir();
    let response = get(build_test_app(dir.path(), None), "/robots.txt").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(text.contains("Disallow: /api/"));
    assert!(text.contains("Sitemap: https://example.org/sitemap.xml"));
}

#[tokio::test]
async fn sitemap_lists_local_and_cms_pages() {
    let dir = content_dir();
    let app = build_test_app(dir.path(), Some(fake_cms().await));
    let response = get(app, "/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));

    let xml = body_text(response).await;
    assert!(xml.contains("<loc>https://example.org</loc>"));
    assert!(xml.contains("<loc>https://example.org/projects/homelab</loc>"));
    assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
    assert!(xml.contains("<loc>https://example.org/notes/note3</loc>"));
    assert!(xml.contains("<loc>https://example.org/works/work2</loc>"));
}

#[tokio::test]
async fn sitemap_survives_cms_failure() {
    let dir = content_dir();
    let app = build_test_app(dir.path(), Some(broken_cms().await));
    let response = get(app, "/sitemap.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/projects/firewall"));
}

#[tokio::test]
async fn every_local_sitemap_url_resolves() {
    let dir = content_dir();
    let app = build_test_app(dir.path(), None);
    let xml = body_text(get(app.clone(), "/sitemap.xml").await).await;

    let paths: Vec<_> = xml
        .lines()
        .filter_map(|l| l.strip_prefix("<loc>https://example.org"))
        .filter_map(|l| l.strip_suffix("</loc>"))
        .map(|p| if p.is_empty() { "/".to_string() } else { p.to_string() })
        .collect();
    assert!(paths.contains(&"/notes/dns".to_string()));

    for path in paths {
        let response = get(app.clone(), &path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}
