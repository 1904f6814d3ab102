//! Shared helpers for the router tests: a temporary content tree, a fake CMS
//! and request helpers.

#![allow(dead_code)]

use std::{collections::HashMap, fs, path::Path};

use axum::{
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing,
    Json, Router,
};
use folio_core::{cms::CmsClient, content::ContentStore, site::SiteConfig};
use folioweb::{app, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn write(root: &Path, dir: &str, name: &str, text: &str) {
    let d = root.join(dir);
    fs::create_dir_all(&d).unwrap();
    fs::write(d.join(name), text).unwrap();
}

/// A content tree with a couple of entries of each kind.
pub fn content_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(root, "projects", "homelab.mdx", "---\ntitle: Proxmox Homelab\ndate: 2024-05-01\nyear: 2024\nsummary: A three node cluster\ntags: [virtualization]\ntech: [Proxmox, ZFS]\nstatus: ongoing\nrepo: https://github.com/example/homelab\n---\n# Overview\n\nThree nodes.\n\n## Storage\n\nZFS everywhere.\n");
    write(root, "projects", "firewall.mdx", "---\ntitle: Firewall Rebuild\ndate: 2024-07-12\nyear: 2024\nsummary: pfSense to OPNsense\ntags: [network]\ntech: [OPNsense]\nstatus: completed\n---\nMigrated.\n");
    write(root, "notes", "dns.mdx", "---\ntitle: DNS over TLS\ndate: 2024-04-04\ntags: [network]\nsummary: Port 853\n---\n## Forwarding\n\nUnbound config.\n");
    write(root, "art", "nebula.mdx", "---\ntitle: Nebula\ndate: 2024-03-03\ncategory: digital-art\nsummary: Space\nimages:\n  - { src: /img/nebula.png, alt: Nebula, w: 1200, h: 800 }\n---\nPainted in Krita.\n");
    write(root, "photo", "coast.mdx", "---\ntitle: Coast\ndate: 2024-08-08\nsummary: Waves\nimages: []\nmeta:\n  exif: { camera: X100V, lens: 23mm, iso: 160, shutter: 1/500, aperture: f/8 }\n---\n");
    write(root, "works", "poster.mdx", "---\ntitle: Gig Poster\ndate: 2024-02-01\ncategory: design\ntags: [print]\ntools: [Affinity]\n---\nRisograph print.\n");

    tmp
}

pub fn site() -> SiteConfig {
    SiteConfig {
        name: "Test Person".into(),
        url: "https://example.org".into(),
        ..Default::default()
    }
}

pub fn build_test_app(content: &Path, cms: Option<CmsClient>) -> Router {
    build_app_with_site(site(), content, cms)
}

pub fn build_app_with_site(site: SiteConfig, content: &Path, cms: Option<CmsClient>) -> Router {
    app(AppState::new(site, ContentStore::new(content), cms))
}

type Params = Query<HashMap<String, String>>;

fn technotes() -> Vec<Value> {
    vec![
        json!({"id": 1, "documentId": "note1", "Title": "Zero Trust Basics", "Note": "## Idea\n\nNever trust.", "PublishDate": "2024-01-10", "createdAt": "2024-01-01T00:00:00.000Z", "publishedAt": "2024-01-01T00:00:00.000Z"}),
        json!({"id": 2, "documentId": "note2", "Title": "Undated Scratchpad", "Note": "todo", "PublishDate": null, "createdAt": "2024-09-01T00:00:00.000Z", "publishedAt": "2024-09-01T00:00:00.000Z"}),
        json!({"id": 3, "documentId": "note3", "Title": "VLAN Tagging", "Note": "802.1Q", "PublishDate": "2024-06-06", "createdAt": "2024-06-01T00:00:00.000Z", "publishedAt": "2024-06-01T00:00:00.000Z"}),
    ]
}

fn works() -> Vec<Value> {
    vec![
        json!({"id": 1, "documentId": "work1", "Title": "Short Film", "Detail": "Shot on film.", "PublishDate": null, "createdAt": "2024-03-03T00:00:00.000Z", "publishedAt": "2024-03-03T00:00:00.000Z",
               "Cover": {"url": "/uploads/film.mp4", "mime": "video/mp4"}}),
        json!({"id": 2, "documentId": "work2", "Title": "Album Cover", "Detail": "Vector art.", "PublishDate": "2024-04-04", "createdAt": "2024-04-01T00:00:00.000Z", "publishedAt": "2024-04-01T00:00:00.000Z",
               "Cover": {"url": "/uploads/cover.png", "mime": "image/png", "formats": {"medium": {"url": "/uploads/medium_cover.png"}}}}),
    ]
}

fn respond(all: Vec<Value>, Query(params): Params) -> Response {
    let data: Vec<_> = match params.get("filters[documentId][$eq]") {
        Some(id) => all.into_iter().filter(|e| e["documentId"] == *id).collect(),
        None => all,
    };

    Json(json!({ "data": data })).into_response()
}

/// Starts a CMS stand-in on a random local port and returns a client for it.
pub async fn fake_cms() -> CmsClient {
    let router = Router::new()
        .route("/api/technotes", routing::get(|q: Params| async move { respond(technotes(), q) }))
        .route("/api/works", routing::get(|q: Params| async move { respond(works(), q) }))
        .route("/api/projects", routing::get(|q: Params| async move { respond(Vec::new(), q) }));

    serve(router).await
}

/// A CMS that fails every request.
pub async fn broken_cms() -> CmsClient {
    let router = Router::new().fallback(|| async { StatusCode::SERVICE_UNAVAILABLE });
    serve(router).await
}

async fn serve(router: Router) -> CmsClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    CmsClient::new(format!("http://{addr}"), "token").unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
