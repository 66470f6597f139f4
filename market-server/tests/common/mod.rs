//! Shared test harness: temp-database state, in-process router, token
//! minting, seed data and a multipart body builder.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use market_server::core::server::build_router;
use market_server::db::models::{ProductCategory, ProductCreate, ProductImage, SustainabilityInfo};
use market_server::db::repository::{ProductRepository, make_thing};
use market_server::services::media::{MediaStorage, UploadFile};
use market_server::{Config, ServerState};
use shared::AppResult;

/// In-memory stand-in for the media collaborator
pub struct MemoryMedia {
    uploads: AtomicUsize,
}

impl MemoryMedia {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            uploads: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MediaStorage for MemoryMedia {
    async fn upload(&self, file: &UploadFile, folder: &str) -> AppResult<ProductImage> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(ProductImage {
            url: format!("https://media.test/{folder}/{n}-{}", file.filename),
            public_id: format!("{folder}/{n}"),
        })
    }

    async fn delete(&self, _public_id: &str) -> AppResult<()> {
        Ok(())
    }
}

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
    _work_dir: TempDir,
}

/// Fresh server state over a temp RocksDB directory
pub async fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize_with_media(&config, MemoryMedia::new())
        .await
        .expect("server state");
    let app = build_router(state.clone());
    TestApp {
        state,
        app,
        _work_dir: work_dir,
    }
}

/// Mint a token with the state's own JWT service
pub fn token_for(state: &ServerState, user_id: &str, name: &str, role: &str) -> String {
    state
        .jwt_service
        .generate_token(user_id, name, role)
        .expect("token")
}

/// Seed a user document the way the auth collaborator would
pub async fn seed_user(state: &ServerState, id: &str, name: &str, role: &str) {
    state
        .db
        .query("CREATE type::thing('user', $id) SET name = $name, avatar = $avatar, bio = $bio, role = $role")
        .bind(("id", id.to_string()))
        .bind(("name", name.to_string()))
        .bind(("avatar", format!("https://media.test/avatars/{id}.jpg")))
        .bind(("bio", format!("{name} makes things out of other things")))
        .bind(("role", role.to_string()))
        .await
        .expect("seed user");
}

/// Seed a product through the repository; returns its "product:..." id
pub async fn seed_product(
    state: &ServerState,
    name: &str,
    category: ProductCategory,
    price: f64,
    seller_id: &str,
) -> String {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .create(ProductCreate {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category,
            materials_used: vec!["reclaimed wood".to_string()],
            colors: vec!["natural".to_string()],
            sustainability_info: SustainabilityInfo::default(),
            seller: make_thing("user", seller_id),
            stock: Some(3),
            images: vec![],
        })
        .await
        .expect("seed product");
    product.id.expect("product id").to_string()
}

/// Fire a request at the router and decode the envelope
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_unauth(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Tiny but real PNG for upload tests
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([120, 200, 90]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

/// Minimal multipart/form-data body builder
pub struct MultipartBuilder {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self {
            boundary: "x-market-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    pub fn build(self, method: &str, uri: &str, token: &str) -> Request<Body> {
        let auth = format!("Bearer {token}");
        let (content_type, body) = self.finish();
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::AUTHORIZATION, auth)
            .body(Body::from(body))
            .unwrap()
    }

    pub fn build_unauth(self, method: &str, uri: &str) -> Request<Body> {
        let (content_type, body) = self.finish();
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }
}
