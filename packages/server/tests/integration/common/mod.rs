use std::io::Cursor;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use common::config::{DatabaseConfig, MediaConfig};
use common::entity::{category, profile, recipe, user};
use common::lifecycle::MediaLifecycle;
use common::storage::FilesystemMediaStore;
use image::{ImageBuffer, ImageFormat, Rgb};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use tempfile::TempDir;

use server::config::{AppConfig, AuthConfig, ServerConfig};
use server::state::AppState;

pub const PASSWORD: &str = "correct horse";

pub mod routes {
    pub const HOME: &str = "/";
    pub const NEW_RECIPE: &str = "/recipe/new/";
    pub const REGISTER: &str = "/register/";
    pub const LOGIN: &str = "/login/";
    pub const LOGOUT: &str = "/logout/";
    pub const PROFILE: &str = "/profile/";

    pub fn recipe(id: i32) -> String {
        format!("/recipe/{id}/")
    }

    pub fn update_recipe(id: i32) -> String {
        format!("/recipe/{id}/update/")
    }

    pub fn delete_recipe(id: i32) -> String {
        format!("/recipe/{id}/delete/")
    }

    pub fn category(id: i32) -> String {
        format!("/recipes/category/{id}/")
    }

    pub fn media(path: &str) -> String {
        format!("/media/{path}")
    }
}

/// A running test server on a fresh SQLite file and media directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub db: DatabaseConnection,
    pub media_root: PathBuf,
    _dir: TempDir,
}

/// One browser: its own cookie jar, redirects not followed.
pub struct Session {
    addr: SocketAddr,
    client: Client,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub text: String,
    pub location: Option<String>,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = res.bytes().await.expect("Failed to read body").to_vec();
        Self {
            status,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            location,
            bytes,
        }
    }

    /// Number of recipe cards on a listing page.
    pub fn card_count(&self) -> usize {
        self.text.matches("class=\"card\"").count()
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());

        let mut opts = ConnectOptions::new(&db_url);
        opts.max_connections(5).sqlx_logging(false);
        let db = Database::connect(opts)
            .await
            .expect("Failed to connect to test database");
        common::database::init_schema(&db)
            .await
            .expect("Failed to create schema");

        let media_root = dir.path().join("media");
        let store = FilesystemMediaStore::new(media_root.clone())
            .await
            .expect("Failed to create media store");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: Some(db_url),
                ..Default::default()
            },
            media: MediaConfig {
                root: media_root.clone(),
                max_upload_size: 5 * 1024 * 1024,
            },
            auth: AuthConfig {
                session_secret: "test-secret-for-integration-tests".to_string(),
                session_days: 7,
            },
        };

        let state = AppState {
            db: db.clone(),
            media: MediaLifecycle::new(Arc::new(store)),
            config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            db,
            media_root,
            _dir: dir,
        }
    }

    pub fn anonymous(&self) -> Session {
        Session {
            addr: self.addr,
            client: Client::builder()
                .cookie_store(true)
                .redirect(Policy::none())
                .build()
                .expect("Failed to build client"),
        }
    }

    /// Register `username` through the site and log in as them.
    pub async fn signed_in(&self, username: &str) -> Session {
        let session = self.anonymous();
        let reg = session
            .post_form(
                routes::REGISTER,
                &[
                    ("username", username),
                    ("email", &format!("{username}@example.com")),
                    ("password1", PASSWORD),
                    ("password2", PASSWORD),
                ],
            )
            .await;
        assert_eq!(reg.status, 303, "Registration failed: {}", reg.text);

        let login = session
            .post_form(routes::LOGIN, &[("username", username), ("password", PASSWORD)])
            .await;
        assert_eq!(login.status, 303, "Login failed: {}", login.text);
        session
    }

    pub async fn category(&self, name: &str) -> i32 {
        category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to insert category")
        .id
    }

    pub async fn user(&self, username: &str) -> user::Model {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .unwrap()
            .expect("User not found")
    }

    pub async fn profile_of(&self, user_id: i32) -> Vec<profile::Model> {
        profile::Entity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .unwrap()
    }

    pub async fn recipe(&self, id: i32) -> Option<recipe::Model> {
        recipe::Entity::find_by_id(id).one(&self.db).await.unwrap()
    }

    pub fn media_file(&self, path: &str) -> PathBuf {
        self.media_root.join(path)
    }

    /// Post a recipe through the form and return its id.
    pub async fn create_recipe(&self, session: &Session, category_id: i32, title: &str) -> i32 {
        let res = session
            .post_multipart(
                routes::NEW_RECIPE,
                recipe_form(category_id, title, Some(png(64, 48))),
            )
            .await;
        assert_eq!(res.status, 303, "Recipe creation failed: {}", res.text);
        recipe_id_from(&res)
    }
}

impl Session {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }
}

/// A solid-colour PNG.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([180u8, 90, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

pub fn image_part(bytes: Vec<u8>, filename: &str) -> Part {
    Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("image/png")
        .expect("Failed to set MIME type")
}

pub fn recipe_form(category_id: i32, title: &str, image: Option<Vec<u8>>) -> Form {
    let form = Form::new()
        .text("title", title.to_string())
        .text("category", category_id.to_string())
        .text("description", "A warming dish")
        .text("ingredients", "beets\npotatoes\ncabbage")
        .text("cooking_steps", "Chop.\nSimmer.")
        .text("cooking_time", "01:30")
        .text("active", "on");
    match image {
        Some(bytes) => form.part("image", image_part(bytes, "dish.png")),
        None => form,
    }
}

/// The id in a `/recipe/{id}/` redirect.
pub fn recipe_id_from(res: &TestResponse) -> i32 {
    res.location
        .as_deref()
        .and_then(|l| l.strip_prefix("/recipe/"))
        .and_then(|l| l.strip_suffix('/'))
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("Not a recipe redirect: {:?}", res.location))
}

pub fn dimensions(path: &std::path::Path) -> (u32, u32) {
    image::image_dimensions(path).expect("Failed to read image dimensions")
}
