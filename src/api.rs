//! The posts API: handlers and the router for each variant.
//!
//! | Method | Path           | Handler          |
//! |--------|----------------|------------------|
//! | GET    | `/`            | [`list_posts`]   |
//! | POST   | `/createposts` | [`create_post`]  |
//! | POST   | `/posts`       | [`echo_post`] (not in the `append` variant) |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::Error;
use crate::post::Post;
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::router::Router;
use crate::schema::{self, Schema, ValidationErrors};
use crate::status::Status;
use crate::store::PostStore;

/// Which flavour of the service to run.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Title and content only; creations are echoed, not stored.
    Basic,
    /// Full schema; creations get a random id and are stored.
    Append,
    /// Full schema; creations are echoed, not stored.
    #[default]
    Extended,
}

impl Variant {
    pub fn schema(self) -> Schema {
        match self {
            Self::Basic => Schema::Basic,
            Self::Append | Self::Extended => Schema::Extended,
        }
    }

    /// Whether `POST /createposts` appends to the store.
    pub fn appends(self) -> bool {
        self == Self::Append
    }

    /// Whether the schema-less `POST /posts` route is served.
    pub fn serves_raw_posts(self) -> bool {
        self != Self::Append
    }
}

/// State handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<PostStore>,
    pub variant: Variant,
}

/// Builds the router for `variant` over `store`.
pub fn router(variant: Variant, store: Arc<PostStore>) -> Result<Router<AppState>, Error> {
    let router = Router::new(AppState { store, variant })
        .get("/", list_posts)?
        .post("/createposts", create_post)?;
    if variant.serves_raw_posts() {
        return router.post("/posts", echo_post);
    }
    Ok(router)
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Why a posts handler did not succeed.
#[derive(Debug)]
pub enum ApiError {
    /// The body failed validation. `422`.
    Invalid(ValidationErrors),
    /// A key the handler reads unconditionally was absent. `500`.
    MissingKey(&'static str),
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Invalid(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(e) => e.into_response(),
            Self::MissingKey(key) => {
                error!(key, "request body has no such key");
                Response::builder()
                    .status(Status::InternalServerError)
                    .text("Internal Server Error")
            }
        }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PostList {
    pub message: &'static str,
    pub data: Vec<Post>,
}

/// `GET /` — every stored post, in insertion order.
pub async fn list_posts(state: AppState, _req: Request) -> Json<PostList> {
    Json(PostList { message: "List of Posts", data: state.store.list() })
}

/// Echo of a validated `POST /createposts` body.
#[derive(Debug, Serialize)]
pub struct CreatedPost {
    pub post_status: &'static str,
    pub post_validation: &'static str,
    pub post_title: String,
    pub post_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_rating: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_publish_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u32>,
}

/// `POST /createposts` — validates the body, stores it in the `append`
/// variant, and echoes the validated fields.
pub async fn create_post(state: AppState, req: Request) -> Result<Json<CreatedPost>, ApiError> {
    let new = state.variant.schema().validate(req.body())?;
    info!(title = %new.title, attributes = ?new.attributes, "post validated");

    let attributes = new.attributes;
    let (title, content, post_id) = if state.variant.appends() {
        let post = state.store.append(new);
        info!(post_id = post.post_id, stored = state.store.len(), "post appended");
        (post.title, post.content, Some(post.post_id))
    } else {
        (new.title, new.content, None)
    };

    Ok(Json(CreatedPost {
        post_status: "Updated successfully",
        post_validation: "Schema is validated successfully",
        post_title: title,
        post_content: content,
        post_rating: attributes.map(|a| a.rating),
        post_publish_status: attributes.map(|a| a.published),
        post_id,
    }))
}

/// `POST /posts` — echoes `title` and `content` from any JSON object.
///
/// Both keys are read unconditionally: a body without them fails with
/// `500`, never with a default.
pub async fn echo_post(_state: AppState, req: Request) -> Result<Json<Value>, ApiError> {
    let data = schema::json_object(req.body())?;
    let title = data.get("title").ok_or(ApiError::MissingKey("title"))?;
    let content = data.get("content").ok_or(ApiError::MissingKey("content"))?;
    Ok(Json(json!({
        "new_post_statue": "Post updated Successfully",
        "post_title": title,
        "post_content": content,
    })))
}
