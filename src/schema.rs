//! Request-body validation for posts.
//!
//! A body is checked field by field against the variant's [`Schema`]. Every
//! problem is collected into [`ValidationErrors`], rendered as
//! `422 {"detail": [{"loc": [...], "msg": ..., "type": ...}, ...]}`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::post::{Attributes, NewPost};
use crate::response::{IntoResponse, Json, Response};
use crate::status::Status;

/// The field set a post body is validated against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Schema {
    /// `title` and `content`.
    Basic,
    /// `title`, `content`, optional `rating`, `published` (default true).
    Extended,
}

/// One failed check: where, what, and a machine-readable kind.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    fn body(msg: impl Into<String>, kind: &'static str) -> Self {
        Self { loc: vec!["body".to_owned()], msg: msg.into(), kind }
    }

    fn field(name: &str, msg: &str, kind: &'static str) -> Self {
        Self {
            loc: vec!["body".to_owned(), name.to_owned()],
            msg: msg.to_owned(),
            kind,
        }
    }

    fn missing(name: &str) -> Self {
        Self::field(name, "field required", "value_error.missing")
    }

    fn null(name: &str) -> Self {
        Self::field(name, "none is not an allowed value", "type_error.none.not_allowed")
    }
}

/// A rejected body. Never empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub detail: Vec<FieldError>,
}

impl From<FieldError> for ValidationErrors {
    fn from(e: FieldError) -> Self {
        Self { detail: vec![e] }
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        Json(self).with_status(Status::UnprocessableContent)
    }
}

/// Parses `body` as a JSON object.
///
/// Shared by every route that takes a JSON body, schema or not.
pub fn json_object(body: &[u8]) -> Result<Map<String, Value>, ValidationErrors> {
    if body.is_empty() {
        return Err(FieldError::body("field required", "value_error.missing").into());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FieldError::body("value is not a valid dict", "type_error.dict").into()),
        Err(e) => Err(FieldError::body(e.to_string(), "value_error.jsondecode").into()),
    }
}

impl Schema {
    /// Validates a raw request body into a [`NewPost`].
    ///
    /// Unknown fields are ignored.
    pub fn validate(self, body: &[u8]) -> Result<NewPost, ValidationErrors> {
        let object = json_object(body)?;
        let mut errors = Vec::new();

        let title = text(&object, "title", &mut errors);
        let content = text(&object, "content", &mut errors);
        let attributes = match self {
            Self::Basic => None,
            Self::Extended => Some(Attributes {
                rating: rating(&object, &mut errors),
                published: published(&object, &mut errors),
            }),
        };

        match (title, content) {
            (Some(title), Some(content)) if errors.is_empty() => {
                Ok(NewPost { title, content, attributes })
            }
            _ => Err(ValidationErrors { detail: errors }),
        }
    }
}

fn text(object: &Map<String, Value>, name: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    match object.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        None => {
            errors.push(FieldError::missing(name));
            None
        }
        Some(Value::Null) => {
            errors.push(FieldError::null(name));
            None
        }
        Some(_) => {
            errors.push(FieldError::field(name, "str type expected", "type_error.str"));
            None
        }
    }
}

fn rating(object: &Map<String, Value>, errors: &mut Vec<FieldError>) -> Option<i64> {
    match object.get("rating") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) if n.as_i64().is_some() => n.as_i64(),
        Some(_) => {
            errors.push(FieldError::field("rating", "value is not a valid integer", "type_error.integer"));
            None
        }
    }
}

fn published(object: &Map<String, Value>, errors: &mut Vec<FieldError>) -> bool {
    match object.get("published") {
        None => true,
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) => {
            errors.push(FieldError::null("published"));
            true
        }
        Some(_) => {
            errors.push(FieldError::field(
                "published",
                "value could not be parsed to a boolean",
                "type_error.bool",
            ));
            true
        }
    }
}
