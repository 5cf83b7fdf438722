//! The post record and its seed data.

use serde::Serialize;

/// Rating and publish flag, carried only by posts that went through the
/// extended schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub rating: Option<i64>,
    pub published: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self { rating: None, published: true }
    }
}

/// A validated post that has not been given an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    /// `None` when the schema has no `rating`/`published` fields.
    pub attributes: Option<Attributes>,
}

/// A stored post.
///
/// Serializes as `title`, `content`, then `rating`/`published` when
/// present, then `post_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    pub content: String,
    #[serde(flatten)]
    pub attributes: Option<Attributes>,
    pub post_id: u32,
}

impl Post {
    pub fn from_new(new: NewPost, post_id: u32) -> Self {
        Self {
            title: new.title,
            content: new.content,
            attributes: new.attributes,
            post_id,
        }
    }
}

/// The three posts every store starts with, in listing order.
pub fn seed() -> Vec<Post> {
    [
        ("Summer Trip", "Long weekend, So took a bike ride to Pondicherry"),
        ("Lunch @ Taj", "North-Indian Thali"),
        ("Attended a customer meeting @ Santa Clara", "It's a good memorable event of the month"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, content), post_id)| Post {
        title: title.to_owned(),
        content: content.to_owned(),
        attributes: None,
        post_id,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_posts_serialize_without_attributes() {
        let json = serde_json::to_string(&seed()[1]).unwrap();
        assert_eq!(json, r#"{"title":"Lunch @ Taj","content":"North-Indian Thali","post_id":2}"#);
    }

    #[test]
    fn created_posts_serialize_attributes_inline() {
        let post = Post::from_new(
            NewPost {
                title: "t".into(),
                content: "c".into(),
                attributes: Some(Attributes::default()),
            },
            7,
        );
        let json = serde_json::to_string(&post).unwrap();
        assert_eq!(json, r#"{"title":"t","content":"c","rating":null,"published":true,"post_id":7}"#);
    }

    #[test]
    fn seed_ids_are_sequential() {
        let ids: Vec<u32> = seed().iter().map(|p| p.post_id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
