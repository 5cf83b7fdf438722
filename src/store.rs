//! The in-memory post store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;

use crate::post::{self, NewPost, Post};

/// Smallest and largest id handed to a created post. Ids are drawn at
/// random and are not checked against existing posts.
pub const MIN_POST_ID: u32 = 1;
pub const MAX_POST_ID: u32 = 1_000_000;

/// An ordered, process-lifetime list of posts.
///
/// Insertion order is listing order. Shared between requests behind an
/// `Arc`; every operation takes the lock briefly and never across an await.
#[derive(Debug)]
pub struct PostStore {
    posts: Mutex<Vec<Post>>,
}

impl PostStore {
    /// A store holding the three seed posts.
    pub fn seeded() -> Self {
        Self::with_posts(post::seed())
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts: Mutex::new(posts) }
    }

    /// Snapshot of every post, in insertion order.
    pub fn list(&self) -> Vec<Post> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Gives `new` a random id and appends it. Returns the stored post.
    pub fn append(&self, new: NewPost) -> Post {
        let post_id = rand::thread_rng().gen_range(MIN_POST_ID..=MAX_POST_ID);
        let post = Post::from_new(new, post_id);
        self.lock().push(post.clone());
        post
    }

    // A panic while holding the lock cannot leave a half-written Vec behind.
    fn lock(&self) -> MutexGuard<'_, Vec<Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PostStore {
    fn default() -> Self { Self::seeded() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::Attributes;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_owned(),
            content: "body".to_owned(),
            attributes: Some(Attributes::default()),
        }
    }

    #[test]
    fn starts_with_the_seed_posts() {
        let store = PostStore::seeded();
        assert_eq!(store.list(), post::seed());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn append_keeps_insertion_order() {
        let store = PostStore::seeded();
        for title in ["a", "b", "c"] {
            store.append(new_post(title));
        }
        let titles: Vec<String> = store.list().into_iter().map(|p| p.title).collect();
        assert_eq!(&titles[3..], ["a", "b", "c"]);
    }

    #[test]
    fn appended_ids_stay_in_range() {
        let store = PostStore::with_posts(Vec::new());
        assert!(store.is_empty());
        for _ in 0..500 {
            let post = store.append(new_post("x"));
            assert!((MIN_POST_ID..=MAX_POST_ID).contains(&post.post_id));
        }
        assert_eq!(store.len(), 500);
    }
}
