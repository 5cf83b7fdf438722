//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Registering the same
//! method + path twice is an error, reported when the router is built.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use serde_json::json;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::{Json, Response};
use crate::status::Status;

/// The application router.
///
/// Holds one radix tree per HTTP method plus the shared state `S` handed to
/// every handler. Build it once at startup; pass it to
/// [`Server::serve`](crate::Server::serve). Each registration returns
/// `Result<Self, Error>` so registrations chain with `?`.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    ///
    /// ```rust
    /// # use postboard::{Method, Request, Response, Router};
    /// # async fn list(_: (), _: Request) -> Response { Response::text("") }
    /// # async fn create(_: (), _: Request) -> Response { Response::text("") }
    /// let router = Router::new(())
    ///     .route(Method::Get,  "/posts", list)?
    ///     .route(Method::Post, "/posts", create)?;
    ///
    /// // The same method + path cannot be taken twice.
    /// assert!(router.route(Method::Post, "/posts", create).is_err());
    /// # Ok::<(), postboard::Error>(())
    /// ```
    pub fn route(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Result<Self, Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .map_err(|e| Error::Route {
                method,
                path: path.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(self)
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Result<Self, Error> {
        self.route(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Result<Self, Error> {
        self.route(Method::Post, path, handler)
    }

    /// Routes one request and produces one response.
    ///
    /// Unknown paths answer `404`; a path registered only under other
    /// methods answers `405` with an `allow` header. `HEAD` without its own
    /// route runs the `GET` handler and drops the body.
    pub async fn dispatch(&self, req: Request) -> Response {
        let head = req.method == Method::Head;
        let found = self.lookup(req.method, &req.path).or_else(|| {
            if head { self.lookup(Method::Get, &req.path) } else { None }
        });
        match found {
            Some((handler, params)) => {
                let mut response = handler.call(self.state.clone(), req.with_params(params)).await;
                if head {
                    response.body.clear();
                }
                response
            }
            None => self.unrouted(&req.path),
        }
    }

    /// Answer for a request no handler takes: `404` if nothing lives at
    /// `path`, `405` if other methods do. The server also uses this for
    /// method strings it does not recognise.
    pub(crate) fn unrouted(&self, path: &str) -> Response {
        let allowed = self.allowed_methods(path);
        if allowed.is_empty() {
            return not_found();
        }
        method_not_allowed(&allowed)
    }

    fn lookup(&self, method: Method, path: &str) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| *method)
            .collect();
        if allowed.contains(&Method::Get) && !allowed.contains(&Method::Head) {
            allowed.push(Method::Head);
        }
        allowed.sort();
        allowed
    }
}

fn not_found() -> Response {
    Json(json!({"detail": "Not Found"})).with_status(Status::NotFound)
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .json(br#"{"detail":"Method Not Allowed"}"#.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::IntoResponse;

    async fn echo_param(_state: (), req: Request) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    async fn hello(_state: (), _req: Request) -> &'static str {
        "hello"
    }

    async fn counted(state: Arc<std::sync::atomic::AtomicUsize>, _req: Request) -> Response {
        state.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Status::Ok.into_response()
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, bytes::Bytes::new())
    }

    #[tokio::test]
    async fn dispatches_by_method_and_path() {
        let router = Router::new(()).get("/", hello).unwrap();
        let res = router.dispatch(request(Method::Get, "/")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"hello");
    }

    #[tokio::test]
    async fn path_params_reach_the_handler() {
        let router = Router::new(()).get("/posts/{id}", echo_param).unwrap();
        let res = router.dispatch(request(Method::Get, "/posts/42")).await;
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn state_is_shared_between_requests() {
        let hits = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let router = Router::new(Arc::clone(&hits)).post("/hit", counted).unwrap();
        router.dispatch(request(Method::Post, "/hit")).await;
        router.dispatch(request(Method::Post, "/hit")).await;
        assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let err = Router::new(())
            .post("/posts", hello).unwrap()
            .post("/posts", hello)
            .err()
            .expect("second registration must fail");
        match err {
            Error::Route { method, path, .. } => {
                assert_eq!(method, Method::Post);
                assert_eq!(path, "/posts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_path_under_another_method_is_fine() {
        assert!(Router::new(()).get("/posts", hello).unwrap().post("/posts", hello).is_ok());
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let router = Router::new(()).get("/", hello).unwrap();
        let res = router.dispatch(request(Method::Get, "/nope")).await;
        assert_eq!(res.status_code(), Status::NotFound);
        assert_eq!(res.body(), br#"{"detail":"Not Found"}"#);
    }

    #[tokio::test]
    async fn wrong_method_is_405_with_allow() {
        let router = Router::new(())
            .get("/posts", hello).unwrap()
            .route(Method::Put, "/posts", hello).unwrap();
        let res = router.dispatch(request(Method::Delete, "/posts")).await;
        assert_eq!(res.status_code(), Status::MethodNotAllowed);
        assert_eq!(res.header("allow"), Some("GET, HEAD, PUT"));
    }

    #[tokio::test]
    async fn head_runs_the_get_handler_without_a_body() {
        let router = Router::new(()).get("/", hello).unwrap();
        let res = router.dispatch(request(Method::Head, "/")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn head_is_not_offered_without_a_get_route() {
        let router = Router::new(()).post("/posts", hello).unwrap();
        let res = router.dispatch(request(Method::Head, "/posts")).await;
        assert_eq!(res.status_code(), Status::MethodNotAllowed);
        assert_eq!(res.header("allow"), Some("POST"));
    }
}
