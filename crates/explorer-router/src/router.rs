//! Main router implementation.

use std::future::Future;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::middleware::{BoxFuture, Middleware, MiddlewareResult};
use crate::path::PathPattern;
use crate::request::{Method, PathParams, Request};
use crate::response::Response;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// A single route definition.
#[derive(Clone)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: PathPattern,
    /// Request handler.
    pub handler: Handler,
}

impl Route {
    /// Creates a new route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `pattern` does not parse.
    pub fn new<F, Fut>(method: Method, pattern: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Ok(Self {
            method,
            pattern: PathPattern::new(pattern)?,
            handler: Arc::new(move |req| Box::pin(handler(req))),
        })
    }
}

/// The main router for handling HTTP requests.
///
/// Routes are tried in registration order. A path that matches some route
/// under a different method yields 405 instead of 404.
#[derive(Default)]
pub struct Router {
    /// Registered routes.
    routes: Vec<Route>,
    /// Global middleware.
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a GET route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `path` does not parse.
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `path` does not parse.
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `path` does not parse.
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Put, path, handler)
    }

    /// Adds a DELETE route.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `path` does not parse.
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Delete, path, handler)
    }

    /// Adds a route with any method.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when `path` does not parse.
    pub fn route<F, Fut>(mut self, method: Method, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.routes.push(Route::new(method, path, handler)?);
        Ok(self)
    }

    /// Adds global middleware.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(mw));
        self
    }

    /// Handles an incoming request.
    pub fn handle(&self, mut request: Request) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            // Run before middleware
            for mw in &self.middleware {
                match mw.before(&request).await {
                    MiddlewareResult::Continue(req) => request = req,
                    MiddlewareResult::Response(res) => {
                        // Run after middleware even on early return
                        let mut response = res;
                        for mw in self.middleware.iter().rev() {
                            response = mw.after(response).await;
                        }
                        return response;
                    }
                }
            }

            // Find matching route
            let mut response = match self.find_route(&request) {
                Ok((route, params)) => {
                    let handler = Arc::clone(&route.handler);
                    request.params = params;
                    handler(request).await
                }
                Err(RouterError::MethodNotAllowed { .. }) => Response::method_not_allowed(),
                Err(_) => Response::not_found(),
            };

            // Run after middleware
            for mw in self.middleware.iter().rev() {
                response = mw.after(response).await;
            }

            response
        })
    }

    /// Finds a matching route for the request.
    fn find_route(&self, request: &Request) -> Result<(&Route, PathParams)> {
        let mut method_matched = false;

        for route in &self.routes {
            if let Some(params) = route.pattern.match_path(&request.path) {
                method_matched = true;
                if route.method == request.method {
                    return Ok((route, params));
                }
            }
        }

        if method_matched {
            Err(RouterError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        } else {
            Err(RouterError::NotFound {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn hello_handler(_req: Request) -> Response {
        Response::text("Hello, World!")
    }

    async fn record_handler(req: Request) -> Response {
        let table = req.params.get("table").unwrap_or("unknown");
        let id = req.params.get("id").unwrap_or("none");
        Response::text(format!("{table}/{id}"))
    }

    #[tokio::test]
    async fn test_basic_routing() {
        let router = Router::new()
            .get("/", hello_handler)
            .unwrap()
            .get("/{table}/{id}", record_handler)
            .unwrap();

        let res = router.handle(Request::get("/")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("Hello, World!".to_string()));
    }

    #[tokio::test]
    async fn test_path_params() {
        let router = Router::new().get("/{table}/{id}", record_handler).unwrap();

        let res = router.handle(Request::get("/items/123")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("items/123".to_string()));
    }

    #[tokio::test]
    async fn test_not_found() {
        let router = Router::new().get("/", hello_handler).unwrap();

        let res = router.handle(Request::get("/a/b/c")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let router = Router::new()
            .get("/{table}", record_handler)
            .unwrap()
            .put("/{table}", record_handler)
            .unwrap();

        let res = router.handle(Request::delete("/items")).await;
        assert_eq!(res.status, 405);
    }

    #[tokio::test]
    async fn test_same_path_dispatches_by_method() {
        let router = Router::new()
            .get("/{table}", |_req| async { Response::text("list") })
            .unwrap()
            .put("/{table}", |_req| async { Response::text("create") })
            .unwrap();

        let res = router.handle(Request::put("/items")).await;
        assert_eq!(res.body_string(), Some("create".to_string()));
    }

    #[test]
    fn test_invalid_route_pattern() {
        assert!(Router::new().get("/{}", hello_handler).is_err());
    }
}
