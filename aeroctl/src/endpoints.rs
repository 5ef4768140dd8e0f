//! Method and path of every console endpoint.
//!
//! The router mounts handlers on these paths and the client builds its requests from them, so
//! the two sides can't drift apart. Path parameters use axum's `{name}` syntax and are filled
//! positionally by [`Endpoint::path_with`].

use axum::http::Method;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path {path} expects {expected} parameter(s), got {given}")]
pub struct PathParamsError {
    pub path: &'static str,
    pub expected: usize,
    pub given: usize,
}

impl Endpoint {
    const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// Number of `{...}` placeholders in the path template.
    pub fn param_count(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Substitute `params` into the path template, left to right.
    pub fn path_with(&self, params: &[&dyn std::fmt::Display]) -> Result<String, PathParamsError> {
        let mismatch = || PathParamsError {
            path: self.path,
            expected: self.param_count(),
            given: params.len(),
        };
        if params.len() != self.param_count() {
            return Err(mismatch());
        }

        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        for param in params {
            let (start, end) = match (rest.find('{'), rest.find('}')) {
                (Some(start), Some(end)) if start < end => (start, end),
                _ => return Err(mismatch()),
            };
            path.push_str(&rest[..start]);
            path.push_str(&param.to_string());
            rest = &rest[end + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

pub const REALNAME_LIST: Endpoint = Endpoint::new(Method::POST, "/certification/realname/list");
pub const REALNAME_DETAIL: Endpoint = Endpoint::new(Method::GET, "/certification/realname/detail/{id}");
pub const REALNAME_AUDIT: Endpoint = Endpoint::new(Method::POST, "/certification/realname/audit");
pub const NAVIGATION_ROUTES: Endpoint = Endpoint::new(Method::GET, "/navigation/routes");
