//! Fixed route table for the OAuth App endpoints

use std::fmt;

/// Path prefix used when the caller does not configure one.
pub const DEFAULT_PATH_PREFIX: &str = "/api/github/oauth";

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `GET login`
    GetLogin,
    /// `GET callback`
    GetCallback,
    /// `OPTIONS token` (CORS pre-flight)
    Preflight,
    /// `POST token`
    CreateToken,
    /// `GET token`
    CheckToken,
    /// `POST token/scoped`
    ScopeToken,
    /// `PATCH refresh-token`
    RefreshToken,
    /// `PATCH token`
    ResetToken,
    /// `DELETE token`
    DeleteToken,
    /// `DELETE grant`
    DeleteGrant,
}

impl Route {
    /// Every route, in table order
    pub const ALL: [Route; 10] = [
        Route::GetLogin,
        Route::GetCallback,
        Route::Preflight,
        Route::CreateToken,
        Route::CheckToken,
        Route::ScopeToken,
        Route::RefreshToken,
        Route::ResetToken,
        Route::DeleteToken,
        Route::DeleteGrant,
    ];

    /// HTTP method of the route
    pub fn method(&self) -> &'static str {
        match self {
            Route::GetLogin | Route::GetCallback | Route::CheckToken => "GET",
            Route::Preflight => "OPTIONS",
            Route::CreateToken | Route::ScopeToken => "POST",
            Route::RefreshToken | Route::ResetToken => "PATCH",
            Route::DeleteToken | Route::DeleteGrant => "DELETE",
        }
    }

    /// Path below the prefix, without a leading slash
    pub fn path(&self) -> &'static str {
        match self {
            Route::GetLogin => "login",
            Route::GetCallback => "callback",
            Route::Preflight
            | Route::CreateToken
            | Route::CheckToken
            | Route::ResetToken
            | Route::DeleteToken => "token",
            Route::ScopeToken => "token/scoped",
            Route::RefreshToken => "refresh-token",
            Route::DeleteGrant => "grant",
        }
    }

    /// Whether the route needs an `Authorization` header
    pub fn requires_authorization(&self) -> bool {
        !matches!(
            self,
            Route::GetLogin | Route::GetCallback | Route::Preflight | Route::CreateToken
        )
    }

    /// Whether the route reads a JSON request body
    pub fn reads_json_body(&self) -> bool {
        matches!(self.method(), "POST" | "PATCH")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Find the route for a method and URL path.
///
/// `path_prefix` must be followed by `/` in `pathname`; the remainder is
/// compared literally, so trailing slashes and case variations do not match.
pub fn match_route(method: &str, pathname: &str, path_prefix: &str) -> Option<Route> {
    let rest = pathname
        .strip_prefix(path_prefix)
        .and_then(|rest| rest.strip_prefix('/'))?;

    Route::ALL
        .into_iter()
        .find(|route| route.method() == method && route.path() == rest)
}
