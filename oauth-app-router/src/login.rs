//! Web flow login redirect

use crate::app::OAuthApp;
use crate::extract::LoginParameters;
use rand::Rng;
use url::Url;

/// GitHub's web flow authorization endpoint
pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// Number of random bytes behind a generated `state` value
const STATE_BYTES: usize = 20;

/// Source of the `state` value for login redirects that do not bring one.
pub trait StateGenerator: Send + Sync {
    /// A fresh, unguessable value made of word characters only
    fn generate(&self) -> String;
}

/// Hex-encoded random bytes from the thread-local CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStateGenerator;

impl StateGenerator for RandomStateGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..STATE_BYTES).map(|_| rng.gen()).collect();
        bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl<F> StateGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Build the authorize URL the login route redirects to.
///
/// `scope` is only added when the request or the app's defaults name scopes.
pub fn authorization_url(
    app: &dyn OAuthApp,
    parameters: &LoginParameters,
    state_generator: &dyn StateGenerator,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(AUTHORIZE_URL)?;
    let state = parameters
        .state
        .clone()
        .unwrap_or_else(|| state_generator.generate());

    let scope = match &parameters.scopes {
        Some(scopes) => Some(scopes.clone()),
        None if !app.default_scopes().is_empty() => Some(app.default_scopes().join(",")),
        None => None,
    };

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", app.client_id());
        query.append_pair("state", &state);
        if let Some(scope) = &scope {
            query.append_pair("scope", scope);
        }
        if let Some(redirect_url) = &parameters.redirect_url {
            query.append_pair("redirect_uri", redirect_url);
        }
        if let Some(allow_signup) = parameters.allow_signup {
            query.append_pair("allow_signup", if allow_signup { "true" } else { "false" });
        }
    }

    Ok(url)
}
