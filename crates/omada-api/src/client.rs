// Omada HTTP client
//
// Wraps `reqwest::Client` with controller URL construction, token/timestamp
// attachment and envelope unwrapping. Session handling, site resolution,
// pagination and the endpoint wrappers are inherent methods in sibling
// modules so this one stays focused on request mechanics.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::Error;
use crate::models::{CurrentUser, LoginResult};

/// Anti-forgery header echoed on every authenticated request.
pub const CSRF_HEADER: &str = "Csrf-Token";

/// Async client for an Omada controller's `/api/v2` surface.
///
/// One instance owns one session. `login`/`logout` take `&mut self`;
/// every read takes `&self`, so the borrow checker keeps session state
/// single-writer without any locking.
pub struct OmadaClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    /// `Some` while logged in.
    pub(crate) login: Option<LoginResult>,
    /// Memoized `users/current`, reset on logout.
    pub(crate) user_cache: OnceCell<CurrentUser>,
}

impl OmadaClient {
    /// Create a logged-out client.
    ///
    /// A cookie jar is always attached: the controller pairs the token
    /// with a session cookie.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = Self::build_http(&config)?;
        Ok(Self {
            http,
            config,
            login: None,
            user_cache: OnceCell::new(),
        })
    }

    pub(crate) fn build_http(config: &ClientConfig) -> Result<reqwest::Client, Error> {
        config.transport.clone().with_cookie_jar().build_client()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The configured default site display name.
    pub fn default_site(&self) -> &str {
        &self.config.site
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    pub fn login_result(&self) -> Option<&LoginResult> {
        self.login.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.login.as_ref().map(|login| login.token.as_str())
    }

    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.config.api_url(path)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let builder = self.authorized(Method::GET, path, params)?;
        Self::execute(builder).await
    }

    /// Send an authenticated PATCH with a JSON body and unwrap the envelope.
    pub async fn patch<T, B>(&self, path: &str, params: &[(&str, String)], body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::PATCH, path, params)?.json(body);
        Self::execute(builder).await
    }

    /// Send an authenticated POST with a JSON body and unwrap the envelope.
    pub async fn post<T, B>(&self, path: &str, params: &[(&str, String)], body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::POST, path, params)?.json(body);
        Self::execute(builder).await
    }

    /// Build a request carrying the session token three ways: the
    /// `token` query parameter, the `Csrf-Token` header, and the cookie
    /// jar. Fails before touching the network when logged out.
    pub(crate) fn authorized(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<RequestBuilder, Error> {
        let token = self.token().ok_or(Error::NotAuthenticated)?;
        let url = self.api_url(path)?;
        debug!("{method} {url}");

        Ok(self
            .http
            .request(method, url)
            .header(CSRF_HEADER, token)
            .query(params)
            .query(&[("_", timestamp_ms().to_string()), ("token", token.to_owned())]))
    }

    pub(crate) async fn execute<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, Error> {
        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    /// Map non-2xx statuses to `HttpStatus`, everything else through the
    /// envelope decoder.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        envelope::decode_result(&body)
    }
}

/// Milliseconds since the Unix epoch, used as the `_` cache-buster.
fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
