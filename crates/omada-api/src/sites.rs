// Site resolution
//
// Site-scoped endpoints address sites by an internal key, while humans
// use display names. The mapping comes from the current user's privilege
// list, fetched once per session.

use tracing::debug;

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::CurrentUser;

impl OmadaClient {
    /// The signed-in user, fetched on first access and cached until logout.
    pub async fn current_user(&self) -> Result<&CurrentUser, Error> {
        self.user_cache
            .get_or_try_init(|| self.fetch_current_user())
            .await
    }

    /// Fetch `users/current` unconditionally. Does not touch the cache.
    pub async fn fetch_current_user(&self) -> Result<CurrentUser, Error> {
        debug!("fetching current user");
        self.get("users/current", &[]).await
    }

    /// Map a site display name to its key.
    ///
    /// `None` resolves the configured default site. Matching is exact and
    /// case-sensitive.
    pub async fn resolve_site(&self, name: Option<&str>) -> Result<String, Error> {
        let name = name.unwrap_or(self.config.site.as_str());
        let user = self.current_user().await?;

        match user.site_key(name) {
            Some(key) => {
                debug!(site = name, key, "resolved site");
                Ok(key.to_owned())
            }
            None => Err(Error::UnknownSite {
                name: name.to_owned(),
            }),
        }
    }
}
