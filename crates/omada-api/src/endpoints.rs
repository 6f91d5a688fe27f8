// Endpoint wrappers
//
// Thin URL templates over `get` / `patch` / `paginated_get`. Site-scoped
// calls take an optional display name and resolve it to a key first, so a
// bad site name fails before the stream (or request) is created.

use futures_util::stream::BoxStream;
use serde_json::Value;
use strum::{Display, EnumString};
use tracing::debug;
use url::Url;

use crate::client::OmadaClient;
use crate::error::Error;
use crate::models::SiteGroup;

/// Severity filter for events and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LevelFilter {
    Error,
    Warning,
    Information,
}

/// Source-module filter for events and alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModuleFilter {
    Operation,
    System,
    Device,
    Client,
}

/// Query filters shared by the event and alert listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Epoch milliseconds, inclusive.
    pub time_start: Option<i64>,
    /// Epoch milliseconds, inclusive.
    pub time_end: Option<i64>,
    pub level: Option<LevelFilter>,
    pub module: Option<ModuleFilter>,
    pub search_key: Option<String>,
}

impl EventFilter {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.time_start {
            params.push(("filters.timeStart", start.to_string()));
        }
        if let Some(end) = self.time_end {
            params.push(("filters.timeEnd", end.to_string()));
        }
        if let Some(level) = self.level {
            params.push(("filters.level", level.to_string()));
        }
        if let Some(module) = self.module {
            params.push(("filters.module", module.to_string()));
        }
        if let Some(ref key) = self.search_key {
            params.push(("searchKey", key.clone()));
        }
        params
    }
}

pub type RecordStream<'a> = BoxStream<'a, Result<Value, Error>>;

impl OmadaClient {
    // ── Controller-level ─────────────────────────────────────────────

    /// All sites on the controller. `GET sites` (paginated).
    pub fn list_sites(&self) -> RecordStream<'_> {
        self.paginated_get("sites", &[])
    }

    /// Deployment scenario names. `GET scenarios`
    pub async fn get_scenarios(&self) -> Result<Vec<String>, Error> {
        self.get("scenarios", &[]).await
    }

    // ── Site-scoped listings ─────────────────────────────────────────

    /// Active clients. `GET sites/{key}/clients?filters.active=true` (paginated).
    pub async fn list_site_clients(&self, site: Option<&str>) -> Result<RecordStream<'_>, Error> {
        let key = self.resolve_site(site).await?;
        Ok(self.paginated_get(
            format!("sites/{key}/clients"),
            &[("filters.active", "true".into())],
        ))
    }

    /// Site events. `GET sites/{key}/events` (paginated).
    pub async fn list_site_events(
        &self,
        site: Option<&str>,
        filter: &EventFilter,
    ) -> Result<RecordStream<'_>, Error> {
        let key = self.resolve_site(site).await?;
        Ok(self.paginated_get(format!("sites/{key}/events"), &filter.to_params()))
    }

    /// Site alerts. `GET sites/{key}/alerts` (paginated).
    pub async fn list_site_alerts(
        &self,
        site: Option<&str>,
        archived: bool,
        filter: &EventFilter,
    ) -> Result<RecordStream<'_>, Error> {
        let key = self.resolve_site(site).await?;
        let mut params = vec![("filters.archived", archived.to_string())];
        params.extend(filter.to_params());
        Ok(self.paginated_get(format!("sites/{key}/alerts"), &params))
    }

    /// Adopted devices. `GET sites/{key}/devices`
    pub async fn get_site_devices(&self, site: Option<&str>) -> Result<Vec<Value>, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/devices"), &[]).await
    }

    // ── Site settings ────────────────────────────────────────────────

    /// The full settings document. `GET sites/{key}/setting`
    ///
    /// Returned as an open JSON document; the schema is not modeled.
    pub async fn get_site_settings(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/setting"), &[]).await
    }

    /// Push back a (partial) settings document. `PATCH sites/{key}/setting`
    pub async fn set_site_settings(
        &self,
        settings: &Value,
        site: Option<&str>,
    ) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        debug!(site = %key, "patching site settings");
        self.patch(&format!("sites/{key}/setting"), &[], settings).await
    }

    /// `GET sites/{key}/notification`
    pub async fn get_site_notifications(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/notification"), &[]).await
    }

    /// Group profiles, optionally of a single type.
    /// `GET sites/{key}/setting/profiles/groups[/{type}]`
    pub async fn get_site_groups(
        &self,
        site: Option<&str>,
        group_type: Option<&str>,
    ) -> Result<Vec<SiteGroup>, Error> {
        let key = self.resolve_site(site).await?;
        let path = match group_type.filter(|t| !t.is_empty()) {
            Some(t) => format!("sites/{key}/setting/profiles/groups/{t}"),
            None => format!("sites/{key}/setting/profiles/groups"),
        };
        self.get(&path, &[]).await
    }

    /// `GET sites/{key}/setting/profiles/timeranges`
    pub async fn get_time_ranges(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/setting/profiles/timeranges"), &[])
            .await
    }

    /// `GET sites/{key}/setting/radiusProfiles`
    pub async fn get_radius_profiles(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/setting/radiusProfiles"), &[])
            .await
    }

    /// The portal "SSID & Network" candidates.
    /// `GET sites/{key}/setting/portal/candidates`
    pub async fn get_portal_candidates(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/setting/portal/candidates"), &[])
            .await
    }

    /// WLAN groups. `GET sites/{key}/setting/wlans`
    pub async fn get_wireless_groups(&self, site: Option<&str>) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        self.get(&format!("sites/{key}/setting/wlans"), &[]).await
    }

    /// SSIDs of one WLAN group. `GET sites/{key}/setting/wlans/{group}/ssids`
    pub async fn get_wireless_networks(
        &self,
        group: &str,
        site: Option<&str>,
    ) -> Result<Value, Error> {
        let key = self.resolve_site(site).await?;
        let group = path_segment(group)?;
        self.get(&format!("sites/{key}/setting/wlans/{group}/ssids"), &[])
            .await
    }
}

/// Percent-encode a caller-supplied id for use as one path segment.
fn path_segment(raw: &str) -> Result<String, Error> {
    let mut url = Url::parse("http://localhost/")?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(raw);
    }
    Ok(url.path().trim_start_matches('/').to_owned())
}
