// ── Runtime connection configuration ──
//
// Describes *where* the controller lives and *how* to reach it. Built once
// by the caller and handed to `OmadaClient::new`; never mutated afterwards.

use url::Url;

use crate::error::Error;
use crate::transport::{TlsMode, TransportConfig};

/// Display name of the site Omada creates on a fresh controller.
pub const DEFAULT_SITE: &str = "Default";

/// Immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Controller or cloud URL (e.g. `https://euw1-omada-controller.tplinkcloud.com`).
    pub base_url: Url,
    /// The omadac id. Must be known up front; it is not discovered.
    pub controller_id: String,
    /// Site display name used when a call does not name one.
    pub site: String,
    pub transport: TransportConfig,
}

impl ClientConfig {
    pub fn new(base_url: Url, controller_id: impl Into<String>) -> Self {
        Self {
            base_url,
            controller_id: controller_id.into(),
            site: DEFAULT_SITE.into(),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Shorthand for toggling certificate verification.
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        if verify {
            if self.transport.tls == TlsMode::DangerAcceptInvalid {
                self.transport.tls = TlsMode::System;
            }
        } else {
            self.transport.tls = TlsMode::DangerAcceptInvalid;
        }
        self
    }

    pub fn tls_verify(&self) -> bool {
        self.transport.verifies_tls()
    }

    /// Build `{base_url}/{controller_id}/api/v2/{path}`.
    ///
    /// A leading `/` on `path` is ignored, so `"/sites"` and `"sites"`
    /// address the same endpoint.
    pub fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let controller = self.controller_id.trim_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{controller}/api/v2/{path}"))?)
    }
}
