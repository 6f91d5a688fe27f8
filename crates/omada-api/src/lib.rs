// omada-api: Async Rust client for the Omada controller REST API
//
// Session lifecycle, envelope decoding, site-name resolution and lazy
// pagination over `{base}/{omadacId}/api/v2/`.

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod pagination;
pub mod sites;
pub mod transport;

pub use client::{CSRF_HEADER, OmadaClient};
pub use config::{ClientConfig, DEFAULT_SITE};
pub use endpoints::{EventFilter, LevelFilter, ModuleFilter, RecordStream};
pub use envelope::{decode_envelope, decode_result};
pub use error::{ApiError, Error, ErrorKind, UNKNOWN_ERROR_CODE, UNKNOWN_SITE_CODE};
pub use models::{CurrentUser, LoginResult, LoginStatus, Page, PrivilegeSite, SiteGroup, UserPrivilege};
pub use pagination::DEFAULT_PAGE_SIZE;
pub use transport::{TlsMode, TransportConfig};
