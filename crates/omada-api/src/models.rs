// Response models
//
// Omada responses routinely carry more keys than we model. Required fields
// are typed; everything else lands in `extra` so nothing is dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of `POST /login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub omadac_id: String,
    pub role_type: i64,
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A site entry in the current user's privilege list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivilegeSite {
    pub name: String,
    pub category: String,
    /// Internal site key used in `sites/{key}/...` paths.
    pub key: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPrivilege {
    /// `true` when the user may operate on every site.
    pub all: bool,
    pub sites: Vec<PrivilegeSite>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `GET users/current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
    pub privilege: UserPrivilege,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    /// Key of the privileged site with exactly this display name.
    pub fn site_key(&self, name: &str) -> Option<&str> {
        self.privilege
            .sites
            .iter()
            .find(|site| site.name == name)
            .map(|site| site.key.as_str())
    }
}

/// Result of `GET loginStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginStatus {
    pub login: bool,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub current_page: Option<u64>,
    #[serde(default)]
    pub current_size: Option<u64>,
}

/// A group profile from `setting/profiles/groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteGroup {
    pub count: i64,
    pub group_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: i64,
    #[serde(default)]
    pub build_in: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
