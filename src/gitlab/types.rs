//! GitLab API data types.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Identifier naming a group: numeric id or full slash-delimited path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupRef {
    Id(u64),
    Path(String),
}

impl GroupRef {
    /// The identifier as a single URL path segment (paths are encoded by
    /// the URL builder, so `team/sub` stays one segment).
    pub fn as_segment(&self) -> String {
        match self {
            GroupRef::Id(id) => id.to_string(),
            GroupRef::Path(path) => path.clone(),
        }
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Id(id) => write!(f, "{id}"),
            GroupRef::Path(path) => f.write_str(path),
        }
    }
}

impl FromStr for GroupRef {
    type Err = String;

    /// All-digit input is an id; anything else is a path with surrounding
    /// slashes removed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(format!("invalid group identifier '{s}'"));
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = trimmed.parse::<u64>() {
                return Ok(GroupRef::Id(id));
            }
        }
        Ok(GroupRef::Path(trimmed.to_string()))
    }
}

impl From<u64> for GroupRef {
    fn from(id: u64) -> Self {
        GroupRef::Id(id)
    }
}

/// GitLab project - the fields needed to place and fetch a working copy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: u64,
    /// Project path (slug), used as the local directory name.
    #[serde(rename = "path")]
    pub slug: String,
    /// Full path including namespace (e.g., "group/subgroup/project").
    #[serde(default)]
    pub path_with_namespace: String,
    /// Namespace information.
    #[serde(default)]
    pub namespace: Option<Namespace>,
    /// HTTP clone URL.
    #[serde(rename = "http_url_to_repo", default)]
    pub http_url: String,
    /// SSH clone URL.
    #[serde(rename = "ssh_url_to_repo", default)]
    pub ssh_url: String,
}

/// Namespace (group or user) a project lives in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Namespace {
    /// Full path (e.g., "group/subgroup").
    #[serde(default)]
    pub full_path: Option<String>,
}

impl Project {
    /// The namespace full path reported by the API, if present and non-empty.
    pub fn namespace_full_path(&self) -> Option<&str> {
        self.namespace
            .as_ref()
            .and_then(|ns| ns.full_path.as_deref())
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }

    /// Name used in progress output and diagnostics.
    pub fn display_name(&self) -> &str {
        if self.path_with_namespace.is_empty() {
            &self.slug
        } else {
            &self.path_with_namespace
        }
    }
}

/// Direct child group of a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Subgroup {
    /// Group ID.
    pub id: u64,
    /// Full path (e.g., "parent/child").
    #[serde(default)]
    pub full_path: Option<String>,
}

impl Subgroup {
    pub fn group_ref(&self) -> GroupRef {
        GroupRef::Id(self.id)
    }

    /// The group by full path, when the API reported one.
    pub fn path_ref(&self) -> Option<GroupRef> {
        self.full_path
            .as_deref()
            .map(|p| p.trim().trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| GroupRef::Path(p.to_string()))
    }
}
