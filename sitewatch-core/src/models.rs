//! Data exchanged with the monitoring backend.

use serde::{Deserialize, Serialize};
use sitewatch_utils::pagination::PaginationState;

/// A watched site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub url: String,
    /// Whether the owner is notified when the site goes down.
    #[serde(default)]
    pub alerts: bool,
    /// Most recent check result.
    #[serde(default)]
    pub last_status: Option<Status>,
}

/// Form model for creating or editing a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDraft {
    pub name: String,
    pub url: String,
    pub alerts: bool,
}

impl From<&Site> for SiteDraft {
    fn from(site: &Site) -> Self {
        Self {
            name: site.name.clone(),
            url: site.url.clone(),
            alerts: site.alerts,
        }
    }
}

/// One HTTP check of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Check time, unix milliseconds.
    pub timestamp: u64,
    /// HTTP status code; absent when the request never completed.
    #[serde(default)]
    pub code: Option<u16>,
    /// Response time in milliseconds.
    pub time_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl Status {
    /// Reachable and answering with a non-error status code.
    pub fn is_up(&self) -> bool {
        self.error.is_none() && self.code.is_some_and(|code| (200..400).contains(&code))
    }
}

/// One response-time sample for the timeline graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub timestamp: u64,
    pub time_ms: u64,
}

/// A page of a backend list with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
}

/// The signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub login: String,
    pub email: String,
    /// Global switch for down-site notifications.
    #[serde(default)]
    pub alerts: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailForm {
    pub email: String,
    /// Set once a verification mail went out for this address.
    #[serde(default)]
    pub sent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordForm {
    pub old: String,
    pub new: String,
    pub repeat: String,
    #[serde(default)]
    pub sent: bool,
}
