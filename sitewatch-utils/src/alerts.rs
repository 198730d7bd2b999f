//! Transient user-facing alerts with timed expiry.

use std::{collections::VecDeque, fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// Default lifetime of an alert on screen.
pub const DEFAULT_ALERT_TTL: Duration = Duration::from_secs(5);

/// Visual status of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Success,
    Info,
    Warning,
    Danger,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub status: AlertStatus,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: AlertStatus::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            status: AlertStatus::Danger,
            message: message.into(),
        }
    }
}

/// Queue of visible alerts shared by every view.
///
/// Cheap to clone; clones share the same queue.
#[derive(Debug, Clone)]
pub struct AlertBoard {
    alerts: Arc<Mutex<VecDeque<Alert>>>,
    ttl: Duration,
}

impl AlertBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            alerts: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
        }
    }

    /// Show an alert and schedule removal of the oldest one after the TTL.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn push(&self, alert: Alert) {
        debug!(status = %alert.status, message = %alert.message, "alert raised");
        self.alerts.lock().await.push_back(alert);

        let alerts = Arc::clone(&self.alerts);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            alerts.lock().await.pop_front();
        });
    }

    /// Visible alerts, oldest first.
    pub async fn snapshot(&self) -> Vec<Alert> {
        self.alerts.lock().await.iter().cloned().collect()
    }
}

impl Default for AlertBoard {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_TTL)
    }
}
