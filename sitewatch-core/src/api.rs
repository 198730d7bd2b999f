//! Interface to the monitoring backend consumed by the views.

use std::{collections::BTreeMap, fmt, future::Future};

use serde::{Deserialize, Serialize};

use crate::models::{
    EmailForm, Paged, PasswordForm, Session, Site, SiteDraft, Status, TimelinePoint,
};

/// Field name -> messages, as returned by form validation.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Error body returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: FieldErrors,
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        Self {
            status: 404,
            message: Some(format!("{what} not found")),
            errors: FieldErrors::new(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: 403,
            message: Some(message.into()),
            errors: FieldErrors::new(),
        }
    }

    /// A 400 carrying a single field error.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_owned(), vec![message.into()]);
        Self {
            status: 400,
            message: None,
            errors,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "api error {}: {message}", self.status),
            None if !self.errors.is_empty() => {
                let fields = self.errors.keys().map(String::as_str).collect::<Vec<_>>();
                write!(f, "api error {}: invalid {}", self.status, fields.join(", "))
            }
            None => write!(f, "api error {}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

/// Calls the dashboard makes against `/api/auth`, `/api/sites` and `/api/user`.
pub trait SiteApi: Send + Sync + 'static {
    /// Current session, `None` when nobody is signed in.
    fn session(&self) -> impl Future<Output = ApiResult<Option<Session>>> + Send;

    fn get_sites(&self) -> impl Future<Output = ApiResult<Vec<Site>>> + Send;

    fn create_site(&self, draft: SiteDraft) -> impl Future<Output = ApiResult<Site>> + Send;

    fn get_site(&self, id: u64) -> impl Future<Output = ApiResult<Site>> + Send;

    fn edit_site(&self, id: u64, draft: SiteDraft)
    -> impl Future<Output = ApiResult<Site>> + Send;

    fn remove_site(&self, id: u64) -> impl Future<Output = ApiResult<()>> + Send;

    /// Check history, newest first.
    fn get_statuses(
        &self,
        id: u64,
        page: usize,
        limit: usize,
    ) -> impl Future<Output = ApiResult<Paged<Status>>> + Send;

    /// Response-time samples, newest first.
    fn get_timeline(
        &self,
        id: u64,
        page: usize,
        limit: usize,
    ) -> impl Future<Output = ApiResult<Paged<TimelinePoint>>> + Send;

    fn get_email(&self) -> impl Future<Output = ApiResult<EmailForm>> + Send;

    fn resend_email(&self) -> impl Future<Output = ApiResult<()>> + Send;

    fn change_email(&self, form: EmailForm) -> impl Future<Output = ApiResult<EmailForm>> + Send;

    fn change_password(&self, form: PasswordForm) -> impl Future<Output = ApiResult<()>> + Send;

    fn change_alerts(&self, session: Session) -> impl Future<Output = ApiResult<Session>> + Send;
}
