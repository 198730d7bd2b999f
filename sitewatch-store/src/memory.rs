use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use sitewatch_core::{
    ApiError, ApiResult, SiteApi,
    models::{EmailForm, Paged, PasswordForm, Session, Site, SiteDraft, Status, TimelinePoint},
};
use sitewatch_utils::pagination::{PaginationState, clamp_page, page_window, total_pages};

use crate::snapshot::{SiteRecord, Snapshot};

/// In-memory backend serving a [`Snapshot`].
///
/// Cheap to clone; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    state: Arc<RwLock<Snapshot>>,
}

impl MemoryApi {
    pub fn new(mut snapshot: Snapshot) -> Self {
        for record in &mut snapshot.sites {
            sort_newest_first(&mut record.statuses);
        }

        Self {
            state: Arc::new(RwLock::new(snapshot)),
        }
    }

    async fn require_session(&self) -> ApiResult<Session> {
        self.state
            .read()
            .await
            .session
            .clone()
            .ok_or_else(|| ApiError::forbidden("not signed in"))
    }

    async fn paged_history<T>(
        &self,
        id: u64,
        page: usize,
        limit: usize,
        map: impl Fn(&Status) -> T,
    ) -> ApiResult<Paged<T>> {
        let state = self.state.read().await;
        let record = find_record(&state, id)?;

        let max = total_pages(record.statuses.len(), limit);
        let page = clamp_page(page, max);
        let (start, end) = page_window(record.statuses.len(), limit, page);

        Ok(Paged {
            items: record.statuses[start..end].iter().map(map).collect(),
            pagination: PaginationState::new(page, max),
        })
    }
}

impl SiteApi for MemoryApi {
    async fn session(&self) -> ApiResult<Option<Session>> {
        Ok(self.state.read().await.session.clone())
    }

    async fn get_sites(&self) -> ApiResult<Vec<Site>> {
        self.require_session().await?;
        let state = self.state.read().await;
        Ok(state.sites.iter().map(|record| record.site.clone()).collect())
    }

    async fn create_site(&self, draft: SiteDraft) -> ApiResult<Site> {
        self.require_session().await?;
        validate_draft(&draft)?;

        let mut state = self.state.write().await;
        let id = state
            .sites
            .iter()
            .map(|record| record.site.id)
            .max()
            .unwrap_or(0)
            + 1;

        let site = Site {
            id,
            name: draft.name,
            url: draft.url,
            alerts: draft.alerts,
            last_status: None,
        };
        state.sites.push(SiteRecord {
            site: site.clone(),
            statuses: Vec::new(),
        });

        debug!(id, "site created");
        Ok(site)
    }

    async fn get_site(&self, id: u64) -> ApiResult<Site> {
        self.require_session().await?;
        let state = self.state.read().await;
        Ok(find_record(&state, id)?.site.clone())
    }

    async fn edit_site(&self, id: u64, draft: SiteDraft) -> ApiResult<Site> {
        self.require_session().await?;
        validate_draft(&draft)?;

        let mut state = self.state.write().await;
        let record = find_record_mut(&mut state, id)?;
        record.site.name = draft.name;
        record.site.url = draft.url;
        record.site.alerts = draft.alerts;
        Ok(record.site.clone())
    }

    async fn remove_site(&self, id: u64) -> ApiResult<()> {
        self.require_session().await?;
        let mut state = self.state.write().await;
        let before = state.sites.len();
        state.sites.retain(|record| record.site.id != id);

        if state.sites.len() == before {
            return Err(ApiError::not_found("site"));
        }

        debug!(id, "site removed");
        Ok(())
    }

    async fn get_statuses(&self, id: u64, page: usize, limit: usize) -> ApiResult<Paged<Status>> {
        self.require_session().await?;
        self.paged_history(id, page, limit, Status::clone).await
    }

    async fn get_timeline(
        &self,
        id: u64,
        page: usize,
        limit: usize,
    ) -> ApiResult<Paged<TimelinePoint>> {
        self.require_session().await?;
        self.paged_history(id, page, limit, |status| TimelinePoint {
            timestamp: status.timestamp,
            time_ms: status.time_ms,
        })
        .await
    }

    async fn get_email(&self) -> ApiResult<EmailForm> {
        let session = self.require_session().await?;
        Ok(EmailForm {
            email: session.email,
            sent: false,
        })
    }

    async fn resend_email(&self) -> ApiResult<()> {
        let session = self.require_session().await?;
        if !is_plausible_email(&session.email) {
            return Err(ApiError::field("email", "No email address to verify"));
        }
        Ok(())
    }

    async fn change_email(&self, form: EmailForm) -> ApiResult<EmailForm> {
        self.require_session().await?;

        let email = form.email.trim();
        if !is_plausible_email(email) {
            return Err(ApiError::field("email", "Invalid email address"));
        }

        let mut state = self.state.write().await;
        if let Some(session) = state.session.as_mut() {
            session.email = email.to_owned();
        }

        Ok(EmailForm {
            email: email.to_owned(),
            sent: false,
        })
    }

    async fn change_password(&self, form: PasswordForm) -> ApiResult<()> {
        self.require_session().await?;

        let mut state = self.state.write().await;
        if form.old != state.password {
            return Err(ApiError::forbidden("Wrong password"));
        }
        if form.new.is_empty() {
            return Err(ApiError::field("new", "Password required"));
        }
        if form.new != form.repeat {
            return Err(ApiError::field("repeat", "Passwords do not match"));
        }

        state.password = form.new;
        Ok(())
    }

    async fn change_alerts(&self, session: Session) -> ApiResult<Session> {
        self.require_session().await?;

        let mut state = self.state.write().await;
        let current = state
            .session
            .as_mut()
            .ok_or_else(|| ApiError::forbidden("not signed in"))?;
        current.alerts = session.alerts;
        Ok(current.clone())
    }
}

fn find_record(state: &Snapshot, id: u64) -> ApiResult<&SiteRecord> {
    state
        .sites
        .iter()
        .find(|record| record.site.id == id)
        .ok_or_else(|| ApiError::not_found("site"))
}

fn find_record_mut(state: &mut Snapshot, id: u64) -> ApiResult<&mut SiteRecord> {
    state
        .sites
        .iter_mut()
        .find(|record| record.site.id == id)
        .ok_or_else(|| ApiError::not_found("site"))
}

fn sort_newest_first(statuses: &mut [Status]) {
    statuses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

fn validate_draft(draft: &SiteDraft) -> ApiResult<()> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::field("name", "Name required"));
    }

    let url = draft.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::field("url", "URL must start with http:// or https://"));
    }

    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
