//! Home view: the user's watched sites.

use tracing::{error, info};

use sitewatch_core::{
    ApiError, Context, SiteApi,
    models::{Session, Site, SiteDraft},
};
use sitewatch_utils::{alerts::Alert, render::render_bullets};

use crate::{ViewOutcome, current_session, routes::Route};

pub struct SitesView<A> {
    ctx: Context<A>,
    pub session: Session,
    pub sites: Vec<Site>,
    /// New-site form model.
    pub draft: SiteDraft,
    /// Whether the add-site form is open.
    pub adding: bool,
    pub error: Option<ApiError>,
}

impl<A: SiteApi> SitesView<A> {
    /// Open the home view; signed-out users are sent to sign-up.
    pub async fn open(ctx: Context<A>) -> ViewOutcome<Self> {
        let Some(session) = current_session(&ctx).await else {
            return ViewOutcome::Redirect(Route::Signup);
        };

        let sites = match ctx.api.get_sites().await {
            Ok(sites) => sites,
            Err(source) => {
                error!(%source, "failed to resolve sites");
                Vec::new()
            }
        };

        ViewOutcome::Ready(Self {
            ctx,
            session,
            sites,
            draft: SiteDraft::default(),
            adding: false,
            error: None,
        })
    }

    /// Reset the new-site form.
    pub fn init(&mut self) {
        self.draft = SiteDraft::default();
    }

    pub async fn load_sites(&mut self) {
        match self.ctx.api.get_sites().await {
            Ok(sites) => self.sites = sites,
            Err(source) => error!(%source, "failed to load sites"),
        }
    }

    /// Create a site from `draft`. Returns whether it was created.
    pub async fn submit_site(&mut self, draft: SiteDraft) -> bool {
        match self.ctx.api.create_site(draft).await {
            Ok(site) => {
                info!(id = site.id, name = %site.name, "site created");
                self.error = None;
                self.adding = false;
                self.init();
                self.load_sites().await;
                self.ctx.alerts.push(Alert::success("Site created")).await;
                true
            }
            Err(source) => {
                self.error = Some(source);
                false
            }
        }
    }

    /// Delete a site. Returns whether it was deleted.
    pub async fn delete_site(&mut self, id: u64) -> bool {
        match self.ctx.api.remove_site(id).await {
            Ok(()) => {
                info!(id, "site deleted");
                self.load_sites().await;
                self.ctx.alerts.push(Alert::success("Site deleted")).await;
                true
            }
            Err(source) => {
                error!(%source, id, "failed to delete site");
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let lines = self
            .sites
            .iter()
            .map(|site| {
                let state = match &site.last_status {
                    Some(status) if status.is_up() => "up",
                    Some(_) => "down",
                    None => "pending",
                };
                format!("#{} {} <{}> [{state}]", site.id, site.name, site.url)
            })
            .collect::<Vec<_>>();

        let mut out = format!(
            "Sites of {}\n{}",
            self.session.login,
            render_bullets(&lines, "No sites yet. Use `add <name> <url>`.")
        );

        if let Some(error) = &self.error {
            out.push_str(&format!("\nError: {error}"));
        }

        out
    }
}
