//! Site detail view: status history and response-time timeline.

use tracing::{debug, error, info};

use sitewatch_core::{
    ApiError, Context, SiteApi,
    models::{Paged, Session, Site, SiteDraft, Status, TimelinePoint},
};
use sitewatch_utils::{
    alerts::Alert,
    pagination::{
        PageChangeReceiver, PageChangeRequest, PageChangeRouter, Paginator, page_change_channel,
    },
    render::{render_bullets, render_controls, render_footer},
};

use crate::{
    ViewOutcome, current_session,
    routes::{Route, SiteParams},
};

/// Suffix of the timeline paginator's page-change events.
pub const TIMELINE_SUFFIX: &str = "-timeline";

/// The independently paginated lists of the site view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteList {
    Statuses,
    Timeline,
}

/// Response-time bounds of the loaded timeline page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSummary {
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: u64,
    pub samples: usize,
}

impl TimelineSummary {
    pub fn from_points(points: &[TimelinePoint]) -> Option<Self> {
        let min_ms = points.iter().map(|point| point.time_ms).min()?;
        let max_ms = points.iter().map(|point| point.time_ms).max()?;
        let total = points
            .iter()
            .map(|point| u128::from(point.time_ms))
            .sum::<u128>();
        // The mean never exceeds `max_ms`, so it fits back into a u64.
        let avg_ms = u64::try_from(total / points.len() as u128).unwrap_or(max_ms);

        Some(Self {
            min_ms,
            max_ms,
            avg_ms,
            samples: points.len(),
        })
    }
}

pub struct SiteView<A> {
    ctx: Context<A>,
    pub session: Session,
    pub site: Site,
    /// Current status page and page size.
    pub page: usize,
    pub limit: usize,
    /// Timeline page size.
    pub timeline_limit: usize,
    /// Whether the edit form is open.
    pub editing: bool,
    pub error: Option<ApiError>,
    pub statuses: Option<Paged<Status>>,
    pub timeline: Option<Paged<TimelinePoint>>,
    status_pager: Paginator,
    timeline_pager: Paginator,
    router: PageChangeRouter<SiteList>,
    page_changes: PageChangeReceiver,
}

impl<A: SiteApi> SiteView<A> {
    /// Open a site; signed-out users go to sign-in, unknown sites to 404.
    ///
    /// Loads the requested status page and the first timeline page.
    pub async fn open(ctx: Context<A>, params: SiteParams) -> anyhow::Result<ViewOutcome<Self>> {
        let Some(session) = current_session(&ctx).await else {
            return Ok(ViewOutcome::Redirect(Route::Signin { redirect: None }));
        };

        let site = match ctx.api.get_site(params.id).await {
            Ok(site) => site,
            Err(source) => {
                debug!(%source, id = params.id, "site not resolved");
                return Ok(ViewOutcome::Redirect(Route::NotFound));
            }
        };

        let (sender, page_changes) = page_change_channel();
        let status_pager = Paginator::new(sender.clone());
        let timeline_pager = Paginator::with_suffix(sender, TIMELINE_SUFFIX);
        let router = PageChangeRouter::new()
            .listen(status_pager.suffix(), SiteList::Statuses)
            .listen(timeline_pager.suffix(), SiteList::Timeline);

        let default_limit = ctx.config.page_limit;
        let mut view = Self {
            ctx,
            session,
            site,
            page: params.page,
            limit: params.limit.unwrap_or(default_limit),
            timeline_limit: default_limit,
            editing: false,
            error: None,
            statuses: None,
            timeline: None,
            status_pager,
            timeline_pager,
            router,
            page_changes,
        };

        view.load_page(view.page, view.limit).await?;
        view.load_timeline(1, view.timeline_limit).await?;

        Ok(ViewOutcome::Ready(view))
    }

    pub fn status_pager(&self) -> &Paginator {
        &self.status_pager
    }

    pub fn timeline_pager(&self) -> &Paginator {
        &self.timeline_pager
    }

    /// Fetch a page of statuses and refresh the status paginator.
    pub async fn load_page(&mut self, page: usize, limit: usize) -> anyhow::Result<()> {
        let paged = match self.ctx.api.get_statuses(self.site.id, page, limit).await {
            Ok(paged) => paged,
            Err(source) => {
                error!(%source, id = self.site.id, page, "failed to load statuses");
                return Ok(());
            }
        };

        self.status_pager.update(paged.pagination)?;
        self.page = paged.pagination.page;
        self.limit = limit;
        self.statuses = Some(paged);
        Ok(())
    }

    /// Fetch a page of the timeline and refresh the timeline paginator.
    pub async fn load_timeline(&mut self, page: usize, limit: usize) -> anyhow::Result<()> {
        let paged = match self.ctx.api.get_timeline(self.site.id, page, limit).await {
            Ok(paged) => paged,
            Err(source) => {
                error!(%source, id = self.site.id, page, "failed to load timeline");
                return Ok(());
            }
        };

        self.timeline_pager.update(paged.pagination)?;
        self.timeline_limit = limit;
        self.timeline = Some(paged);
        Ok(())
    }

    /// Click on a status page control.
    pub fn change_status_page(&self, target: usize) -> bool {
        self.status_pager.change_page(target, self.limit)
    }

    /// Click on a timeline page control.
    pub fn change_timeline_page(&self, target: usize) -> bool {
        self.timeline_pager.change_page(target, self.timeline_limit)
    }

    /// React to one page-change request, reloading the list it targets.
    ///
    /// Requests from an unknown paginator are ignored. Returns whether the
    /// request was routed to a list.
    pub async fn handle_page_change(&mut self, request: PageChangeRequest) -> anyhow::Result<bool> {
        let Some(list) = self.router.route(&request) else {
            debug!(event = %request.event_name(), "no listener for page change");
            return Ok(false);
        };

        match list {
            SiteList::Statuses => self.load_page(request.page, request.limit).await?,
            SiteList::Timeline => self.load_timeline(request.page, request.limit).await?,
        }

        Ok(true)
    }

    /// Handle every queued page-change request in emission order.
    pub async fn process_page_changes(&mut self) -> anyhow::Result<usize> {
        let mut handled = 0;
        while let Ok(request) = self.page_changes.try_recv() {
            if self.handle_page_change(request).await? {
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// Save the edit form.
    pub async fn submit_site(&mut self, draft: SiteDraft) -> bool {
        match self.ctx.api.edit_site(self.site.id, draft).await {
            Ok(site) => {
                info!(id = site.id, "site saved");
                self.error = None;
                self.site = site;
                self.editing = false;
                self.ctx.alerts.push(Alert::success("Site saved")).await;
                true
            }
            Err(source) => {
                self.error = Some(source);
                false
            }
        }
    }

    /// Delete the site; on success returns the route to navigate to.
    pub async fn remove_site(&mut self) -> Option<Route> {
        match self.ctx.api.remove_site(self.site.id).await {
            Ok(()) => {
                info!(id = self.site.id, "site deleted");
                self.ctx.alerts.push(Alert::success("Site deleted")).await;
                Some(Route::Home)
            }
            Err(source) => {
                error!(%source, id = self.site.id, "failed to delete site");
                None
            }
        }
    }

    pub fn timeline_summary(&self) -> Option<TimelineSummary> {
        self.timeline
            .as_ref()
            .and_then(|timeline| TimelineSummary::from_points(&timeline.items))
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} <{}>", self.site.name, self.site.url);
        if self.site.alerts {
            out.push_str(" (alerts on)");
        }

        if let Some(statuses) = &self.statuses {
            let lines = statuses.items.iter().map(status_line).collect::<Vec<_>>();
            out.push_str("\n\nStatus\n");
            out.push_str(&render_bullets(&lines, "No checks yet."));
            push_controls(&mut out, &self.status_pager);
        }

        if let Some(summary) = self.timeline_summary() {
            out.push_str(&format!(
                "\n\nTimeline: {} samples, min {} ms, avg {} ms, max {} ms",
                summary.samples, summary.min_ms, summary.avg_ms, summary.max_ms
            ));
            push_controls(&mut out, &self.timeline_pager);
        }

        if let Some(error) = &self.error {
            out.push_str(&format!("\nError: {error}"));
        }

        out
    }
}

fn status_line(status: &Status) -> String {
    let code = status
        .code
        .map_or_else(|| "---".to_owned(), |code| code.to_string());
    let state = if status.is_up() { "up" } else { "down" };
    match &status.error {
        Some(reason) => format!("{} {code} {state} {} ms ({reason})", status.timestamp, status.time_ms),
        None => format!("{} {code} {state} {} ms", status.timestamp, status.time_ms),
    }
}

fn push_controls(out: &mut String, pager: &Paginator) {
    let (Some(state), Some(window)) = (pager.state(), pager.window()) else {
        return;
    };

    let controls = render_controls(state, window);
    if !controls.is_empty() {
        out.push('\n');
        out.push_str(&controls);
    }

    let footer = render_footer(state, None);
    if !footer.is_empty() {
        out.push('\n');
        out.push_str(&footer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, signed_out_context};
    use sitewatch_utils::pagination::PaginationState;

    async fn open(params: SiteParams) -> SiteView<sitewatch_store::MemoryApi> {
        match SiteView::open(context(), params).await.unwrap() {
            ViewOutcome::Ready(view) => view,
            ViewOutcome::Redirect(route) => panic!("unexpected redirect to {route:?}"),
        }
    }

    #[tokio::test]
    async fn guards_redirect() {
        let outcome = SiteView::open(signed_out_context(), SiteParams::new(1))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ViewOutcome::Redirect(Route::Signin { redirect: None })
        ));

        let outcome = SiteView::open(context(), SiteParams::new(404)).await.unwrap();
        assert!(matches!(outcome, ViewOutcome::Redirect(Route::NotFound)));
    }

    #[tokio::test]
    async fn opens_requested_page() {
        let view = open(SiteParams {
            page: 2,
            limit: Some(10),
            ..SiteParams::new(1)
        })
        .await;

        assert_eq!(view.page, 2);
        assert_eq!(view.limit, 10);
        assert_eq!(view.status_pager().state(), Some(PaginationState::new(2, 5)));
        assert_eq!(view.timeline_pager().state(), Some(PaginationState::new(1, 3)));
    }

    #[tokio::test]
    async fn status_clicks_reload_statuses_only() {
        let mut view = open(SiteParams::new(1)).await;
        let timeline_before = view.timeline.clone();

        assert!(view.change_status_page(3));
        assert_eq!(view.process_page_changes().await.unwrap(), 1);

        assert_eq!(view.page, 3);
        assert_eq!(view.statuses.as_ref().unwrap().items.len(), 5);
        assert_eq!(view.timeline, timeline_before);
    }

    #[tokio::test]
    async fn timeline_clicks_reload_timeline_only() {
        let mut view = open(SiteParams::new(1)).await;

        assert!(view.change_timeline_page(2));
        view.process_page_changes().await.unwrap();

        assert_eq!(view.page, 1);
        assert_eq!(
            view.timeline_pager().state(),
            Some(PaginationState::new(2, 3))
        );
    }

    #[tokio::test]
    async fn out_of_range_clicks_emit_nothing() {
        let mut view = open(SiteParams::new(1)).await;

        assert!(!view.change_status_page(0));
        assert!(!view.change_status_page(4));
        assert_eq!(view.process_page_changes().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_suffix_is_ignored() {
        let mut view = open(SiteParams::new(1)).await;
        let handled = view
            .handle_page_change(PageChangeRequest {
                page: 2,
                limit: 20,
                suffix: "-other".to_owned(),
            })
            .await
            .unwrap();

        assert!(!handled);
        assert_eq!(view.page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_and_remove() {
        let ctx = context();
        let ViewOutcome::Ready(mut view) = SiteView::open(ctx.clone(), SiteParams::new(1))
            .await
            .unwrap()
        else {
            panic!("expected the site view");
        };
        view.editing = true;

        let saved = view
            .submit_site(SiteDraft {
                name: "renamed".to_owned(),
                ..SiteDraft::from(&view.site)
            })
            .await;
        assert!(saved);
        assert_eq!(view.site.name, "renamed");
        assert!(!view.editing);

        assert_eq!(view.remove_site().await, Some(Route::Home));
        assert_eq!(
            ctx.alerts.snapshot().await,
            vec![Alert::success("Site saved"), Alert::success("Site deleted")]
        );
    }

    #[test]
    fn summary_of_points() {
        let points = [
            TimelinePoint { timestamp: 1, time_ms: 100 },
            TimelinePoint { timestamp: 2, time_ms: 300 },
            TimelinePoint { timestamp: 3, time_ms: 200 },
        ];
        assert_eq!(
            TimelineSummary::from_points(&points),
            Some(TimelineSummary {
                min_ms: 100,
                max_ms: 300,
                avg_ms: 200,
                samples: 3,
            })
        );
        assert_eq!(TimelineSummary::from_points(&[]), None);
    }

    #[test]
    fn summary_of_extreme_response_times() {
        let points = [
            TimelinePoint { timestamp: 1, time_ms: u64::MAX },
            TimelinePoint { timestamp: 2, time_ms: 1 },
        ];
        let summary = TimelineSummary::from_points(&points).unwrap();
        assert_eq!(summary.avg_ms, u64::MAX / 2 + 1);
        assert_eq!((summary.min_ms, summary.max_ms), (1, u64::MAX));

        let all_max = [TimelinePoint { timestamp: 1, time_ms: u64::MAX }; 3];
        assert_eq!(TimelineSummary::from_points(&all_max).unwrap().avg_ms, u64::MAX);
    }
}
