//! Line-oriented command surface over the dashboard views.

use tracing::debug;

use sitewatch_core::{Context, SiteApi, models::SiteDraft};
use sitewatch_utils::{
    alerts::Alert, pagination::parse_one_based_page, parse::parse_site_id,
    render::render_bullets,
};

use crate::{
    COMMANDS, ViewOutcome,
    routes::{Route, SiteParams, resolve},
    settings::SettingsView,
    site::SiteView,
    sites::SitesView,
};

const MAX_REDIRECTS: usize = 3;

enum Screen<A> {
    Blank,
    Sites(SitesView<A>),
    Site(Box<SiteView<A>>),
    Settings(SettingsView<A>),
}

/// Interactive dashboard session driven by text commands.
pub struct Console<A> {
    ctx: Context<A>,
    screen: Screen<A>,
}

impl<A: SiteApi> Console<A> {
    pub fn new(ctx: Context<A>) -> Self {
        Self {
            ctx,
            screen: Screen::Blank,
        }
    }

    /// Open a route, following guard redirects.
    pub async fn navigate(&mut self, route: Route) -> anyhow::Result<String> {
        let mut route = route;

        for _ in 0..MAX_REDIRECTS {
            let path = route.path();
            debug!(%path, "navigating");
            let outcome = match route {
                Route::Home => SitesView::open(self.ctx.clone()).await.map(Screen::Sites),
                Route::Site(params) => SiteView::open(self.ctx.clone(), params)
                    .await?
                    .map(|view| Screen::Site(Box::new(view))),
                Route::Settings => SettingsView::open(self.ctx.clone())
                    .await
                    .map(Screen::Settings),
                Route::NotFound => {
                    self.screen = Screen::Blank;
                    return Ok("Page not found.".to_owned());
                }
                Route::Signin { .. } | Route::Signup => {
                    self.screen = Screen::Blank;
                    return Ok(format!("Sign in required ({path})."));
                }
            };

            match outcome {
                ViewOutcome::Ready(screen) => {
                    self.screen = screen;
                    return Ok(self.render());
                }
                ViewOutcome::Redirect(next) => route = next,
            }
        }

        anyhow::bail!("too many redirects ending at {}", route.path())
    }

    /// Render the current screen.
    pub fn render(&self) -> String {
        match &self.screen {
            Screen::Blank => "Nothing open. Try `sites` or `help`.".to_owned(),
            Screen::Sites(view) => view.render(),
            Screen::Site(view) => view.render(),
            Screen::Settings(view) => view.render(),
        }
    }

    /// Handle one input line. Returns the text to show, if any.
    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<Option<String>> {
        let content = line.trim();
        if content.is_empty() {
            return Ok(None);
        }

        let mut command_and_rest = content.splitn(2, char::is_whitespace);
        let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
        let args = command_and_rest
            .next()
            .map(|rest| rest.split_whitespace().collect::<Vec<_>>())
            .unwrap_or_default();

        let out = match cmd.as_str() {
            "help" => help(),
            "go" => match args.first() {
                Some(path) => self.navigate(resolve(path)).await?,
                None => usage("go"),
            },
            "sites" => self.navigate(Route::Home).await?,
            "settings" => self.navigate(Route::Settings).await?,
            "open" => self.open_site(&args).await?,
            "add" => self.add_site(&args).await,
            "delete" => self.delete_site(&args).await,
            "page" | "timeline" | "next" | "prev" => self.paginate(&cmd, &args).await?,
            "edit" => self.edit_site(&args).await,
            "remove" => self.remove_site().await?,
            "email" => self.change_email(&args).await,
            "resend" => self.resend_email().await,
            "password" => self.change_password(&args).await,
            "notify" => self.change_notify(&args).await,
            "alerts" => {
                let lines = self
                    .ctx
                    .alerts
                    .snapshot()
                    .await
                    .into_iter()
                    .map(|alert| format!("[{}] {}", alert.status, alert.message))
                    .collect::<Vec<_>>();
                render_bullets(&lines, "No alerts.")
            }
            _ => format!("Unknown command: `{cmd}`. Try `help`."),
        };

        Ok(Some(out))
    }

    async fn open_site(&mut self, args: &[&str]) -> anyhow::Result<String> {
        let Some(id) = args.first().and_then(|raw| parse_site_id(raw)) else {
            return Ok(usage("open"));
        };
        let Some(page) = parse_one_based_page(args.get(1).copied()) else {
            return Ok(usage("open"));
        };
        let limit = match args.get(2).copied() {
            Some(raw) => match parse_one_based_page(Some(raw)) {
                Some(limit) => Some(limit),
                None => return Ok(usage("open")),
            },
            None => None,
        };

        self.navigate(Route::Site(SiteParams {
            page,
            limit,
            ..SiteParams::new(id)
        }))
        .await
    }

    async fn add_site(&mut self, args: &[&str]) -> String {
        let Screen::Sites(view) = &mut self.screen else {
            return "Open the site list first (`sites`).".to_owned();
        };
        let [name, url, rest @ ..] = args else {
            return usage("add");
        };

        let draft = SiteDraft {
            name: (*name).to_owned(),
            url: (*url).to_owned(),
            alerts: rest.first().is_some_and(|flag| *flag == "alerts"),
        };
        view.adding = true;
        view.draft = draft.clone();
        view.submit_site(draft).await;
        view.render()
    }

    async fn delete_site(&mut self, args: &[&str]) -> String {
        let Screen::Sites(view) = &mut self.screen else {
            return "Open the site list first (`sites`).".to_owned();
        };
        let Some(id) = args.first().and_then(|raw| parse_site_id(raw)) else {
            return usage("delete");
        };

        if !view.delete_site(id).await {
            let message = format!("Could not delete site #{id}.");
            self.ctx.alerts.push(Alert::danger(message.clone())).await;
            return message;
        }
        view.render()
    }

    async fn paginate(&mut self, cmd: &str, args: &[&str]) -> anyhow::Result<String> {
        let Screen::Site(view) = &mut self.screen else {
            return Ok("Open a site first (`open <id>`).".to_owned());
        };

        let emitted = match cmd {
            "next" => view.status_pager().next(view.limit),
            "prev" => view.status_pager().previous(view.limit),
            _ => {
                let Some(target) = args.first().and_then(|raw| raw.parse::<usize>().ok()) else {
                    return Ok(usage(cmd));
                };
                if cmd == "timeline" {
                    view.change_timeline_page(target)
                } else {
                    view.change_status_page(target)
                }
            }
        };

        if !emitted {
            return Ok("No such page.".to_owned());
        }

        view.process_page_changes().await?;
        Ok(view.render())
    }

    async fn edit_site(&mut self, args: &[&str]) -> String {
        let Screen::Site(view) = &mut self.screen else {
            return "Open a site first (`open <id>`).".to_owned();
        };
        let [name, url, rest @ ..] = args else {
            return usage("edit");
        };

        let draft = SiteDraft {
            name: (*name).to_owned(),
            url: (*url).to_owned(),
            alerts: rest.first().is_some_and(|flag| *flag == "alerts"),
        };
        view.editing = true;
        view.submit_site(draft).await;
        view.render()
    }

    async fn remove_site(&mut self) -> anyhow::Result<String> {
        let Screen::Site(view) = &mut self.screen else {
            return Ok("Open a site first (`open <id>`).".to_owned());
        };

        let next = view.remove_site().await;
        match next {
            Some(next) => self.navigate(next).await,
            None => {
                let message = "Could not delete this site.";
                self.ctx.alerts.push(Alert::danger(message)).await;
                Ok(message.to_owned())
            }
        }
    }

    async fn change_email(&mut self, args: &[&str]) -> String {
        let Screen::Settings(view) = &mut self.screen else {
            return "Open the settings first (`settings`).".to_owned();
        };
        let Some(email) = args.first() else {
            return usage("email");
        };

        view.email_form.email = (*email).to_owned();
        view.submit_email().await;
        view.render()
    }

    async fn resend_email(&mut self) -> String {
        let Screen::Settings(view) = &mut self.screen else {
            return "Open the settings first (`settings`).".to_owned();
        };

        view.resend_email_validation().await;
        view.render()
    }

    async fn change_password(&mut self, args: &[&str]) -> String {
        let Screen::Settings(view) = &mut self.screen else {
            return "Open the settings first (`settings`).".to_owned();
        };
        let [old, new, repeat] = args else {
            return usage("password");
        };

        view.password_form.old = (*old).to_owned();
        view.password_form.new = (*new).to_owned();
        view.password_form.repeat = (*repeat).to_owned();
        view.submit_password().await;
        view.render()
    }

    async fn change_notify(&mut self, args: &[&str]) -> String {
        let Screen::Settings(view) = &mut self.screen else {
            return "Open the settings first (`settings`).".to_owned();
        };
        let enabled = match args.first().copied() {
            Some("on") => true,
            Some("off") => false,
            _ => return usage("notify"),
        };

        view.submit_alerts(enabled).await;
        view.render()
    }
}

fn usage(name: &str) -> String {
    match COMMANDS.iter().find(|command| command.name == name) {
        Some(command) => format!("Usage: `{}`", command.usage),
        None => format!("Unknown command: `{name}`"),
    }
}

fn help() -> String {
    let lines = COMMANDS
        .iter()
        .map(|command| format!("{}: {}", command.usage, command.desc))
        .collect::<Vec<_>>();
    render_bullets(&lines, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, signed_out_context};

    #[tokio::test]
    async fn browse_and_page() {
        let mut console = Console::new(context());

        let out = console.handle_line("open 1").await.unwrap().unwrap();
        let (statuses, timeline) = out.split_once("\n\nTimeline").unwrap();
        assert!(statuses.contains("[1] 2 3 ›"));
        assert!(statuses.contains("Page 1/3"));
        assert!(timeline.contains("[1] 2 3 ›"));

        let out = console.handle_line("page 3").await.unwrap().unwrap();
        let (statuses, timeline) = out.split_once("\n\nTimeline").unwrap();
        assert!(statuses.contains("‹ 1 2 [3]"));
        assert!(statuses.contains("Page 3/3"));
        assert!(timeline.contains("[1] 2 3 ›"));
        assert!(!timeline.contains("[3]"));

        let out = console.handle_line("page 9").await.unwrap().unwrap();
        assert_eq!(out, "No such page.");
    }

    #[tokio::test]
    async fn go_follows_routes() {
        let mut console = Console::new(context());

        let out = console.handle_line("go /sites/1?p=2&n=15").await.unwrap().unwrap();
        assert!(out.contains("Page 2/3"));

        let out = console.handle_line("go /nowhere").await.unwrap().unwrap();
        assert_eq!(out, "Page not found.");
    }

    #[tokio::test]
    async fn signed_out_session_asks_for_sign_in() {
        let mut console = Console::new(signed_out_context());
        let out = console.handle_line("sites").await.unwrap().unwrap();
        assert_eq!(out, "Sign in required (/auth/signup).");

        let out = console.handle_line("settings").await.unwrap().unwrap();
        assert_eq!(out, "Sign in required (/auth/login?redirect=/settings).");
    }

    #[tokio::test(start_paused = true)]
    async fn failed_delete_raises_danger_alert() {
        let mut console = Console::new(context());
        console.handle_line("sites").await.unwrap();

        let out = console.handle_line("delete 99").await.unwrap().unwrap();
        assert_eq!(out, "Could not delete site #99.");

        let out = console.handle_line("alerts").await.unwrap().unwrap();
        assert_eq!(out, "- [danger] Could not delete site #99.");
    }

    #[tokio::test(start_paused = true)]
    async fn add_site_then_list_alerts() {
        let mut console = Console::new(context());
        console.handle_line("sites").await.unwrap();

        let out = console
            .handle_line("add shop https://shop.example.org")
            .await
            .unwrap()
            .unwrap();
        assert!(out.contains("shop <https://shop.example.org>"));

        let out = console.handle_line("alerts").await.unwrap().unwrap();
        assert_eq!(out, "- [success] Site created");
    }

    #[tokio::test]
    async fn commands_require_matching_screen() {
        let mut console = Console::new(context());
        let out = console.handle_line("page 2").await.unwrap().unwrap();
        assert_eq!(out, "Open a site first (`open <id>`).");

        let out = console.handle_line("open").await.unwrap().unwrap();
        assert_eq!(out, "Usage: `open <id> [page] [limit]`");

        assert_eq!(console.handle_line("   ").await.unwrap(), None);
    }
}
