pub mod console;
pub mod routes;
pub mod settings;
pub mod site;
pub mod sites;

use tracing::error;

use sitewatch_core::{Context, SiteApi, models::Session};

pub use console::Console;
pub use routes::{Route, SiteParams, resolve};

/// Result of opening a view: either the view or where the guard sends the user.
#[derive(Debug)]
pub enum ViewOutcome<V> {
    Ready(V),
    Redirect(Route),
}

impl<V> ViewOutcome<V> {
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> ViewOutcome<U> {
        match self {
            Self::Ready(view) => ViewOutcome::Ready(f(view)),
            Self::Redirect(route) => ViewOutcome::Redirect(route),
        }
    }
}

/// Resolve the signed-in user; a failed lookup counts as signed out.
pub(crate) async fn current_session<A: SiteApi>(ctx: &Context<A>) -> Option<Session> {
    match ctx.api.session().await {
        Ok(session) => session,
        Err(source) => {
            error!(%source, "failed to resolve session");
            None
        }
    }
}

// Console command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    CommandMeta {
        name: "help",
        desc: "List commands.",
        usage: "help",
    },
    CommandMeta {
        name: "go",
        desc: "Open a dashboard URL.",
        usage: "go <path>",
    },
    CommandMeta {
        name: "sites",
        desc: "Show your watched sites.",
        usage: "sites",
    },
    CommandMeta {
        name: "add",
        desc: "Watch a new site (from the site list).",
        usage: "add <name> <url> [alerts]",
    },
    CommandMeta {
        name: "delete",
        desc: "Stop watching a site (from the site list).",
        usage: "delete <id>",
    },
    CommandMeta {
        name: "open",
        desc: "Show a site's status history and timeline.",
        usage: "open <id> [page] [limit]",
    },
    CommandMeta {
        name: "page",
        desc: "Go to a status page.",
        usage: "page <n>",
    },
    CommandMeta {
        name: "next",
        desc: "Next status page.",
        usage: "next",
    },
    CommandMeta {
        name: "prev",
        desc: "Previous status page.",
        usage: "prev",
    },
    CommandMeta {
        name: "timeline",
        desc: "Go to a timeline page.",
        usage: "timeline <n>",
    },
    CommandMeta {
        name: "edit",
        desc: "Edit the open site.",
        usage: "edit <name> <url> [alerts]",
    },
    CommandMeta {
        name: "remove",
        desc: "Delete the open site.",
        usage: "remove",
    },
    CommandMeta {
        name: "settings",
        desc: "Show account settings.",
        usage: "settings",
    },
    CommandMeta {
        name: "email",
        desc: "Change your e-mail address.",
        usage: "email <address>",
    },
    CommandMeta {
        name: "resend",
        desc: "Resend the verification e-mail.",
        usage: "resend",
    },
    CommandMeta {
        name: "password",
        desc: "Change your password.",
        usage: "password <old> <new> <repeat>",
    },
    CommandMeta {
        name: "notify",
        desc: "Toggle down-site notifications.",
        usage: "notify <on|off>",
    },
    CommandMeta {
        name: "alerts",
        desc: "Show recent alerts.",
        usage: "alerts",
    },
    // Add new commands here
];
