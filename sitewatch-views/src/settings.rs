//! Account settings view.

use tracing::{error, info};

use sitewatch_core::{
    Context, FieldErrors, SiteApi,
    models::{EmailForm, PasswordForm, Session},
};
use sitewatch_utils::alerts::Alert;

use crate::{ViewOutcome, current_session, routes::Route};

pub struct SettingsView<A> {
    ctx: Context<A>,
    pub session: Session,
    pub email_form: EmailForm,
    pub password_form: PasswordForm,
    pub email_errors: Option<FieldErrors>,
    pub password_errors: Option<FieldErrors>,
}

impl<A: SiteApi> SettingsView<A> {
    /// Open the settings view; signed-out users are sent to sign-in.
    pub async fn open(ctx: Context<A>) -> ViewOutcome<Self> {
        let Some(session) = current_session(&ctx).await else {
            return ViewOutcome::Redirect(Route::signin_then(&Route::Settings));
        };

        let email_form = match ctx.api.get_email().await {
            Ok(form) => form,
            Err(source) => {
                error!(%source, "failed to resolve email");
                EmailForm::default()
            }
        };

        ViewOutcome::Ready(Self {
            ctx,
            session,
            email_form,
            password_form: PasswordForm::default(),
            email_errors: None,
            password_errors: None,
        })
    }

    /// Submit the e-mail form; a verification mail goes out on success.
    pub async fn submit_email(&mut self) -> bool {
        match self.ctx.api.change_email(self.email_form.clone()).await {
            Ok(form) => {
                info!("email updated");
                self.email_errors = None;
                self.email_form = EmailForm { sent: true, ..form };
                self.session.email = self.email_form.email.clone();
                self.ctx
                    .alerts
                    .push(Alert::success("Email updated, email verification sent"))
                    .await;
                true
            }
            Err(source) => {
                self.email_errors = Some(source.errors);
                self.email_form.sent = false;
                false
            }
        }
    }

    pub async fn resend_email_validation(&mut self) -> bool {
        match self.ctx.api.resend_email().await {
            Ok(()) => {
                self.ctx
                    .alerts
                    .push(Alert::success("Email verification sent"))
                    .await;
                true
            }
            Err(source) => {
                self.email_errors = Some(source.errors);
                false
            }
        }
    }

    /// Submit the password form.
    ///
    /// A rejected old password is reported on the `old` field.
    pub async fn submit_password(&mut self) -> bool {
        match self.ctx.api.change_password(self.password_form.clone()).await {
            Ok(()) => {
                info!("password updated");
                self.password_errors = None;
                self.password_form = PasswordForm {
                    sent: true,
                    ..PasswordForm::default()
                };
                self.ctx.alerts.push(Alert::success("Password updated")).await;
                true
            }
            Err(source) => {
                let errors = if source.is_forbidden() {
                    let message = source.message.clone().unwrap_or_default();
                    FieldErrors::from([("old".to_owned(), vec![message])])
                } else {
                    source.errors
                };
                self.password_errors = Some(errors);
                self.password_form.sent = false;
                false
            }
        }
    }

    /// Save the global down-site notification switch.
    pub async fn submit_alerts(&mut self, enabled: bool) -> bool {
        let mut session = self.session.clone();
        session.alerts = enabled;

        match self.ctx.api.change_alerts(session).await {
            Ok(session) => {
                self.session = session;
                self.ctx.alerts.push(Alert::success("Alerts updated")).await;
                true
            }
            Err(source) => {
                error!(%source, "failed to update alerts");
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Settings for {}\nEmail: {}{}\nAlerts: {}",
            self.session.login,
            self.email_form.email,
            if self.email_form.sent { " (verification sent)" } else { "" },
            if self.session.alerts { "on" } else { "off" },
        );

        for errors in [&self.email_errors, &self.password_errors].into_iter().flatten() {
            for (field, messages) in errors {
                out.push_str(&format!("\n{field}: {}", messages.join(", ")));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::test_support::{context, context_with_email, signed_out_context};

    async fn open() -> (SettingsView<sitewatch_store::MemoryApi>, Context<sitewatch_store::MemoryApi>) {
        open_with(context()).await
    }

    async fn open_with(
        ctx: Context<sitewatch_store::MemoryApi>,
    ) -> (SettingsView<sitewatch_store::MemoryApi>, Context<sitewatch_store::MemoryApi>) {
        let ViewOutcome::Ready(view) = SettingsView::open(ctx.clone()).await else {
            panic!("expected the settings view");
        };
        (view, ctx)
    }

    #[tokio::test]
    async fn signed_out_users_go_to_signin() {
        let ViewOutcome::Redirect(route) = SettingsView::open(signed_out_context()).await else {
            panic!("expected a redirect");
        };
        assert_eq!(
            route,
            Route::Signin {
                redirect: Some("/settings".to_owned()),
            }
        );
        assert_eq!(route.path(), "/auth/login?redirect=/settings");
    }

    #[tokio::test(start_paused = true)]
    async fn resend_raises_verification_alert() {
        let (mut view, ctx) = open().await;

        assert!(view.resend_email_validation().await);
        assert_eq!(view.email_errors, None);
        assert_eq!(
            ctx.alerts.snapshot().await,
            vec![Alert::success("Email verification sent")]
        );

        tokio::time::sleep(ctx.config.alert_ttl + Duration::from_millis(100)).await;
        assert!(ctx.alerts.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_resend_keeps_field_errors() {
        let (mut view, ctx) = open_with(context_with_email("")).await;

        assert!(!view.resend_email_validation().await);
        let errors = view.email_errors.as_ref().unwrap();
        assert_eq!(errors["email"], vec!["No email address to verify".to_owned()]);
        assert!(view.render().contains("email: No email address to verify"));
        assert!(ctx.alerts.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn email_change_marks_sent() {
        let (mut view, ctx) = open().await;
        assert_eq!(view.email_form.email, "alex@example.org");

        view.email_form.email = "alex@example.net".to_owned();
        assert!(view.submit_email().await);
        assert!(view.email_form.sent);
        assert_eq!(view.session.email, "alex@example.net");
        assert_eq!(
            ctx.alerts.snapshot().await,
            vec![Alert::success("Email updated, email verification sent")]
        );
    }

    #[tokio::test]
    async fn invalid_email_keeps_field_errors() {
        let (mut view, _ctx) = open().await;
        view.email_form = EmailForm {
            email: "nope".to_owned(),
            sent: true,
        };

        assert!(!view.submit_email().await);
        assert!(!view.email_form.sent);
        assert!(view.email_errors.as_ref().unwrap().contains_key("email"));
    }

    #[tokio::test]
    async fn wrong_old_password_is_reported_on_old_field() {
        let (mut view, _ctx) = open().await;
        view.password_form = PasswordForm {
            old: "guess".to_owned(),
            new: "n3w".to_owned(),
            repeat: "n3w".to_owned(),
            sent: false,
        };

        assert!(!view.submit_password().await);
        let errors = view.password_errors.as_ref().unwrap();
        assert_eq!(errors["old"], vec!["Wrong password".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn password_change_resets_form() {
        let (mut view, _ctx) = open().await;
        view.password_form = PasswordForm {
            old: "secret".to_owned(),
            new: "n3w".to_owned(),
            repeat: "n3w".to_owned(),
            sent: false,
        };

        assert!(view.submit_password().await);
        assert_eq!(
            view.password_form,
            PasswordForm {
                sent: true,
                ..PasswordForm::default()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn alerts_switch_persists() {
        let (mut view, _ctx) = open().await;
        assert!(view.submit_alerts(true).await);
        assert!(view.session.alerts);
        assert!(view.render().contains("Alerts: on"));
    }
}
