use anyhow::Result;

use super::HandlerContext;
use crate::auth;
use crate::context::ClientContext;
use crate::presentation::view_models::{CommandResultViewModel, Guidance, LoginViewModel, StatusBadge};

/// Without `--token`, print where to sign in. With it, check the account is
/// an SNU one and keep the token for later runs.
pub fn handle(ctx: &ClientContext, hctx: &HandlerContext, token: Option<String>) -> Result<()> {
    let Some(token) = token else {
        let view_model = CommandResultViewModel::new(LoginViewModel::Redirect {
            url: ctx.login_url()?,
        })
        .with_suggestion(
            Guidance::new("Then store the returned token")
                .with_command("taxipot login --token <TOKEN>"),
        );
        return hctx.render(view_model);
    };

    let token = token.trim().to_string();
    let email = auth::verify_snu_token(&token)?;
    ctx.credentials().save(&token)?;
    ctx.api().set_credential(Some(token));
    ctx.session().sign_in(email.clone());
    tracing::info!(%email, "signed in");

    let view_model = CommandResultViewModel::new(LoginViewModel::SignedIn { email })
        .with_badge(StatusBadge::success("로그인되었습니다."))
        .with_suggestion(Guidance::new("Find a room").with_command("taxipot rooms search"));
    hctx.render(view_model)
}
