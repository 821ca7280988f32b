use anyhow::Result;
use taxipot_api::RoomApi;

use super::HandlerContext;
use crate::context::ClientContext;
use crate::presentation::view_models::{CommandResultViewModel, LogoutViewModel, StatusBadge};
use crate::shell::app::LOGGED_OUT;

/// Ending the server session is best-effort; the local credential is removed
/// either way.
pub fn handle(ctx: &ClientContext, hctx: &HandlerContext) -> Result<()> {
    let server_notified = if ctx.api().has_credential() {
        match ctx.block_on(ctx.api().logout()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "server logout failed");
                false
            }
        }
    } else {
        false
    };

    let credential_removed = ctx.credentials().clear()?;
    ctx.api().set_credential(None);
    ctx.session().sign_out();

    let view_model = CommandResultViewModel::new(LogoutViewModel {
        server_notified,
        credential_removed,
    })
    .with_badge(StatusBadge::info(LOGGED_OUT));
    hctx.render(view_model)
}
