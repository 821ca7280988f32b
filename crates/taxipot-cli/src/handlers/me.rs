use anyhow::{Context, Result, anyhow};
use std::path::Path;
use taxipot_api::RoomApi;

use super::HandlerContext;
use crate::context::ClientContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, PictureUploadedViewModel, StatusBadge,
};
use crate::shell::app::{POT_LOAD_FAILED, PROFILE_UPDATED};

pub fn pot(ctx: &ClientContext, hctx: &HandlerContext) -> Result<()> {
    ctx.require_login()?;

    let pot = ctx
        .block_on(ctx.api().current_pot())
        .map_err(|e| anyhow!(e.user_message(POT_LOAD_FAILED)))?;

    let mut view_model = CommandResultViewModel::new(presenters::present_current_pot(
        pot.as_ref(),
        ctx.config().display_offset(),
    ));
    view_model = match &pot {
        Some(pot) => view_model.with_suggestion(
            Guidance::new("Leave this room").with_command(format!("taxipot rooms leave {}", pot.id)),
        ),
        None => view_model
            .with_suggestion(Guidance::new("Find a room").with_command("taxipot rooms search")),
    };
    hctx.render(view_model)
}

pub fn show(ctx: &ClientContext, hctx: &HandlerContext) -> Result<()> {
    let session = ctx.session_handle().snapshot();
    let mut view_model = CommandResultViewModel::new(presenters::present_profile(&session));
    if !session.logged_in {
        view_model = view_model.with_suggestion(Guidance::new("Sign in").with_command("taxipot login"));
    }
    hctx.render(view_model)
}

pub fn picture(ctx: &ClientContext, hctx: &HandlerContext, file: &Path) -> Result<()> {
    ctx.require_login()?;

    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("{} is not a file", file.display()))?;
    let size = bytes.len();

    ctx.block_on(ctx.api().upload_profile_picture(&file_name, bytes))?;
    tracing::info!(%file_name, size, "profile picture uploaded");

    let view_model = CommandResultViewModel::new(PictureUploadedViewModel {
        file_name,
        bytes: size,
    })
    .with_badge(StatusBadge::success(PROFILE_UPDATED));
    hctx.render(view_model)
}
