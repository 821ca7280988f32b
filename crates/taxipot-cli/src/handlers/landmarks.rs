use anyhow::Result;

use super::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{CommandResultViewModel, Guidance};

pub fn handle(hctx: &HandlerContext) -> Result<()> {
    let view_model = CommandResultViewModel::new(presenters::present_landmarks()).with_suggestion(
        Guidance::new("Search between two landmarks")
            .with_command("taxipot rooms search --from 1 --to 4"),
    );
    hctx.render(view_model)
}
