use anyhow::Result;

use super::args::{Cli, Commands, MeCommand, RoomsCommand};
use super::handlers::{self, HandlerContext};
use crate::args::ViewModeArgs;
use crate::config::resolve_data_dir;
use crate::context::ClientContext;
use crate::logging;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Tui { route: None });

    if let Commands::Tui { route } = command {
        logging::init_file(cli.log_level, &data_dir)?;
        tracing::info!(data_dir = %data_dir.display(), "starting interactive shell");
        let ctx = ClientContext::new(data_dir, cli.base_url)?;
        return handlers::tui::handle(ctx, route);
    }

    logging::init_stderr(cli.log_level);
    let ctx = ClientContext::new(data_dir, cli.base_url)?;
    let plain = HandlerContext::standard(cli.format);

    match command {
        // started above
        Commands::Tui { .. } => Ok(()),

        Commands::Rooms { command } => match command {
            RoomsCommand::Search {
                departure,
                destination,
                page,
                size,
                all,
                view_mode,
            } => handlers::rooms::search(
                &ctx,
                &HandlerContext::new(cli.format, &view_mode),
                handlers::rooms::SearchArgs {
                    departure,
                    destination,
                    page,
                    size,
                    all,
                },
            ),
            RoomsCommand::Join { room_id } => handlers::rooms::join(&ctx, &plain, room_id),
            RoomsCommand::Create {
                departure,
                destination,
                time,
                min,
                max,
                fee,
            } => handlers::rooms::create(
                &ctx,
                &plain,
                handlers::rooms::CreateArgs {
                    departure,
                    destination,
                    time,
                    min,
                    max,
                    fee,
                },
            ),
            RoomsCommand::Leave { room_id } => handlers::rooms::leave(&ctx, &plain, room_id),
        },

        Commands::Me { command } => match command {
            MeCommand::Pot => handlers::me::pot(&ctx, &plain),
            MeCommand::Show => handlers::me::show(&ctx, &plain),
            MeCommand::Picture { file } => handlers::me::picture(&ctx, &plain, &file),
        },

        Commands::Landmarks => {
            handlers::landmarks::handle(&HandlerContext::new(cli.format, &ViewModeArgs::default()))
        }

        Commands::Login { token } => handlers::login::handle(&ctx, &plain, token),

        Commands::Logout => handlers::logout::handle(&ctx, &plain),
    }
}
