//! Interactive shell handler.
//!
//! - Owns the routed [`App`] and every piece of page state
//! - Drives API calls on the context's runtime
//! - Sends a fresh screen to the renderer thread after each event

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Result, anyhow};
use taxipot_engine::LoginRedirect;

use crate::context::ClientContext;
use crate::presentation::renderers::{TuiEvent, TuiRenderer};
use crate::shell::{App, AppEvent, Exit, Route, ShellOptions};

const RENDERER_CHECK: Duration = Duration::from_millis(250);

pub fn handle(ctx: ClientContext, start: Option<String>) -> Result<()> {
    let login = LoginRedirect::new(ctx.login_url()?);
    let shell = ctx.into_shell();
    let options = ShellOptions {
        page_size: shell.config.page_size,
        sort: shell.config.sort.clone(),
        display_offset: shell.config.display_offset(),
        login,
    };

    // Renderer -> handler (key intents) and tasks -> handler (API outcomes)
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    // Handler -> renderer (screens)
    let (screen_tx, screen_rx) = mpsc::channel::<TuiEvent>();

    let credentials = shell.credentials;
    let api_for_hook = Arc::clone(&shell.api);
    let mut app = App::new(
        shell.api,
        shell.runtime.handle().clone(),
        app_tx.clone(),
        shell.session,
        options,
    )
    .with_logout_hook(move || {
        api_for_hook.set_credential(None);
        if let Err(e) = credentials.clear() {
            tracing::warn!(error = %e, "could not remove stored credential");
        }
    });

    let renderer = thread::spawn(move || TuiRenderer::new(app_tx).run(screen_rx));

    app.navigate(start.as_deref().map(Route::parse).unwrap_or(Route::Home));
    let exit = run_loop(&mut app, &app_rx, &screen_tx, &renderer);
    let _ = screen_tx.send(TuiEvent::Shutdown);

    match renderer.join() {
        Ok(result) => result?,
        Err(_) => return Err(anyhow!("TUI thread panicked")),
    }

    if let Some(Exit::External(url)) = exit {
        println!("Continue in your browser:\n{}", url);
        println!("Afterwards run: taxipot login --token <TOKEN>");
    }
    Ok(())
}

fn run_loop<A>(
    app: &mut App<A>,
    rx: &Receiver<AppEvent>,
    tx: &Sender<TuiEvent>,
    renderer: &JoinHandle<Result<()>>,
) -> Option<Exit>
where
    A: taxipot_api::RoomApi + 'static,
{
    send_screen(app, tx);

    loop {
        match rx.recv_timeout(RENDERER_CHECK) {
            Ok(event) => {
                app.handle(event);
                if let Some(exit) = app.exit() {
                    tracing::info!(?exit, "shell exiting");
                    return Some(exit.clone());
                }
                send_screen(app, tx);
            }
            // the app keeps a sender for its tasks, so the channel never
            // closes on its own; watch the renderer instead
            Err(RecvTimeoutError::Timeout) if renderer.is_finished() => return None,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

fn send_screen<A>(app: &App<A>, tx: &Sender<TuiEvent>)
where
    A: taxipot_api::RoomApi + 'static,
{
    let _ = tx.send(TuiEvent::Update(Box::new(app.screen())));
}
