use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioEngine, RodioEngine};
use crate::library;
use crate::mpris::ControlCmd;
use crate::page::Page;
use crate::player::{Controller, ControllerOptions};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.logging);

    let target = match env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => env::current_dir()?,
    };

    let tracks = library::load(&target, &settings.library)?;
    info!("{} tracks from {}", tracks.len(), target.display());
    let mut page = Page::new(tracks, settings.ui.main_button);

    let (engine, engine_rx) = RodioEngine::start();
    let mut controller = Controller::new(engine, ControllerOptions::from(&settings));

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            &mut page,
            &engine_rx,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    shut_down(&mut controller, || {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()
    })?;
    info!("shutting down");

    run_result
}

/// Stop playback, then restore the terminal. Playback stops even when the
/// restore fails.
fn shut_down<E: AudioEngine>(
    controller: &mut Controller<E>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    controller.unload();
    restore()
}
