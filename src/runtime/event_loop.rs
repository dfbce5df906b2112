use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::audio::{AudioEngine, EngineEvent};
use crate::config;
use crate::library::TrackId;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::page::Page;
use crate::player::{Controller, PlaybackState};
use crate::ui::{self, Hit};

/// Something the user (or a bus client) asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    PlaySelected,
    PlayTrack(usize),
    MainButton,
    Toggle,
    Advance,
    Seek(f64),
    Unload,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known track as emitted to MPRIS.
    pub last_mpris_track: Option<TrackId>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
    /// Area of the last drawn frame, for mouse hit testing.
    pub area: Rect,
}

/// Map a key press to an action. `p` only works when the page has a main
/// button.
pub fn key_action(key: KeyEvent, pending_gg: &mut bool, main_button: bool) -> Option<Action> {
    if key.code == KeyCode::Char('g') {
        if *pending_gg {
            *pending_gg = false;
            return Some(Action::SelectFirst);
        }
        *pending_gg = true;
        return None;
    }
    *pending_gg = false;

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('G') => Some(Action::SelectLast),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
        KeyCode::Enter => Some(Action::PlaySelected),
        KeyCode::Char('p') => main_button.then_some(Action::MainButton),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('l') => Some(Action::Advance),
        _ => None,
    }
}

/// Map a click to an action.
pub fn click_action(hit: Hit) -> Option<Action> {
    match hit {
        Hit::MainButton => Some(Action::MainButton),
        Hit::Track(index) => Some(Action::PlayTrack(index)),
        Hit::Toggle => Some(Action::Toggle),
        Hit::Seek(ratio) => Some(Action::Seek(ratio)),
        Hit::Nothing => None,
    }
}

/// Map an MPRIS command to an action. Play and Pause only act when they
/// would change something.
pub fn control_action(cmd: ControlCmd, state: PlaybackState) -> Option<Action> {
    match cmd {
        ControlCmd::Quit => Some(Action::Quit),
        ControlCmd::PlayPause => Some(Action::MainButton),
        ControlCmd::Play => (state != PlaybackState::Playing).then_some(Action::MainButton),
        ControlCmd::Pause => (state == PlaybackState::Playing).then_some(Action::Toggle),
        ControlCmd::Next => Some(Action::Advance),
        ControlCmd::Stop => Some(Action::Unload),
    }
}

/// Carry out `action`. Returns `true` when the program should exit.
pub fn apply<E: AudioEngine>(
    action: Action,
    controller: &mut Controller<E>,
    page: &mut Page,
) -> bool {
    match action {
        Action::Quit => return true,
        Action::PlaySelected => {
            if let Some(track) = page.selected_track() {
                controller.request_play(page, track);
            }
        }
        Action::PlayTrack(index) => {
            if let Some(track) = page.items().get(index).cloned() {
                page.select(index);
                controller.request_play(page, track);
            }
        }
        Action::MainButton => controller.handle_main_button(page),
        Action::Toggle => controller.toggle(),
        Action::Advance => controller.advance(page),
        Action::Seek(ratio) => controller.handle_seek(ratio),
        Action::Unload => controller.unload(),
        Action::SelectNext => page.select_next(),
        Action::SelectPrev => page.select_prev(),
        Action::SelectFirst => page.select_first(),
        Action::SelectLast => page.select_last(),
    }
    false
}

fn sync_mpris<E: AudioEngine>(
    mpris: &MprisHandle,
    controller: &Controller<E>,
    state: &mut EventLoopState,
) {
    let track = controller.current_track();
    let track_id = track.map(|t| t.id);
    let playback = controller.state();
    if track_id != state.last_mpris_track || playback != state.last_mpris_playback {
        mpris.set_track(track);
        mpris.set_playback(playback);
        state.last_mpris_track = track_id;
        state.last_mpris_playback = playback;
    }
}

/// Main terminal event loop: handles input, engine notifications, UI
/// drawing and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<E>,
    page: &mut Page,
    engine_rx: &mpsc::Receiver<EngineEvent>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = Duration::from_millis(settings.ui.frame_ms);

    loop {
        while let Ok(event) = engine_rx.try_recv() {
            controller.handle_event(page, event);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            let action = control_action(cmd, controller.state());
            if action.is_some_and(|a| apply(a, controller, page)) {
                return Ok(());
            }
        }

        controller.on_frame(page);
        sync_mpris(mpris, controller, state);

        let playback = controller.state();
        let completed = terminal.draw(|f| ui::draw(f, page, playback, &settings.ui))?;
        state.area = completed.area;

        if !event::poll(frame)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                key_action(key, &mut state.pending_gg, page.has_main_button())
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let layout = ui::layout(state.area, page);
                click_action(ui::hit_test(&layout, page, column, row))
            }
            _ => None,
        };
        if action.is_some_and(|a| apply(a, controller, page)) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests;
