use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{KeyEvent, KeyModifiers};

use super::*;
use crate::audio::{LoadRequest, Sound};
use crate::library::number_tracks;
use crate::player::ControllerOptions;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[derive(Default)]
struct Loads(Rc<RefCell<Vec<PathBuf>>>);

struct Silent;

impl Sound for Silent {
    fn play(&self) {}
    fn pause(&self) {}
    fn stop(&self) {}
    fn seek(&self, _: Duration) {}
    fn position(&self) -> Duration {
        Duration::ZERO
    }
    fn duration(&self) -> Option<Duration> {
        None
    }
}

impl AudioEngine for Loads {
    type Sound = Silent;

    fn load(&mut self, request: LoadRequest) -> Silent {
        self.0.borrow_mut().push(request.source);
        Silent
    }
}

fn page(titles: &[&str]) -> Page {
    let items = number_tracks(
        titles
            .iter()
            .map(|t| (PathBuf::from(format!("/music/{t}.mp3")), t.to_string()))
            .collect(),
    );
    Page::new(items, true)
}

#[test]
fn gg_needs_two_presses_and_other_keys_reset_it() {
    let mut pending = false;
    assert_eq!(key_action(press(KeyCode::Char('g')), &mut pending, true), None);
    assert!(pending);
    assert_eq!(
        key_action(press(KeyCode::Char('g')), &mut pending, true),
        Some(Action::SelectFirst)
    );
    assert!(!pending);

    key_action(press(KeyCode::Char('g')), &mut pending, true);
    assert_eq!(
        key_action(press(KeyCode::Char('j')), &mut pending, true),
        Some(Action::SelectNext)
    );
    assert!(!pending);
}

#[test]
fn keys_map_to_playback_triggers() {
    let mut pending = false;
    let cases = [
        (KeyCode::Enter, Action::PlaySelected),
        (KeyCode::Char('p'), Action::MainButton),
        (KeyCode::Char(' '), Action::Toggle),
        (KeyCode::Char('l'), Action::Advance),
        (KeyCode::Char('q'), Action::Quit),
        (KeyCode::Char('G'), Action::SelectLast),
        (KeyCode::Up, Action::SelectPrev),
    ];
    for (code, expected) in cases {
        assert_eq!(key_action(press(code), &mut pending, true), Some(expected));
    }
    assert_eq!(key_action(press(KeyCode::Char('x')), &mut pending, true), None);
}

#[test]
fn main_play_key_needs_a_main_button() {
    let mut pending = false;
    assert_eq!(
        key_action(press(KeyCode::Char('p')), &mut pending, false),
        None
    );
    assert_eq!(
        key_action(press(KeyCode::Char(' ')), &mut pending, false),
        Some(Action::Toggle)
    );
}

#[test]
fn clicks_map_to_actions() {
    assert_eq!(click_action(Hit::Track(3)), Some(Action::PlayTrack(3)));
    assert_eq!(click_action(Hit::Seek(0.5)), Some(Action::Seek(0.5)));
    assert_eq!(click_action(Hit::Toggle), Some(Action::Toggle));
    assert_eq!(click_action(Hit::MainButton), Some(Action::MainButton));
    assert_eq!(click_action(Hit::Nothing), None);
}

#[test]
fn bus_play_and_pause_only_act_when_they_change_something() {
    use PlaybackState::*;

    assert_eq!(control_action(ControlCmd::Play, Playing), None);
    assert_eq!(
        control_action(ControlCmd::Play, Paused),
        Some(Action::MainButton)
    );
    assert_eq!(
        control_action(ControlCmd::Play, Idle),
        Some(Action::MainButton)
    );
    assert_eq!(
        control_action(ControlCmd::Pause, Playing),
        Some(Action::Toggle)
    );
    assert_eq!(control_action(ControlCmd::Pause, Loading), None);
    assert_eq!(
        control_action(ControlCmd::PlayPause, Stopped),
        Some(Action::MainButton)
    );
    assert_eq!(control_action(ControlCmd::Next, Idle), Some(Action::Advance));
    assert_eq!(control_action(ControlCmd::Stop, Playing), Some(Action::Unload));
    assert_eq!(control_action(ControlCmd::Quit, Idle), Some(Action::Quit));
}

#[test]
fn play_track_selects_the_row_and_loads_it() {
    let engine = Loads::default();
    let loads = engine.0.clone();
    let mut controller = Controller::new(engine, ControllerOptions::default());
    let mut page = page(&["a", "b", "c"]);

    assert!(!apply(Action::PlayTrack(2), &mut controller, &mut page));
    assert_eq!(page.selected(), 2);
    assert_eq!(*loads.borrow(), vec![PathBuf::from("/music/c.mp3")]);
    assert_eq!(controller.state(), PlaybackState::Loading);

    assert!(!apply(Action::PlayTrack(9), &mut controller, &mut page));
    assert_eq!(loads.borrow().len(), 1);
}

#[test]
fn main_button_starts_the_first_track_and_quit_exits() {
    let engine = Loads::default();
    let loads = engine.0.clone();
    let mut controller = Controller::new(engine, ControllerOptions::default());
    let mut page = page(&["a", "b"]);

    apply(Action::MainButton, &mut controller, &mut page);
    assert_eq!(*loads.borrow(), vec![PathBuf::from("/music/a.mp3")]);
    assert!(apply(Action::Quit, &mut controller, &mut page));
}
