use super::*;
use crate::library::number_tracks;
use std::path::PathBuf;
use std::sync::mpsc;

fn make_track() -> TrackItem {
    number_tracks(vec![
        (PathBuf::from("/tmp/music/a.mp3"), "First".to_string()),
        (PathBuf::from("/tmp/music/test.mp3"), "Test Title".to_string()),
    ])
    .remove(1)
}

fn iface() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (iface, state, rx)
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let track = make_track();
    handle.set_track(Some(&track));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(
            s.track_id.as_deref(),
            Some("/org/mpris/MediaPlayer2/track/1")
        );
    }

    handle.set_track(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.url, None);
        assert_eq!(s.track_id, None);
    }
}

#[test]
fn playback_status_reports_loading_as_playing_and_idle_as_stopped() {
    let (iface, state, _rx) = iface();
    let cases = [
        (PlaybackState::Idle, "Stopped"),
        (PlaybackState::Loading, "Playing"),
        (PlaybackState::Playing, "Playing"),
        (PlaybackState::Paused, "Paused"),
        (PlaybackState::Stopped, "Stopped"),
    ];
    for (playback, expected) in cases {
        state.lock().unwrap().playback = playback;
        assert_eq!(iface.playback_status(), expected, "{playback:?}");
    }
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = iface();
    assert!(iface.metadata().is_empty());

    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_track(Some(&make_track()));

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:url"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn bus_methods_forward_control_commands() {
    let (iface, _state, rx) = iface();
    iface.play_pause();
    iface.next();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![ControlCmd::PlayPause, ControlCmd::Next, ControlCmd::Stop]
    );
}
