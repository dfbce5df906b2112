//! MPRIS bridge: exposes the player on the session bus so media keys and
//! tools like `playerctl` can drive it.
//!
//! Bus methods never touch the controller directly. They forward a
//! `ControlCmd` over a channel that the event loop drains on the UI thread.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use log::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::library::TrackItem;
use crate::player::PlaybackState;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.floatplay";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    url: Option<String>,
    track_id: Option<String>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Publish the current track, or clear the metadata with `None`.
    pub fn set_track(&self, track: Option<&TrackItem>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.title = track.map(|t| t.title.clone());
        s.url = track.map(|t| file_url(&t.source));
        s.track_id = track.map(|t| format!("{OBJECT_PATH}/track/{}", t.id.0));
    }
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn status_text(playback: PlaybackState) -> &'static str {
    match playback {
        PlaybackState::Loading | PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Idle | PlaybackState::Stopped => "Stopped",
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "floatplay"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        status_text(s.playback)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let track_id = s
            .track_id
            .as_deref()
            .and_then(|p| ObjectPath::try_from(p).ok());
        if let Some(Ok(v)) = track_id.map(|p| OwnedValue::try_from(Value::from(p))) {
            map.insert("mpris:trackid".to_string(), v);
        }

        for (key, value) in [("xesam:title", &s.title), ("xesam:url", &s.url)] {
            let Some(text) = value else {
                continue;
            };
            if let Ok(v) = OwnedValue::try_from(Value::from(text.clone())) {
                map.insert(key.to_string(), v);
            }
        }
        map
    }
}

/// Register the MPRIS service on a background thread.
///
/// Failing to reach the session bus is logged and otherwise ignored; the
/// player works the same without it.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    warn!("mpris: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                warn!("mpris: failed to acquire name {BUS_NAME}: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                warn!("mpris: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                warn!("mpris: failed to register player iface: {e}");
                return;
            }

            info!("mpris: registered as {BUS_NAME}");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
