use std::path::Path;

use crate::audio::{
    AudioEngine, EngineEvent, EngineEventKind, Generation, LoadError, LoadRequest, Sound,
};
use crate::config::Settings;
use crate::library::TrackItem;

use super::presentation::{Marker, Presentation};
use super::session::{PlaybackState, Session};
use super::time::format_time;

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Streaming hint passed with every load.
    pub streaming: bool,
    /// Time label shown while a track loads.
    pub loading_label: String,
    /// Tear the session down when the last track ends.
    pub hide_player_on_end: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ControllerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            streaming: settings.audio.streaming,
            loading_label: settings.ui.loading_label.clone(),
            hide_player_on_end: settings.ui.hide_player_on_end,
        }
    }
}

/// Track playback controller.
///
/// Owns the engine and the session. Every user trigger and every engine
/// notification lands on one of the methods here, always on the event-loop
/// thread. Presentation state is passed in by the caller.
pub struct Controller<E: AudioEngine> {
    engine: E,
    session: Session<E::Sound>,
    options: ControllerOptions,
}

impl<E: AudioEngine> Controller<E> {
    pub fn new(engine: E, options: ControllerOptions) -> Self {
        Self {
            engine,
            session: Session::default(),
            options,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<E::Sound> {
        &self.session
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn current_track(&self) -> Option<&TrackItem> {
        self.session.track()
    }

    /// Play `track`, or toggle it if it already owns the session.
    pub fn request_play<P: Presentation>(&mut self, page: &mut P, track: TrackItem) {
        if self.session.is_current_track(track.id) && self.session.handle.is_some() {
            self.toggle();
            return;
        }

        if let Some(previous) = self.session.handle.take() {
            previous.stop();
            self.session.playing = false;
            self.session.refresh.cancel();
            page.clear_active_track();
        }

        let generation = self.session.begin(track.clone());
        page.add_markers(track.id, &[Marker::Current, Marker::Loading]);
        page.set_player_title(&track.title);
        page.set_time_label(&self.options.loading_label);
        page.show_player();

        log::info!(
            "loading {} {} ({generation})",
            track.id,
            track.source.display()
        );
        let sound = self.engine.load(LoadRequest {
            source: track.source,
            streaming: self.options.streaming,
            generation,
        });
        self.session.handle = Some(sound);
    }

    /// Pause when playing, play otherwise. Nothing to do without a handle.
    pub fn toggle(&mut self) {
        let Some(handle) = self.session.handle.as_ref() else {
            return;
        };
        if self.session.playing {
            handle.pause();
        } else {
            handle.play();
        }
    }

    /// Move on to the track after the current one, or stop at the end of the list.
    pub fn advance<P: Presentation>(&mut self, page: &mut P) {
        let Some(current) = self.session.track.as_ref() else {
            return;
        };

        if let Some(next) = page.next_track(current.id) {
            self.request_play(page, next);
            return;
        }

        log::info!("end of track list");
        if let Some(handle) = self.session.handle.as_ref() {
            handle.stop();
        }
        self.session.playing = false;
        self.session.refresh.cancel();
        self.session.state = PlaybackState::Stopped;

        if self.options.hide_player_on_end {
            page.clear_active_track();
            page.hide_player();
            self.session.reset();
        }
    }

    /// Start the first track when idle, otherwise toggle.
    pub fn handle_main_button<P: Presentation>(&mut self, page: &mut P) {
        if self.session.handle.is_none() || self.session.track.is_none() {
            if let Some(first) = page.first_track() {
                self.request_play(page, first);
            }
        } else {
            self.toggle();
        }
    }

    /// Seek to `ratio` of the current track's length.
    pub fn handle_seek(&mut self, ratio: f64) {
        let Some(handle) = self.session.handle.as_ref() else {
            return;
        };
        let Some(duration) = handle.duration().filter(|d| !d.is_zero()) else {
            return;
        };
        if !ratio.is_finite() {
            return;
        }

        let target = duration.mul_f64(ratio.clamp(0.0, 1.0));
        log::debug!("seek to {:.1}s", target.as_secs_f64());
        handle.seek(target);
    }

    /// One display frame: refresh the time label and progress while the
    /// refresh task runs.
    pub fn on_frame<P: Presentation>(&mut self, page: &mut P) {
        if self.session.handle.is_none() {
            self.session.refresh.cancel();
            return;
        }
        if self.session.refresh.tick() {
            self.refresh_time(page);
        }
    }

    /// Stop whatever is loaded. Called when the program shuts down.
    pub fn unload(&mut self) {
        if let Some(handle) = self.session.handle.as_ref() {
            handle.stop();
            self.session.state = PlaybackState::Stopped;
        }
        self.session.playing = false;
        self.session.refresh.cancel();
    }

    /// React to an engine notification.
    pub fn handle_event<P: Presentation>(&mut self, page: &mut P, event: EngineEvent) {
        let EngineEvent { generation, kind } = event;

        if let EngineEventKind::LoadFailed { source, error } = &kind {
            log_load_failure(source, error);
        }

        if !self.session.is_current(generation) {
            log::debug!("dropping stale {kind:?} from {generation}");
            return;
        }

        match kind {
            EngineEventKind::Loaded => {
                // A stop issued while loading wins over the late load.
                if self.session.state != PlaybackState::Loading {
                    log::debug!("loaded after stop, not starting ({generation})");
                    return;
                }
                if let Some(handle) = self.session.handle.as_ref() {
                    handle.play();
                }
            }
            EngineEventKind::Played => self.on_played(page, generation),
            EngineEventKind::Paused => {
                self.session.playing = false;
                self.session.refresh.cancel();
                self.session.state = PlaybackState::Paused;
                if let Some(track) = self.session.track.as_ref() {
                    page.remove_markers(track.id, &[Marker::Playing]);
                }
            }
            EngineEventKind::Stopped => {
                self.session.playing = false;
                self.session.refresh.cancel();
                self.session.state = PlaybackState::Stopped;
            }
            EngineEventKind::LoadFailed { .. } => {
                page.clear_active_track();
                page.hide_player();
                self.session.reset();
            }
            EngineEventKind::Ended => self.advance(page),
        }
    }

    fn on_played<P: Presentation>(&mut self, page: &mut P, generation: Generation) {
        self.session.playing = true;
        self.session.state = PlaybackState::Playing;

        if let Some(track) = self.session.track.as_ref() {
            page.remove_markers(track.id, &[Marker::Loading]);
            page.add_markers(track.id, &[Marker::Current, Marker::Playing]);
            page.set_player_title(&track.title);
            page.show_player();
        }

        if !self.session.refresh.start() {
            log::debug!("time refresh already running ({generation})");
        }
        self.refresh_time(page);
    }

    fn refresh_time<P: Presentation>(&self, page: &mut P) {
        let Some(handle) = self.session.handle.as_ref() else {
            return;
        };

        let position = handle.position().as_secs_f64();
        let duration = handle.duration().map_or(f64::NAN, |d| d.as_secs_f64());

        page.set_time_label(&format!(
            "{} / {}",
            format_time(position),
            format_time(duration)
        ));
        if duration > 0.0 {
            page.set_progress(position / duration * 100.0);
        }
    }
}

/// Load failures are logged whether or not the load is still current.
fn log_load_failure(source: &Path, error: &LoadError) {
    log::error!(
        "failed to load audio {}: {error} (code {})",
        source.display(),
        error.code()
    );
}
