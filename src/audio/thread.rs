use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::error::LoadError;
use super::sink::{create_sink_at, probe_duration};
use super::types::{ClockHandle, EngineEvent, EngineEventKind, Generation, LoadRequest, SoundClock};

/// How often the audio thread checks for drained sinks.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(super) struct VoiceId(pub(super) u64);

#[derive(Debug)]
pub(super) enum EngineCmd {
    Load {
        id: VoiceId,
        request: LoadRequest,
        clock: ClockHandle,
    },
    Play(VoiceId),
    Pause(VoiceId),
    Stop(VoiceId),
    Seek(VoiceId, Duration),
    /// The handle was dropped; forget the voice.
    Release(VoiceId),
    Shutdown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum VoiceState {
    Ready,
    Playing,
    Paused,
    Stopped,
    Ended,
}

/// Everything the audio thread keeps for one loaded handle.
pub(super) struct Voice {
    generation: Generation,
    source: PathBuf,
    streaming: bool,
    sink: Option<Sink>,
    clock: ClockHandle,
    state: VoiceState,
    /// Where the next replay of a stopped or ended voice starts.
    resume_at: Duration,
}

impl Voice {
    fn emit(&self, events: &Sender<EngineEvent>, kind: EngineEventKind) {
        let _ = events.send(EngineEvent::new(self.generation, kind));
    }

    fn with_clock(&self, f: impl FnOnce(&mut SoundClock)) {
        if let Ok(mut clock) = self.clock.lock() {
            f(&mut clock);
        }
    }

    /// Replace the sink with a fresh one positioned at `start_at`.
    fn rebuild(&mut self, stream: &OutputStream, start_at: Duration) -> Result<(), LoadError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let prepared = create_sink_at(stream, &self.source, self.streaming, start_at)?;
        self.sink = Some(prepared.sink);
        Ok(())
    }
}

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                log::error!("no audio output device: {e}");
                None
            }
        };

        let mut voices: HashMap<VoiceId, Voice> = HashMap::new();

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(EngineCmd::Shutdown) => {
                    for voice in voices.values() {
                        if let Some(s) = voice.sink.as_ref() {
                            s.stop();
                        }
                    }
                    break;
                }
                Ok(cmd) => handle_cmd(cmd, stream.as_ref(), &mut voices, &events),
                Err(RecvTimeoutError::Timeout) => reap_finished(&mut voices, &events),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

pub(super) fn handle_cmd(
    cmd: EngineCmd,
    stream: Option<&OutputStream>,
    voices: &mut HashMap<VoiceId, Voice>,
    events: &Sender<EngineEvent>,
) {
    match cmd {
        EngineCmd::Load { id, request, clock } => {
            let Some(stream) = stream else {
                let _ = events.send(EngineEvent::new(
                    request.generation,
                    EngineEventKind::LoadFailed {
                        source: request.source,
                        error: LoadError::NoOutputDevice,
                    },
                ));
                return;
            };

            match create_sink_at(stream, &request.source, request.streaming, Duration::ZERO) {
                Ok(prepared) => {
                    let duration = prepared
                        .total_duration
                        .or_else(|| probe_duration(&request.source));
                    if let Ok(mut c) = clock.lock() {
                        c.reset();
                        c.set_duration(duration);
                    }
                    log::debug!(
                        "loaded {} ({}, {:?})",
                        request.source.display(),
                        request.generation,
                        duration
                    );

                    let voice = Voice {
                        generation: request.generation,
                        source: request.source,
                        streaming: request.streaming,
                        sink: Some(prepared.sink),
                        clock,
                        state: VoiceState::Ready,
                        resume_at: Duration::ZERO,
                    };
                    voice.emit(events, EngineEventKind::Loaded);
                    voices.insert(id, voice);
                }
                Err(error) => {
                    let _ = events.send(EngineEvent::new(
                        request.generation,
                        EngineEventKind::LoadFailed {
                            source: request.source,
                            error,
                        },
                    ));
                }
            }
        }

        EngineCmd::Play(id) => {
            let Some(voice) = voices.get_mut(&id) else {
                return;
            };
            match voice.state {
                VoiceState::Playing => {}
                VoiceState::Ready | VoiceState::Paused => {
                    if let Some(s) = voice.sink.as_ref() {
                        s.play();
                    }
                    voice.with_clock(|c| c.start());
                    voice.state = VoiceState::Playing;
                    voice.emit(events, EngineEventKind::Played);
                }
                VoiceState::Stopped | VoiceState::Ended => {
                    // The old sink is gone; start over from the beginning or
                    // from wherever a seek left it.
                    let Some(stream) = stream else {
                        return;
                    };
                    let start_at = voice.resume_at;
                    match voice.rebuild(stream, start_at) {
                        Ok(()) => {
                            if let Some(s) = voice.sink.as_ref() {
                                s.play();
                            }
                            voice.with_clock(|c| {
                                c.reset();
                                c.jump_to(start_at);
                                c.start();
                            });
                            voice.resume_at = Duration::ZERO;
                            voice.state = VoiceState::Playing;
                            voice.emit(events, EngineEventKind::Played);
                        }
                        Err(error) => {
                            let source = voice.source.clone();
                            voice.emit(events, EngineEventKind::LoadFailed { source, error });
                        }
                    }
                }
            }
        }

        EngineCmd::Pause(id) => {
            let Some(voice) = voices.get_mut(&id) else {
                return;
            };
            if voice.state == VoiceState::Playing {
                if let Some(s) = voice.sink.as_ref() {
                    s.pause();
                }
                voice.with_clock(|c| c.pause());
                voice.state = VoiceState::Paused;
                voice.emit(events, EngineEventKind::Paused);
            }
        }

        EngineCmd::Stop(id) => {
            let Some(voice) = voices.get_mut(&id) else {
                return;
            };
            if let Some(s) = voice.sink.take() {
                s.stop();
            }
            voice.with_clock(|c| c.reset());
            voice.resume_at = Duration::ZERO;
            voice.state = VoiceState::Stopped;
            voice.emit(events, EngineEventKind::Stopped);
        }

        EngineCmd::Seek(id, position) => {
            let Some(voice) = voices.get_mut(&id) else {
                return;
            };
            if voice.sink.is_none() {
                // Stopped or ended: nothing to rebuild until the next play.
                voice.resume_at = position;
                voice.with_clock(|c| c.jump_to(position));
                return;
            }
            let Some(stream) = stream else {
                return;
            };

            // Scrubbing: rebuild the current sink and skip into the file.
            match voice.rebuild(stream, position) {
                Ok(()) => {
                    if voice.state == VoiceState::Playing {
                        if let Some(s) = voice.sink.as_ref() {
                            s.play();
                        }
                    }
                    voice.with_clock(|c| c.jump_to(position));
                }
                Err(e) => {
                    log::warn!("seek in {} failed: {e}", voice.source.display());
                }
            }
        }

        EngineCmd::Release(id) => {
            if let Some(voice) = voices.remove(&id) {
                if let Some(s) = voice.sink.as_ref() {
                    s.stop();
                }
            }
        }

        EngineCmd::Shutdown => {}
    }
}

/// Mark playing voices whose sink drained as ended.
pub(super) fn reap_finished(voices: &mut HashMap<VoiceId, Voice>, events: &Sender<EngineEvent>) {
    for voice in voices.values_mut() {
        let drained = voice.sink.as_ref().is_some_and(|s| s.empty());
        if voice.state == VoiceState::Playing && drained {
            voice.sink = None;
            voice.with_clock(|c| c.pause());
            voice.resume_at = Duration::ZERO;
            voice.state = VoiceState::Ended;
            voice.emit(events, EngineEventKind::Ended);
        }
    }
}

#[cfg(test)]
impl Voice {
    /// A voice as the thread would hold it, without opening any media.
    pub(super) fn detached(
        generation: Generation,
        source: PathBuf,
        sink: Option<Sink>,
        state: VoiceState,
    ) -> Self {
        Self {
            generation,
            source,
            streaming: true,
            sink,
            clock: ClockHandle::default(),
            state,
            resume_at: Duration::ZERO,
        }
    }

    pub(super) fn state(&self) -> VoiceState {
        self.state
    }

    pub(super) fn resume_at(&self) -> Duration {
        self.resume_at
    }

    pub(super) fn position(&self) -> Duration {
        self.clock
            .lock()
            .map(|c| c.position())
            .unwrap_or(Duration::ZERO)
    }
}
