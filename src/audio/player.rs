use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::engine::{AudioEngine, Sound};
use super::thread::{EngineCmd, VoiceId, spawn_engine_thread};
use super::types::{ClockHandle, EngineEvent, LoadRequest, SoundClock};

/// `AudioEngine` backed by rodio on a dedicated audio thread.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    next_voice: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    /// Spawn the audio thread. Notifications arrive on the returned receiver.
    pub fn start() -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();
        let handle = spawn_engine_thread(rx, events_tx);

        let engine = Self {
            tx,
            next_voice: 0,
            join: Mutex::new(Some(handle)),
        };
        (engine, events_rx)
    }

    /// Stop every voice and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(EngineCmd::Shutdown);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl AudioEngine for RodioEngine {
    type Sound = RodioSound;

    fn load(&mut self, request: LoadRequest) -> RodioSound {
        let id = VoiceId(self.next_voice);
        self.next_voice += 1;

        let clock: ClockHandle = Arc::new(Mutex::new(SoundClock::default()));
        let _ = self.tx.send(EngineCmd::Load {
            id,
            request,
            clock: clock.clone(),
        });

        RodioSound {
            id,
            tx: self.tx.clone(),
            clock,
        }
    }
}

/// Handle to one voice on the audio thread.
pub struct RodioSound {
    id: VoiceId,
    tx: Sender<EngineCmd>,
    clock: ClockHandle,
}

impl Sound for RodioSound {
    fn play(&self) {
        let _ = self.tx.send(EngineCmd::Play(self.id));
    }

    fn pause(&self) {
        let _ = self.tx.send(EngineCmd::Pause(self.id));
    }

    fn stop(&self) {
        let _ = self.tx.send(EngineCmd::Stop(self.id));
    }

    fn seek(&self, position: Duration) {
        let _ = self.tx.send(EngineCmd::Seek(self.id, position));
    }

    fn position(&self) -> Duration {
        self.clock
            .lock()
            .map(|c| c.position())
            .unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        self.clock.lock().ok().and_then(|c| c.duration())
    }
}

impl Drop for RodioSound {
    fn drop(&mut self) {
        let _ = self.tx.send(EngineCmd::Release(self.id));
    }
}
