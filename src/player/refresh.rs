/// The time-display refresh task.
///
/// The event loop offers one tick per rendered frame; the task only takes
/// it while running. Starting a running task does nothing, so at most one
/// refresh ever ticks.
#[derive(Debug, Default)]
pub struct RefreshTask {
    running: bool,
    ticks: u64,
}

impl RefreshTask {
    /// Returns `false` when the task was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn cancel(&mut self) {
        if self.running {
            log::debug!("time refresh stopped after {} frames", self.ticks);
        }
        self.running = false;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Consume one frame. Returns whether the display should refresh.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.ticks += 1;
        }
        self.running
    }

    /// Frames consumed since creation.
    #[cfg(test)]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
