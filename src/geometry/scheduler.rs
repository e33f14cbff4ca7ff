/// Coalesces recompute requests to at most one per display frame.
///
/// High-frequency input (pan moves, resizes) calls [`FrameScheduler::request`]
/// any number of times; the renderer calls [`FrameScheduler::on_frame`] once per
/// refresh, which runs the work only if something was requested since the last
/// frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: bool,
    requests: u64,
    runs: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Runs `work` if a request is pending and clears it. Returns the work's
    /// output, or `None` when the frame had nothing to do.
    pub fn on_frame<T>(&mut self, work: impl FnOnce() -> T) -> Option<T> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.runs += 1;
        Some(work())
    }

    /// Total requests received.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Total frames that actually ran the work.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}
