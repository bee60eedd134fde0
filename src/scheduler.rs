// ============================================================================
// Host Scheduling Collaborator
// ============================================================================
//
// The container never reaches for a global frame loop. The host hands it a
// scheduler on attach, and the container only keeps a weak reference to it.

use std::cell::Cell;

use bitflags::bitflags;

/// What the container asks of the host's frame loop.
pub trait FrameScheduler {
    /// Schedule a measure/layout pass.
    fn request_layout(&self);
    /// Schedule another animation frame.
    fn request_frame(&self);
}

bitflags! {
    /// Kinds of pending work.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct JobType: u8 {
        /// A measure/layout pass is needed
        const LAYOUT = 0b01;
        /// An animation frame is needed
        const FRAME  = 0b10;
    }
}

/// Single-threaded scheduler that records pending work.
///
/// Duplicate requests between two drains collapse into one pending job; the
/// counters still see every request.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Cell<JobType>,
    layout_requests: Cell<usize>,
    frame_requests: Cell<usize>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending jobs.
    pub fn drain(&self) -> JobType {
        self.pending.replace(JobType::empty())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.get().is_empty()
    }

    pub fn needs_layout(&self) -> bool {
        self.pending.get().contains(JobType::LAYOUT)
    }

    pub fn needs_frame(&self) -> bool {
        self.pending.get().contains(JobType::FRAME)
    }

    /// Layout requests seen since creation.
    pub fn layout_requests(&self) -> usize {
        self.layout_requests.get()
    }

    /// Frame requests seen since creation.
    pub fn frame_requests(&self) -> usize {
        self.frame_requests.get()
    }

    fn push(&self, job: JobType) {
        self.pending.set(self.pending.get() | job);
    }
}

impl FrameScheduler for FrameQueue {
    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
        self.push(JobType::LAYOUT);
    }

    fn request_frame(&self) {
        self.frame_requests.set(self.frame_requests.get() + 1);
        self.push(JobType::FRAME);
    }
}
