/// Fixed-rate frame scheduler.
///
/// At most one frame request is outstanding at a time.  A request is
/// identified by a `FrameHandle`; cancelling is done by handing the handle
/// back, never by flag-checking inside the frame callback.

use std::time::{Duration, Instant};

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug)]
struct Pending {
    handle: FrameHandle,
    due: Instant,
}

#[derive(Debug)]
pub struct FrameScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<Pending>,
    last_fire: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            next_id: 0,
            pending: None,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ask for the next frame.  Due one interval after the previous frame
    /// fired, or immediately if none has fired yet.
    pub fn request_frame(&mut self, now: Instant) -> Result<FrameHandle> {
        if self.pending.is_some() {
            return Err(GameError::FrameAlreadyScheduled);
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        let due = match self.last_fire {
            Some(last) => (last + self.interval).max(now),
            None => now,
        };
        self.pending = Some(Pending { handle, due });
        Ok(handle)
    }

    /// Cancel an outstanding request.  Returns false for stale handles.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        match &self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                tracing::trace!(?handle, "Cancelled frame");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand out the outstanding frame if its deadline has passed.
    pub fn fire_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match &self.pending {
            Some(p) if p.due <= now => {
                let handle = p.handle;
                self.pending = None;
                self.last_fire = Some(now);
                Some(handle)
            }
            _ => None,
        }
    }

    /// How long until the outstanding frame is due, if one is scheduled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_request_is_refused() {
        let mut s = FrameScheduler::new(60);
        let now = Instant::now();
        s.request_frame(now).unwrap();
        assert!(matches!(
            s.request_frame(now),
            Err(GameError::FrameAlreadyScheduled)
        ));
    }

    #[test]
    fn cancel_only_accepts_current_handle() {
        let mut s = FrameScheduler::new(60);
        let now = Instant::now();
        let first = s.request_frame(now).unwrap();
        assert!(s.cancel(first));
        let second = s.request_frame(now).unwrap();
        assert!(!s.cancel(first));
        assert!(s.is_pending());
        assert!(s.cancel(second));
        assert!(!s.is_pending());
    }

    #[test]
    fn frames_are_spaced_by_interval() {
        let mut s = FrameScheduler::new(10);
        let t0 = Instant::now();
        assert_eq!(s.interval(), Duration::from_millis(100));
        let h = s.request_frame(t0).unwrap();
        assert_eq!(s.fire_due(t0), Some(h));

        s.request_frame(t0).unwrap();
        assert_eq!(s.fire_due(t0 + Duration::from_millis(50)), None);
        assert_eq!(
            s.time_until_due(t0 + Duration::from_millis(50)),
            Some(Duration::from_millis(50))
        );
        assert!(s.fire_due(t0 + Duration::from_millis(100)).is_some());
    }
}
