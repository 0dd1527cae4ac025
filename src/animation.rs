/*
 * Animation Loop Module
 *
 * The host calls into the loop once per display frame. The loop runs a
 * single update+render pass per call until it is cancelled; cancellation is
 * final and is the only way to stop a field. The token is shared so the host
 * can cancel from an event handler without holding the field.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct AnimationLoop {
    token: CancellationToken,
    frames: u64,
    last_frame: Option<Instant>,
    frame_time: Duration,
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
            frames: 0,
            last_frame: None,
            frame_time: Duration::ZERO,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    // Run one frame's pass unless cancelled. The cancellation check happens
    // before the pass starts; a pass that has started always completes.
    pub fn run_frame<F: FnOnce()>(&mut self, pass: F) -> bool {
        if !self.is_running() {
            return false;
        }

        let now = Instant::now();
        if let Some(last) = self.last_frame {
            self.frame_time = now.duration_since(last);
        }
        self.last_frame = Some(now);

        pass();
        self.frames += 1;
        true
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    // Wall-clock time between the last two frames
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_until_cancelled() {
        let mut animation = AnimationLoop::new();
        let mut passes = 0;
        for _ in 0..3 {
            assert!(animation.run_frame(|| passes += 1));
        }
        assert_eq!(passes, 3);

        animation.cancel();
        for _ in 0..10 {
            assert!(!animation.run_frame(|| passes += 1));
        }
        assert_eq!(passes, 3);
        assert_eq!(animation.frames(), 3);
    }

    #[test]
    fn shared_token_cancels_the_loop() {
        let mut animation = AnimationLoop::new();
        let token = animation.token();
        token.cancel();
        assert!(!animation.is_running());
        assert!(!animation.run_frame(|| panic!("cancelled loop ran a pass")));
    }
}
