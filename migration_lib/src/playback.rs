use std::time::Duration;

/// Set of signals the playhead reacts to, mostly coming from key presses and
/// the controls window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSignal {
    TickForward,
    TickBackward,
    UpdatePlayhead(usize),
    SwitchDirection,
    PlayPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Frame driven, repeating animation clock.
///
/// Frames run over `0..num_frames` and wrap around in either direction.
#[derive(Debug, Clone)]
pub struct Playhead {
    frame: usize,
    num_frames: usize,
    paused: bool,
    direction: Direction,
    interval: Duration,
    /// wall time accumulated since the last advance
    since_advance: Duration,
}

impl Playhead {
    pub fn new(num_frames: usize, interval_ms: u64) -> Self {
        Playhead {
            frame: 0,
            num_frames: num_frames.max(1),
            paused: false,
            direction: Direction::Forward,
            interval: Duration::from_millis(interval_ms.max(1)),
            since_advance: Duration::ZERO,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval = Duration::from_millis(interval_ms.max(1));
    }

    /// Resizes the frame range, keeping the current frame when it still fits
    pub fn set_num_frames(&mut self, num_frames: usize) {
        self.num_frames = num_frames.max(1);
        if self.frame >= self.num_frames {
            self.frame = 0;
        }
    }

    pub fn rewind(&mut self) {
        self.frame = 0;
        self.since_advance = Duration::ZERO;
    }

    /// Advances one frame in the current direction, does nothing while paused.
    /// Returns true when the playhead wrapped around.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.step(self.direction)
    }

    fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                self.frame += 1;
                if self.frame >= self.num_frames {
                    self.frame = 0;
                    return true;
                }
            }
            Direction::Backward => {
                if self.frame == 0 {
                    self.frame = self.num_frames - 1;
                    return true;
                }
                self.frame -= 1;
            }
        }
        false
    }

    /// Accumulates `elapsed` and reports whether a full interval has passed, in
    /// which case the accumulator is drained by one interval.
    pub fn should_advance(&mut self, elapsed: Duration) -> bool {
        if self.paused {
            return false;
        }
        self.since_advance += elapsed;
        if self.since_advance >= self.interval {
            self.since_advance -= self.interval;
            // never queue up more than one frame after a stall
            if self.since_advance >= self.interval {
                self.since_advance = Duration::ZERO;
            }
            true
        } else {
            false
        }
    }

    pub fn signal(&mut self, signal: PlaybackSignal) {
        match signal {
            PlaybackSignal::TickForward => {
                self.step(Direction::Forward);
            }
            PlaybackSignal::TickBackward => {
                self.step(Direction::Backward);
            }
            PlaybackSignal::UpdatePlayhead(frame) => {
                self.frame = frame.min(self.num_frames - 1);
            }
            PlaybackSignal::SwitchDirection => {
                self.direction = match self.direction {
                    Direction::Forward => Direction::Backward,
                    Direction::Backward => Direction::Forward,
                }
            }
            PlaybackSignal::PlayPause => {
                self.paused = !self.paused;
                self.since_advance = Duration::ZERO;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Direction, PlaybackSignal, Playhead};

    #[test]
    fn wraps_after_last_frame() {
        let mut ph = Playhead::new(3, 50);

        assert!(!ph.tick());
        assert!(!ph.tick());
        assert_eq!(ph.frame(), 2);
        assert!(ph.tick());
        assert_eq!(ph.frame(), 0);
    }

    #[test]
    fn backward_wraps_to_last_frame() {
        let mut ph = Playhead::new(300, 50);
        ph.signal(PlaybackSignal::SwitchDirection);

        assert_eq!(ph.direction(), Direction::Backward);
        assert!(ph.tick());
        assert_eq!(ph.frame(), 299);
    }

    #[test]
    fn paused_playhead_does_not_tick() {
        let mut ph = Playhead::new(10, 50);
        ph.signal(PlaybackSignal::PlayPause);

        assert!(ph.is_paused());
        ph.tick();
        assert_eq!(ph.frame(), 0);
        assert!(!ph.should_advance(Duration::from_secs(1)));
    }

    #[test]
    fn manual_steps_work_while_paused() {
        let mut ph = Playhead::new(10, 50);
        ph.signal(PlaybackSignal::PlayPause);
        ph.signal(PlaybackSignal::TickForward);
        ph.signal(PlaybackSignal::TickForward);
        ph.signal(PlaybackSignal::TickBackward);

        assert_eq!(ph.frame(), 1);
    }

    #[test]
    fn seek_is_clamped() {
        let mut ph = Playhead::new(10, 50);
        ph.signal(PlaybackSignal::UpdatePlayhead(4));
        assert_eq!(ph.frame(), 4);

        ph.signal(PlaybackSignal::UpdatePlayhead(40));
        assert_eq!(ph.frame(), 9);
    }

    #[test]
    fn advances_once_per_interval() {
        let mut ph = Playhead::new(10, 50);
        assert_eq!(ph.interval(), Duration::from_millis(50));

        assert!(!ph.should_advance(Duration::from_millis(30)));
        assert!(ph.should_advance(Duration::from_millis(30)));
        // 10ms carried over
        assert!(!ph.should_advance(Duration::from_millis(30)));
        assert!(ph.should_advance(Duration::from_millis(10)));
    }

    #[test]
    fn stall_does_not_queue_frames() {
        let mut ph = Playhead::new(10, 50);

        assert!(ph.should_advance(Duration::from_millis(500)));
        assert!(!ph.should_advance(Duration::from_millis(1)));
    }

    #[test]
    fn shrinking_resets_out_of_range_frame() {
        let mut ph = Playhead::new(10, 50);
        ph.signal(PlaybackSignal::UpdatePlayhead(8));
        ph.set_num_frames(5);

        assert_eq!(ph.frame(), 0);
        assert_eq!(ph.num_frames(), 5);
    }
}
