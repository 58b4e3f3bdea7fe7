use std::time::Instant;

/// Weight of the new sample in the moving average.
const NEW_SAMPLE_WEIGHT: f32 = 0.05;

/// Frame rate of the preview loop, as an exponential moving average of the
/// interval between consecutive frames.
///
/// The first frame only starts the clock, so the rate stays at zero until
/// the second one.
///
/// # Examples
///
/// ```
/// use inkfit_io::fps_counter::FpsCounter;
///
/// let mut fps_counter = FpsCounter::new();
///
/// for _ in 0..100 {
///    fps_counter.update();
/// }
/// assert_eq!(fps_counter.frames(), 100);
/// ```
#[derive(Debug, Default)]
pub struct FpsCounter {
    previous: Option<Instant>,
    frames: usize,
    fps: f32,
}

impl FpsCounter {
    /// Creates a counter that has not seen any frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// The smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// The number of frames recorded.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Records a frame finished now.
    pub fn update(&mut self) {
        self.record(Instant::now());
    }

    fn record(&mut self, now: Instant) {
        self.frames += 1;

        let Some(previous) = self.previous.replace(now) else {
            return;
        };

        let interval = now.saturating_duration_since(previous).as_secs_f32();
        // below the timer resolution
        if interval <= 0.0 {
            return;
        }

        let rate = interval.recip();
        self.fps = if self.fps > 0.0 {
            self.fps + NEW_SAMPLE_WEIGHT * (rate - self.fps)
        } else {
            rate
        };
    }
}
