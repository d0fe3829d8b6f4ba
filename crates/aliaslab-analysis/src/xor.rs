//! XOR-style difference accumulator.
//!
//! The accumulator scrolls through a source signal a few samples per tick and
//! keeps a rolling window per channel. Every incoming sample is compared with
//! the sample it displaces, i.e. the sample at the same offset of the previous
//! tick's chunk. The cell that sample produced is carried along as well:
//!
//! - `|new - old| <= threshold`: the cell becomes `0`, identical regions cancel
//! - otherwise the cell becomes `min(1, cell + |new - old| * 0.5)`, so
//!   differences persist and saturate at 1
//!
//! Cells therefore always lie in `[0, 1]`, and a cell is non-zero exactly when
//! its sample differed from the one it displaced.
//!
//! Once the source is exhausted the window freezes and is exposed as the final
//! "XOR image" until [`XorAccumulator::reset`].
//!
//! The accumulator is a plain `&mut` state machine. Whoever drives playback
//! calls [`XorAccumulator::tick`] once per frame; nothing runs in the
//! background.
//!
//! # Example
//!
//! ```rust
//! use aliaslab_analysis::xor::{AccumulatorState, XorAccumulator, XorConfig};
//! use aliaslab_core::SignalBuffer;
//!
//! let source = SignalBuffer::mono(100.0, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
//! let config = XorConfig { window: 4, scroll_speed: 2, similarity_threshold: 0.1 };
//! let mut acc = XorAccumulator::with_source(config, &source).unwrap();
//!
//! acc.play();
//! let image = acc.run_to_completion().unwrap();
//! assert_eq!(acc.state(), AccumulatorState::Completed);
//! // The repeated [0, 1] chunks cancel each other out
//! assert_eq!(image[0], vec![0.0, 0.0, 0.0, 0.0]);
//! ```

use aliaslab_core::error::check_unit_threshold;
use aliaslab_core::{Error, Result, SignalBuffer};
use serde::{Deserialize, Serialize};

/// Weight of the difference added to the displaced cell.
const BOOST: f32 = 0.5;

/// Window, scroll and threshold settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XorConfig {
    /// Rolling window length `W` in samples.
    pub window: usize,
    /// Samples consumed per tick.
    pub scroll_speed: usize,
    /// Differences at or below this cancel to 0.
    pub similarity_threshold: f32,
}

impl Default for XorConfig {
    fn default() -> Self {
        Self {
            window: 512,
            scroll_speed: 1,
            similarity_threshold: 0.1,
        }
    }
}

impl XorConfig {
    /// Build a config whose threshold follows the chunk size.
    ///
    /// Small chunks are compared strictly: 10 → 0.05, 32 → 0.1, anything
    /// else → 0.2.
    pub fn for_chunk_size(window: usize, scroll_speed: usize, chunk_size: usize) -> Self {
        Self {
            window,
            scroll_speed,
            similarity_threshold: chunk_threshold(chunk_size),
        }
    }

    /// Check window, scroll speed and threshold.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidArgument("xor window must be non-zero"));
        }
        if self.scroll_speed == 0 {
            return Err(Error::InvalidArgument("scroll speed must be non-zero"));
        }
        if self.scroll_speed > self.window {
            return Err(Error::InvalidArgument("scroll speed must not exceed the window"));
        }
        check_unit_threshold(self.similarity_threshold)?;
        Ok(())
    }
}

/// Similarity threshold for a chunk size.
pub fn chunk_threshold(chunk_size: usize) -> f32 {
    match chunk_size {
        10 => 0.05,
        32 => 0.1,
        _ => 0.2,
    }
}

/// Lifecycle of an accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccumulatorState {
    /// Not started, or reset.
    Idle,
    /// Consuming the source (possibly paused).
    Running,
    /// Source exhausted; the image is frozen.
    Completed,
}

/// Result of one [`XorAccumulator::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened.
    Idle,
    /// Running but paused; nothing happened.
    Paused,
    /// Consumed the given number of samples per channel.
    Advanced(usize),
    /// This tick exhausted the source. Reported once.
    Completed,
    /// Already completed; nothing happened.
    Frozen,
}

/// Rolling difference accumulator over a multi-channel source.
#[derive(Debug, Clone)]
pub struct XorAccumulator {
    config: XorConfig,
    source: Vec<Vec<f32>>,
    buffers: Vec<Vec<f32>>,
    previous: Vec<Vec<f32>>,
    previous_cells: Vec<Vec<f32>>,
    cursor: usize,
    state: AccumulatorState,
    paused: bool,
}

impl XorAccumulator {
    /// Create an idle accumulator without a source.
    pub fn new(config: XorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: Vec::new(),
            buffers: Vec::new(),
            previous: Vec::new(),
            previous_cells: Vec::new(),
            cursor: 0,
            state: AccumulatorState::Idle,
            paused: false,
        })
    }

    /// Create an idle accumulator over `source`.
    pub fn with_source(config: XorConfig, source: &SignalBuffer) -> Result<Self> {
        let mut acc = Self::new(config)?;
        acc.set_source(source);
        Ok(acc)
    }

    /// Replace the source signal. Resets to [`AccumulatorState::Idle`].
    pub fn set_source(&mut self, source: &SignalBuffer) {
        self.source = source.channels().map(<[f32]>::to_vec).collect();
        self.reset();
    }

    /// Replace the configuration. Resets to [`AccumulatorState::Idle`].
    pub fn set_config(&mut self, config: XorConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &XorConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Whether ticking is halted while running.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Samples consumed per channel so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the source in samples per channel.
    pub fn source_len(&self) -> usize {
        self.source.first().map_or(0, Vec::len)
    }

    /// Start or resume.
    ///
    /// From Idle this zeroes the windows and rewinds the cursor. A paused run
    /// resumes where it stopped. A completed run stays completed.
    pub fn play(&mut self) {
        match self.state {
            AccumulatorState::Idle => {
                self.clear();
                self.state = AccumulatorState::Running;
                self.paused = false;
            }
            AccumulatorState::Running => self.paused = false,
            AccumulatorState::Completed => {}
        }
    }

    /// Halt ticking without leaving [`AccumulatorState::Running`].
    pub fn pause(&mut self) {
        if self.state == AccumulatorState::Running {
            self.paused = true;
        }
    }

    /// Return to Idle and clear the windows, from any state.
    pub fn reset(&mut self) {
        self.state = AccumulatorState::Idle;
        self.paused = false;
        self.clear();
    }

    fn clear(&mut self) {
        let channels = self.source.len();
        self.buffers = vec![vec![0.0; self.config.window]; channels];
        self.previous = vec![vec![0.0; self.config.scroll_speed]; channels];
        self.previous_cells = vec![vec![0.0; self.config.scroll_speed]; channels];
        self.cursor = 0;
    }

    /// Advance by one scroll step.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            AccumulatorState::Idle => return TickOutcome::Idle,
            AccumulatorState::Completed => return TickOutcome::Frozen,
            AccumulatorState::Running if self.paused => return TickOutcome::Paused,
            AccumulatorState::Running => {}
        }

        let len = self.source_len();
        if self.cursor >= len {
            return self.complete();
        }

        let k = self.config.scroll_speed.min(len - self.cursor);
        let threshold = self.config.similarity_threshold;
        let window = self.config.window;

        for (((src, buf), prev), prev_cells) in self
            .source
            .iter()
            .zip(self.buffers.iter_mut())
            .zip(self.previous.iter_mut())
            .zip(self.previous_cells.iter_mut())
        {
            let incoming = &src[self.cursor..self.cursor + k];
            buf.copy_within(k.., 0);
            for (j, &new) in incoming.iter().enumerate() {
                let diff = (new - prev[j]).abs();
                let cell = if diff > threshold {
                    (prev_cells[j] + diff * BOOST).min(1.0)
                } else {
                    0.0
                };
                buf[window - k + j] = cell;
                prev[j] = new;
                prev_cells[j] = cell;
            }
        }

        self.cursor += k;
        if self.cursor >= len {
            self.complete()
        } else {
            TickOutcome::Advanced(k)
        }
    }

    fn complete(&mut self) -> TickOutcome {
        self.state = AccumulatorState::Completed;
        self.paused = false;
        tracing::debug!(samples = self.cursor, channels = self.buffers.len(), "xor image completed");
        TickOutcome::Completed
    }

    /// Live windows, one per channel.
    pub fn buffers(&self) -> &[Vec<f32>] {
        &self.buffers
    }

    /// The frozen image, available once completed.
    pub fn image(&self) -> Option<&[Vec<f32>]> {
        (self.state == AccumulatorState::Completed).then_some(self.buffers.as_slice())
    }

    /// Tick until the source is exhausted and return the image.
    ///
    /// Starts playback if idle and lifts a pause.
    pub fn run_to_completion(&mut self) -> Option<Vec<Vec<f32>>> {
        self.play();
        while self.state == AccumulatorState::Running {
            self.tick();
        }
        self.image().map(<[Vec<f32>]>::to_vec)
    }
}
