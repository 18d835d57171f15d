// field/state.rs

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::canvas::Canvas;
use super::cell::{self, Cell};
use super::grid::{GridSpec, generate_cells};
use super::throttle::FrameThrottle;
use crate::config::{PixelFieldConfig, RevealOrigin};

/// Which way the whole field is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Expanding,
    Contracting,
}

impl Direction {
    /// Ticker increment for one frame
    pub fn step(self) -> i32 {
        match self {
            Direction::Expanding => 1,
            Direction::Contracting => -1,
        }
    }
}

/// What a single frame callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Canvas cleared and every cell redrawn
    Drawn,
    /// Called back too early; nothing drawn, loop still scheduled
    Skipped,
    /// Loop is cancelled (not yet sized, or torn down)
    Stopped,
}

/// The complete animation state for one container
#[derive(Debug, Clone)]
pub struct PixelField {
    gap: u32,
    speed: f32,
    palette_size: usize,
    origin: RevealOrigin,
    max_ticker: i32,

    cells: Vec<Cell>,
    ticker: i32,
    direction: Direction,
    width: u32,
    height: u32,

    throttle: FrameThrottle,
    /// Whether a frame callback is pending
    scheduled: bool,
    rng: StdRng,
}

impl PixelField {
    /// Create an unsized field; nothing animates until the first `resize`
    pub fn new(config: &PixelFieldConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        PixelField {
            gap: config.gap,
            speed: config.speed,
            palette_size: config.palette_size,
            origin: config.origin,
            max_ticker: config.max_ticker,
            cells: Vec::new(),
            ticker: 0,
            direction: Direction::Expanding,
            width: 0,
            height: 0,
            throttle: FrameThrottle::new(config.frame_interval_ms),
            scheduled: false,
            rng,
        }
    }

    // === Query Methods ===

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[cfg(test)]
    pub fn ticker(&self) -> i32 {
        self.ticker
    }

    #[cfg(test)]
    pub fn max_ticker(&self) -> i32 {
        self.max_ticker
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Every cell collapsed (vacuously true for an empty field)
    #[cfg(test)]
    pub fn all_hidden(&self) -> bool {
        self.cells.iter().all(|c| c.is_hidden)
    }

    // === Lifecycle ===

    /// React to a new container size: cancel, rebuild every cell, restart.
    ///
    /// A zero-size container leaves the loop cancelled until a real size arrives.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.cancel();

        self.width = width;
        self.height = height;

        let spec = GridSpec {
            width,
            height,
            gap: self.gap,
            speed: self.speed,
            palette_size: self.palette_size,
            origin: self.origin,
        };
        self.cells = generate_cells(&spec, &mut self.rng);
        self.ticker = 0;

        if width == 0 || height == 0 {
            log::debug!("Pixel field deferred: container is {}x{}", width, height);
            return;
        }

        log::debug!(
            "Pixel field regenerated: {}x{}, {} cells",
            width,
            height,
            self.cells.len()
        );
        self.scheduled = true;
    }

    /// Drop the pending frame callback
    pub fn cancel(&mut self) {
        self.scheduled = false;
    }

    /// Stop for good: cancel the loop and release the cells
    pub fn teardown(&mut self) {
        self.cancel();
        self.cells = Vec::new();
    }

    // === Frame Loop ===

    /// Host callback, once per repaint; throttled to the configured interval
    pub fn on_frame<C: Canvas + ?Sized>(&mut self, now_ms: f64, canvas: &mut C) -> FrameOutcome {
        if !self.scheduled {
            return FrameOutcome::Stopped;
        }

        if !self.throttle.ready(now_ms) {
            return FrameOutcome::Skipped;
        }

        self.step(canvas);
        FrameOutcome::Drawn
    }

    /// Advance every cell one frame and redraw, bypassing the throttle
    pub fn step<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.clear();

        if self.ticker >= self.max_ticker {
            self.direction = Direction::Contracting;
        } else if self.ticker <= 0 {
            self.direction = Direction::Expanding;
        }

        let mut all_hidden = true;

        for c in &mut self.cells {
            match self.direction {
                Direction::Expanding => cell::show(c),
                Direction::Contracting => {
                    cell::hide(c);
                    all_hidden &= c.is_hidden;
                }
            }

            cell::draw(c, canvas);
        }

        self.ticker += self.direction.step();

        if self.direction == Direction::Contracting && all_hidden {
            self.ticker = 0;
        }
    }
}
