//! Per-cell state and the show / hide / flick steps.
//!
//! Cells are plain data; the field keeps them in one contiguous `Vec` and
//! drives them with the free functions below.

use rand::Rng;

use super::canvas::Canvas;

/// Smallest size a flickering cell bounces back from
pub const MIN_SIZE: f32 = 0.5;

/// How much a cell shrinks per frame once its hide delay has passed
pub const SHRINK_STEP: f32 = 0.05;

/// Size bound used when the grid spacing is too small to derive one
const FALLBACK_SIZE_BOUND: f32 = 2.0;

/// One grid-aligned animated square
#[derive(Debug, Clone)]
pub struct Cell {
    /// Top-left of the cell's box, container-local pixels
    pub x: f32,
    pub y: f32,
    pub color: [u8; 4],
    /// Flicker step magnitude
    pub speed: f32,
    pub size: f32,
    /// Growth per frame while revealing
    pub grow_step: f32,
    pub min_size: f32,
    /// Hard upper bound, also the side of the box the cell is centered in
    pub max_size_available: f32,
    /// Personal target; reaching it starts flicking
    pub max_size: f32,
    /// +1.0 growing, -1.0 shrinking (flicker only)
    pub size_direction: f32,
    pub delay: f32,
    pub hide_delay: f32,
    pub counter: f32,
    pub hide_counter: f32,
    pub counter_step: f32,
    pub is_hidden: bool,
    pub is_flicking: bool,
}

/// Grid-derived inputs for a new cell; the rest is randomized
#[derive(Debug, Clone, Copy)]
pub struct CellSeed {
    pub x: f32,
    pub y: f32,
    pub color: [u8; 4],
    /// Field-wide speed multiplier
    pub speed: f32,
    pub delay: f32,
    pub hide_delay: f32,
    pub counter_step: f32,
    /// Size bound derived from grid spacing (0 falls back to 2)
    pub size_bound: u32,
}

impl Cell {
    pub fn new(seed: CellSeed, rng: &mut impl Rng) -> Self {
        let max_size_available = if seed.size_bound == 0 {
            FALLBACK_SIZE_BOUND
        } else {
            seed.size_bound as f32
        };

        Cell {
            x: seed.x,
            y: seed.y,
            color: seed.color,
            speed: rng.random_range(0.1..0.9) * seed.speed,
            size: 0.0,
            grow_step: rng.random_range(0.0..0.5),
            min_size: MIN_SIZE,
            max_size_available,
            max_size: rng.random_range(MIN_SIZE..max_size_available),
            size_direction: 1.0,
            delay: seed.delay,
            hide_delay: seed.hide_delay,
            counter: 0.0,
            hide_counter: 0.0,
            counter_step: seed.counter_step,
            is_hidden: false,
            is_flicking: false,
        }
    }

    fn clamp_size(&mut self) {
        self.size = self.size.clamp(0.0, self.max_size_available);
    }
}

/// Reveal step: wait out the delay, grow to `max_size`, then flicker
pub fn show(cell: &mut Cell) {
    cell.is_hidden = false;
    cell.hide_counter = 0.0;

    if cell.counter <= cell.delay {
        cell.counter += cell.counter_step;
        return;
    }

    if cell.size >= cell.max_size {
        cell.is_flicking = true;
    }

    if cell.is_flicking {
        flick(cell);
    } else {
        cell.size += cell.grow_step;
        cell.clamp_size();
    }
}

/// Collapse step: keep flickering through the hide delay, then shrink to zero
pub fn hide(cell: &mut Cell) {
    cell.counter = 0.0;

    if cell.hide_counter <= cell.hide_delay {
        cell.hide_counter += cell.counter_step;
        if cell.is_flicking {
            flick(cell);
        }
        return;
    }

    cell.is_flicking = false;

    if cell.size <= 0.0 {
        cell.size = 0.0;
        cell.is_hidden = true;
    } else {
        cell.size = (cell.size - SHRINK_STEP).max(0.0);
    }
}

/// Bounce between `min_size` and `max_size` at the cell's speed
pub fn flick(cell: &mut Cell) {
    if cell.size >= cell.max_size {
        cell.size_direction = -1.0;
    } else if cell.size <= cell.min_size {
        cell.size_direction = 1.0;
    }

    cell.size += cell.size_direction * cell.speed;
    cell.clamp_size();
}

/// Draw the cell centered inside its `max_size_available` box
pub fn draw<C: Canvas + ?Sized>(cell: &Cell, canvas: &mut C) {
    let offset = cell.max_size_available * 0.5 - cell.size * 0.5;
    canvas.fill_rect(
        cell.x + offset,
        cell.y + offset,
        cell.size,
        cell.size,
        cell.color,
    );
}
