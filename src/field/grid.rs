//! Grid layout, palette and radial delays for a fresh set of cells.

use bevy::color::{ColorToPacked, Hsla, Srgba};
use rand::Rng;

use super::cell::{Cell, CellSeed};
use crate::config::RevealOrigin;

/// Hue spread added per palette entry (degrees)
const HUE_STEP: f32 = 10.0;

/// Per-frame delay counter step, as a fraction of (width + height)
const COUNTER_STEP_FACTOR: f32 = 0.005;

/// Everything needed to lay out one grid
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub width: u32,
    pub height: u32,
    pub gap: u32,
    pub speed: f32,
    pub palette_size: usize,
    pub origin: RevealOrigin,
}

/// Largest square a cell may occupy, derived from grid spacing
pub fn size_bound(gap: u32) -> u32 {
    gap / 2
}

/// Random base hue, then `size` colors stepping the hue upward
pub fn palette(size: usize, rng: &mut impl Rng) -> Vec<[u8; 4]> {
    let base: f32 = rng.random_range(0.0_f32..360.0).floor();

    (0..size)
        .map(|index| {
            let upper = base + (index + 1) as f32 * HUE_STEP;
            let hue = rng.random_range(base..upper).floor().rem_euclid(360.0);
            let lightness = rng.random_range(0.5..1.0);
            Srgba::from(Hsla::hsl(hue, 1.0, lightness)).to_u8_array()
        })
        .collect()
}

/// Distance from the reveal origin; bottom-center or top-center of the container
pub fn delay_from_origin(x: f32, y: f32, width: f32, height: f32, origin: RevealOrigin) -> f32 {
    let dx = x - width * 0.5;
    let dy = match origin {
        RevealOrigin::Bottom => y - height,
        RevealOrigin::Top => y,
    };
    (dx * dx + dy * dy).sqrt()
}

/// Grid positions that fit inside the container, column by column
pub fn grid_positions(width: u32, height: u32, gap: u32) -> impl Iterator<Item = (u32, u32)> {
    let gap = gap.max(1) as usize;
    let bound = size_bound(gap as u32);

    (0..width).step_by(gap).flat_map(move |x| {
        (0..height)
            .step_by(gap)
            .filter(move |&y| x + bound <= width && y + bound <= height)
            .map(move |y| (x, y))
    })
}

/// Build the full cell set for a container; empty for a zero-size container
pub fn generate_cells(spec: &GridSpec, rng: &mut impl Rng) -> Vec<Cell> {
    if spec.width == 0 || spec.height == 0 {
        return Vec::new();
    }

    let colors = palette(spec.palette_size.max(1), rng);
    let width = spec.width as f32;
    let height = spec.height as f32;
    let counter_step = (width + height) * COUNTER_STEP_FACTOR * spec.speed;
    let field_speed = rng.random_range(0.008..0.25) * spec.speed;
    let bound = size_bound(spec.gap);

    grid_positions(spec.width, spec.height, spec.gap)
        .map(|(x, y)| {
            let (x, y) = (x as f32, y as f32);
            let color = colors[rng.random_range(0..colors.len())];
            let delay = delay_from_origin(x, y, width, height, spec.origin) / spec.speed;

            Cell::new(
                CellSeed {
                    x,
                    y,
                    color,
                    speed: field_speed,
                    delay,
                    hide_delay: delay,
                    counter_step,
                    size_bound: bound,
                },
                rng,
            )
        })
        .collect()
}
