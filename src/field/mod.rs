pub mod canvas;
pub mod cell;
pub mod grid;
pub mod state;
pub mod throttle;

pub use canvas::PixelBuffer;
pub use state::{FrameOutcome, PixelField};
