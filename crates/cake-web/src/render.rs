// Canvas2D renderers for the cake scene and the celebration overlay.

mod cake;
pub mod helpers;
mod overlay;

pub use cake::CakeRenderer;
pub use overlay::OverlayRenderer;
