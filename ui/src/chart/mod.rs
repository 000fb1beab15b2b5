//! Grouped bar chart (previous vs. current per category).
//!
//! [`layout`] computes geometry, [`render`] replays it onto any
//! [`surface::DrawSurface`]: a `tiny-skia` pixmap natively, the 2D canvas
//! context on the web, or a command recorder in tests.

pub mod layout;
pub mod render;
pub mod style;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
mod glyphs;
#[cfg(not(target_arch = "wasm32"))]
pub mod raster;

pub use layout::{BarChartLayout, BarGroup, ChartError, ChartSize, GridLine};
pub use render::render_bar_chart;
pub use style::{ChartStyle, Rgba};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Rect, ScopedSurface, TextAlign, TextStyle};

#[cfg(not(target_arch = "wasm32"))]
pub use raster::{render_png, PixmapSurface, RasterError};
