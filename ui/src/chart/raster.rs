//! Native chart backend: rasterises onto a `tiny-skia` pixmap and encodes
//! PNG bytes for the desktop preview and file exports.

use thiserror::Error;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::warn;

use crate::core::model::BroadbandPackItem;

use super::{
    glyphs,
    layout::{ChartError, ChartSize},
    render::render_bar_chart,
    style::{ChartStyle, Rgba},
    surface::{DrawSurface, Rect, TextAlign, TextStyle},
};

#[derive(Debug, Error)]
pub enum RasterError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("unable to allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    saved: Vec<Transform>,
    /// Size of the last rejected resize; drawing is skipped until a resize succeeds.
    failed_resize: Option<(u32, u32)>,
}

impl PixmapSurface {
    pub fn new(width_px: u32, height_px: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width_px, height_px).ok_or(RasterError::Allocation {
            width: width_px,
            height: height_px,
        })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            saved: Vec::new(),
            failed_resize: None,
        })
    }

    /// `Allocation` error if the last resize could not be honoured.
    pub fn check_allocation(&self) -> Result<(), RasterError> {
        match self.failed_resize {
            Some((width, height)) => Err(RasterError::Allocation { width, height }),
            None => Ok(()),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of the physical pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, self.width(), self.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.write_header()?.write_image_data(&data)?;
        }
        Ok(buffer)
    }

    /// Fill `rect` (logical units) clipped to the pixmap in device space.
    fn fill_logical(&mut self, rect: Rect, color: Rgba, anti_alias: bool) {
        if self.failed_resize.is_some() {
            return;
        }
        let Some(bounds) = self.device_rect(rect) else {
            return;
        };
        self.pixmap
            .fill_rect(bounds, &paint(color, anti_alias), Transform::identity(), None);
    }

    fn device_rect(&self, rect: Rect) -> Option<tiny_skia::Rect> {
        let ts = self.transform;
        let (sx, sy) = (f64::from(ts.sx), f64::from(ts.sy));
        let (tx, ty) = (f64::from(ts.tx), f64::from(ts.ty));

        let left = (rect.x * sx + tx).max(0.0);
        let top = (rect.y * sy + ty).max(0.0);
        let right = ((rect.x + rect.width) * sx + tx).min(f64::from(self.width()));
        let bottom = ((rect.y + rect.height) * sy + ty).min(f64::from(self.height()));
        if !(right > left && bottom > top) {
            return None;
        }
        tiny_skia::Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
    }
}

fn paint(color: Rgba, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

impl DrawSurface for PixmapSurface {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        match Pixmap::new(width_px, height_px) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                self.failed_resize = None;
            }
            None => {
                warn!(width_px, height_px, "pixmap resize rejected");
                self.failed_resize = Some((width_px, height_px));
            }
        }
        self.transform = Transform::identity();
        self.saved.clear();
    }

    fn set_scale(&mut self, scale: f64) {
        self.transform = Transform::from_scale(scale as f32, scale as f32);
    }

    fn clear(&mut self, _width: f64, _height: f64) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.fill_logical(rect, color, true);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        if self.failed_resize.is_some() {
            return;
        }
        let mut builder = PathBuilder::new();
        builder.move_to(from.0 as f32, from.1 as f32);
        builder.line_to(to.0 as f32, to.1 as f32);
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color, true), &stroke, self.transform, None);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let cell = style.size_px / glyphs::CELLS_PER_EM;
        let width = glyphs::measure(text) as f64 * cell;
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let top = y - glyphs::ROWS as f64 * cell;
        let stroke_width = if style.bold { cell * 1.35 } else { cell };

        for (col, row) in glyphs::lit_cells(text) {
            self.fill_logical(
                Rect {
                    x: left + col as f64 * cell,
                    y: top + row as f64 * cell,
                    width: stroke_width,
                    height: cell,
                },
                style.color,
                false,
            );
        }
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        self.transform = self.saved.pop().unwrap_or_default();
    }
}

/// Render the chart headlessly and return PNG bytes.
pub fn render_png(
    items: &[BroadbandPackItem],
    size: ChartSize,
    device_scale: f64,
    style: &ChartStyle,
) -> Result<Vec<u8>, RasterError> {
    let mut surface = PixmapSurface::new(1, 1)?;
    render_bar_chart(&mut surface, items, size, device_scale, style)?;
    surface.check_allocation()?;
    surface.encode_png()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ChartSize = ChartSize::new(400.0, 240.0);

    fn pack() -> Vec<BroadbandPackItem> {
        vec![
            BroadbandPackItem {
                label: "A".into(),
                previous: 100.0,
                current: 150.0,
                change_pct: 50.0,
            },
            BroadbandPackItem {
                label: "B".into(),
                previous: 200.0,
                current: 100.0,
                change_pct: -50.0,
            },
        ]
    }

    #[test]
    fn bars_land_on_expected_pixels() {
        let style = ChartStyle::default();
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        render_bar_chart(&mut surface, &pack(), SIZE, 1.0, &style).unwrap();

        // Group A current bar spans x 120..192, y 80..200.
        let [r, g, b, a] = surface.pixel(150, 180).unwrap();
        assert_eq!((r, g, b, a), (style.current.r, style.current.g, style.current.b, 255));
        // Group A previous bar spans x 48..120, y 120..200.
        let [r, g, b, _] = surface.pixel(80, 180).unwrap();
        assert_eq!((r, g, b), (style.previous.r, style.previous.g, style.previous.b));
        // Top margin stays transparent.
        assert_eq!(surface.pixel(180, 30).unwrap()[3], 0);
    }

    #[test]
    fn device_scale_multiplies_backing_store() {
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        render_bar_chart(&mut surface, &pack(), SIZE, 2.0, &ChartStyle::default()).unwrap();
        assert_eq!((surface.width(), surface.height()), (800, 480));
        let current = ChartStyle::default().current;
        let [r, g, b, _] = surface.pixel(300, 360).unwrap();
        assert_eq!((r, g, b), (current.r, current.g, current.b));
    }

    #[test]
    fn export_background_is_opaque() {
        let style = ChartStyle::default().for_export();
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        render_bar_chart(&mut surface, &[], SIZE, 1.0, &style).unwrap();
        assert_eq!(surface.pixel(2, 2), Some([127, 17, 24, 255]));
    }

    #[test]
    fn png_bytes_have_signature() {
        let bytes = render_png(&pack(), SIZE, 1.0, &ChartStyle::default()).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn axis_label_past_left_edge_is_clipped() {
        let text = ChartStyle::default().text;
        let mut surface = PixmapSurface::new(400, 240).unwrap();
        let style = TextStyle {
            size_px: 11.0,
            bold: false,
            align: TextAlign::Right,
            color: text,
        };
        surface.fill_text("200.0M", 30.0, 44.0, &style);
        surface.fill_text("-12.5%", 2.0, 3.0, &TextStyle { bold: true, ..style.clone() });
        surface.fill_text("OTHERS", 398.0, 242.0, &TextStyle { align: TextAlign::Left, ..style });

        let lit = (0..30).any(|x| (36..44).any(|y| surface.pixel(x, y).is_some_and(|px| px[3] > 0)));
        assert!(lit, "visible part of the label should still be drawn");
    }

    #[test]
    fn bars_outside_the_pixmap_are_ignored() {
        let mut surface = PixmapSurface::new(10, 10).unwrap();
        let color = ChartStyle::default().current;
        let outside = Rect {
            x: -50.0,
            y: -50.0,
            width: 20.0,
            height: 20.0,
        };
        surface.fill_rect(outside, color);
        surface.fill_rect(
            Rect {
                x: 5.0,
                y: 5.0,
                width: 100.0,
                height: 100.0,
            },
            color,
        );
        assert_eq!(surface.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(surface.pixel(9, 9), Some([color.r, color.g, color.b, 255]));
    }

    #[test]
    fn oversized_chart_reports_allocation_failure() {
        let err = render_png(&pack(), ChartSize::new(6.0e8, 200.0), 1.0, &ChartStyle::default())
            .unwrap_err();
        assert!(matches!(
            err,
            RasterError::Allocation {
                width: 600_000_000,
                height: 200
            }
        ));
    }

    #[test]
    fn successful_resize_clears_a_previous_failure() {
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        surface.resize(600_000_000, 200);
        assert!(surface.check_allocation().is_err());
        surface.resize(40, 20);
        assert!(surface.check_allocation().is_ok());
        assert_eq!((surface.width(), surface.height()), (40, 20));
    }

    #[test]
    fn invalid_items_surface_chart_error() {
        let mut items = pack();
        items[1].previous = -5.0;
        let err = render_png(&items, SIZE, 1.0, &ChartStyle::default()).unwrap_err();
        assert!(matches!(err, RasterError::Chart(ChartError::InvalidValue { .. })));
    }
}
