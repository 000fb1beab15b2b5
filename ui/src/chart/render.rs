use tracing::debug;

use crate::core::model::BroadbandPackItem;

use super::{
    layout::{BarChartLayout, ChartError, ChartSize},
    style::ChartStyle,
    surface::{DrawSurface, Rect, ScopedSurface, TextAlign, TextStyle},
};

/// Clamp a reported device pixel ratio to something usable.
pub fn sanitize_device_scale(device_scale: f64) -> f64 {
    if device_scale.is_finite() && device_scale > 0.0 {
        device_scale
    } else {
        1.0
    }
}

/// Redraw the whole chart onto `surface`.
///
/// The backing store is resized to `size * device_scale` physical pixels and
/// all drawing happens in logical units under a scale transform. Nothing is
/// drawn when the input is rejected.
pub fn render_bar_chart<S: DrawSurface + ?Sized>(
    surface: &mut S,
    items: &[BroadbandPackItem],
    size: ChartSize,
    device_scale: f64,
    style: &ChartStyle,
) -> Result<BarChartLayout, ChartError> {
    let layout = BarChartLayout::compute(items, size, style)?;
    let scale = sanitize_device_scale(device_scale);

    surface.resize(
        physical_px(size.width, scale),
        physical_px(size.height, scale),
    );

    let mut scoped = ScopedSurface::new(surface);
    scoped.set_scale(scale);
    scoped.clear(size.width, size.height);
    paint(&mut *scoped, &layout, style);

    debug!(
        groups = layout.groups.len(),
        max_value = layout.max_value,
        scale,
        "bar chart rendered"
    );
    Ok(layout)
}

fn physical_px(logical: f64, scale: f64) -> u32 {
    (logical * scale).ceil().max(1.0) as u32
}

fn paint<S: DrawSurface + ?Sized>(surface: &mut S, layout: &BarChartLayout, style: &ChartStyle) {
    let plot = layout.plot;

    if let Some(background) = style.background {
        surface.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: layout.size.width,
                height: layout.size.height,
            },
            background,
        );
    }

    for line in &layout.grid {
        surface.stroke_line(
            (plot.x, line.y),
            (plot.x + plot.width, line.y),
            1.0,
            style.grid,
        );
    }

    let label_style = TextStyle {
        size_px: style.label_font_px,
        bold: false,
        align: TextAlign::Center,
        color: style.text,
    };

    for group in &layout.groups {
        for (bar, color) in [(group.previous, style.previous), (group.current, style.current)] {
            if bar.height > 0.0 {
                surface.fill_rect(bar, color);
            }
        }

        let (lx, ly) = group.label_anchor;
        surface.fill_text(&group.label, lx, ly, &label_style);

        let change_style = TextStyle {
            size_px: style.change_font_px,
            bold: true,
            align: TextAlign::Center,
            color: if group.change_non_negative {
                style.positive
            } else {
                style.negative
            },
        };
        let (cx, cy) = group.change_anchor;
        surface.fill_text(&group.change_text, cx, cy, &change_style);
    }

    let axis_style = TextStyle {
        size_px: style.axis_font_px,
        bold: false,
        align: TextAlign::Right,
        color: style.text,
    };
    for line in &layout.grid {
        surface.fill_text(
            &line.label,
            plot.x - style.axis_label_gap,
            line.y + 4.0,
            &axis_style,
        );
    }
}
