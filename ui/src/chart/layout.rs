//! Pure geometry for the grouped bar chart.
//!
//! All categories share one value-to-pixel scale derived from the largest
//! previous/current value, so bars are comparable across groups. The
//! layout never divides by a zero maximum: an all-zero dataset yields a
//! flat chart with zero-height bars.

use thiserror::Error;

use crate::core::{
    format::{self, FormatError},
    model::BroadbandPackItem,
};

use super::{style::ChartStyle, surface::Rect};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid input: `{label}` has {field} = {value} (expected a finite, non-negative number)")]
    InvalidValue {
        label: String,
        field: &'static str,
        value: f64,
    },
    #[error("invalid input: surface {width}x{height} leaves no plot area inside a {padding}px margin")]
    SurfaceTooSmall {
        width: f64,
        height: f64,
        padding: f64,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Logical (CSS pixel) size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl ChartSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    /// Left edge and width of the whole group slot.
    pub x: f64,
    pub width: f64,
    pub previous: Rect,
    pub current: Rect,
    /// Centre/baseline of the category label.
    pub label_anchor: (f64, f64),
    pub change_text: String,
    pub change_anchor: (f64, f64),
    pub change_non_negative: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout {
    pub size: ChartSize,
    pub plot: Rect,
    pub max_value: f64,
    pub grid: Vec<GridLine>,
    pub groups: Vec<BarGroup>,
}

impl BarChartLayout {
    pub fn compute(
        items: &[BroadbandPackItem],
        size: ChartSize,
        style: &ChartStyle,
    ) -> Result<Self, ChartError> {
        for item in items {
            check_magnitude(item, "previous", item.previous)?;
            check_magnitude(item, "current", item.current)?;
            if !item.change_pct.is_finite() {
                return Err(ChartError::InvalidValue {
                    label: item.label.clone(),
                    field: "changePct",
                    value: item.change_pct,
                });
            }
        }

        let padding = style.padding;
        let plot = Rect {
            x: padding,
            y: padding,
            width: size.width - padding * 2.0,
            height: size.height - padding * 2.0,
        };
        if !(plot.width > 0.0 && plot.height > 0.0) {
            return Err(ChartError::SurfaceTooSmall {
                width: size.width,
                height: size.height,
                padding,
            });
        }

        let max_value = items
            .iter()
            .flat_map(|item| [item.previous, item.current])
            .fold(0.0, f64::max);

        let mut layout = Self {
            size,
            plot,
            max_value,
            grid: Vec::new(),
            groups: Vec::new(),
        };
        layout.grid = layout.grid_lines(style)?;
        layout.groups = layout.bar_groups(items, style)?;
        Ok(layout)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Nothing to scale against: every value is zero (or there are no values).
    pub fn is_flat(&self) -> bool {
        self.max_value <= 0.0
    }

    /// Pixel height of a bar for `value` on the shared scale.
    pub fn bar_height(&self, value: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            value / self.max_value * self.plot.height
        }
    }

    fn grid_lines(&self, style: &ChartStyle) -> Result<Vec<GridLine>, ChartError> {
        let intervals = style.grid_intervals.max(1);
        (0..=intervals)
            .map(|i| {
                let remaining = (intervals - i) as f64 / intervals as f64;
                let value = self.max_value * remaining;
                Ok(GridLine {
                    y: self.plot.y + self.plot.height / intervals as f64 * i as f64,
                    value,
                    label: format::format_number_with_unit(value, &style.unit)?,
                })
            })
            .collect()
    }

    fn bar_groups(
        &self,
        items: &[BroadbandPackItem],
        style: &ChartStyle,
    ) -> Result<Vec<BarGroup>, ChartError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let group_width = self.plot.width / items.len() as f64;
        let gap = group_width * style.group_gap_ratio;
        let bar_width = (group_width - gap) / 2.0;
        let baseline = self.plot.bottom();

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let x = self.plot.x + index as f64 * group_width;
                let previous_height = self.bar_height(item.previous);
                let current_height = self.bar_height(item.current);
                let centre = x + group_width / 2.0;

                Ok(BarGroup {
                    label: item.label.clone(),
                    x,
                    width: group_width,
                    previous: Rect {
                        x: x + gap / 2.0,
                        y: baseline - previous_height,
                        width: bar_width,
                        height: previous_height,
                    },
                    current: Rect {
                        x: x + gap / 2.0 + bar_width,
                        y: baseline - current_height,
                        width: bar_width,
                        height: current_height,
                    },
                    label_anchor: (centre, self.size.height - style.label_bottom_offset),
                    change_text: format::format_percentage(item.change_pct, 1)?,
                    change_anchor: (
                        centre,
                        baseline - previous_height.max(current_height) - style.change_label_lift,
                    ),
                    change_non_negative: item.change_pct >= 0.0,
                })
            })
            .collect()
    }
}

fn check_magnitude(item: &BroadbandPackItem, field: &'static str, value: f64) -> Result<(), ChartError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidValue {
            label: item.label.clone(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, previous: f64, current: f64, change_pct: f64) -> BroadbandPackItem {
        BroadbandPackItem {
            label: label.into(),
            previous,
            current,
            change_pct,
        }
    }

    const SIZE: ChartSize = ChartSize::new(480.0, 280.0);

    #[test]
    fn shared_scale_uses_global_maximum() {
        let items = [item("A", 100.0, 150.0, 50.0), item("B", 200.0, 100.0, -50.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();

        assert_eq!(layout.max_value, 200.0);
        let h = layout.plot.height;
        assert_eq!(layout.groups[0].current.height, 0.75 * h);
        assert_eq!(layout.groups[1].current.height, 0.5 * h);
        assert_eq!(layout.groups[1].previous.height, h);
    }

    #[test]
    fn bars_are_anchored_to_plot_bottom() {
        let items = [item("A", 100.0, 150.0, 50.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();
        let group = &layout.groups[0];
        assert_eq!(group.previous.bottom(), layout.plot.bottom());
        assert_eq!(group.current.bottom(), layout.plot.bottom());
        assert!(group.current.y < group.previous.y);
    }

    #[test]
    fn groups_partition_plot_width_with_gap() {
        let items = [
            item("A", 1.0, 2.0, 100.0),
            item("B", 2.0, 1.0, -50.0),
            item("C", 3.0, 3.0, 0.0),
            item("D", 4.0, 5.0, 25.0),
        ];
        let style = ChartStyle::default();
        let layout = BarChartLayout::compute(&items, SIZE, &style).unwrap();
        let group_width = layout.plot.width / 4.0;

        for (i, group) in layout.groups.iter().enumerate() {
            assert!((group.x - (style.padding + i as f64 * group_width)).abs() < 1e-9);
            assert_eq!(group.previous.width, group.current.width);
            let used = group.previous.width * 2.0 + group_width * style.group_gap_ratio;
            assert!((used - group_width).abs() < 1e-9);
            assert_eq!(group.current.x, group.previous.x + group.previous.width);
            assert_eq!(group.label_anchor.0, group.x + group_width / 2.0);
        }
    }

    #[test]
    fn gridlines_label_remaining_fraction_of_max() {
        let items = [item("A", 100.0, 200.0, 100.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();
        let labels: Vec<_> = layout.grid.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["200.0M", "150.0M", "100.0M", "50.0M", "0.0M"]);
        assert_eq!(layout.grid[0].y, layout.plot.y);
        assert_eq!(layout.grid[4].y, layout.plot.bottom());
    }

    #[test]
    fn change_annotation_sits_above_taller_bar() {
        let items = [item("A", 200.0, 100.0, -50.0)];
        let style = ChartStyle::default();
        let layout = BarChartLayout::compute(&items, SIZE, &style).unwrap();
        let group = &layout.groups[0];
        assert_eq!(group.change_text, "-50.0%");
        assert!(!group.change_non_negative);
        assert_eq!(group.change_anchor.1, group.previous.y - style.change_label_lift);
    }

    #[test]
    fn zero_change_counts_as_non_negative() {
        let items = [item("A", 5.0, 5.0, 0.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();
        assert!(layout.groups[0].change_non_negative);
        assert_eq!(layout.groups[0].change_text, "0.0%");
    }

    #[test]
    fn all_zero_values_give_flat_chart() {
        let items = [item("A", 0.0, 0.0, 0.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();
        assert!(layout.is_flat());
        assert_eq!(layout.groups[0].previous.height, 0.0);
        assert_eq!(layout.groups[0].current.height, 0.0);
        assert!(layout.grid.iter().all(|g| g.label == "0.0M"));
    }

    #[test]
    fn single_category_spans_plot() {
        let items = [item("Solo", 10.0, 20.0, 100.0)];
        let layout = BarChartLayout::compute(&items, SIZE, &ChartStyle::default()).unwrap();
        assert_eq!(layout.groups.len(), 1);
        assert_eq!(layout.groups[0].width, layout.plot.width);
    }

    #[test]
    fn empty_input_keeps_axes_only() {
        let layout = BarChartLayout::compute(&[], SIZE, &ChartStyle::default()).unwrap();
        assert!(layout.is_empty());
        assert!(layout.is_flat());
        assert_eq!(layout.grid.len(), 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            (item("NaN", f64::NAN, 1.0, 0.0), "previous"),
            (item("Neg", 1.0, -1.0, 0.0), "current"),
            (item("Inf", 1.0, 1.0, f64::INFINITY), "changePct"),
        ];
        for (bad, expected_field) in cases {
            let err = BarChartLayout::compute(&[bad], SIZE, &ChartStyle::default()).unwrap_err();
            assert!(
                matches!(err, ChartError::InvalidValue { field, .. } if field == expected_field),
                "{expected_field}"
            );
        }
    }

    #[test]
    fn surface_must_exceed_margins() {
        let err = BarChartLayout::compute(
            &[item("A", 1.0, 1.0, 0.0)],
            ChartSize::new(80.0, 300.0),
            &ChartStyle::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::SurfaceTooSmall { .. }));
    }
}
