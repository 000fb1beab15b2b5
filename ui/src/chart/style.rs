//! Colors, fonts and spacing for the bar chart.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Margin on every side of the plot area (logical px).
    pub padding: f64,
    /// Fraction of a group's width left empty between groups.
    pub group_gap_ratio: f64,
    /// Number of intervals between horizontal gridlines.
    pub grid_intervals: usize,
    /// Suffix for y-axis labels.
    pub unit: String,
    /// Fill behind the plot; `None` leaves the surface transparent.
    pub background: Option<Rgba>,
    pub previous: Rgba,
    pub current: Rgba,
    pub text: Rgba,
    pub grid: Rgba,
    pub positive: Rgba,
    pub negative: Rgba,
    pub label_font_px: f64,
    pub axis_font_px: f64,
    pub change_font_px: f64,
    /// Distance of category labels above the bottom edge.
    pub label_bottom_offset: f64,
    /// Gap between the taller bar and its change annotation.
    pub change_label_lift: f64,
    /// Gap between y-axis labels and the plot area.
    pub axis_label_gap: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            padding: 40.0,
            group_gap_ratio: 0.1,
            grid_intervals: 4,
            unit: "M".to_string(),
            background: None,
            previous: Rgba::rgb(204, 204, 204),
            current: Rgba::rgb(244, 73, 21),
            text: Rgba::rgb(255, 255, 255),
            grid: Rgba::rgb(230, 230, 230),
            positive: Rgba::rgb(5, 150, 105),
            negative: Rgba::rgb(220, 38, 38),
            label_font_px: 12.0,
            axis_font_px: 11.0,
            change_font_px: 11.0,
            label_bottom_offset: 10.0,
            change_label_lift: 20.0,
            axis_label_gap: 10.0,
        }
    }
}

impl ChartStyle {
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Opaque variant used for standalone PNG exports.
    pub fn for_export(self) -> Self {
        Self {
            background: Some(Rgba::rgb(127, 17, 24)),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colors() {
        assert_eq!(Rgba::rgb(5, 150, 105).to_css(), "#059669");
        let translucent = Rgba { a: 0, ..Rgba::rgb(1, 2, 3) };
        assert_eq!(translucent.to_css(), "rgba(1, 2, 3, 0.000)");
    }
}
