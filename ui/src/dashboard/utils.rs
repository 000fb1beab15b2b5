use time::{macros::format_description, OffsetDateTime};

use crate::{
    chart::ChartStyle,
    core::{config::ChartConfig, format, platform},
};

/// Date for the header badge, e.g. `Aug 05, 25`.
pub(crate) fn format_update_badge(date: OffsetDateTime) -> String {
    date.format(&format_description!(
        "[month repr:short] [day], [year repr:last_two]"
    ))
    .unwrap_or_else(|_| format::PLACEHOLDER.to_string())
}

/// CSS class for a signed delta.
pub(crate) fn delta_class(delta: f64) -> &'static str {
    format::change_class(delta).css_class()
}

/// Configured device scale, else the display's own.
pub(crate) fn chart_device_scale(config: &ChartConfig) -> f64 {
    config
        .device_scale
        .unwrap_or_else(platform::device_pixel_ratio)
}

pub(crate) fn chart_style(unit: &str) -> ChartStyle {
    ChartStyle::default().with_unit(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn badge_uses_short_month_and_two_digit_year() {
        assert_eq!(format_update_badge(datetime!(2025-08-05 09:30 UTC)), "Aug 05, 25");
        assert_eq!(format_update_badge(datetime!(2026-12-31 23:59 UTC)), "Dec 31, 26");
    }

    #[test]
    fn delta_classes() {
        assert_eq!(delta_class(1.5), "text-success");
        assert_eq!(delta_class(-0.1), "text-danger");
        assert_eq!(delta_class(0.0), "text-muted");
    }

    #[test]
    fn configured_scale_wins() {
        let config = ChartConfig {
            device_scale: Some(3.0),
            ..ChartConfig::default()
        };
        assert_eq!(chart_device_scale(&config), 3.0);
        assert_eq!(chart_device_scale(&ChartConfig::default()), 1.0);
    }
}
