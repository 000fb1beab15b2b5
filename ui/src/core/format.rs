//! Formatting helpers for presenting metrics.
//!
//! Magnitudes are scaled into compact numerals (`2.45`, `678.5`) without a
//! unit suffix; the caller picks `K`/`M`/`Bn` for the scale it expects.
//! `scale_band` reports which divisor was applied so a mismatched suffix can
//! be detected instead of silently rendered.

use thiserror::Error;
use tracing::debug;

/// Placeholder shown when a value cannot be formatted.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FormatError {
    #[error("invalid input: {value} is not a finite number")]
    NonFinite { value: f64 },
    #[error("invalid input: magnitude {value} is negative")]
    NegativeMagnitude { value: f64 },
}

/// Divisor band applied by [`format_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleBand {
    Billions,
    Millions,
    Thousands,
    Units,
}

impl ScaleBand {
    pub fn divisor(self) -> f64 {
        match self {
            ScaleBand::Billions => 1e9,
            ScaleBand::Millions => 1e6,
            ScaleBand::Thousands => 1e3,
            ScaleBand::Units => 1.0,
        }
    }

    pub fn decimals(self) -> usize {
        match self {
            ScaleBand::Billions => 2,
            _ => 1,
        }
    }
}

/// Semantic sign classification of a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeClass {
    Positive,
    Negative,
    Neutral,
}

impl ChangeClass {
    pub fn css_class(self) -> &'static str {
        match self {
            ChangeClass::Positive => "text-success",
            ChangeClass::Negative => "text-danger",
            ChangeClass::Neutral => "text-muted",
        }
    }
}

pub fn ensure_finite(value: f64) -> Result<f64, FormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::NonFinite { value })
    }
}

pub fn ensure_magnitude(value: f64) -> Result<f64, FormatError> {
    let value = ensure_finite(value)?;
    if value < 0.0 {
        return Err(FormatError::NegativeMagnitude { value });
    }
    Ok(value)
}

pub fn scale_band(value: f64) -> ScaleBand {
    if value >= 1e9 {
        ScaleBand::Billions
    } else if value >= 1e6 {
        ScaleBand::Millions
    } else if value >= 1e3 {
        ScaleBand::Thousands
    } else {
        ScaleBand::Units
    }
}

/// Scale a magnitude into a compact numeral (no unit suffix).
pub fn format_number(value: f64) -> Result<String, FormatError> {
    let value = ensure_magnitude(value)?;
    let band = scale_band(value);
    fixed(value / band.divisor(), band.decimals())
}

pub fn format_number_with_unit(value: f64, unit: &str) -> Result<String, FormatError> {
    format_number(value).map(|numeral| format!("{numeral}{unit}"))
}

pub fn change_class(delta: f64) -> ChangeClass {
    if delta > 0.0 {
        ChangeClass::Positive
    } else if delta < 0.0 {
        ChangeClass::Negative
    } else {
        ChangeClass::Neutral
    }
}

pub fn change_indicator(delta: f64) -> &'static str {
    if delta > 0.0 {
        "+"
    } else {
        ""
    }
}

/// Signed percentage with an explicit `+` for positive values.
pub fn format_percentage(delta: f64, decimals: usize) -> Result<String, FormatError> {
    let delta = ensure_finite(delta)?;
    Ok(format!(
        "{}{}%",
        change_indicator(delta),
        fixed(delta, decimals)?
    ))
}

/// [`format_percentage`] with one decimal place.
pub fn format_pct(delta: f64) -> Result<String, FormatError> {
    format_percentage(delta, 1)
}

pub fn compute_mom(current: f64, previous: f64) -> Result<f64, FormatError> {
    relative_change(current, previous)
}

pub fn compute_yoy(current: f64, reference: f64) -> Result<f64, FormatError> {
    relative_change(current, reference)
}

fn relative_change(current: f64, reference: f64) -> Result<f64, FormatError> {
    let current = ensure_finite(current)?;
    let reference = ensure_finite(reference)?;
    if reference == 0.0 {
        return Ok(0.0);
    }
    Ok((current - reference) / reference * 100.0)
}

/// Infallible variant for render paths: invalid input shows a placeholder.
pub fn display_number(value: f64) -> String {
    format_number(value).unwrap_or_else(|err| {
        debug!("format_number rejected input: {err}");
        PLACEHOLDER.to_string()
    })
}

pub fn display_number_with_unit(value: f64, unit: &str) -> String {
    match format_number(value) {
        Ok(numeral) => format!("{numeral}{unit}"),
        Err(err) => {
            debug!("format_number rejected input: {err}");
            PLACEHOLDER.to_string()
        }
    }
}

pub fn display_pct(delta: f64) -> String {
    format_pct(delta).unwrap_or_else(|err| {
        debug!("format_pct rejected input: {err}");
        PLACEHOLDER.to_string()
    })
}

/// Unsigned percentage, e.g. achievement ratios (`87.5%`).
pub fn display_ratio(value: f64) -> String {
    match fixed(value, 1) {
        Ok(numeral) => format!("{numeral}%"),
        Err(err) => {
            debug!("display_ratio rejected input: {err}");
            PLACEHOLDER.to_string()
        }
    }
}

/// Fixed-point rendering with halves rounded away from zero.
///
/// Fails when scaling by `10^decimals` leaves the finite range, which covers
/// huge values as well as absurd precisions.
fn fixed(value: f64, decimals: usize) -> Result<String, FormatError> {
    let value = ensure_finite(value)?;
    let factor = i32::try_from(decimals).map_or(f64::INFINITY, |d| 10f64.powi(d));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return Err(FormatError::NonFinite { value: scaled });
    }
    // `+ 0.0` folds negative zero so `-0.04` renders as `0.0`.
    let rounded = scaled.round() / factor + 0.0;
    Ok(format!("{rounded:.decimals$}"))
}
