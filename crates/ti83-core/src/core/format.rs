//! Result formatting for the primary display

/// Literal shown for any invalid or undefined computation
pub const ERROR_SENTINEL: &str = "Error";

/// Magnitudes above this switch to scientific notation
pub const SCIENTIFIC_UPPER: f64 = 9_999_999_999.0;

/// Non-zero magnitudes below this switch to scientific notation
pub const SCIENTIFIC_LOWER: f64 = 0.0001;

/// Fractional digits shown in scientific notation
pub const SCIENTIFIC_DIGITS: usize = 6;

/// Results are rounded to this many decimal places
const ROUNDING_SCALE: f64 = 1e10;

/// Formats a computed value for the primary display
///
/// NaN and infinities become [`ERROR_SENTINEL`]. Finite values are rounded to
/// ten decimal places first, then rendered either as a plain decimal or, for
/// very large or very small magnitudes, in scientific notation.
///
/// ```
/// use ti83_core::core::format_result;
///
/// assert_eq!(format_result(0.1 + 0.2), "0.3");
/// assert_eq!(format_result(1e10), "1.000000e+10");
/// assert_eq!(format_result(f64::NAN), "Error");
/// ```
#[must_use]
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_SENTINEL.to_string();
    }

    let rounded = round_decimals(value);
    let magnitude = rounded.abs();

    if magnitude > SCIENTIFIC_UPPER || (rounded != 0.0 && magnitude < SCIENTIFIC_LOWER) {
        to_exponential(rounded, SCIENTIFIC_DIGITS)
    } else {
        to_plain(rounded)
    }
}

/// Rounds to ten decimals, halves toward positive infinity
fn round_decimals(value: f64) -> f64 {
    let scaled = value * ROUNDING_SCALE;
    if !scaled.is_finite() {
        // only reachable for magnitudes far beyond the fractional range
        return value;
    }
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded / ROUNDING_SCALE
}

fn to_plain(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    value.to_string()
}

/// Renders `d.dddddde±x` with an explicit exponent sign
fn to_exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
