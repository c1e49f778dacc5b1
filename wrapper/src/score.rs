use num_format::{Locale, ToFormattedString};

/// Largest magnitude below which every integral f64 converts to i64 exactly.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.;

/// Formats a reported score for the readout.
///
/// Integral scores drop the fractional part, so `42.0` reads "42".
pub fn format_score(score: f64, group_digits: bool) -> String {
    if score.is_infinite() {
        return if score > 0. { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if score.fract() == 0. && score.abs() < EXACT_INTEGER_LIMIT {
        let whole = score as i64;
        return if group_digits {
            whole.to_formatted_string(&Locale::en)
        } else {
            whole.to_string()
        };
    }
    score.to_string()
}

#[test]
fn test_format_integral() {
    assert_eq!(format_score(42., false), "42");
    assert_eq!(format_score(0., false), "0");
    assert_eq!(format_score(-0., false), "0");
    assert_eq!(format_score(-15., false), "-15");
}

#[test]
fn test_format_grouped() {
    assert_eq!(format_score(1_234_567., true), "1,234,567");
    assert_eq!(format_score(999., true), "999");
    assert_eq!(format_score(1_234_567., false), "1234567");
}

#[test]
fn test_format_fractional() {
    assert_eq!(format_score(12.5, false), "12.5");
    assert_eq!(format_score(12.5, true), "12.5");
    assert_eq!(format_score(f64::INFINITY, false), "Infinity");
    assert_eq!(format_score(f64::NAN, false), "NaN");
}
