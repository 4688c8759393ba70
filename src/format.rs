/// Metric suffixes, in base-1000 steps.
const UNITS: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Format `n` with a metric suffix so that `precision` significant digits are shown.
///
/// ```notrust
/// 123, 2    -> 123
/// 123456, 2 -> 123k   (not 0.123M)
/// 123456, 4 -> 123.5k
/// -123, 2   -> -123
/// 0.5, 2    -> 0.50
/// ```
///
/// Ties round away from zero, so `2.5, 1` prints as `3`.
///
/// Magnitudes below 1 are printed with `precision` decimals and no suffix. A mantissa that rounds
/// up to 1000 is not moved to the next unit, so `999999, 3` prints as `1000k`.
pub fn to_si(n: f64, precision: usize) -> String {
    // Print -0 as 0
    let n = if n == 0.0 { 0.0 } else { n };

    if n.abs() < 1.0 {
        let n = round_half_away(n, precision);
        return format!("{n:.precision$}");
    }

    let sign = if n > 0.0 { "" } else { "-" };
    let n = n.abs();

    let unit_index = ((n.log10() / 3.0).floor() as usize).min(UNITS.len() - 1);
    let mantissa = n / 10f64.powi(3 * unit_index as i32);

    let digits = mantissa.log10().floor() as i64;
    let after_dot = (precision as i64 - digits - 1).max(0) as usize;

    let mantissa = round_half_away(mantissa, after_dot);

    format!("{sign}{mantissa:.after_dot$}{}", UNITS[unit_index])
}

/// Round to `digits` decimals, ties away from zero. `format!` alone breaks ties to even.
fn round_half_away(n: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (n * scale).round() / scale
}
