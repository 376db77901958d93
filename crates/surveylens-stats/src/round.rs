/// Rounds `value` to `digits` decimal places for presentation.
///
/// Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```
/// # use surveylens_stats::round::round_to;
/// assert_eq!(round_to(66.666_666, 2), 66.67);
/// assert!(round_to(f64::NAN, 2).is_nan());
/// ```
#[must_use]
pub fn round_to(value: f64, digits: u8) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(i32::from(digits));
    (value * scale).round() / scale
}
