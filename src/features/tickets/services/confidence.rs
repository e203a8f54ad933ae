use crate::features::tickets::models::ConfidenceLevel;

/// Normalize a raw model confidence onto the 0-100 integer scale.
///
/// Values in (0, 1] are fractions and are scaled by 100 before rounding; anything
/// else is rounded as-is, with a missing or NaN value counting as 0. The result is
/// clamped into [0, 100].
pub fn normalize_confidence(raw: Option<f64>) -> ConfidenceLevel {
    let value = raw.filter(|v| !v.is_nan()).unwrap_or(0.0);

    let scaled = if value > 0.0 && value <= 1.0 {
        (value * 100.0).round()
    } else {
        value.round()
    };

    let clamped = scaled.clamp(0.0, f64::from(ConfidenceLevel::MAX));
    ConfidenceLevel::new(clamped as u8)
}
