/// Keeps `v` only when it is a usable progress value.
///
/// Zero-span ratios in the layout pass produce NaN or an infinity; those
/// passes must leave the stored progress alone.
pub(crate) fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Linear interpolation with `t` clamped to `[0, 1]`; endpoints are exact.
pub(crate) fn lerp_clamped(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
