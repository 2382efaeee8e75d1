//! Core constants and numeric primitives shared across the thruster selection workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²). Converts Isp in seconds to exhaust velocity.
    pub const G0: f64 = 9.80665;
}

/// Numeric helpers used when producing report-facing values.
pub mod numeric {
    /// Round `value` to `places` decimal places, half away from zero.
    ///
    /// Non-finite values pass through untouched so sentinels survive formatting paths.
    #[inline]
    pub fn round_to(value: f64, places: u32) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let factor = 10_f64.powi(places as i32);
        (value * factor).round() / factor
    }

}
