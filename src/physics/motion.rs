//! Scalar motion helpers shared by the slewing and travel drives.
//!
//! Everything here works on plain `f64` in the internal units (degrees,
//! meters, normalized fractions). Callers convert from `uom` quantities at
//! the boundary.

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
///
/// A non-positive `max_delta` leaves `current` unchanged.
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if !(max_delta > 0.0) {
        return current;
    }

    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Linear interpolation with `t` clamped to [0, 1]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp01(t)
}

/// Clamp to the unit interval. NaN collapses to 0.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees into the half-open range (-180, 180]
pub fn normalize_angle_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }

    let mut wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Advance a normalized travel fraction along a range of `range_length`.
///
/// `direction` is +1.0 or -1.0. The step is `speed * dt / range_length`,
/// clamped to [0, 1]. A zero or negative range jumps straight to the bound
/// in the direction of travel.
pub fn advance_fraction(fraction: f64, direction: f64, speed: f64, dt: f64, range_length: f64) -> f64 {
    if !(range_length > 0.0) {
        return if direction > 0.0 { 1.0 } else { 0.0 };
    }

    let step = speed * dt / range_length;
    clamp01(fraction + direction * step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_move_towards_caps_step() {
        assert_relative_eq!(move_towards(0.0, 30.0, 6.0), 6.0);
        assert_relative_eq!(move_towards(10.0, -30.0, 4.0), 6.0);
    }

    #[test]
    fn test_move_towards_never_overshoots() {
        assert_relative_eq!(move_towards(28.0, 30.0, 6.0), 30.0);
        assert_relative_eq!(move_towards(-1.0, 0.0, 9.0), 0.0);
    }

    #[test]
    fn test_move_towards_ignores_non_positive_delta() {
        assert_relative_eq!(move_towards(5.0, 30.0, 0.0), 5.0);
        assert_relative_eq!(move_towards(5.0, 30.0, -1.0), 5.0);
    }

    #[test]
    fn test_normalize_angle_range() {
        assert_relative_eq!(normalize_angle_degrees(190.0), -170.0);
        assert_relative_eq!(normalize_angle_degrees(-190.0), 170.0);
        assert_relative_eq!(normalize_angle_degrees(180.0), 180.0);
        assert_relative_eq!(normalize_angle_degrees(-180.0), 180.0);
        assert_relative_eq!(normalize_angle_degrees(720.0 + 45.0), 45.0);
        assert_relative_eq!(normalize_angle_degrees(-540.0), 180.0);
    }

    #[test]
    fn test_normalize_angle_stays_in_half_open_range() {
        let mut angle = -1000.0;
        while angle < 1000.0 {
            let wrapped = normalize_angle_degrees(angle);
            assert!(wrapped > -180.0 && wrapped <= 180.0, "{} -> {}", angle, wrapped);
            angle += 7.3;
        }
    }

    #[test]
    fn test_advance_fraction_clamps_at_far_end() {
        // 5 m/s for 1 s over 20 m from 0.9 would be 1.15
        assert_relative_eq!(advance_fraction(0.9, 1.0, 5.0, 1.0, 20.0), 1.0);
        assert_relative_eq!(advance_fraction(0.1, -1.0, 5.0, 1.0, 20.0), 0.0);
    }

    #[test]
    fn test_advance_fraction_zero_range_jumps_to_bound() {
        assert_relative_eq!(advance_fraction(0.3, 1.0, 5.0, 0.01, 0.0), 1.0);
        assert_relative_eq!(advance_fraction(0.3, -1.0, 5.0, 0.01, 0.0), 0.0);
    }

    #[test]
    fn test_lerp_and_clamp() {
        assert_relative_eq!(lerp(0.0, 0.75, 0.5), 0.375);
        assert_relative_eq!(lerp(0.0, 0.75, 2.0), 0.75);
        assert_relative_eq!(clamp01(f64::NAN), 0.0);
    }
}
