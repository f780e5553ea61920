use uom::si::{f64::Length, length::meter};

/// Convert UOM Length to internal coordinate (meters)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert internal coordinate (meters) to UOM Length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::length::foot;

    #[test]
    fn test_coord_round_trip_in_meters() {
        assert_relative_eq!(to_coord(Length::new::<foot>(10.0)), 3.048, epsilon = 1e-9);
        assert_relative_eq!(from_coord(-2.0).get::<meter>(), -2.0);
    }
}
