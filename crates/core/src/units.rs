//! Area unit conversions.
//!
//! The canonical storage unit for plot area is the square meter. The UI
//! presents "sotka" (100 m²) as a derived display unit; prices per unit
//! area convert in the opposite direction.

/// Square meters per sotka.
pub const M2_PER_SOTKA: f64 = 100.0;

/// Convert an area in square meters to sotka.
pub fn square_meters_to_sotka(m2: f64) -> f64 {
    m2 / M2_PER_SOTKA
}

/// Convert an area in sotka to square meters.
pub fn sotka_to_square_meters(sotka: f64) -> f64 {
    sotka * M2_PER_SOTKA
}

/// Convert a price per square meter to a price per sotka.
pub fn price_per_m2_to_per_sotka(price_per_m2: f64) -> f64 {
    price_per_m2 * M2_PER_SOTKA
}

/// Convert a price per sotka to a price per square meter.
pub fn price_per_sotka_to_per_m2(price_per_sotka: f64) -> f64 {
    price_per_sotka / M2_PER_SOTKA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_round_trip() {
        for m2 in [0.0, 1.0, 450.0, 1234.56, 1_000_000.0] {
            let back = sotka_to_square_meters(square_meters_to_sotka(m2));
            assert!((back - m2).abs() < 1e-9, "round trip drifted for {m2}");
        }
    }

    #[test]
    fn price_round_trip() {
        for price in [0.0, 99.5, 15_000.0] {
            let back = price_per_sotka_to_per_m2(price_per_m2_to_per_sotka(price));
            assert!((back - price).abs() < 1e-9, "round trip drifted for {price}");
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(square_meters_to_sotka(600.0), 6.0);
        assert_eq!(sotka_to_square_meters(6.0), 600.0);
        assert_eq!(price_per_m2_to_per_sotka(150.0), 15_000.0);
    }
}
