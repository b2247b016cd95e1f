//! Weighted spec distance
//!
//! The distance between a device and a target is a sum of absolute
//! differences, each divided by a fixed per-field scale so that RAM (GB),
//! battery (mAh), camera (MP) and weight (g) land on comparable ranges:
//!
//! ```text
//! |ΔRAM| + |Δbattery| / 1000 + |Δcamera| / 10 + |Δweight| / 50
//! ```

use mobidex_core::{Field, SpecVector};

pub const RAM_SCALE: f64 = 1.0;
pub const BATTERY_SCALE: f64 = 1000.0;
pub const CAMERA_SCALE: f64 = 10.0;
pub const WEIGHT_SCALE: f64 = 50.0;

/// Divisor applied to a field's absolute difference
pub fn field_scale(field: Field) -> Option<f64> {
    match field {
        Field::RamGb => Some(RAM_SCALE),
        Field::BatteryMah => Some(BATTERY_SCALE),
        Field::CameraMp => Some(CAMERA_SCALE),
        Field::WeightG => Some(WEIGHT_SCALE),
        _ => None,
    }
}

/// Per-field terms of the weighted distance, in [`SpecVector::entries`] order
pub fn contributions(candidate: &SpecVector, target: &SpecVector) -> [(Field, f64); 4] {
    let candidate = candidate.entries();
    let target = target.entries();
    let mut terms = [(Field::RamGb, 0.0); 4];

    for (i, ((field, c), (_, t))) in candidate.into_iter().zip(target).enumerate() {
        let scale = field_scale(field).unwrap_or(1.0);
        terms[i] = (field, (c - t).abs() / scale);
    }
    terms
}

pub fn weighted_distance(candidate: &SpecVector, target: &SpecVector) -> f64 {
    contributions(candidate, target)
        .iter()
        .map(|(_, term)| term)
        .sum()
}

/// Whether every spec field equals the target exactly
pub fn specs_equal(candidate: &SpecVector, target: &SpecVector) -> bool {
    candidate == target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_specs_zero_distance() {
        let specs = SpecVector::new(8.0, 4000.0, 48.0, 180.0);
        assert_eq!(weighted_distance(&specs, &specs), 0.0);
        assert!(specs_equal(&specs, &specs));
    }

    #[test]
    fn test_each_field_scaled() {
        let target = SpecVector::new(8.0, 4000.0, 48.0, 180.0);

        let ram = SpecVector::new(10.0, 4000.0, 48.0, 180.0);
        assert!((weighted_distance(&ram, &target) - 2.0).abs() < 1e-9);

        let battery = SpecVector::new(8.0, 5000.0, 48.0, 180.0);
        assert!((weighted_distance(&battery, &target) - 1.0).abs() < 1e-9);

        let camera = SpecVector::new(8.0, 4000.0, 28.0, 180.0);
        assert!((weighted_distance(&camera, &target) - 2.0).abs() < 1e-9);

        let weight = SpecVector::new(8.0, 4000.0, 48.0, 155.0);
        assert!((weighted_distance(&weight, &target) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = SpecVector::new(6.0, 3500.0, 12.0, 170.0);
        let b = SpecVector::new(12.0, 5000.0, 200.0, 230.0);
        assert_eq!(weighted_distance(&a, &b), weighted_distance(&b, &a));
    }

    #[test]
    fn test_contributions_sum_to_distance() {
        let a = SpecVector::new(8.0, 4000.0, 48.0, 180.0);
        let b = SpecVector::new(8.0, 4300.0, 49.0, 185.0);
        let terms = contributions(&a, &b);

        assert_eq!(terms[0], (Field::RamGb, 0.0));
        assert!((terms[1].1 - 0.3).abs() < 1e-9);
        assert!((terms[2].1 - 0.1).abs() < 1e-9);
        assert!((terms[3].1 - 0.1).abs() < 1e-9);

        let sum: f64 = terms.iter().map(|(_, t)| t).sum();
        assert_eq!(sum, weighted_distance(&a, &b));
    }

    #[test]
    fn test_non_spec_fields_have_no_scale() {
        assert_eq!(field_scale(Field::PriceEur), None);
        assert_eq!(field_scale(Field::Brand), None);
    }
}
