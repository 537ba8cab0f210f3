//! Spatial point generator.

use fill_core::FillValue;
use rand::Rng;

/// Generate a point with latitude in `[-90, 90)` and longitude in
/// `[-180, 180)`.
pub fn generate_point<R: Rng>(rng: &mut R, geographic: bool) -> FillValue {
    FillValue::Point {
        lat: rng.random_range(-90.0..90.0),
        lon: rng.random_range(-180.0..180.0),
        geographic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_point_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            match generate_point(&mut rng, true) {
                FillValue::Point {
                    lat,
                    lon,
                    geographic,
                } => {
                    assert!((-90.0..90.0).contains(&lat));
                    assert!((-180.0..180.0).contains(&lon));
                    assert!(geographic);
                }
                other => panic!("Expected Point value, got {other:?}"),
            }
        }
    }
}
