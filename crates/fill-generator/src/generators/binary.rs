//! Binary and UUID generators.

use fill_core::FillValue;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Generate `length` uniformly random bytes.
pub fn generate_bytes<R: Rng>(rng: &mut R, length: u32) -> FillValue {
    let mut bytes = vec![0u8; length as usize];
    rng.fill(&mut bytes[..]);
    FillValue::Bytes(bytes)
}

/// Generate a version 4 UUID from the supplied RNG.
///
/// Drawing from the caller's RNG keeps seeded runs reproducible, which
/// `Uuid::new_v4()` would not.
pub fn generate_uuid<R: Rng>(rng: &mut R) -> FillValue {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes[..]);
    let uuid: Uuid = Builder::from_random_bytes(bytes).into_uuid();
    FillValue::Uuid(uuid)
}
