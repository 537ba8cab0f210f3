//! Character data generators.

use fill_core::FillValue;
use rand::Rng;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";
const MIXED: &[u8] = b"abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PRINTABLE: &[u8] = b"abcdefghijklmnopqrstuvwxyz ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Filler cycled by fixed-length text columns.
const FIXED_PATTERN: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Character pools selected by the randomness factor, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharPool {
    /// Lowercase letters and space (factor 1)
    #[default]
    Lower,
    /// Adds uppercase letters (factor 2)
    Mixed,
    /// Adds digits (factor 3)
    Alphanumeric,
    /// Adds punctuation and symbols (factor 4)
    Printable,
}

impl CharPool {
    /// Pool for a randomness factor; anything outside `1..=4` selects the
    /// narrowest pool.
    pub fn from_factor(factor: u8) -> Self {
        match factor {
            2 => Self::Mixed,
            3 => Self::Alphanumeric,
            4 => Self::Printable,
            _ => Self::Lower,
        }
    }

    /// Whether `factor` names a pool directly.
    pub fn is_known_factor(factor: u8) -> bool {
        (1..=4).contains(&factor)
    }

    /// Characters in this pool.
    pub fn chars(self) -> &'static [u8] {
        match self {
            Self::Lower => LOWER,
            Self::Mixed => MIXED,
            Self::Alphanumeric => ALPHANUMERIC,
            Self::Printable => PRINTABLE,
        }
    }
}

/// Generate a string whose length is drawn uniformly from
/// `[min_length, max_length]` and whose characters are drawn independently
/// from `pool`.
///
/// A `min_length` above `max_length` is lowered to `max_length`.
pub fn generate_bounded_string<R: Rng>(
    rng: &mut R,
    min_length: u32,
    max_length: u32,
    pool: CharPool,
) -> FillValue {
    let min_length = min_length.min(max_length);
    let length = rng.random_range(min_length..=max_length) as usize;
    let chars = pool.chars();

    let value: String = (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())] as char)
        .collect();

    FillValue::Text(value)
}

/// Generate `length` characters of a repeating alphanumeric pattern.
pub fn generate_fixed_text(length: u32) -> FillValue {
    FillValue::Text(FIXED_PATTERN.chars().cycle().take(length as usize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text(value: FillValue) -> String {
        match value {
            FillValue::Text(s) => s,
            other => panic!("Expected Text value, got {other:?}"),
        }
    }

    #[test]
    fn test_factor_selects_pool() {
        assert_eq!(CharPool::from_factor(1), CharPool::Lower);
        assert_eq!(CharPool::from_factor(2), CharPool::Mixed);
        assert_eq!(CharPool::from_factor(3), CharPool::Alphanumeric);
        assert_eq!(CharPool::from_factor(4), CharPool::Printable);
        assert_eq!(CharPool::from_factor(0), CharPool::Lower);
        assert_eq!(CharPool::from_factor(9), CharPool::Lower);
    }

    #[test]
    fn test_pools_are_nested() {
        let pools = [
            CharPool::Lower,
            CharPool::Mixed,
            CharPool::Alphanumeric,
            CharPool::Printable,
        ];
        for pair in pools.windows(2) {
            let narrow = pair[0].chars();
            let wide = pair[1].chars();
            assert!(narrow.iter().all(|c| wide.contains(c)));
            assert!(wide.len() > narrow.len());
        }
    }

    #[test]
    fn test_bounded_string_length_and_pool() {
        let mut rng = StdRng::seed_from_u64(42);

        for factor in 0..=5u8 {
            let pool = CharPool::from_factor(factor);
            for _ in 0..100 {
                let s = text(generate_bounded_string(&mut rng, 3, 12, pool));
                assert!((3..=12).contains(&s.len()), "{s:?}");
                assert!(s.bytes().all(|b| pool.chars().contains(&b)), "{s:?}");
            }
        }
    }

    #[test]
    fn test_bounded_string_lowercase_only_for_factor_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let s = text(generate_bounded_string(&mut rng, 1, 10, CharPool::Lower));
            assert!(s.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        }
    }

    #[test]
    fn test_bounded_string_min_above_max() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let s = text(generate_bounded_string(&mut rng, 50, 4, CharPool::Mixed));
            assert_eq!(s.len(), 4);
        }
    }

    #[test]
    fn test_bounded_string_zero_length() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            text(generate_bounded_string(&mut rng, 0, 0, CharPool::Lower)),
            ""
        );
    }

    #[test]
    fn test_fixed_text() {
        assert_eq!(text(generate_fixed_text(5)), "abcde");
        assert_eq!(text(generate_fixed_text(0)), "");

        let long = text(generate_fixed_text(40));
        assert_eq!(long.len(), 40);
        assert!(long.ends_with("9abcd"));
    }
}
