//! Promo code generation.
//!
//! Every first-time quiz lead receives an 8-character code drawn uniformly
//! from `[A-Z0-9]`. Codes are per-lead, not a shared inventory, so no
//! uniqueness check is performed against previously issued codes.

use rand::Rng;

/// Length of a generated promo code.
pub const PROMO_CODE_LENGTH: usize = 8;

/// The 36-symbol promo code alphabet.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a promo code: independent uniform draws from [`ALPHABET`].
pub fn generate_promo_code() -> String {
    let mut rng = rand::rng();
    (0..PROMO_CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
