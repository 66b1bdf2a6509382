//! Business token generation
//!
//! Appointment and billing records carry a human-facing token alongside the
//! database record id, e.g. `APT-1735689600000-k3j9x2m4q`. Tokens are
//! time+random; collisions are treated as negligible and there is no
//! uniqueness retry loop.

use chrono::Utc;
use rand::Rng;

const TOKEN_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_RANDOM_LEN: usize = 9;

/// Generate a prefixed token: `<PREFIX>-<unix millis>-<9 base36 chars>`
pub fn generate_token(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TOKEN_RANDOM_LEN)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token("APT");
        let parts: Vec<&str> = token.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "APT");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), TOKEN_RANDOM_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_tokens_differ() {
        // Not a uniqueness guarantee, just a sanity check on the random part
        let a = generate_token("BIL");
        let b = generate_token("BIL");
        assert_ne!(a, b);
    }
}
