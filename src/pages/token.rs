//! Token Generation Module
//!
//! Generates page ids and view secrets from a cryptographically strong
//! random source.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::Rng;

// == Alphabet ==
/// URL-safe alphabet used for ids and secrets.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of random characters appended to the timestamp in a page id.
/// 62^8 distinct suffixes per millisecond bucket.
const ID_RANDOM_LEN: usize = 8;

/// Fixed length of a generated view secret.
pub const SECRET_LEN: usize = 8;

// == Page Id ==
/// Generates a fresh page id: the current millisecond timestamp in base 36
/// followed by 8 random URL-safe characters.
///
/// Collisions require two ids in the same millisecond to draw the same
/// 62^8 suffix, so a uniqueness retry loop is a fallback, not a requirement.
pub fn generate_page_id() -> String {
    let millis = current_timestamp_ms();
    let mut id = to_base36(millis);
    id.push_str(&random_chars(ID_RANDOM_LEN));
    id
}

// == View Secret ==
/// Generates a page view secret: 8 URL-safe characters from `OsRng`,
/// drawn independently of any id generation.
pub fn generate_secret() -> String {
    random_chars(SECRET_LEN)
}

// == Helpers ==
fn random_chars(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
