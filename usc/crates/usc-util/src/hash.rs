//! DJB2 string hashing.
//!
//! Identifiers carry a precomputed hash so a later phase can bucket names
//! without rehashing. The function is deterministic across runs and
//! platforms. It is not collision resistant and must never be used where
//! an attacker controls the input and collisions matter.

/// Initial hash value.
pub const SEED: i64 = 5381;

/// Hashes `text` with the DJB2 recurrence `h = h * 33 + c`.
///
/// Every Unicode scalar value of `text` is folded in order, starting from
/// [`SEED`]. Arithmetic wraps on 64-bit overflow.
///
/// # Examples
///
/// ```
/// use usc_util::hash;
///
/// assert_eq!(hash(""), 5381);
/// assert_eq!(hash("a"), 5381 * 33 + 97);
/// ```
#[inline]
pub fn hash(text: &str) -> i64 {
    text.chars().fold(SEED, step)
}

#[inline(always)]
fn step(hash: i64, c: char) -> i64 {
    (hash << 5).wrapping_add(hash).wrapping_add(c as i64)
}
