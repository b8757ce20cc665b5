//! Case-interleaving collation for rotation strings
//!
//! Standard byte order puts every uppercase letter before every lowercase
//! one (`A < B < a < b`). Rotations are instead ordered so that each
//! lowercase letter sorts immediately before its uppercase form:
//!
//! ```text
//! a < A < b < B < ... < z < Z
//! ```
//!
//! The rank of an ASCII letter is its 8-bit code rotated left by 3 and
//! xor'ed with 1. The rotation moves the letter index (low five bits) to the
//! top and the case bit to bit 0, the xor then flips case so lowercase wins.
//! Every other byte keeps its own code.
//!
//! Ranks are precomputed into a 256-entry table at compile time.

use std::cmp::Ordering;

/// Rank of a single byte
#[inline]
pub const fn compute_rank(byte: u8) -> u8 {
    if byte.is_ascii_alphabetic() {
        byte.rotate_left(3) ^ 1
    } else {
        byte
    }
}

const fn build_rank_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = compute_rank(i as u8);
        i += 1;
    }
    table
}

/// Precomputed ranks for every byte value
pub static RANK_TABLE: [u8; 256] = build_rank_table();

/// Look up the rank of a byte
#[inline]
pub fn rank(byte: u8) -> u8 {
    RANK_TABLE[byte as usize]
}

/// Compare two rotations under the collation order.
///
/// The first position whose ranks differ decides; when one rank sequence is
/// a prefix of the other the shorter one sorts first. Distinct bytes of equal
/// rank (`f` and `2`) compare equal, so stable sorts keep generation order.
#[inline]
pub fn compare_rotations(x: &str, y: &str) -> Ordering {
    compare_by_rank(x.as_bytes(), y.as_bytes(), rank)
}

/// Same ordering as [`compare_rotations`], computing ranks per byte
/// instead of reading the table.
pub fn compare_rotations_uncached(x: &str, y: &str) -> Ordering {
    compare_by_rank(x.as_bytes(), y.as_bytes(), compute_rank)
}

#[inline]
fn compare_by_rank(x: &[u8], y: &[u8], rank: impl Fn(u8) -> u8) -> Ordering {
    for (&bx, &by) in x.iter().zip(y) {
        if bx == by {
            continue;
        }
        match rank(bx).cmp(&rank(by)) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    x.len().cmp(&y.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_non_alpha_unchanged() {
        for b in 0u8..=255 {
            if !b.is_ascii_alphabetic() {
                assert_eq!(rank(b), b);
            }
        }
        assert_eq!(rank(b' '), 0x20);
        assert_eq!(rank(b'0'), b'0');
    }

    #[test]
    fn test_rank_known_letters() {
        assert_eq!(rank(b'a'), 0x0A);
        assert_eq!(rank(b'A'), 0x0B);
        assert_eq!(rank(b'b'), 0x12);
        assert_eq!(rank(b'B'), 0x13);
        assert_eq!(rank(b'p'), 0x82);
        assert_eq!(rank(b'P'), 0x83);
    }

    #[test]
    fn test_letters_interleave_by_case() {
        let mut letters: Vec<u8> = (b'a'..=b'z').chain(b'A'..=b'Z').collect();
        letters.sort_by_key(|&b| rank(b));

        let expected: Vec<u8> = (b'a'..=b'z')
            .flat_map(|c| [c, c.to_ascii_uppercase()])
            .collect();
        assert_eq!(letters, expected);
    }

    #[test]
    fn test_table_matches_computation() {
        for b in 0u8..=255 {
            assert_eq!(RANK_TABLE[b as usize], compute_rank(b));
        }
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_rotations("ab", "ab c"), Ordering::Less);
        assert_eq!(compare_rotations("ab c", "ab"), Ordering::Greater);
        assert_eq!(compare_rotations("", "a"), Ordering::Less);
        assert_eq!(compare_rotations("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_case_pairs() {
        assert_eq!(compare_rotations("a", "A"), Ordering::Less);
        assert_eq!(compare_rotations("A", "b"), Ordering::Less);
        assert_eq!(compare_rotations("Zebra", "zebra"), Ordering::Greater);
        assert_eq!(compare_rotations("aA", "aa"), Ordering::Greater);
    }

    #[test]
    fn test_equal_ranks_continue_to_next_byte() {
        // 'f' ranks 0x32, the code of '2'
        assert_eq!(rank(b'f'), rank(b'2'));
        assert_eq!(compare_rotations("f a", "2 b"), Ordering::Less);
        assert_eq!(compare_rotations("2 b", "f a"), Ordering::Greater);
        assert_eq!(compare_rotations("g x", ": x"), Ordering::Equal);
        assert_eq!(compare_rotations("a", "\n"), Ordering::Equal);
        assert_eq!(compare_rotations("d", "\"z"), Ordering::Less);
    }

    #[test]
    fn test_uncached_agrees() {
        let samples = [
            "a A b B", "A simple test", "string A", "p P a", "0 9 z", "\u{e9}t\u{e9}", "",
            "a\nb", "Zz zZ",
        ];
        for x in samples {
            for y in samples {
                assert_eq!(
                    compare_rotations(x, y),
                    compare_rotations_uncached(x, y),
                    "{x:?} vs {y:?}"
                );
            }
        }
    }
}
