// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash families used to derive slot indices.
//!
//! A [`HashFamily`] maps the character codes of an item to three signed 32-bit values. The
//! default family is [`TripleHash`]; [`Murmur3Hash`] is an alternative backed by
//! MurmurHash3.
//!
//! All arithmetic in [`TripleHash`] is 32-bit two's-complement: additions and
//! multiplications wrap silently and the right shift is sign-extending.

mod murmur;

pub use self::murmur::DEFAULT_MURMUR_SEED;
pub use self::murmur::Murmur3Hash;
use crate::bloom::CharCodes;

/// The number of hash values, and therefore slot indices, derived per item.
pub const NUM_HASHES: usize = 3;

/// A family of three deterministic hash functions over character codes.
///
/// Implementations must return the same values for the same codes on every call, otherwise
/// a filter using them loses its no-false-negatives guarantee.
pub trait HashFamily {
    /// Hashes the full sequence of `codes`.
    fn hash(&self, codes: CharCodes<'_>) -> [i32; NUM_HASHES];
}

/// The default hash family: a base-31 polynomial hash, djb2 and a shift-xor hash.
///
/// # Examples
///
/// ```
/// use tribloom::bloom::Item;
/// use tribloom::hash::HashFamily;
/// use tribloom::hash::TripleHash;
///
/// let hashes = TripleHash.hash("foo".char_codes().unwrap());
/// assert_eq!(hashes, [101574, 193491849, 103823]);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripleHash;

impl HashFamily for TripleHash {
    fn hash(&self, codes: CharCodes<'_>) -> [i32; NUM_HASHES] {
        let mut h1 = POLYNOMIAL31_INIT;
        let mut h2 = DJB2_INIT;
        let mut h3 = SHIFT_XOR_INIT;
        for c in codes {
            h1 = polynomial31_step(h1, c);
            h2 = djb2_step(h2, c);
            h3 = shift_xor_step(h3, c);
        }
        [h1, h2, h3]
    }
}

const POLYNOMIAL31_INIT: i32 = 0;
const DJB2_INIT: i32 = 5381;
const SHIFT_XOR_INIT: i32 = 0;

#[inline]
fn polynomial31_step(h: i32, c: u16) -> i32 {
    h.wrapping_mul(31).wrapping_add(i32::from(c))
}

#[inline]
fn djb2_step(h: i32, c: u16) -> i32 {
    h.wrapping_mul(33).wrapping_add(i32::from(c))
}

#[inline]
fn shift_xor_step(h: i32, c: u16) -> i32 {
    // `>>` on i32 is arithmetic
    (h << 5) ^ (h >> 27) ^ i32::from(c)
}

/// Polynomial rolling hash with base 31: `h = h * 31 + c`, starting from 0.
pub fn polynomial31(codes: impl IntoIterator<Item = u16>) -> i32 {
    codes
        .into_iter()
        .fold(POLYNOMIAL31_INIT, polynomial31_step)
}

/// The djb2 hash: `h = h * 33 + c`, starting from 5381.
pub fn djb2(codes: impl IntoIterator<Item = u16>) -> i32 {
    codes.into_iter().fold(DJB2_INIT, djb2_step)
}

/// Shift-xor mixing hash: `h = (h << 5) ^ (h >> 27) ^ c`, starting from 0.
pub fn shift_xor(codes: impl IntoIterator<Item = u16>) -> i32 {
    codes.into_iter().fold(SHIFT_XOR_INIT, shift_xor_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_polynomial31_matches_java_string_hash() {
        assert_eq!(polynomial31(units("")), 0);
        assert_eq!(polynomial31(units("foo")), 101574);
        assert_eq!(polynomial31(units("hello world")), 1794106052);
        // wraps past i32::MAX
        assert_eq!(
            polynomial31(units("The quick brown fox jumps over the lazy dog")),
            -609428141
        );
    }

    #[test]
    fn test_djb2() {
        assert_eq!(djb2(units("")), 5381);
        assert_eq!(djb2(units("a")), 177670);
        assert_eq!(djb2(units("foo")), 193491849);
        assert_eq!(djb2(units("hello world")), 894552257);
    }

    #[test]
    fn test_shift_xor() {
        assert_eq!(shift_xor(units("")), 0);
        assert_eq!(shift_xor(units("a")), 97);
        assert_eq!(shift_xor(units("foo")), 103823);
        assert_eq!(shift_xor(units("hello world")), 2028303712);
    }

    #[test]
    fn test_shift_xor_sign_extends() {
        // i32::MIN >> 27 is -16, not 16
        assert_eq!(shift_xor_step(i32::MIN, 0), -16);
        assert_eq!(shift_xor_step(-1, 0), 31);
    }

    #[test]
    fn test_triple_hash_agrees_with_free_functions() {
        for s in ["", "a", "foo", "bar", "hello world", "😀 émoji"] {
            let codes = crate::bloom::CharCodes::from_text(s);
            assert_eq!(
                TripleHash.hash(codes),
                [
                    polynomial31(units(s)),
                    djb2(units(s)),
                    shift_xor(units(s))
                ]
            );
        }
    }
}
