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

use std::hash::Hasher;

use super::HashFamily;
use super::NUM_HASHES;
use crate::bloom::CharCodes;

/// The default MurmurHash3 seed, 9001, a prime chosen early on for its clean avalanche
/// behavior.
pub const DEFAULT_MURMUR_SEED: u32 = 9001;

/// A hash family derived from a single 128-bit MurmurHash3 (x64) of the item.
///
/// The code units are hashed in little-endian order and the 128-bit result `(lo, hi)` is
/// expanded into three values with double hashing (Kirsch-Mitzenmacher), `g_i = lo + i * hi`,
/// each truncated to 32 bits.
///
/// Filters built with different seeds derive different indices for the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3Hash {
    seed: u32,
}

impl Murmur3Hash {
    /// Creates a family with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Murmur3Hash { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3Hash {
    fn default() -> Self {
        Murmur3Hash::with_seed(DEFAULT_MURMUR_SEED)
    }
}

impl HashFamily for Murmur3Hash {
    fn hash(&self, codes: CharCodes<'_>) -> [i32; NUM_HASHES] {
        let mut hasher = mur3::Hasher128::with_seed(self.seed);
        for c in codes {
            hasher.write(&c.to_le_bytes());
        }
        let (lo, hi) = hasher.finish128();

        let mut hashes = [0i32; NUM_HASHES];
        for (i, h) in hashes.iter_mut().enumerate() {
            // Use wrapping arithmetic to handle overflow
            let g = lo.wrapping_add((i as u64).wrapping_mul(hi));
            *h = g as u32 as i32;
        }
        hashes
    }
}
