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

use std::fmt;

/// A fixed-length array of slots packed into `u64` words.
///
/// Slots only ever go from unset to set; there is no way to clear one.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct BitArray {
    words: Box<[u64]>,
    len: u64,
    num_bits_set: u64,
}

impl BitArray {
    /// Creates an array of `len` unset slots.
    pub fn new(len: u64) -> Self {
        let num_words = len.div_ceil(64) as usize;
        BitArray {
            words: vec![0u64; num_words].into_boxed_slice(),
            len,
            num_bits_set: 0,
        }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    pub fn num_bits_set(&self) -> u64 {
        self.num_bits_set
    }

    /// Gets the value of a single slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn get(&self, index: u64) -> bool {
        assert!(index < self.len, "index {index} out of bounds for {}", self.len);
        let (word_index, mask) = locate(index);
        (self.words[word_index] & mask) != 0
    }

    /// Sets a single slot, returning whether it was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: u64) -> bool {
        assert!(index < self.len, "index {index} out of bounds for {}", self.len);
        let (word_index, mask) = locate(index);
        if (self.words[word_index] & mask) == 0 {
            self.words[word_index] |= mask;
            self.num_bits_set += 1;
            true
        } else {
            false
        }
    }
}

#[inline]
fn locate(index: u64) -> (usize, u64) {
    ((index / 64) as usize, 1u64 << (index % 64))
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitArray")
            .field("len", &self.len)
            .field("num_bits_set", &self.num_bits_set)
            .finish()
    }
}
