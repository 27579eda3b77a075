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

use super::BloomFilterBuilder;
use super::Item;
use crate::common::BitArray;
use crate::error::Error;
use crate::hash::HashFamily;
use crate::hash::NUM_HASHES;
use crate::hash::TripleHash;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - False positives when all three slots of an item were set by other items
/// - A fixed number of slots chosen at construction
///
/// Use [`BloomFilter::new`] or [`BloomFilterBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H = TripleHash> {
    /// Hash family deriving the three slot indices of an item
    hash_family: H,
    /// Slot store, one bit per slot
    bit_array: BitArray,
}

impl BloomFilter {
    /// Creates a filter with `size` unset slots and the default [`TripleHash`] family.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if `size` is not a positive integer no larger than
    /// [`MAX_SIZE`](super::MAX_SIZE).
    ///
    /// # Examples
    ///
    /// ```
    /// use tribloom::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(100).unwrap();
    /// assert_eq!(filter.size(), 100);
    /// assert!(filter.is_empty());
    ///
    /// assert!(BloomFilter::new(0).is_err());
    /// ```
    pub fn new<S>(size: S) -> Result<Self, Error>
    where
        S: TryInto<u64> + Copy + fmt::Display,
    {
        Ok(BloomFilterBuilder::with_size(size)?.build())
    }
}

impl<H: HashFamily> BloomFilter<H> {
    pub(super) fn from_parts(size: u64, hash_family: H) -> Self {
        BloomFilter {
            hash_family,
            bit_array: BitArray::new(size),
        }
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Errors
    ///
    /// Returns an `InvalidItem` error if the item has no character code decomposition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100).unwrap();
    /// filter.insert("foo").unwrap();
    ///
    /// assert!(filter.may_contain("foo").unwrap());
    /// assert!(!filter.may_contain("bar").unwrap());
    /// ```
    pub fn may_contain<T: Item + ?Sized>(&self, item: &T) -> Result<bool, Error> {
        let indices = self.derive_indices(item)?;
        Ok(self.check_bits(&indices))
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple").unwrap());
    /// assert!(filter.contains_and_insert("apple").unwrap());
    /// ```
    pub fn contains_and_insert<T: Item + ?Sized>(&mut self, item: &T) -> Result<bool, Error> {
        let indices = self.derive_indices(item)?;
        let was_present = self.check_bits(&indices);
        self.set_bits(&indices);
        Ok(was_present)
    }

    /// Derives the three slot indices of an item.
    ///
    /// Each hash value has its sign removed and is reduced modulo [`size()`](Self::size).
    /// The magnitude of `i32::MIN` is taken as `2^31`, so it too reduces to a valid index.
    /// Indices may coincide.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilter;
    /// let filter = BloomFilter::new(100).unwrap();
    /// assert_eq!(filter.derive_indices("foo").unwrap(), [74, 49, 23]);
    /// ```
    pub fn derive_indices<T: Item + ?Sized>(&self, item: &T) -> Result<[u64; NUM_HASHES], Error> {
        let codes = item.char_codes()?;
        let size = self.bit_array.len();
        Ok(self
            .hash_family
            .hash(codes)
            .map(|hash| u64::from(hash.unsigned_abs()) % size))
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Inserts an item into the filter.
    ///
    /// After insertion, `may_contain(item)` will always return `true`. Inserting the same item
    /// again leaves the filter unchanged.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidItem` error if the item has no character code decomposition. The
    /// filter is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100).unwrap();
    ///
    /// filter.insert("apple").unwrap();
    /// filter.insert(&String::from("pear")).unwrap();
    /// filter.insert(b"plum".as_slice()).unwrap();
    ///
    /// assert!(filter.may_contain("plum").unwrap());
    /// assert!(filter.insert(b"\xff".as_slice()).is_err());
    /// ```
    pub fn insert<T: Item + ?Sized>(&mut self, item: &T) -> Result<(), Error> {
        let indices = self.derive_indices(item)?;
        self.set_bits(&indices);
        Ok(())
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether no slot has been set yet.
    pub fn is_empty(&self) -> bool {
        self.bit_array.num_bits_set() == 0
    }

    /// Returns the number of slots.
    pub fn size(&self) -> u64 {
        self.bit_array.len()
    }

    /// Returns the number of slots set. Never decreases.
    pub fn num_bits_set(&self) -> u64 {
        self.bit_array.num_bits_set()
    }

    /// Returns the fraction of slots set.
    pub fn load_factor(&self) -> f64 {
        self.bit_array.num_bits_set() as f64 / self.bit_array.len() as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// This is the chance that three independent, uniformly distributed probes all hit a set
    /// slot: `load_factor^3`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(NUM_HASHES as i32)
    }

    /// Returns the hash family.
    pub fn hash_family(&self) -> &H {
        &self.hash_family
    }

    pub(super) fn num_words(&self) -> usize {
        self.bit_array.num_words()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn check_bits(&self, indices: &[u64; NUM_HASHES]) -> bool {
        indices.iter().all(|&index| self.bit_array.get(index))
    }

    fn set_bits(&mut self, indices: &[u64; NUM_HASHES]) {
        for &index in indices {
            self.bit_array.set(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloom::CharCodes;
    use crate::error::ErrorKind;

    /// Returns fixed hash values regardless of the item.
    struct Constant([i32; NUM_HASHES]);

    impl HashFamily for Constant {
        fn hash(&self, _: CharCodes<'_>) -> [i32; NUM_HASHES] {
            self.0
        }
    }

    #[test]
    fn test_insert_and_may_contain() {
        let mut filter = BloomFilter::new(100).unwrap();

        assert!(!filter.may_contain("foo").unwrap());
        filter.insert("foo").unwrap();
        assert!(filter.may_contain("foo").unwrap());
        assert!(!filter.is_empty());
        assert_eq!(filter.num_bits_set(), 3);
    }

    #[test]
    fn test_derive_indices_reference_values() {
        let filter = BloomFilter::new(100).unwrap();
        assert_eq!(filter.derive_indices("").unwrap(), [0, 81, 0]);
        assert_eq!(filter.derive_indices("bar").unwrap(), [99, 34, 10]);
        assert_eq!(filter.derive_indices("😀").unwrap(), [99, 22, 84]);
        // negative polynomial hash
        assert_eq!(
            filter
                .derive_indices("The quick brown fox jumps over the lazy dog")
                .unwrap(),
            [41, 34, 35]
        );
    }

    #[test]
    fn test_sign_removal_covers_min_value() {
        let filter = BloomFilterBuilder::with_size(10)
            .unwrap()
            .hash_family(Constant([i32::MIN, -1, i32::MAX]))
            .build();
        assert_eq!(filter.derive_indices("x").unwrap(), [8, 1, 7]);

        let filter = BloomFilterBuilder::with_size(1000)
            .unwrap()
            .hash_family(Constant([i32::MIN, i32::MIN + 1, -1000]))
            .build();
        assert_eq!(filter.derive_indices("x").unwrap(), [648, 647, 0]);
    }

    #[test]
    fn test_coinciding_indices() {
        let mut filter = BloomFilterBuilder::with_size(10)
            .unwrap()
            .hash_family(Constant([3, 3, -3]))
            .build();
        filter.insert("anything").unwrap();
        assert_eq!(filter.num_bits_set(), 1);
        assert!(filter.may_contain("something else").unwrap());
    }

    #[test]
    fn test_invalid_item_leaves_store_untouched() {
        let mut filter = BloomFilter::new(16).unwrap();
        let err = filter.insert([0xc0u8, 0x80].as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidItem);
        assert!(filter.is_empty());

        let err = filter.may_contain(&vec![0xffu8]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidItem);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(100).unwrap();
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        filter.insert("foo").unwrap();
        assert_eq!(filter.size(), 100);
        assert!((filter.load_factor() - 0.03).abs() < 1e-12);
        assert!((filter.estimated_fpp() - 0.000027).abs() < 1e-12);
    }

    #[test]
    fn test_size_one_is_full_after_first_insert() {
        let mut filter = BloomFilter::new(1).unwrap();
        assert!(!filter.may_contain("a").unwrap());
        filter.insert("a").unwrap();
        assert_eq!(filter.load_factor(), 1.0);
        assert_eq!(filter.estimated_fpp(), 1.0);
    }
}
