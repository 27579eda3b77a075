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

use super::BloomFilter;
use crate::error::Error;
use crate::hash::HashFamily;
use crate::hash::TripleHash;

/// The smallest valid filter size, in slots.
pub const MIN_SIZE: u64 = 1;
/// The largest valid filter size, in slots (256 MiB of packed store).
///
/// Hash families produce `i32` values, so no derived index exceeds `2^31`; a larger store
/// would hold slots that can never be set.
pub const MAX_SIZE: u64 = 1 << 31;

/// Builder for creating [`BloomFilter`] instances.
///
/// The size is validated up front by [`with_size()`](Self::with_size); the hash family
/// defaults to [`TripleHash`] and can be swapped with [`hash_family()`](Self::hash_family).
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H = TripleHash> {
    size: u64,
    hash_family: H,
}

impl BloomFilterBuilder {
    /// Creates a builder for a filter with `size` slots.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if `size` is zero, negative, or larger than
    /// [`MAX_SIZE`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilterBuilder;
    /// # use tribloom::error::ErrorKind;
    /// let filter = BloomFilterBuilder::with_size(1024).unwrap().build();
    /// assert_eq!(filter.size(), 1024);
    ///
    /// let err = BloomFilterBuilder::with_size(-5).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    /// ```
    pub fn with_size<S>(size: S) -> Result<Self, Error>
    where
        S: TryInto<u64> + Copy + fmt::Display,
    {
        match TryInto::<u64>::try_into(size) {
            Ok(n) if (MIN_SIZE..=MAX_SIZE).contains(&n) => Ok(BloomFilterBuilder {
                size: n,
                hash_family: TripleHash,
            }),
            _ => {
                tracing::debug!(%size, "rejected bloom filter size");
                Err(Error::config_invalid(format!(
                    "size must be an integer in [{MIN_SIZE}, {MAX_SIZE}]"
                ))
                .with_context("size", size))
            }
        }
    }
}

impl<H: HashFamily> BloomFilterBuilder<H> {
    /// Replaces the hash family used to derive slot indices.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tribloom::bloom::BloomFilterBuilder;
    /// use tribloom::hash::Murmur3Hash;
    ///
    /// let filter = BloomFilterBuilder::with_size(100)
    ///     .unwrap()
    ///     .hash_family(Murmur3Hash::with_seed(42))
    ///     .build();
    /// assert_eq!(filter.hash_family().seed(), 42);
    /// ```
    pub fn hash_family<F: HashFamily>(self, hash_family: F) -> BloomFilterBuilder<F> {
        BloomFilterBuilder {
            size: self.size,
            hash_family,
        }
    }

    /// Returns the validated size, in slots.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Builds the filter with all slots unset.
    pub fn build(self) -> BloomFilter<H> {
        let filter = BloomFilter::from_parts(self.size, self.hash_family);
        tracing::debug!(
            size = self.size,
            num_words = filter.num_words(),
            hash_family = std::any::type_name::<H>(),
            "created bloom filter"
        );
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_accepts_integer_types() {
        assert_eq!(BloomFilterBuilder::with_size(1).unwrap().size(), 1);
        assert_eq!(BloomFilterBuilder::with_size(100u8).unwrap().size(), 100);
        assert_eq!(BloomFilterBuilder::with_size(100i64).unwrap().size(), 100);
        assert_eq!(
            BloomFilterBuilder::with_size(MAX_SIZE).unwrap().size(),
            MAX_SIZE
        );
    }

    #[test]
    fn test_rejects_non_positive() {
        for size in [0i64, -1, -5, i64::MIN] {
            let err = BloomFilterBuilder::with_size(size).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_rejects_oversized() {
        let err = BloomFilterBuilder::with_size(MAX_SIZE + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("size: 2147483649"));

        let err = BloomFilterBuilder::with_size(1u64 << 35).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_largest_size_is_fully_addressable() {
        assert_eq!(MAX_SIZE, 1u64 << 31);

        let filter = BloomFilterBuilder::with_size(MAX_SIZE)
            .unwrap()
            .hash_family(Extremes)
            .build();
        assert_eq!(filter.size(), MAX_SIZE);
        // i32::MAX lands on the last slot, i32::MIN wraps back to the first
        assert_eq!(
            filter.derive_indices("x").unwrap(),
            [MAX_SIZE - 1, 0, MAX_SIZE - 1]
        );
    }

    struct Extremes;

    impl HashFamily for Extremes {
        fn hash(&self, _: crate::bloom::CharCodes<'_>) -> [i32; 3] {
            [i32::MAX, i32::MIN, i32::MIN + 1]
        }
    }
}
