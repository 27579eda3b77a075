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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter answers whether an item is "possibly present" or "definitely absent" using
//! a fixed number of slots. False positive matches are possible, but false negatives are not.
//!
//! # Properties
//!
//! - **No false negatives**: If an item was inserted, `may_contain()` will always return `true`
//! - **Possible false positives**: `may_contain()` may return `true` for items never inserted
//! - **Fixed size**: The number of slots is chosen at construction and never changes
//! - **Insert only**: Slots are never cleared, so there is no removal
//!
//! # Usage
//!
//! ```rust
//! use tribloom::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000)?;
//!
//! filter.insert("apple")?;
//! filter.insert("banana")?;
//!
//! assert!(filter.may_contain("apple")?); // true - definitely inserted
//! assert!(!filter.may_contain("grape")?); // false - never inserted (probably)
//!
//! println!("Size: {} slots", filter.size());
//! println!("Slots set: {}", filter.num_bits_set());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! # Ok::<(), tribloom::error::Error>(())
//! ```
//!
//! # Items
//!
//! Items are anything implementing [`Item`]: text (`str`, `String`), UTF-8 bytes (`[u8]`,
//! `Vec<u8>`) and raw UTF-16 code units (`[u16]`, `Vec<u16>`). Bytes that are not
//! well-formed UTF-8 are rejected with an `InvalidItem` error.
//!
//! # Implementation Details
//!
//! - Three slot indices per item, from a [`HashFamily`](crate::hash::HashFamily)
//! - The default family is [`TripleHash`](crate::hash::TripleHash): base-31 polynomial, djb2
//!   and shift-xor hashes in 32-bit wrapping arithmetic
//! - Slots packed into `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod builder;
mod item;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_SIZE;
pub use self::builder::MIN_SIZE;
pub use self::item::CharCodes;
pub use self::item::Item;
pub use self::sketch::BloomFilter;
