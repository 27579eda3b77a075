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

//! Decomposition of items into character codes.
//!
//! Every item is hashed as a left-to-right sequence of UTF-16 code units, the same
//! "character codes" a text string is made of. Text is always decomposable; raw bytes are
//! decomposable only when they are well-formed UTF-8.

use std::iter::Copied;
use std::slice;
use std::str::EncodeUtf16;

use crate::error::Error;

/// An item that can be inserted into or queried against a filter.
///
/// # Examples
///
/// ```
/// use tribloom::bloom::Item;
///
/// let codes: Vec<u16> = "héllo".char_codes().unwrap().collect();
/// assert_eq!(codes, [104, 233, 108, 108, 111]);
///
/// let err = b"\xc3".as_slice().char_codes().unwrap_err();
/// assert_eq!(err.kind(), tribloom::error::ErrorKind::InvalidItem);
/// ```
pub trait Item {
    /// Returns the character codes of this item, or an `InvalidItem` error if it has none.
    fn char_codes(&self) -> Result<CharCodes<'_>, Error>;
}

/// Iterator over the UTF-16 code units of an item.
#[derive(Debug, Clone)]
pub struct CharCodes<'a> {
    inner: Inner<'a>,
}

#[derive(Debug, Clone)]
enum Inner<'a> {
    Text(EncodeUtf16<'a>),
    Units(Copied<slice::Iter<'a, u16>>),
}

impl<'a> CharCodes<'a> {
    pub(crate) fn from_text(text: &'a str) -> Self {
        CharCodes {
            inner: Inner::Text(text.encode_utf16()),
        }
    }

    pub(crate) fn from_units(units: &'a [u16]) -> Self {
        CharCodes {
            inner: Inner::Units(units.iter().copied()),
        }
    }
}

impl Iterator for CharCodes<'_> {
    type Item = u16;

    #[inline]
    fn next(&mut self) -> Option<u16> {
        match &mut self.inner {
            Inner::Text(it) => it.next(),
            Inner::Units(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Text(it) => it.size_hint(),
            Inner::Units(it) => it.size_hint(),
        }
    }
}

impl Item for str {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        Ok(CharCodes::from_text(self))
    }
}

impl Item for String {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        self.as_str().char_codes()
    }
}

impl Item for [u8] {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        match std::str::from_utf8(self) {
            Ok(text) => Ok(CharCodes::from_text(text)),
            Err(err) => {
                tracing::debug!(
                    len = self.len(),
                    valid_up_to = err.valid_up_to(),
                    "rejected item that is not well-formed UTF-8"
                );
                Err(Error::invalid_item("item is not well-formed UTF-8")
                    .with_context("valid_up_to", err.valid_up_to())
                    .with_context("len", self.len())
                    .set_source(err))
            }
        }
    }
}

impl Item for Vec<u8> {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        self.as_slice().char_codes()
    }
}

impl Item for [u16] {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        Ok(CharCodes::from_units(self))
    }
}

impl Item for Vec<u16> {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        self.as_slice().char_codes()
    }
}

impl<T: Item + ?Sized> Item for &T {
    fn char_codes(&self) -> Result<CharCodes<'_>, Error> {
        (**self).char_codes()
    }
}
