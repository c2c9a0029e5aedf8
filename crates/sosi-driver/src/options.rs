// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sosi_model::TextEncoding;

/// Options for opening a SOSI data source
///
/// # Example
///
/// ```ignore
/// let options = OpenOptions::new().encoding(TextEncoding::Iso8859_1);
/// let ds = SosiDriver.open_with_options(path, &options)?;
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Request write access; always rejected by this read-only driver
    pub update: bool,
    /// Character set to decode with instead of the one in `..TEGNSETT`
    pub encoding: Option<TextEncoding>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}
