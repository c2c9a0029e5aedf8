// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::datasource::SosiDataSource;
use crate::options::OpenOptions;
use memchr::memmem;
use sosi_model::{DataSource, Driver, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected by [`SosiDriver::identify`]
const HEAD_LEN: usize = 1024;

/// Read-only driver for SOSI files
#[derive(Clone, Copy, Debug, Default)]
pub struct SosiDriver;

impl SosiDriver {
    pub const NAME: &'static str = "SOSI";

    /// Open a file with explicit options, keeping the concrete type
    pub fn open_with_options(&self, path: &Path, options: &OpenOptions) -> Result<SosiDataSource> {
        SosiDataSource::open(path, options)
    }

    /// Cheap check whether a file looks like SOSI
    ///
    /// Only reads the first kilobyte and looks for a `.HODE` group.
    pub fn identify(&self, path: &Path) -> bool {
        let mut head = Vec::with_capacity(HEAD_LEN);
        let read = File::open(path)
            .and_then(|file| file.take(HEAD_LEN as u64).read_to_end(&mut head));
        read.is_ok() && memmem::find(&head, b".HODE").is_some()
    }
}

impl Driver for SosiDriver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn open(&self, path: &Path, update: bool) -> Result<Box<dyn DataSource>> {
        let options = OpenOptions::new().update(update);
        Ok(Box::new(self.open_with_options(path, &options)?))
    }
}
