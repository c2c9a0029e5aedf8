// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SOSI Model - Trait definitions and shared types for SOSI vector data
//!
//! This crate provides the abstractions shared by the SOSI reader crates. It
//! splits the problem the same way a GIS driver stack does: a file-access side
//! that hands out raw records, and a feature-layer side that turns those
//! records into typed features grouped into layers.
//!
//! # Architecture
//!
//! - [`RecordSource`] - Sequential and serial-indexed access to raw SOSI records
//! - [`Layer`] - Sequential feature iteration over one geometry class
//! - [`DataSource`] - A set of layers opened from one file
//! - [`Driver`] - Entry point that opens a path into a [`DataSource`]
//!
//! # Example
//!
//! ```ignore
//! use sosi_model::{DataSource, Driver, Layer};
//!
//! let driver: Box<dyn Driver> = get_driver();
//! let mut ds = driver.open(path, false)?;
//! for i in 0..ds.layer_count() {
//!     let layer = ds.layer(i).unwrap();
//!     println!("{}: {} fields", layer.name(), layer.defn().field_count());
//! }
//! ```

pub mod defn;
pub mod error;
pub mod feature;
pub mod record;
pub mod source;
pub mod traits;
pub mod types;

// Re-export all public types
pub use defn::*;
pub use error::*;
pub use feature::*;
pub use record::*;
pub use source::*;
pub use traits::*;
pub use types::*;
