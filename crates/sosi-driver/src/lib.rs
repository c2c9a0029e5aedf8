// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SOSI Driver
//!
//! Read-only access to SOSI files as four feature layers: `polygons`,
//! `points`, `lines` and `text`.
//!
//! ## Overview
//!
//! Opening a file runs two passes over its records:
//!
//! 1. **Schema pass**: collects the attribute fields of each layer, decomposing
//!    known tags through the [`TypeRegistry`]
//! 2. **Assembly pass**: builds every point, line, arc and text geometry into
//!    an arena indexed by serial number
//!
//! Layers then iterate lazily. Attribute values are coerced on each
//! `next_feature` call and polygon rings are resolved from their references at
//! the same time.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sosi_driver::{initialize, SosiDriver};
//! use sosi_model::{DataSource, Driver, Layer};
//!
//! initialize();
//! let mut ds = SosiDriver.open(Path::new("kart.sos"), false)?;
//! for i in 0..ds.layer_count() {
//!     let layer = ds.layer(i).unwrap();
//!     println!("{}: {} features", layer.name(), layer.feature_count());
//! }
//! ```
//!
//! The process-wide registry must be initialized before any data source is
//! opened through [`SosiDriver`] or [`SosiDataSource::open`], and torn down
//! only after they are no longer needed.

pub mod attributes;
mod datasource;
mod driver;
mod layer;
mod options;
pub mod registry;
pub mod schema;

pub use attributes::{apply_attributes, coerce};
pub use datasource::SosiDataSource;
pub use driver::SosiDriver;
pub use layer::SosiLayer;
pub use options::OpenOptions;
pub use registry::{
    global, initialize, is_initialized, teardown, CompositeType, SimpleType, TypeRegistry,
};
pub use schema::{geometry_type_of, SchemaBuilder};
