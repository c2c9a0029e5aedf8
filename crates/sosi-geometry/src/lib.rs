// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SOSI Geometry Assembly
//!
//! Turns raw SOSI records into `geo-types` geometries. This crate uses the
//! `RecordSource` trait from `sosi-model` for record access, making it
//! independent of any specific reader.
//!
//! ## Overview
//!
//! - **Points, lines and text**: built directly from a record's coordinates
//! - **Arcs**: `BUEP` and `SIRKELP` interpolated at a fixed resolution
//! - **Arena**: every assembled geometry stored by serial number
//! - **Polygons**: `FLATE` rings resolved from `..REF` lists against the arena
//!
//! ## Architecture
//!
//! - `GeometryBuilder`: Trait for individual group kind builders
//! - `GeometryAssembler`: Registry of builders, runs the assembly pass
//! - `GeometryArena`: Serial-indexed result of the assembly pass
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sosi_geometry::{resolve_polygon, GeometryAssembler};
//!
//! let arena = GeometryAssembler::with_default_builders().assemble(&file);
//! for record in file.records() {
//!     if let Some(polygon) = resolve_polygon(record, &arena) {
//!         println!("{}: {} rings", record.serial, 1 + polygon.interiors().len());
//!     }
//! }
//! ```

pub mod arc;
pub mod arena;
pub mod assembler;
pub mod builders;
pub mod error;
pub mod ring;

// Re-export main types
pub use arc::{full_circle, interpolate_arc, Circle, ARC_INTERPOLATION_FULL_CIRCLE};
pub use arena::GeometryArena;
pub use assembler::{GeometryAssembler, GeometryBuilder};
pub use error::{Error, Result};
pub use ring::{resolve_polygon, resolve_ring};

// Re-export builders
pub use builders::{ArcBuilder, CircleBuilder, LineBuilder, PointBuilder, TextBuilder};
