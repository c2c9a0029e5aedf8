// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layer definitions: field schema and geometry type of a layer

use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;
use std::fmt;

/// Target scalar type of an attribute field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Real,
    String,
    Date,
    DateTime,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Integer => "Integer",
            FieldType::Real => "Real",
            FieldType::String => "String",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
        };
        f.write_str(name)
    }
}

/// Geometry type shared by all features of a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    MultiPoint,
    Polygon,
}

/// A named, typed attribute field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefn {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDefn {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Layer definition
///
/// Defines the fields available for features in a layer. Field indices are
/// positions in [`fields`](Self::fields) and never change once the definition
/// is built.
#[derive(Clone, Debug, Serialize)]
pub struct LayerDefn {
    name: String,
    geometry_type: GeometryType,
    fields: Vec<FieldDefn>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl LayerDefn {
    /// Build a definition from fields in index order
    ///
    /// A name that repeats keeps its first position; later duplicates are dropped.
    pub fn new(name: impl Into<String>, geometry_type: GeometryType, fields: Vec<FieldDefn>) -> Self {
        let mut index = FxHashMap::with_capacity_and_hasher(fields.len(), Default::default());
        let mut unique = Vec::with_capacity(fields.len());
        for field in fields {
            if index.contains_key(&field.name) {
                continue;
            }
            index.insert(field.name.clone(), unique.len());
            unique.push(field);
        }
        Self {
            name: name.into(),
            geometry_type,
            fields: unique,
            index,
        }
    }

    /// Layer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry type of the layer's features
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// Fields in index order
    pub fn fields(&self) -> &[FieldDefn] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Get field definition by index
    pub fn field(&self, index: usize) -> Option<&FieldDefn> {
        self.fields.get(index)
    }

    /// Get the index of a field by name
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}
