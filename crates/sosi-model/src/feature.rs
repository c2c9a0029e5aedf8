// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Features: one geometry plus attribute values addressed by field index

use crate::LayerDefn;
use chrono::{NaiveDate, NaiveDateTime};
use geo_types::Geometry;
use std::sync::Arc;

/// A typed attribute value
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Interpret the value as `String`
    pub fn into_string(self) -> Option<String> {
        match self {
            FieldValue::String(rv) => Some(rv),
            _ => None,
        }
    }

    /// Interpret the value as `f64`
    pub fn into_real(self) -> Option<f64> {
        match self {
            FieldValue::Real(rv) => Some(rv),
            _ => None,
        }
    }

    /// Interpret the value as `i64`
    pub fn into_int(self) -> Option<i64> {
        match self {
            FieldValue::Integer(rv) => Some(rv),
            _ => None,
        }
    }

    /// Interpret the value as a date
    pub fn into_date(self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(rv) => Some(rv),
            FieldValue::DateTime(rv) => Some(rv.date()),
            _ => None,
        }
    }

    /// Interpret the value as a date-time
    pub fn into_datetime(self) -> Option<NaiveDateTime> {
        match self {
            FieldValue::DateTime(rv) => Some(rv),
            _ => None,
        }
    }
}

/// A feature produced by a layer
///
/// Owned by the caller. Field slots are `None` when the source record did not
/// carry a usable value for that field.
#[derive(Clone, Debug)]
pub struct Feature {
    fid: u64,
    defn: Arc<LayerDefn>,
    geometry: Option<Geometry<f64>>,
    fields: Vec<Option<FieldValue>>,
}

impl Feature {
    /// Create a feature with every field unset
    pub fn new(defn: Arc<LayerDefn>, fid: u64) -> Self {
        let fields = vec![None; defn.field_count()];
        Self {
            fid,
            defn,
            geometry: None,
            fields,
        }
    }

    /// Feature identifier, unique within one pass over a layer
    pub fn fid(&self) -> u64 {
        self.fid
    }

    /// Definition of the layer that produced this feature
    pub fn defn(&self) -> &LayerDefn {
        &self.defn
    }

    pub fn geometry(&self) -> Option<&Geometry<f64>> {
        self.geometry.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Option<Geometry<f64>>) {
        self.geometry = geometry;
    }

    /// Take ownership of the geometry
    pub fn into_geometry(self) -> Option<Geometry<f64>> {
        self.geometry
    }

    /// Get the value of a named field
    ///
    /// Returns `None` if the field does not exist or is unset.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        let index = self.defn.field_index(name)?;
        self.field_by_index(index)
    }

    /// Get the value of a field by index
    pub fn field_by_index(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index).and_then(|v| v.as_ref())
    }

    /// Whether the field at `index` holds a value
    pub fn is_field_set(&self, index: usize) -> bool {
        self.field_by_index(index).is_some()
    }

    /// Set the field at `index`; out-of-range indices are ignored
    pub fn set_field(&mut self, index: usize, value: FieldValue) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = Some(value);
        }
    }

    /// All field slots in index order
    pub fn fields(&self) -> &[Option<FieldValue>] {
        &self.fields
    }
}
