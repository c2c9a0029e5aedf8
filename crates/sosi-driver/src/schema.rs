// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Schema pass: discovers the attribute fields of each layer

use crate::registry::TypeRegistry;
use rustc_hash::FxHashSet;
use sosi_model::{FieldDefn, FieldType, GeometryClass, GeometryType, LayerDefn, RecordSource};
use std::sync::Arc;

/// Geometry type exposed by the layer of a class
pub fn geometry_type_of(class: GeometryClass) -> GeometryType {
    match class {
        GeometryClass::Polygon => GeometryType::Polygon,
        GeometryClass::Point => GeometryType::Point,
        GeometryClass::Line => GeometryType::LineString,
        GeometryClass::Text => GeometryType::MultiPoint,
    }
}

/// Fields collected for one class, in first-seen order
#[derive(Default)]
struct FieldTable {
    fields: Vec<FieldDefn>,
    seen: FxHashSet<String>,
}

impl FieldTable {
    fn add(&mut self, name: &str, field_type: FieldType) {
        if self.seen.insert(name.to_string()) {
            self.fields.push(FieldDefn::new(name, field_type));
        }
    }
}

/// Builds the four layer definitions from the attribute tags of a file
///
/// Registered tags contribute each of their sub-fields; unregistered tags
/// contribute one String field named after the tag. The first occurrence of
/// a name fixes its index.
pub struct SchemaBuilder<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Scan every record once and freeze one definition per class
    ///
    /// The result is indexed by [`GeometryClass::index`].
    pub fn build(&self, source: &dyn RecordSource) -> [Arc<LayerDefn>; 4] {
        let mut tables = source
            .records()
            .fold(<[FieldTable; 4]>::default(), |mut tables, record| {
                if let Some(class) = record.geometry_class() {
                    let table = &mut tables[class.index()];
                    for attribute in &record.attributes {
                        self.register_tag(table, &attribute.tag);
                    }
                }
                tables
            });

        GeometryClass::ALL.map(|class| {
            let fields = std::mem::take(&mut tables[class.index()].fields);
            log::debug!("Layer '{}': {} field(s)", class.layer_name(), fields.len());
            Arc::new(LayerDefn::new(
                class.layer_name(),
                geometry_type_of(class),
                fields,
            ))
        })
    }

    fn register_tag(&self, table: &mut FieldTable, tag: &str) {
        match self.registry.lookup(tag) {
            Some(composite) => {
                for field in &composite.fields {
                    table.add(&field.name, field.field_type);
                }
            }
            None => table.add(tag, FieldType::String),
        }
    }
}
