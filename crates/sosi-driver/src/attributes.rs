// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute coercion from raw record values into feature fields

use crate::registry::TypeRegistry;
use sosi_model::{Feature, FieldType, FieldValue, RawRecord};
use sosi_parser::coerce::{to_date, to_datetime, to_integer, to_real};
use sosi_parser::{split_value, unquote};

/// Coerce one token into a field value
///
/// Integer and Real always produce a value (0 for malformed input). Date and
/// DateTime produce nothing for zero or impossible dates, which is how SOSI
/// marks absent dates.
pub fn coerce(token: &str, field_type: FieldType) -> Option<FieldValue> {
    match field_type {
        FieldType::Integer => Some(FieldValue::Integer(to_integer(token))),
        FieldType::Real => Some(FieldValue::Real(to_real(token))),
        FieldType::String => Some(FieldValue::String(unquote(token).to_string())),
        FieldType::Date => to_date(token).to_naive().map(FieldValue::Date),
        FieldType::DateTime => to_datetime(token).to_naive().map(FieldValue::DateTime),
    }
}

/// Fill the fields of `feature` from the attributes of `record`
///
/// The registry decides which field names a tag fills; the feature's layer
/// definition decides the type each value is coerced to. Names the definition
/// lacks are skipped.
pub fn apply_attributes(feature: &mut Feature, record: &RawRecord, registry: &TypeRegistry) {
    for attribute in &record.attributes {
        match registry.lookup(&attribute.tag) {
            Some(composite) if composite.is_simple() => {
                set(feature, &composite.fields[0].name, &attribute.value, false);
            }
            Some(composite) => {
                let tokens = split_value(&attribute.value);
                for (field, token) in composite.fields.iter().zip(tokens) {
                    set(feature, &field.name, token, false);
                }
            }
            None => set(feature, &attribute.tag, &attribute.value, true),
        }
    }
}

/// Coerce `token` to the type of the field called `name` and store it
///
/// `raw` keeps String values verbatim, quotes included. The first value
/// stored in a field wins.
fn set(feature: &mut Feature, name: &str, token: &str, raw: bool) {
    let Some(index) = feature.defn().field_index(name) else {
        return;
    };
    if feature.is_field_set(index) {
        return;
    }
    let Some(field_type) = feature.defn().field(index).map(|f| f.field_type) else {
        return;
    };
    let value = match field_type {
        FieldType::String if raw => Some(FieldValue::String(token.to_string())),
        _ => coerce(token, field_type),
    };
    if let Some(value) = value {
        feature.set_field(index, value);
    }
}
