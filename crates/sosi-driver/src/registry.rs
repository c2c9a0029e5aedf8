// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide table of known SOSI attribute tags
//!
//! Maps a tag name to the ordered, typed sub-fields its value decomposes
//! into. The table is populated once by [`initialize`] and dropped by
//! [`teardown`]. Data sources hold their own `Arc` snapshot, so lookups never
//! take the lock.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use sosi_model::FieldType;
use std::sync::Arc;

use FieldType::{Date, DateTime, Integer, Real, String as Str};

/// One typed sub-field of a tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleType {
    pub name: String,
    pub field_type: FieldType,
}

impl SimpleType {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// The decomposition of one tag into sub-fields, in value order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeType {
    pub tag: String,
    pub fields: Vec<SimpleType>,
}

impl CompositeType {
    /// Number of sub-fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the whole value maps to a single field
    pub fn is_simple(&self) -> bool {
        self.fields.len() == 1
    }
}

/// Tag name to sub-field decomposition
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: FxHashMap<String, CompositeType>,
}

/// Tags whose value is one scalar; the field carries the tag's name
const SIMPLE_TAGS: &[(&str, FieldType)] = &[
    ("OBJTYPE", Str),
    ("KOMM", Integer),
    ("NAVN", Str),
    ("STRENG", Str),
    ("MERKNAD", Str),
    ("INFORMASJON", Str),
    ("LTEMA", Integer),
    ("HØYDE", Real),
    ("MAKSHØYDE", Real),
    ("MINHØYDE", Real),
    ("BREDDE", Real),
    ("LENGDE", Real),
    ("DYBDE", Real),
    ("HREF", Str),
    ("BYGGNR", Integer),
    ("BYGGTYP_NBR", Integer),
    ("BYGGSTAT", Str),
    ("MEDIUM", Str),
    ("STATUS", Str),
    ("OPPHAV", Str),
    ("HOVEDPARSELL", Integer),
    ("VEGLENKEADRESSE", Str),
    ("ADRESSENAVN", Str),
    ("HUSNR", Integer),
    ("BOKSTAV", Str),
    ("POSTNUMMER", Integer),
    ("GÅRDSNUMMER", Integer),
    ("BRUKSNUMMER", Integer),
    ("FESTENUMMER", Integer),
    ("SEKSJONSNUMMER", Integer),
    ("MATRIKKELKOMMUNE", Integer),
    ("DATAFANGSTDATO", Date),
    ("VERIFISERINGSDATO", Date),
    ("OPPDATERINGSDATO", DateTime),
    ("FØRSTEDATAFANGSTDATO", Date),
    ("TRE_D_NIVÅ", Integer),
];

/// Tags whose value splits into several typed parts
const COMPOSITE_TAGS: &[(&str, &[(&str, FieldType)])] = &[
    (
        "KVALITET",
        &[
            ("MÅLEMETODE", Integer),
            ("NØYAKTIGHET", Integer),
            ("SYNBARHET", Integer),
            ("H-MÅLEMETODE", Integer),
            ("H-NØYAKTIGHET", Integer),
        ],
    ),
    (
        "MATRIKKELNUMMER",
        &[
            ("MATRIKKELKOMMUNE", Integer),
            ("GÅRDSNUMMER", Integer),
            ("BRUKSNUMMER", Integer),
            ("FESTENUMMER", Integer),
            ("SEKSJONSNUMMER", Integer),
        ],
    ),
    (
        "IDENT",
        &[("LOKALID", Str), ("NAVNEROM", Str), ("VERSJONID", Str)],
    ),
    (
        "KOPIDATA",
        &[
            ("OMRÅDEID", Integer),
            ("ORIGINALDATAVERT", Str),
            ("KOPIDATO", DateTime),
        ],
    ),
    (
        "VNR",
        &[("VEGKATEGORI", Str), ("VEGSTATUS", Str), ("VEGNUMMER", Integer)],
    ),
    (
        "PERIODE",
        &[("PERIODE-FRA", Date), ("PERIODE-TIL", Date)],
    ),
    (
        "TEKST-PLASSERING",
        &[("TEKSTHØYDE", Real), ("TEKSTRETNING", Real)],
    ),
];

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tag
    ///
    /// Sub-fields of composite tags are registered as tags of their own too,
    /// so the nested form (`..KVALITET` followed by `...MÅLEMETODE 82`) types
    /// its values the same way as the inline form (`..KVALITET 82`).
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(tag, field_type) in SIMPLE_TAGS {
            registry.register(tag, vec![SimpleType::new(tag, field_type)]);
        }
        for &(tag, fields) in COMPOSITE_TAGS {
            let fields = fields
                .iter()
                .map(|&(name, field_type)| SimpleType::new(name, field_type))
                .collect();
            registry.register(tag, fields);
        }
        for &(_, fields) in COMPOSITE_TAGS {
            for &(name, field_type) in fields {
                if registry.lookup(name).is_none() {
                    registry.register(name, vec![SimpleType::new(name, field_type)]);
                }
            }
        }
        registry
    }

    /// Add or replace the decomposition of a tag
    pub fn register(&mut self, tag: impl Into<String>, fields: Vec<SimpleType>) {
        let tag = tag.into();
        self.types.insert(tag.clone(), CompositeType { tag, fields });
    }

    /// Look up a tag; `None` for unregistered tags
    pub fn lookup(&self, tag: &str) -> Option<&CompositeType> {
        self.types.get(tag)
    }

    /// Number of registered tags
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

static REGISTRY: Lazy<RwLock<Option<Arc<TypeRegistry>>>> = Lazy::new(|| RwLock::new(None));

/// Populate the process-wide registry with the built-in tags
///
/// Safe to call more than once; later calls keep the existing table. Must
/// happen before any data source is opened through the driver.
pub fn initialize() {
    let mut slot = REGISTRY.write();
    if slot.is_none() {
        let registry = TypeRegistry::builtin();
        log::debug!("Initialized SOSI type registry with {} tags", registry.len());
        *slot = Some(Arc::new(registry));
    }
}

/// Release the process-wide registry
///
/// Data sources opened earlier keep their own snapshot and stay usable.
pub fn teardown() {
    REGISTRY.write().take();
}

/// The process-wide registry, if initialized
pub fn global() -> Option<Arc<TypeRegistry>> {
    REGISTRY.read().clone()
}

/// Whether [`initialize`] has run and [`teardown`] has not
pub fn is_initialized() -> bool {
    REGISTRY.read().is_some()
}
