// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for SOSI data representation
//!
//! This module defines the identifiers and classifications shared by the
//! reader, the geometry assembler and the layer implementation.

use geo_types::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe record serial number
///
/// Wraps the file-assigned group number (e.g., `.KURVE 12:` becomes Serial(12)).
/// Serials are unique within a file but not necessarily contiguous.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct Serial(pub u32);

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl From<u32> for Serial {
    fn from(id: u32) -> Self {
        Serial(id)
    }
}

impl From<Serial> for u32 {
    fn from(id: Serial) -> Self {
        id.0
    }
}

/// SOSI group kind (the word after the leading dot of a group)
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupKind {
    /// File header (`.HODE`)
    Hode,
    /// Single point (`.PUNKT`)
    Punkt,
    /// Symbol placement, read as a point (`.SYMBOL`)
    Symbol,
    /// Polyline (`.KURVE`)
    Kurve,
    /// Polyline without topology (`.LINJE`)
    Linje,
    /// Circular arc through three points (`.BUEP`)
    Buep,
    /// Full circle through three points (`.SIRKELP`)
    Sirkelp,
    /// Text placement (`.TEKST`)
    Tekst,
    /// Area bounded by references (`.FLATE`)
    Flate,
    /// End of data (`.SLUTT`)
    Slutt,
    /// Any other group, kept with its original name
    Unknown(String),
}

impl GroupKind {
    /// Parse a group name (case-insensitive)
    pub fn parse(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "HODE" => GroupKind::Hode,
            "PUNKT" => GroupKind::Punkt,
            "SYMBOL" => GroupKind::Symbol,
            "KURVE" => GroupKind::Kurve,
            "LINJE" => GroupKind::Linje,
            "BUEP" => GroupKind::Buep,
            "SIRKELP" => GroupKind::Sirkelp,
            "TEKST" => GroupKind::Tekst,
            "FLATE" => GroupKind::Flate,
            "SLUTT" => GroupKind::Slutt,
            _ => GroupKind::Unknown(name.to_string()),
        }
    }

    /// Get the group name as written in SOSI files
    pub fn name(&self) -> &str {
        match self {
            GroupKind::Hode => "HODE",
            GroupKind::Punkt => "PUNKT",
            GroupKind::Symbol => "SYMBOL",
            GroupKind::Kurve => "KURVE",
            GroupKind::Linje => "LINJE",
            GroupKind::Buep => "BUEP",
            GroupKind::Sirkelp => "SIRKELP",
            GroupKind::Tekst => "TEKST",
            GroupKind::Flate => "FLATE",
            GroupKind::Slutt => "SLUTT",
            GroupKind::Unknown(s) => s,
        }
    }

    /// Geometry class a feature of this group belongs to
    ///
    /// Returns `None` for groups that never produce features (header,
    /// end marker, unsupported elements).
    pub fn geometry_class(&self) -> Option<GeometryClass> {
        match self {
            GroupKind::Punkt | GroupKind::Symbol => Some(GeometryClass::Point),
            GroupKind::Kurve | GroupKind::Linje | GroupKind::Buep | GroupKind::Sirkelp => {
                Some(GeometryClass::Line)
            }
            GroupKind::Tekst => Some(GeometryClass::Text),
            GroupKind::Flate => Some(GeometryClass::Polygon),
            GroupKind::Hode | GroupKind::Slutt | GroupKind::Unknown(_) => None,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.name())
    }
}

/// Geometry class of a feature, one per exposed layer
///
/// Lines and arcs share the `Line` class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryClass {
    Polygon,
    Point,
    Line,
    Text,
}

impl GeometryClass {
    /// All classes, in layer order
    pub const ALL: [GeometryClass; 4] = [
        GeometryClass::Polygon,
        GeometryClass::Point,
        GeometryClass::Line,
        GeometryClass::Text,
    ];

    /// Position of this class's layer in a data source
    pub fn index(self) -> usize {
        match self {
            GeometryClass::Polygon => 0,
            GeometryClass::Point => 1,
            GeometryClass::Line => 2,
            GeometryClass::Text => 3,
        }
    }

    /// Name of the layer exposing this class
    pub fn layer_name(self) -> &'static str {
        match self {
            GeometryClass::Polygon => "polygons",
            GeometryClass::Point => "points",
            GeometryClass::Line => "lines",
            GeometryClass::Text => "text",
        }
    }
}

impl fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.layer_name())
    }
}

/// Character set declared by `..TEGNSETT`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub enum TextEncoding {
    Utf8,
    Iso8859_1,
    #[default]
    Iso8859_10,
    /// Windows code page, read as Latin-1
    Ansi,
    /// IBM code page 865 (Nordic DOS)
    Dosn8,
    /// 7-bit Norwegian (`ND7` / `DECN7`)
    Nd7,
}

impl TextEncoding {
    /// Parse a `..TEGNSETT` value
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "UTF-8" | "UTF8" => Some(TextEncoding::Utf8),
            "ISO8859-1" | "ISO-8859-1" => Some(TextEncoding::Iso8859_1),
            "ISO8859-10" | "ISO-8859-10" => Some(TextEncoding::Iso8859_10),
            "ANSI" => Some(TextEncoding::Ansi),
            "DOSN8" => Some(TextEncoding::Dosn8),
            "ND7" | "DECN7" => Some(TextEncoding::Nd7),
            _ => None,
        }
    }

    /// Canonical name as written in SOSI headers
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Iso8859_1 => "ISO8859-1",
            TextEncoding::Iso8859_10 => "ISO8859-10",
            TextEncoding::Ansi => "ANSI",
            TextEncoding::Dosn8 => "DOSN8",
            TextEncoding::Nd7 => "ND7",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spatial reference declared by `...KOORDSYS`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SpatialRef {
    /// SOSI coordinate system number
    pub koordsys: i32,
    /// Matching EPSG code, when the number is known
    pub epsg: Option<u32>,
}

/// File metadata extracted from the `.HODE` group
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Coordinate system, if declared
    pub spatial_ref: Option<SpatialRef>,
    /// Text encoding used to decode the file
    pub encoding: TextEncoding,
    /// Coordinate resolution (`...ENHET`)
    pub unit: f64,
    /// Coordinate origin as (north, east) (`...ORIGO-NØ`)
    pub origin: (f64, f64),
    /// Declared extent (`..OMRÅDE`), in real-world coordinates
    pub extent: Option<Rect<f64>>,
    /// `..SOSI-VERSJON`
    pub sosi_version: Option<String>,
    /// `..SOSI-NIVÅ`
    pub sosi_level: Option<String>,
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self {
            spatial_ref: None,
            encoding: TextEncoding::default(),
            unit: 1.0,
            origin: (0.0, 0.0),
            extent: None,
            sosi_version: None,
            sosi_level: None,
        }
    }
}
