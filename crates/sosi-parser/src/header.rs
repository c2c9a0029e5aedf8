// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `.HODE` metadata extraction: coordinate system, unit, origin and extent

use crate::coerce::to_real;
use crate::tokenizer::{element, split_value, strip_comment, unquote};
use geo_types::{coord, Rect};
use sosi_model::{FileMetadata, SpatialRef, TextEncoding};

/// Map a SOSI `KOORDSYS` number to its EPSG code
///
/// Returns `None` for local and national systems without an EPSG equivalent.
pub fn koordsys_to_epsg(koordsys: i32) -> Option<u32> {
    match koordsys {
        // NGO 1948 axis I-VIII
        1..=8 => Some(27390 + koordsys as u32),
        9 => Some(4273),
        // ETRS89 / UTM 31-36
        21..=26 => Some(25810 + koordsys as u32),
        // ED50 / UTM 31-36
        31..=36 => Some(23000 + koordsys as u32),
        50 => Some(4230),
        72 => Some(4322),
        84 => Some(4326),
        87 => Some(4231),
        _ => None,
    }
}

/// Parse the text of a `.HODE` group into file metadata
///
/// `encoding` is the character set the file was decoded with. Unknown and
/// malformed header elements are ignored.
pub fn parse_header(text: &str, encoding: TextEncoding) -> FileMetadata {
    let mut meta = FileMetadata {
        encoding,
        ..FileMetadata::default()
    };
    let mut min_ne: Option<(f64, f64)> = None;
    let mut max_ne: Option<(f64, f64)> = None;

    for line in text.lines().skip(1) {
        let line = strip_comment(line).trim();
        let Ok((_, el)) = element(line) else {
            continue;
        };
        if el.value.is_empty() {
            continue;
        }

        match el.name.to_uppercase().as_str() {
            "KOORDSYS" => {
                let koordsys = crate::coerce::to_integer(el.value) as i32;
                meta.spatial_ref = Some(SpatialRef {
                    koordsys,
                    epsg: koordsys_to_epsg(koordsys),
                });
            }
            "ENHET" => {
                let unit = to_real(el.value);
                if unit > 0.0 {
                    meta.unit = unit;
                } else {
                    log::warn!("Ignoring invalid ENHET '{}'", el.value);
                }
            }
            "ORIGO-NØ" => {
                if let Some(pair) = north_east(el.value) {
                    meta.origin = pair;
                }
            }
            "MIN-NØ" => min_ne = north_east(el.value),
            "MAX-NØ" => max_ne = north_east(el.value),
            "SOSI-VERSJON" => meta.sosi_version = Some(unquote(el.value).to_string()),
            "SOSI-NIVÅ" => meta.sosi_level = Some(unquote(el.value).to_string()),
            _ => {}
        }
    }

    if let (Some((min_n, min_e)), Some((max_n, max_e))) = (min_ne, max_ne) {
        meta.extent = Some(Rect::new(
            coord! { x: min_e, y: min_n },
            coord! { x: max_e, y: max_n },
        ));
    }

    meta
}

/// Parse a "north east" value pair
fn north_east(value: &str) -> Option<(f64, f64)> {
    let tokens = split_value(value);
    match tokens.as_slice() {
        [n, e, ..] => Some((to_real(n), to_real(e))),
        _ => None,
    }
}
