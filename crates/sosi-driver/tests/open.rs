// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests opening SOSI files from disk through the driver

use approx::assert_relative_eq;
use geo_types::{Coord, Geometry, Rect};
use sosi_driver::{initialize, OpenOptions, SosiDataSource, SosiDriver};
use sosi_model::{
    DataSource, Driver, FieldDefn, FieldType, FieldValue, GeometryType, Layer, LayerExt,
    SosiError, TextEncoding,
};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const SINGLE_POINT: &str = ".HODE
..TEGNSETT UTF-8
..TRANSPAR
...KOORDSYS 23
...ORIGO-NØ 0 0
...ENHET 1
.PUNKT 1:
..KOMM 301
..EIER Kommunen
..NØ
6650000 600000
.SLUTT
";

const GEOMETRIES: &str = ".HODE
..TEGNSETT UTF-8
..TRANSPAR
...KOORDSYS 22
...ORIGO-NØ 0 0
...ENHET 1
.KURVE 1:
..OBJTYPE Bygningsavgrensning
..NØ
0 0
0 10
10 10
10 0
0 0
.KURVE 2:
..OBJTYPE Bygningsavgrensning
..NØ
2 2
2 4
4 4
2 2
.FLATE 3:
..OBJTYPE Bygning
..BYGGNR 1234
..REF :1 :99 (:2)
..NØ
5 5
.BUEP 4:
..OBJTYPE Veg
..KVALITET 82 25
..NØ
0 -10
10 0
0 10
.SIRKELP 5:
..OBJTYPE Kum
..NØ
100 90
110 100
100 110
.TEKST 6:
..STRENG \"Lille Kum\"
..NØ
100 100
.SLUTT
";

fn write_temp(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn open(content: &[u8]) -> Box<dyn DataSource> {
    initialize();
    let file = write_temp(content);
    SosiDriver.open(file.path(), false).unwrap()
}

#[test]
fn test_single_point_file() {
    let mut ds = open(SINGLE_POINT.as_bytes());
    assert_eq!(ds.layer_count(), 4);

    let points = ds.layer_by_name("points").unwrap();
    let fields: Vec<_> = points.defn().fields().to_vec();
    assert_eq!(
        fields,
        vec![
            FieldDefn::new("KOMM", FieldType::Integer),
            FieldDefn::new("EIER", FieldType::String),
        ]
    );

    let features: Vec<_> = points.features().collect();
    assert_eq!(features.len(), 1);
    let feature = &features[0];
    assert_eq!(feature.fid(), 0);
    assert_eq!(feature.field_by_index(0), Some(&FieldValue::Integer(301)));
    assert_eq!(
        feature.field_by_index(1),
        Some(&FieldValue::String("Kommunen".into()))
    );
    assert_eq!(
        feature.geometry(),
        Some(&Geometry::Point(geo_types::Point::new(600000.0, 6650000.0)))
    );

    for name in ["polygons", "lines", "text"] {
        let layer = ds.layer_by_name(name).unwrap();
        assert_eq!(layer.feature_count(), 0, "{}", name);
        assert!(layer.features().next().is_none(), "{}", name);
    }

    let srs = ds.spatial_ref().unwrap();
    assert_eq!(srs.epsg, Some(25833));
}

#[test]
fn test_exhausted_cursor_is_terminal() {
    let mut ds = open(SINGLE_POINT.as_bytes());
    let points = ds.layer(1).unwrap();
    points.reset_reading();
    assert!(points.next_feature().is_some());
    for _ in 0..5 {
        assert!(points.next_feature().is_none());
    }

    points.reset_reading();
    assert_eq!(points.next_feature().map(|f| f.fid()), Some(0));
}

#[test]
fn test_polygon_with_island_and_missing_reference() {
    let mut ds = open(GEOMETRIES.as_bytes());
    let polygons = ds.layer_by_name("polygons").unwrap();
    assert_eq!(polygons.geometry_type(), GeometryType::Polygon);

    let feature = polygons.features().next().unwrap();
    assert_eq!(feature.field("BYGGNR"), Some(&FieldValue::Integer(1234)));
    assert_eq!(
        feature.field("OBJTYPE"),
        Some(&FieldValue::String("Bygning".into()))
    );

    let Some(Geometry::Polygon(polygon)) = feature.geometry() else {
        panic!("expected polygon, got {:?}", feature.geometry());
    };
    let exterior: Vec<_> = polygon.exterior().0.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(
        exterior,
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]
    );
    assert_eq!(polygon.interiors().len(), 1);
    let island: Vec<_> = polygon.interiors()[0].0.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(island, vec![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)]);
}

#[test]
fn test_lines_layer_merges_curves_and_arcs() {
    let mut ds = open(GEOMETRIES.as_bytes());
    let lines = ds.layer_by_name("lines").unwrap();
    assert_eq!(lines.feature_count(), 4);

    let features: Vec<_> = lines.features().collect();
    let fids: Vec<_> = features.iter().map(|f| f.fid()).collect();
    assert_eq!(fids, vec![0, 1, 2, 3]);

    // Half circle of radius 10 around the origin
    let Some(Geometry::LineString(arc)) = features[2].geometry() else {
        panic!("expected arc line, got {:?}", features[2].geometry());
    };
    assert_eq!(arc.0.len(), 19);
    assert_eq!(arc.0[0], Coord { x: -10.0, y: 0.0 });
    assert_eq!(arc.0[18], Coord { x: 10.0, y: 0.0 });
    for c in &arc.0 {
        assert_relative_eq!(c.x.hypot(c.y), 10.0, epsilon = 1e-9);
    }
    assert_eq!(features[2].field("MÅLEMETODE"), Some(&FieldValue::Integer(82)));
    assert_eq!(features[2].field("NØYAKTIGHET"), Some(&FieldValue::Integer(25)));
    assert_eq!(features[2].field("SYNBARHET"), None);

    let Some(Geometry::LineString(circle)) = features[3].geometry() else {
        panic!("expected circle line, got {:?}", features[3].geometry());
    };
    assert_eq!(circle.0.len(), 37);
    assert_eq!(circle.0.first(), circle.0.last());
}

#[test]
fn test_text_layer_is_multipoint() {
    let mut ds = open(GEOMETRIES.as_bytes());
    let text = ds.layer_by_name("text").unwrap();
    let feature = text.features().next().unwrap();
    assert_eq!(
        feature.field("STRENG"),
        Some(&FieldValue::String("Lille Kum".into()))
    );
    assert!(matches!(feature.geometry(), Some(Geometry::MultiPoint(p)) if p.0.len() == 1));
}

#[test]
fn test_spatial_filter_on_lines() {
    let mut ds = open(GEOMETRIES.as_bytes());
    let lines = ds.layer_by_name("lines").unwrap();

    let around_circle = Rect::new(Coord { x: 95.0, y: 95.0 }, Coord { x: 120.0, y: 120.0 });
    lines.set_spatial_filter(Some(around_circle));
    assert_eq!(lines.feature_count(), 1);
    let features: Vec<_> = lines.features().collect();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].field("OBJTYPE"), Some(&FieldValue::String("Kum".into())));

    lines.set_spatial_filter(None);
    assert_eq!(lines.feature_count(), 4);
}

#[test]
fn test_declared_latin_encoding() {
    initialize();
    let bytes = b".HODE\n..TEGNSETT ISO8859-10\n.PUNKT 1:\n..NAVN \"\xD8vre Foss\"\n..N\xD8\n10 20\n.SLUTT\n";
    let file = write_temp(bytes);

    let mut ds = SosiDriver
        .open_with_options(file.path(), &OpenOptions::new())
        .unwrap();
    assert_eq!(ds.encoding(), TextEncoding::Iso8859_10);
    let points = ds.layer_by_name("points").unwrap();
    let feature = points.features().next().unwrap();
    assert_eq!(
        feature.field("NAVN"),
        Some(&FieldValue::String("Øvre Foss".into()))
    );
    assert_eq!(
        feature.geometry(),
        Some(&Geometry::Point(geo_types::Point::new(20.0, 10.0)))
    );
}

#[test]
fn test_update_is_unsupported() {
    initialize();
    let file = write_temp(SINGLE_POINT.as_bytes());
    let err = SosiDriver.open(file.path(), true).err().unwrap();
    assert!(matches!(err, SosiError::UnsupportedOperation(_)));
}

#[test]
fn test_open_failures() {
    initialize();
    let missing = SosiDriver
        .open(Path::new("/nonexistent/kart.sos"), false)
        .err()
        .unwrap();
    assert!(matches!(missing, SosiError::OpenFailure { .. }));

    let not_sosi = write_temp(b"{\"type\": \"FeatureCollection\", \"features\": []}\n");
    let err = SosiDriver.open(not_sosi.path(), false).err().unwrap();
    assert!(matches!(err, SosiError::OpenFailure { .. }));
    assert!(!SosiDriver.identify(not_sosi.path()));

    let sosi = write_temp(SINGLE_POINT.as_bytes());
    assert!(SosiDriver.identify(sosi.path()));
}

#[test]
fn test_schema_changes_are_unsupported() {
    let mut ds = open(SINGLE_POINT.as_bytes());
    let err = ds
        .create_layer("roads", GeometryType::LineString)
        .err()
        .unwrap();
    assert!(matches!(err, SosiError::UnsupportedOperation(_)));

    let points = ds.layer(1).unwrap();
    let err = points
        .create_field(FieldDefn::new("EXTRA", FieldType::Real))
        .unwrap_err();
    assert!(matches!(err, SosiError::UnsupportedOperation(_)));
    assert_eq!(points.defn().field_count(), 2);
}

#[test]
fn test_layer_definition_serializes() {
    let mut ds = open(SINGLE_POINT.as_bytes());
    let points = ds.layer_by_name("points").unwrap();
    let json = serde_json::to_value(points.defn()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "points",
            "geometry_type": "Point",
            "fields": [
                { "name": "KOMM", "field_type": "Integer" },
                { "name": "EIER", "field_type": "String" },
            ],
        })
    );
}

#[test]
fn test_open_with_explicit_registry() {
    let file = write_temp(SINGLE_POINT.as_bytes());
    let registry = std::sync::Arc::new(sosi_driver::TypeRegistry::new());
    let mut ds =
        SosiDataSource::open_with_registry(file.path(), &OpenOptions::new(), registry).unwrap();

    // With no registered tags every attribute is a raw string
    let points = ds.layer_by_name("points").unwrap();
    let feature = points.features().next().unwrap();
    assert_eq!(feature.field("KOMM"), Some(&FieldValue::String("301".into())));
}

const QUALITY_FORMS: &str = ".HODE
..TEGNSETT UTF-8
.KURVE 1:
..OBJTYPE Veg
..KVALITET
...MÅLEMETODE 82
...NØYAKTIGHET 25
..NØ
0 0
0 10
.KURVE 2:
..OBJTYPE Veg
..KVALITET 82 25
..NØ
0 10
0 20
.SLUTT
";

fn value_matches(value: &FieldValue, field_type: FieldType) -> bool {
    matches!(
        (value, field_type),
        (FieldValue::Integer(_), FieldType::Integer)
            | (FieldValue::Real(_), FieldType::Real)
            | (FieldValue::String(_), FieldType::String)
            | (FieldValue::Date(_), FieldType::Date)
            | (FieldValue::DateTime(_), FieldType::DateTime)
    )
}

#[test]
fn test_nested_and_inline_quality_share_types() {
    let mut ds = open(QUALITY_FORMS.as_bytes());
    let lines = ds.layer_by_name("lines").unwrap();
    let defn = lines.defn().clone();
    assert_eq!(
        defn.field(defn.field_index("MÅLEMETODE").unwrap()).map(|f| f.field_type),
        Some(FieldType::Integer)
    );

    let features: Vec<_> = lines.features().collect();
    assert_eq!(features.len(), 2);
    for feature in &features {
        for (field, value) in defn.fields().iter().zip(feature.fields()) {
            if let Some(value) = value {
                assert!(
                    value_matches(value, field.field_type),
                    "{}: {:?} stored in a {} field",
                    field.name,
                    value,
                    field.field_type
                );
            }
        }
        assert_eq!(feature.field("MÅLEMETODE"), Some(&FieldValue::Integer(82)));
        assert_eq!(feature.field("NØYAKTIGHET"), Some(&FieldValue::Integer(25)));
    }
}

const GROUP_VARIANTS: &str = ".HODE
..TEGNSETT UTF-8
.SYMBOL 1:
..OBJTYPE Skilt
..NØ
5 7
.LINJE 2:
..OBJTYPE Gjerde
..NØ
0 0
0 5
.KURVE 10:
..NØ
0 0
0 10
10 10
10 0
0 0
.KURVE 11:
..NØ
2 2
2 4
4 4
.KURVE 12:
..NØ
2 2
4 2
4 4
.FLATE 13:
..OBJTYPE Dam
..REF :10 (:11 -:12)
.BUEP 14:
..OBJTYPE Veg
..NØ
1 1
.SLUTT
";

#[test]
fn test_symbol_is_a_point() {
    let mut ds = open(GROUP_VARIANTS.as_bytes());
    let points = ds.layer_by_name("points").unwrap();
    let features: Vec<_> = points.features().collect();
    assert_eq!(features.len(), 1);
    assert_eq!(
        features[0].field("OBJTYPE"),
        Some(&FieldValue::String("Skilt".into()))
    );
    assert_eq!(
        features[0].geometry(),
        Some(&Geometry::Point(geo_types::Point::new(7.0, 5.0)))
    );
}

#[test]
fn test_linje_is_a_line() {
    let mut ds = open(GROUP_VARIANTS.as_bytes());
    let lines = ds.layer_by_name("lines").unwrap();
    let feature = lines.features().next().unwrap();
    assert_eq!(
        feature.field("OBJTYPE"),
        Some(&FieldValue::String("Gjerde".into()))
    );
    let Some(Geometry::LineString(line)) = feature.geometry() else {
        panic!("expected line, got {:?}", feature.geometry());
    };
    let coords: Vec<_> = line.0.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(coords, vec![(0.0, 0.0), (5.0, 0.0)]);
}

#[test]
fn test_reversed_reference_inside_island() {
    let mut ds = open(GROUP_VARIANTS.as_bytes());
    let polygons = ds.layer_by_name("polygons").unwrap();
    let feature = polygons.features().next().unwrap();
    let Some(Geometry::Polygon(polygon)) = feature.geometry() else {
        panic!("expected polygon, got {:?}", feature.geometry());
    };
    assert_eq!(polygon.interiors().len(), 1);
    let island: Vec<_> = polygon.interiors()[0].0.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(
        island,
        vec![
            (2.0, 2.0),
            (4.0, 2.0),
            (4.0, 4.0),
            (4.0, 4.0),
            (2.0, 4.0),
            (2.0, 2.0),
        ]
    );
}

#[test]
fn test_short_arc_is_emitted_without_geometry() {
    let mut ds = open(GROUP_VARIANTS.as_bytes());
    let lines = ds.layer_by_name("lines").unwrap();
    let features: Vec<_> = lines.features().collect();
    assert_eq!(features.len(), 5);

    let arc = &features[4];
    assert_eq!(arc.fid(), 4);
    assert_eq!(arc.field("OBJTYPE"), Some(&FieldValue::String("Veg".into())));
    assert!(arc.geometry().is_none());
}
