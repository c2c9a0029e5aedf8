// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An opened SOSI file exposed as four layers

use crate::layer::{SosiLayer, SourceData};
use crate::options::OpenOptions;
use crate::registry::{self, TypeRegistry};
use geo_types::Geometry;
use sosi_model::{
    DataSource, FileMetadata, Layer, RecordSource, Result, Serial, SosiError,
};
use sosi_parser::SosiReader;
use std::path::Path;
use std::sync::Arc;

/// A read-only SOSI data source
///
/// Opening runs the schema pass and the geometry assembly pass once; after
/// that the layers only read shared, immutable state. The layers are always
/// `polygons`, `points`, `lines` and `text`, in that order, even when some of
/// them are empty.
///
/// # Example
///
/// ```ignore
/// use sosi_driver::{initialize, OpenOptions, SosiDataSource};
/// use sosi_model::{DataSource, LayerExt};
///
/// initialize();
/// let mut ds = SosiDataSource::open(path, &OpenOptions::new())?;
/// let points = ds.layer_by_name("points").unwrap();
/// for feature in points.features() {
///     println!("{} {:?}", feature.fid(), feature.geometry());
/// }
/// ```
pub struct SosiDataSource {
    shared: Arc<SourceData>,
    layers: Vec<SosiLayer>,
}

impl SosiDataSource {
    /// Open a file using the process-wide type registry
    ///
    /// Fails with [`SosiError::RegistryNotInitialized`] when
    /// [`initialize`](crate::initialize) has not been called.
    pub fn open(path: &Path, options: &OpenOptions) -> Result<Self> {
        let registry = registry::global().ok_or(SosiError::RegistryNotInitialized)?;
        Self::open_with_registry(path, options, registry)
    }

    /// Open a file with an explicit type registry
    pub fn open_with_registry(
        path: &Path,
        options: &OpenOptions,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self> {
        reject_update(options)?;
        let file = SosiReader::new()
            .with_encoding(options.encoding)
            .read(path)?;
        log::info!("Opened SOSI file {}", path.display());
        Ok(Self::from_source(Box::new(file), registry))
    }

    /// Open a file already loaded into memory
    pub fn from_bytes(
        bytes: &[u8],
        options: &OpenOptions,
        registry: Arc<TypeRegistry>,
    ) -> Result<Self> {
        reject_update(options)?;
        let file = SosiReader::new()
            .with_encoding(options.encoding)
            .read_bytes(bytes)?;
        Ok(Self::from_source(Box::new(file), registry))
    }

    /// Build the layers over any record source
    pub fn from_source(records: Box<dyn RecordSource>, registry: Arc<TypeRegistry>) -> Self {
        let (shared, layers) = SourceData::build(records, registry);
        log::debug!(
            "SOSI data source ready: {} records, {} assembled geometries",
            shared.records.len(),
            shared.arena.len()
        );
        Self { shared, layers }
    }

    /// Assembled geometry of a non-polygon record
    pub fn geometry(&self, serial: Serial) -> Option<&Geometry<f64>> {
        self.shared.arena.get(serial)
    }

    /// The concrete layers, in fixed order
    pub fn layers(&self) -> &[SosiLayer] {
        &self.layers
    }
}

fn reject_update(options: &OpenOptions) -> Result<()> {
    if options.update {
        return Err(SosiError::unsupported(
            "update access; the SOSI driver is read-only",
        ));
    }
    Ok(())
}

impl DataSource for SosiDataSource {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&mut self, index: usize) -> Option<&mut dyn Layer> {
        self.layers.get_mut(index).map(|l| l as &mut dyn Layer)
    }

    fn layer_by_name(&mut self, name: &str) -> Option<&mut dyn Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.name() == name)
            .map(|l| l as &mut dyn Layer)
    }

    fn metadata(&self) -> &FileMetadata {
        self.shared.records.metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sosi_model::{GeometryClass, GeometryType, TextEncoding};

    const TEST_SOSI: &str = ".HODE
..TEGNSETT UTF-8
..TRANSPAR
...KOORDSYS 22
...ORIGO-NØ 6600000 500000
...ENHET 0.01
.TEKST 1:
..STRENG \"Øvre Foss\"
..NØ
100 200
150 250
.SLUTT
";

    fn open(options: &OpenOptions) -> Result<SosiDataSource> {
        SosiDataSource::from_bytes(
            TEST_SOSI.as_bytes(),
            options,
            Arc::new(TypeRegistry::builtin()),
        )
    }

    #[test]
    fn test_always_four_layers() {
        let mut ds = open(&OpenOptions::new()).unwrap();
        assert_eq!(ds.layer_count(), 4);
        let names: Vec<_> = ds.layers().iter().map(|l| l.name().to_string()).collect();
        assert_eq!(names, vec!["polygons", "points", "lines", "text"]);
        assert!(ds.layer(4).is_none());
        assert!(ds.layer_by_name("areas").is_none());

        let text = ds.layer_by_name("text").unwrap();
        assert_eq!(text.geometry_type(), GeometryType::MultiPoint);
        assert_eq!(text.feature_count(), 1);
        assert_eq!(ds.layers()[GeometryClass::Point.index()].feature_count(), 0);
    }

    #[test]
    fn test_update_rejected() {
        let err = open(&OpenOptions::new().update(true)).err().unwrap();
        assert!(matches!(err, SosiError::UnsupportedOperation(_)));
    }

    #[test]
    fn test_metadata_and_arena_access() {
        let ds = open(&OpenOptions::new()).unwrap();
        assert_eq!(ds.encoding(), TextEncoding::Utf8);
        let srs = ds.spatial_ref().unwrap();
        assert_eq!(srs.koordsys, 22);
        assert_eq!(srs.epsg, Some(25832));

        let Some(Geometry::MultiPoint(points)) = ds.geometry(Serial(1)) else {
            panic!("expected text geometry");
        };
        assert_eq!(points.0.len(), 2);
        approx::assert_relative_eq!(points.0[0].x(), 500002.0);
        approx::assert_relative_eq!(points.0[0].y(), 6600001.0);
        assert!(ds.geometry(Serial(2)).is_none());
    }

    #[test]
    fn test_create_layer_unsupported() {
        let mut ds = open(&OpenOptions::new()).unwrap();
        let err = ds
            .create_layer("roads", GeometryType::LineString)
            .err()
            .unwrap();
        assert!(matches!(err, SosiError::UnsupportedOperation(_)));
    }
}
