// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits of the feature-layer abstraction
//!
//! These traits define how a host drives a vector data source: open it through
//! a [`Driver`], enumerate its [`Layer`]s and pull features sequentially.

use crate::{
    Feature, FieldDefn, FileMetadata, GeometryType, LayerDefn, Result, SosiError, SpatialRef,
    TextEncoding,
};
use geo_types::Rect;
use std::path::Path;

/// Optional layer capabilities a host may ask about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Fetch features by id
    RandomRead,
    /// Append new features
    SequentialWrite,
    /// Rewrite existing features
    RandomWrite,
    /// Count features without a full scan
    FastFeatureCount,
    /// Spatial filtering backed by an index
    FastSpatialFilter,
    /// Add fields to the layer definition
    CreateField,
}

/// Sequential access to the features of one layer
///
/// # Example
///
/// ```ignore
/// use sosi_model::{Layer, LayerExt};
///
/// fn dump(layer: &mut dyn Layer) {
///     println!("{} ({:?})", layer.name(), layer.geometry_type());
///     for feature in layer.features() {
///         println!("#{} {:?}", feature.fid(), feature.geometry());
///     }
/// }
/// ```
pub trait Layer {
    /// Layer definition (name, geometry type, fields)
    fn defn(&self) -> &LayerDefn;

    /// Layer name
    fn name(&self) -> &str {
        self.defn().name()
    }

    /// Geometry type of every feature in the layer
    fn geometry_type(&self) -> GeometryType {
        self.defn().geometry_type()
    }

    /// Rewind so the next call to [`next_feature`](Self::next_feature)
    /// returns the first feature again
    fn reset_reading(&mut self);

    /// Fetch the next feature, or `None` once the layer is exhausted
    ///
    /// Once `None` has been returned, further calls keep returning `None`
    /// until [`reset_reading`](Self::reset_reading).
    fn next_feature(&mut self) -> Option<Feature>;

    /// Number of features the layer yields with the current spatial filter
    fn feature_count(&self) -> u64;

    /// Restrict iteration to features whose bounding box intersects `filter`
    fn set_spatial_filter(&mut self, filter: Option<Rect<f64>>);

    /// The active spatial filter
    fn spatial_filter(&self) -> Option<Rect<f64>>;

    /// Whether the layer supports a capability
    fn test_capability(&self, capability: Capability) -> bool;

    /// Add a field to the layer definition
    fn create_field(&mut self, field: FieldDefn) -> Result<()> {
        Err(SosiError::unsupported(format!(
            "creating field '{}' on layer '{}'",
            field.name,
            self.name()
        )))
    }
}

/// Iterator over the features of a layer, starting from the first feature
pub struct FeatureIterator<'a, L: Layer + ?Sized> {
    layer: &'a mut L,
}

impl<L: Layer + ?Sized> Iterator for FeatureIterator<'_, L> {
    type Item = Feature;

    #[inline]
    fn next(&mut self) -> Option<Feature> {
        self.layer.next_feature()
    }
}

/// Extension methods for Layer
pub trait LayerExt: Layer {
    /// Reset the layer and iterate all of its features
    fn features(&mut self) -> FeatureIterator<'_, Self> {
        self.reset_reading();
        FeatureIterator { layer: self }
    }
}

// Blanket implementation for all Layer types
impl<T: Layer + ?Sized> LayerExt for T {}

/// A set of layers opened from one file
pub trait DataSource {
    /// Number of layers
    fn layer_count(&self) -> usize;

    /// Layer by index, `None` when out of range
    fn layer(&mut self, index: usize) -> Option<&mut dyn Layer>;

    /// Layer by name, `None` when no layer has that name
    fn layer_by_name(&mut self, name: &str) -> Option<&mut dyn Layer>;

    /// File header metadata
    fn metadata(&self) -> &FileMetadata;

    /// Spatial reference of all layers
    fn spatial_ref(&self) -> Option<SpatialRef> {
        self.metadata().spatial_ref
    }

    /// Text encoding the file was decoded with
    fn encoding(&self) -> TextEncoding {
        self.metadata().encoding
    }

    /// Create a new layer
    fn create_layer(&mut self, name: &str, _geometry_type: GeometryType) -> Result<&mut dyn Layer> {
        Err(SosiError::unsupported(format!("creating layer '{}'", name)))
    }
}

/// Entry point that opens files into data sources
pub trait Driver: Send + Sync {
    /// Short driver name
    fn name(&self) -> &str;

    /// Open a file
    ///
    /// # Arguments
    /// * `path` - File to open
    /// * `update` - Request write access
    fn open(&self, path: &Path, update: bool) -> Result<Box<dyn DataSource>>;
}
