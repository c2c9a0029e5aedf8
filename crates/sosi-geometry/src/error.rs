// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry assembly
//!
//! These never escape the assembler as open failures. A record whose geometry
//! cannot be built is logged and stored without geometry.

use thiserror::Error;

/// Geometry assembly result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry assembly errors
#[derive(Error, Debug)]
pub enum Error {
    /// Coordinate block too short for the group
    #[error("{group} needs at least {required} coordinate(s), found {found}")]
    TooFewCoordinates {
        group: String,
        required: usize,
        found: usize,
    },

    /// Arc reference points do not define a circle
    #[error("Degenerate arc: {0}")]
    DegenerateArc(String),

    /// No builder registered for the group
    #[error("Unsupported group: {0}")]
    UnsupportedGroup(String),
}

impl Error {
    /// Create a too-few-coordinates error
    pub fn too_few_coordinates(group: impl Into<String>, required: usize, found: usize) -> Self {
        Error::TooFewCoordinates {
            group: group.into(),
            required,
            found,
        }
    }

    /// Create a degenerate arc error
    pub fn degenerate_arc(msg: impl Into<String>) -> Self {
        Error::DegenerateArc(msg.into())
    }

    /// Create an unsupported group error
    pub fn unsupported_group(name: impl Into<String>) -> Self {
        Error::UnsupportedGroup(name.into())
    }
}
