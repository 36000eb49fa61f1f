//! Error types for the extrusion pipeline.

use prism_polygon::PolygonError;
use thiserror::Error;

/// Why a single contour produced no mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtrudeError {
    /// The outline was rejected before triangulation.
    #[error(transparent)]
    Polygon(#[from] PolygonError),

    /// The cap could not be triangulated, even without interior points.
    #[error("cap triangulation failed")]
    Triangulation,
}

/// Errors decoding or parsing an SVG contour source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded payload is not UTF-8 text.
    #[error("SVG is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The markup is not well-formed XML.
    #[error("malformed SVG markup: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Path data or a polygon point list could not be parsed.
    #[error("invalid path data: {0}")]
    PathSyntax(String),
}

/// Out-of-range extrusion options.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Depth is zero, negative or not finite.
    #[error("depth must be positive and finite, got {0}")]
    Depth(f64),

    /// No depth segments.
    #[error("depth_segments must be at least 1")]
    DepthSegments,

    /// Cap density outside `1..=20`.
    #[error("cap_density must be between 1 and 20, got {0}")]
    CapDensity(u32),

    /// No edge subdivisions.
    #[error("edge_subdivisions must be at least 1")]
    EdgeSubdivisions,

    /// Dedup distance is negative or not finite.
    #[error("epsilon must be non-negative and finite, got {0}")]
    Epsilon(f64),
}
