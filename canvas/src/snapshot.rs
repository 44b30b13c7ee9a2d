//! Full-canvas snapshot capture and restore.
//!
//! A snapshot is the `toDataURL` equivalent: the whole raster encoded as a
//! PNG and carried as a `data:image/png;base64,...` string. Snapshots are
//! immutable once created; the undo/redo history and the wire protocol both
//! treat them as opaque blobs. Decoding is all-or-nothing so a restore never
//! swaps in a torn frame.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageBuffer, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::raster::Raster;

/// Data-URL prefix for every snapshot blob.
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Error raised when a snapshot blob cannot be captured or decoded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The blob does not start with the PNG data-URL prefix.
    #[error("snapshot blob is not a png data url")]
    MissingPrefix,
    /// The base64 payload is invalid.
    #[error("snapshot base64 payload is invalid: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The PNG bytes are corrupt or not a PNG at all.
    #[error("snapshot image data is undecodable: {0}")]
    Image(#[from] image::ImageError),
    /// The pixel buffer does not match its stated dimensions.
    #[error("snapshot pixel buffer does not match its dimensions")]
    Geometry,
}

/// An immutable, fully-rendered capture of the entire canvas at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasSnapshot(String);

impl CanvasSnapshot {
    /// Capture the raster as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Geometry`] if the raster's buffer is
    /// inconsistent, or an encode error from the PNG writer.
    pub fn capture(raster: &Raster) -> Result<Self, SnapshotError> {
        let png = encode_png(raster)?;
        Ok(Self(format!("{DATA_URL_PREFIX}{}", BASE64.encode(png))))
    }

    /// Wrap a blob received off the wire. No validation happens here; a bad
    /// blob surfaces as a [`SnapshotError`] when decoded.
    pub fn from_blob(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    /// The raw blob text as carried on the wire.
    #[must_use]
    pub fn as_blob(&self) -> &str {
        &self.0
    }

    /// Decode the blob back into a raster. All-or-nothing: on error the
    /// caller's surface is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] for a missing prefix, bad base64, or
    /// corrupt PNG bytes.
    pub fn decode(&self) -> Result<Raster, SnapshotError> {
        let payload = self.0.strip_prefix(DATA_URL_PREFIX).ok_or(SnapshotError::MissingPrefix)?;
        let png = BASE64.decode(payload)?;
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        Raster::from_pixels(width, height, decoded.into_raw()).ok_or(SnapshotError::Geometry)
    }
}

/// Encode a raster as PNG bytes.
///
/// # Errors
///
/// Returns [`SnapshotError::Geometry`] on an inconsistent buffer or an
/// encode error from the PNG writer.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, SnapshotError> {
    let buffer: ImageBuffer<image::Rgba<u8>, _> =
        ImageBuffer::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
            .ok_or(SnapshotError::Geometry)?;
    let mut png = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
