//! PNG decode/encode for sheet rasters.
//!
//! Encoding uses fixed settings so the same raster always produces the same
//! bytes; the encoded output is hashed with BLAKE3 for reporting. Decoding
//! normalizes every PNG color type to RGBA8.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType, Transformations};
use thiserror::Error;

use crate::raster::Raster;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Unsupported PNG: {0}")]
    Unsupported(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Decode a PNG from bytes into an RGBA8 raster.
///
/// Palette, grayscale and 16-bit images are normalized to 8-bit RGBA.
pub fn decode_rgba(bytes: &[u8]) -> Result<Raster, PngError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::Unsupported(format!(
            "bit depth {:?} after normalization",
            info.bit_depth
        )));
    }

    let data = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        ColorType::Indexed => {
            // EXPAND converts indexed to RGB/RGBA before we get here.
            return Err(PngError::Unsupported("indexed color".to_string()));
        }
    };

    Ok(Raster::from_rgba8(info.width, info.height, data))
}

/// Encode a raster as PNG bytes, returning the bytes and their BLAKE3 hash
/// (hex). Identical rasters always yield identical bytes and hash.
pub fn encode_rgba_with_hash(
    raster: &Raster,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            raster.width, raster.height
        )));
    }

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, raster.width, raster.height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_compression(config.compression);
        encoder.set_filter(config.filter);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raster.data)?;
    }

    let hash = blake3::hash(&out).to_hex().to_string();
    Ok((out, hash))
}
