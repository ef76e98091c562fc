//! PNG image support.
//!
//! Reads 8-bit and 16-bit PNGs (RGB, RGBA, gray, gray+alpha, indexed) into
//! an [`RgbaImage`]; 16-bit samples are stripped to 8 bits and missing alpha
//! becomes opaque. Writes are always 8-bit RGBA.
//!
//! # Example
//!
//! ```rust,ignore
//! use retint_io::png;
//!
//! let image = png::read("wallpaper.png")?;
//! png::write("out.png", &image)?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use retint_core::RgbaImage;
use tracing::trace;

use crate::{IoError, IoResult};

/// Decoded 8-bit PNG frame before conversion to RGBA.
pub(crate) struct Frame {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub data: Vec<u8>,
}

/// Decodes the first frame of a PNG stream, normalized to 8 bits per sample.
pub(crate) fn decode_frame<R: BufRead + Seek>(reader: R) -> IoResult<Frame> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }
    buf.truncate(info.buffer_size());

    Ok(Frame {
        width: info.width,
        height: info.height,
        color_type: info.color_type,
        data: buf,
    })
}

/// Decodes a PNG stream into an RGBA image.
pub fn decode<R: BufRead + Seek>(reader: R) -> IoResult<RgbaImage> {
    let frame = decode_frame(reader)?;
    let (width, height) = (frame.width, frame.height);

    let rgba: Vec<u8> = match frame.color_type {
        png::ColorType::Rgba => frame.data,
        png::ColorType::Rgb => frame
            .data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        png::ColorType::Grayscale => frame
            .data
            .iter()
            .flat_map(|&g| [g, g, g, u8::MAX])
            .collect(),
        png::ColorType::GrayscaleAlpha => frame
            .data
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => {
            return Err(IoError::UnsupportedBitDepth(format!("{other:?} after expansion")));
        }
    };

    RgbaImage::from_raw(width, height, rgba).map_err(|e| IoError::InvalidFile(e.to_string()))
}

/// Reads a PNG file into an RGBA image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<RgbaImage> {
    let path = path.as_ref();
    trace!(path = %path.display(), "reading PNG");
    let file = File::open(path)?;
    decode(BufReader::new(file))
}

/// Encodes 8-bit samples of the given color type.
pub(crate) fn encode_raw<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Encodes an RGBA image as PNG.
pub fn encode<W: Write>(writer: W, image: &RgbaImage) -> IoResult<()> {
    encode_raw(
        writer,
        image.width(),
        image.height(),
        png::ColorType::Rgba,
        image.as_raw(),
    )
}

/// Writes an RGBA image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &RgbaImage) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), width = image.width(), height = image.height(), "writing PNG");
    let mut writer = BufWriter::new(File::create(path)?);
    encode(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retint_core::Color;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_rgba() {
        let width = 16;
        let height = 8;
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 16) as u8, (y * 32) as u8, 64, (x + y) as u8]);
            }
        }
        let image = RgbaImage::from_raw(width, height, data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        write(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_rgb_source_gets_opaque_alpha() {
        let mut bytes = Vec::new();
        encode_raw(&mut bytes, 2, 1, png::ColorType::Rgb, &[1, 2, 3, 4, 5, 6]).unwrap();
        let img = decode(Cursor::new(bytes)).unwrap();
        assert_eq!(img.get(0, 0), Some((Color::new(1, 2, 3), 255)));
        assert_eq!(img.get(1, 0), Some((Color::new(4, 5, 6), 255)));
    }

    #[test]
    fn test_gray_alpha_expanded() {
        let mut bytes = Vec::new();
        encode_raw(&mut bytes, 1, 1, png::ColorType::GrayscaleAlpha, &[77, 9]).unwrap();
        let img = decode(Cursor::new(bytes)).unwrap();
        assert_eq!(img.as_raw(), &[77, 77, 77, 9]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = decode(Cursor::new(b"not a png".to_vec())).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read(dir.path().join("nope.png")), Err(IoError::Io(_))));
    }
}
