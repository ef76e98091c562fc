//! Lookup cube persistence.
//!
//! A cube is stored as an 8-bit RGB PNG using the tile layout from
//! [`retint_lut::layout`]. PNG is lossless, so save then load yields the
//! identical cube, and the file can be opened in any image viewer.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use retint_lut::{layout, LookupCube};
use tracing::debug;

use crate::png::{decode_frame, encode_raw};
use crate::{IoError, IoResult};

/// Encodes a cube as PNG into `writer`.
pub fn encode_cube<W: Write>(writer: W, cube: &LookupCube) -> IoResult<()> {
    let (width, height, bytes) = layout::flatten(cube);
    let width = u32::try_from(width)
        .map_err(|_| IoError::EncodeError(format!("cube level {} too large", cube.level())))?;
    let height = u32::try_from(height)
        .map_err(|_| IoError::EncodeError(format!("cube level {} too large", cube.level())))?;
    encode_raw(writer, width, height, png::ColorType::Rgb, &bytes)
}

/// Decodes a cube previously written by [`encode_cube`].
///
/// # Errors
///
/// [`IoError::InvalidFile`] when the image is not RGB or its shape is not a
/// cube layout (truncated or foreign files end up here).
pub fn decode_cube<R: BufRead + Seek>(reader: R) -> IoResult<LookupCube> {
    let frame = decode_frame(reader)?;
    if frame.color_type != png::ColorType::Rgb {
        return Err(IoError::InvalidFile(format!(
            "cube must be RGB, found {:?}",
            frame.color_type
        )));
    }
    layout::unflatten(frame.width as usize, frame.height as usize, &frame.data)
        .map_err(|e| IoError::InvalidFile(e.to_string()))
}

/// Writes a cube to a PNG file.
pub fn save_cube<P: AsRef<Path>>(path: P, cube: &LookupCube) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), level = cube.level(), "saving cube");
    let mut writer = BufWriter::new(File::create(path)?);
    encode_cube(&mut writer, cube)?;
    writer.flush()?;
    Ok(())
}

/// Loads a cube from a PNG file.
pub fn load_cube<P: AsRef<Path>>(path: P) -> IoResult<LookupCube> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading cube");
    decode_cube(BufReader::new(File::open(path)?))
}
