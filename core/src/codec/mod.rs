pub mod jpeg;
pub mod png;
pub mod webp;

use std::io::{Cursor, Read, Write};

use image::DynamicImage;

use crate::config::DecodeOptions;
use crate::error::CodecError;
use crate::format::ImageFormat;

pub use self::jpeg::JpegCodec;
pub use self::png::PngCodec;
pub use self::webp::WebpCodec;

/// Decode/encode capability for one image format.
pub trait Codec: Send + Sync {
    fn format(&self) -> ImageFormat;
    fn decode(&self, reader: &mut dyn Read) -> Result<DynamicImage, CodecError>;
    fn encode(&self, writer: &mut dyn Write, img: &DynamicImage) -> Result<(), CodecError>;

    /// Reject encode options the codec cannot honor, before anything is written.
    fn validate(&self) -> Result<(), CodecError> {
        Ok(())
    }
}

/// Read the whole stream and decode it as `format` through the `image` crate.
pub(crate) fn decode_with_image(
    reader: &mut dyn Read,
    format: ImageFormat,
    options: &DecodeOptions,
) -> Result<DynamicImage, CodecError> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| CodecError::Io { format, source: e })?;

    let mut decoder = image::ImageReader::with_format(Cursor::new(data), format.to_image_format());
    decoder.limits(options.limits());

    let img = decoder
        .decode()
        .map_err(|e| CodecError::Decode { format, source: e })?;

    log::debug!(
        "Decoded {} image: {}x{} {:?}",
        format,
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

pub(crate) fn write_all(
    writer: &mut dyn Write,
    data: &[u8],
    format: ImageFormat,
) -> Result<(), CodecError> {
    writer.write_all(data).map_err(|e| CodecError::Encode {
        format,
        message: e.to_string(),
    })
}
