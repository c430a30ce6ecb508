use std::fmt;
use std::io::{Read, Write};

use image::DynamicImage;

use crate::codec::{Codec, JpegCodec, PngCodec, WebpCodec};
use crate::config::{DecodeOptions, EncodeOptions};
use crate::error::CodecError;
use crate::format::ImageFormat;

/// A format binding: the format plus the codec configured for it.
pub struct Extension {
    format: ImageFormat,
    codec: Box<dyn Codec>,
}

impl Extension {
    /// Binding with library defaults. WebP encoding falls back to
    /// lossy quality 80 when no options are given.
    pub fn new(format: ImageFormat) -> Self {
        let decode = DecodeOptions::default();
        let codec: Box<dyn Codec> = match format {
            ImageFormat::Png => Box::new(PngCodec::new(EncodeOptions::default(), decode)),
            ImageFormat::Webp => Box::new(WebpCodec::new(None, decode)),
            ImageFormat::Jpeg => Box::new(JpegCodec::new(EncodeOptions::default(), decode)),
        };
        Self { format, codec }
    }

    pub fn with_options(format: ImageFormat, encode: EncodeOptions, decode: DecodeOptions) -> Self {
        let codec: Box<dyn Codec> = match format {
            ImageFormat::Png => Box::new(PngCodec::new(encode, decode)),
            ImageFormat::Webp => Box::new(WebpCodec::new(Some(encode), decode)),
            ImageFormat::Jpeg => Box::new(JpegCodec::new(encode, decode)),
        };
        Self { format, codec }
    }

    /// Bind a caller-supplied codec.
    pub fn with_codec(codec: Box<dyn Codec>) -> Self {
        Self {
            format: codec.format(),
            codec,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Suffix used for output files.
    pub fn name(&self) -> &'static str {
        self.format.extension()
    }

    pub fn decode(&self, reader: &mut dyn Read) -> Result<DynamicImage, CodecError> {
        self.codec.decode(reader)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        self.codec.validate()
    }

    pub fn encode(&self, writer: &mut dyn Write, img: &DynamicImage) -> Result<(), CodecError> {
        self.codec.encode(writer, img)
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
