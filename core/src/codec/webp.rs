use std::io::{Read, Write};

use image::DynamicImage;

use crate::codec::{decode_with_image, write_all, Codec};
use crate::config::{DecodeOptions, EncodeOptions, DEFAULT_QUALITY};
use crate::error::CodecError;
use crate::format::ImageFormat;

/// WebP binding. Decoding goes through `image`, encoding through libwebp
/// so that lossy output is available.
#[derive(Debug, Clone, Default)]
pub struct WebpCodec {
    encode: Option<EncodeOptions>,
    decode: DecodeOptions,
}

/// Options handed to libwebp for one encode call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WebpSettings {
    lossless: bool,
    quality: f32,
}

impl WebpSettings {
    fn from_options(options: Option<&EncodeOptions>) -> Result<Self, CodecError> {
        // Unconfigured: default preset, lossy, quality 80
        let Some(options) = options else {
            return Ok(Self {
                lossless: false,
                quality: f32::from(DEFAULT_QUALITY),
            });
        };

        if options.quality > 100 {
            return Err(CodecError::InvalidOptions {
                format: ImageFormat::Webp,
                message: format!("quality {} out of range 0-100", options.quality),
            });
        }

        Ok(Self {
            lossless: options.lossless,
            quality: f32::from(options.quality),
        })
    }
}

impl WebpCodec {
    pub fn new(encode: Option<EncodeOptions>, decode: DecodeOptions) -> Self {
        Self { encode, decode }
    }
}

impl Codec for WebpCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Webp
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<DynamicImage, CodecError> {
        decode_with_image(reader, ImageFormat::Webp, &self.decode)
    }

    fn validate(&self) -> Result<(), CodecError> {
        WebpSettings::from_options(self.encode.as_ref()).map(|_| ())
    }

    fn encode(&self, writer: &mut dyn Write, img: &DynamicImage) -> Result<(), CodecError> {
        let settings = WebpSettings::from_options(self.encode.as_ref())?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let encoder = ::webp::Encoder::from_rgba(rgba.as_raw(), width, height);

        let encoded = encoder
            .encode_simple(settings.lossless, settings.quality)
            .map_err(|e| CodecError::Encode {
                format: ImageFormat::Webp,
                message: format!("{:?}", e),
            })?;

        log::debug!(
            "Encoded WebP {}x{} ({}, q={}): {} bytes",
            width,
            height,
            if settings.lossless { "lossless" } else { "lossy" },
            settings.quality,
            encoded.len()
        );

        write_all(writer, &encoded, ImageFormat::Webp)
    }
}
