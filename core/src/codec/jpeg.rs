use std::io::{Read, Write};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::codec::{decode_with_image, Codec};
use crate::config::{DecodeOptions, EncodeOptions};
use crate::error::CodecError;
use crate::format::ImageFormat;

#[derive(Debug, Clone, Default)]
pub struct JpegCodec {
    encode: EncodeOptions,
    decode: DecodeOptions,
}

impl JpegCodec {
    pub fn new(encode: EncodeOptions, decode: DecodeOptions) -> Self {
        Self { encode, decode }
    }
}

impl Codec for JpegCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<DynamicImage, CodecError> {
        decode_with_image(reader, ImageFormat::Jpeg, &self.decode)
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.encode.quality == 0 || self.encode.quality > 100 {
            return Err(CodecError::InvalidOptions {
                format: ImageFormat::Jpeg,
                message: format!("quality {} out of range 1-100", self.encode.quality),
            });
        }
        Ok(())
    }

    fn encode(&self, writer: &mut dyn Write, img: &DynamicImage) -> Result<(), CodecError> {
        self.validate()?;

        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let mut encoder = JpegEncoder::new_with_quality(writer, self.encode.quality);

        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
            .map_err(|e| CodecError::Encode {
                format: ImageFormat::Jpeg,
                message: e.to_string(),
            })
    }
}
