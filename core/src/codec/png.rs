use std::io::{Read, Write};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use crate::codec::{decode_with_image, write_all, Codec};
use crate::config::{DecodeOptions, EncodeOptions, PngCompression};
use crate::error::CodecError;
use crate::format::ImageFormat;

#[derive(Debug, Clone, Default)]
pub struct PngCodec {
    encode: EncodeOptions,
    decode: DecodeOptions,
}

impl PngCodec {
    pub fn new(encode: EncodeOptions, decode: DecodeOptions) -> Self {
        Self { encode, decode }
    }

    fn compression(&self) -> CompressionType {
        match self.encode.png_compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

impl Codec for PngCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<DynamicImage, CodecError> {
        decode_with_image(reader, ImageFormat::Png, &self.decode)
    }

    fn encode(&self, writer: &mut dyn Write, img: &DynamicImage) -> Result<(), CodecError> {
        let mut output = Vec::new();
        let encoder = PngEncoder::new_with_quality(&mut output, self.compression(), FilterType::Adaptive);
        img.write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode {
                format: ImageFormat::Png,
                message: e.to_string(),
            })?;

        if self.encode.png_optimize {
            let before = output.len();
            output = optimize_lossless(&output)?;
            log::debug!("oxipng: {} → {} bytes", before, output.len());
        }

        write_all(writer, &output, ImageFormat::Png)
    }
}

/// Lossless DEFLATE re-compression + metadata stripping via oxipng
fn optimize_lossless(png_data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut opts = oxipng::Options::from_preset(4);
    opts.strip = oxipng::StripChunks::Safe;

    oxipng::optimize_from_memory(png_data, &opts).map_err(|e| CodecError::Encode {
        format: ImageFormat::Png,
        message: e.to_string(),
    })
}
