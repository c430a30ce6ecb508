use std::path::PathBuf;

use clap::Parser;

use image_convert_core::config::{DecodeOptions, EncodeOptions, NamingScheme, PngCompression};
use image_convert_core::format::ImageFormat;

/// Batch image format converter (PNG, WebP, JPEG)
///
/// Formats are given by code or name: 0 = png, 1 = webp, 2 = jpg.
#[derive(Debug, Parser)]
#[command(name = "image_convert", version, about)]
pub struct Cli {
    /// Format to convert from
    #[arg(long, value_name = "FORMAT", default_value = "0")]
    pub from: ImageFormat,

    /// Format to convert to
    #[arg(long, value_name = "FORMAT", default_value = "1")]
    pub to: ImageFormat,

    /// Input file or directory
    #[arg(long, value_name = "PATH")]
    pub source: PathBuf,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub target: PathBuf,

    /// Quality for lossy formats (0-100)
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// Encode WebP output losslessly
    #[arg(long)]
    pub lossless: bool,

    /// zlib effort for PNG output (fast, default, best)
    #[arg(long, value_name = "LEVEL", default_value_t = PngCompression::Default)]
    pub png_compression: PngCompression,

    /// Run a lossless oxipng pass over PNG output
    #[arg(long)]
    pub optimize: bool,

    /// Name outputs `photo.webp` instead of `photo.png.webp`
    #[arg(long)]
    pub replace_extension: bool,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Show what would be done without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Refuse to decode images wider than this
    #[arg(long, value_name = "PIXELS")]
    pub max_width: Option<u32>,

    /// Refuse to decode images taller than this
    #[arg(long, value_name = "PIXELS")]
    pub max_height: Option<u32>,

    /// Decoder allocation limit in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_alloc: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            quality: self.quality,
            lossless: self.lossless,
            png_compression: self.png_compression,
            png_optimize: self.optimize,
        }
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            max_width: self.max_width,
            max_height: self.max_height,
            max_alloc: self.max_alloc,
        }
    }

    pub fn naming(&self) -> NamingScheme {
        if self.replace_extension {
            NamingScheme::Replace
        } else {
            NamingScheme::Append
        }
    }
}
