use std::fmt;
use std::str::FromStr;

pub const DEFAULT_QUALITY: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

impl fmt::Display for PngCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Default => write!(f, "default"),
            Self::Best => write!(f, "best"),
        }
    }
}

impl FromStr for PngCompression {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            _ => Err(format!("unknown png compression: {s}")),
        }
    }
}

/// Options applied when writing the target format.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    /// Lossy quality 0-100 (WebP and JPEG)
    pub quality: u8,
    /// Encode WebP losslessly; quality is ignored
    pub lossless: bool,
    /// zlib level for PNG output
    pub png_compression: PngCompression,
    /// Run oxipng over PNG output and strip ancillary chunks
    pub png_optimize: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            lossless: false,
            png_compression: PngCompression::Default,
            png_optimize: false,
        }
    }
}

/// Limits applied when reading the source format. `None` keeps the
/// decoder library's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_alloc: Option<u64>,
}

impl DecodeOptions {
    pub(crate) fn limits(&self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = self.max_width;
        limits.max_image_height = self.max_height;
        if self.max_alloc.is_some() {
            limits.max_alloc = self.max_alloc;
        }
        limits
    }
}

/// How an output file name is derived from its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingScheme {
    /// `photo.png` → `photo.png.webp`
    #[default]
    Append,
    /// `photo.png` → `photo.webp`
    Replace,
}
