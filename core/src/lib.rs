//! Format bindings and the batch conversion pipeline behind `image_convert`.
//!
//! ```no_run
//! use image_convert_core::converter::Converter;
//! use image_convert_core::extension::Extension;
//! use image_convert_core::format::ImageFormat;
//!
//! let converter = Converter::builder()
//!     .output("out")
//!     .from(Extension::new(ImageFormat::Png))
//!     .to(Extension::new(ImageFormat::Webp))
//!     .build()?;
//! converter.convert(&["cat.png", "dog.png"])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod extension;
pub mod format;
pub mod io;
