use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::NamingScheme;
use crate::error::{CodecError, ConfigError, ConvertError};
use crate::extension::Extension;
use crate::io::{collect_files, output_path};

/// Fluent setup for a [`Converter`]. Every setter takes the builder by
/// value, so `from(..).to(..)` chains.
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    source: Option<Extension>,
    target: Option<Extension>,
    naming: NamingScheme,
    recursive: bool,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input file or directory used by [`Converter::convert_input`].
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    pub fn output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output = Some(dir.into());
        self
    }

    /// Bind the source format.
    pub fn from(mut self, ext: Extension) -> Self {
        self.source = Some(ext);
        self
    }

    /// Bind the target format.
    pub fn to(mut self, ext: Extension) -> Self {
        self.target = Some(ext);
        self
    }

    pub fn naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Check that both formats are bound and differ.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.source, &self.target) {
            (None, None) => Err(ConfigError::NeitherSet),
            (None, Some(_)) => Err(ConfigError::SourceNotSet),
            (Some(_), None) => Err(ConfigError::TargetNotSet),
            (Some(source), Some(target)) if source.format() == target.format() => {
                Err(ConfigError::SameFormat(source.format()))
            }
            (Some(_), Some(_)) => Ok(()),
        }
    }

    pub fn build(self) -> Result<Converter, ConfigError> {
        self.validate()?;
        let output = self.output.ok_or(ConfigError::MissingOutput)?;
        match (self.source, self.target) {
            (Some(source), Some(target)) => {
                target.validate().map_err(|e| ConfigError::InvalidOptions {
                    format: target.format(),
                    message: e.to_string(),
                })?;
                Ok(Converter {
                    input: self.input,
                    output,
                    source,
                    target,
                    naming: self.naming,
                    recursive: self.recursive,
                })
            }
            _ => Err(ConfigError::NeitherSet),
        }
    }
}

/// Result of converting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
    pub width: u32,
    pub height: u32,
}

/// A validated source → target conversion. Files are processed one at a
/// time and the first failure aborts the batch.
#[derive(Debug)]
pub struct Converter {
    input: Option<PathBuf>,
    output: PathBuf,
    source: Extension,
    target: Extension,
    naming: NamingScheme,
    recursive: bool,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn source(&self) -> &Extension {
        &self.source
    }

    pub fn target(&self) -> &Extension {
        &self.target
    }

    pub fn output_dir(&self) -> &Path {
        &self.output
    }

    /// Where `input` is written. Files below the configured input
    /// directory keep their relative folder.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        output_path(
            input,
            self.input.as_deref(),
            &self.output,
            self.target.format(),
            self.naming,
        )
    }

    /// Input/output pairs that `convert` would produce. Touches nothing.
    pub fn plan<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<(PathBuf, PathBuf)> {
        paths
            .iter()
            .map(|p| (p.as_ref().to_path_buf(), self.output_path(p.as_ref())))
            .collect()
    }

    /// Files of the source format found under the configured input.
    pub fn collect_input(&self) -> Result<Vec<PathBuf>, ConvertError> {
        let input = self.input.as_deref().ok_or(ConfigError::MissingInput)?;
        collect_files(input, self.source.format(), self.recursive)
    }

    pub fn convert_input(&self) -> Result<Vec<Conversion>, ConvertError> {
        let files = self.collect_input()?;
        self.convert(&files)
    }

    pub fn convert<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Conversion>, ConvertError> {
        self.convert_with(paths, |_| {})
    }

    /// Like [`Converter::convert`], calling `on_converted` after each file.
    pub fn convert_with<P, F>(&self, paths: &[P], mut on_converted: F) -> Result<Vec<Conversion>, ConvertError>
    where
        P: AsRef<Path>,
        F: FnMut(&Conversion),
    {
        if paths.is_empty() {
            return Err(ConvertError::NoInput);
        }

        let mut seen = HashSet::with_capacity(paths.len());
        for (_, output) in self.plan(paths) {
            if !seen.insert(output.clone()) {
                return Err(ConvertError::DuplicateOutput { path: output });
            }
        }

        fs::create_dir_all(&self.output).map_err(|e| ConvertError::Create {
            path: self.output.clone(),
            source: e,
        })?;

        log::info!(
            "Converting {} file(s) from {} to {} into {}",
            paths.len(),
            self.source.format(),
            self.target.format(),
            self.output.display()
        );

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            let conversion = self.convert_file(path.as_ref())?;
            on_converted(&conversion);
            results.push(conversion);
        }

        Ok(results)
    }

    /// Decode `path` with the source codec and write it next to its
    /// siblings in the output directory. Both handles are closed on return.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion, ConvertError> {
        let output = self.output_path(path);

        let file = File::open(path).map_err(|e| ConvertError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let input_size = file_size(&file.metadata(), path);

        let img = self
            .source
            .decode(&mut BufReader::new(file))
            .map_err(|e| ConvertError::Decode {
                path: path.to_path_buf(),
                source: e,
            })?;

        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::Create {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let out_file = File::create(&output).map_err(|e| ConvertError::Create {
            path: output.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(out_file);

        let encode_err = |source: CodecError| ConvertError::Encode {
            path: output.clone(),
            source,
        };
        self.target.encode(&mut writer, &img).map_err(encode_err)?;
        writer
            .flush()
            .map_err(|e| CodecError::Encode {
                format: self.target.format(),
                message: e.to_string(),
            })
            .map_err(encode_err)?;
        drop(writer);

        let output_size = file_size(&fs::metadata(&output), &output);

        log::debug!(
            "{} → {} ({}x{}, {} → {} bytes)",
            path.display(),
            output.display(),
            img.width(),
            img.height(),
            input_size,
            output_size
        );

        Ok(Conversion {
            input: path.to_path_buf(),
            output,
            input_size,
            output_size,
            width: img.width(),
            height: img.height(),
        })
    }
}

/// Size for the report; a failed stat is logged and counted as zero.
fn file_size(metadata: &std::io::Result<fs::Metadata>, path: &Path) -> u64 {
    match metadata {
        Ok(m) => m.len(),
        Err(e) => {
            log::warn!("Could not read size of {}: {}", path.display(), e);
            0
        }
    }
}
