use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::NamingScheme;
use crate::error::ConvertError;
use crate::format::ImageFormat;

/// Collect the files under `input` that carry `format`'s extension.
/// A single file is returned as-is whatever its extension.
/// If `recursive` is true, walk subdirectories.
pub fn collect_files(
    input: &Path,
    format: ImageFormat,
    recursive: bool,
) -> Result<Vec<PathBuf>, ConvertError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(ConvertError::Open {
            path: input.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a file or directory"),
        });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    for entry in WalkDir::new(input).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.map_err(|e| ConvertError::Collect {
            path: input.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if ImageFormat::from_path(&path) == Some(format) {
            files.push(path);
        }
    }

    Ok(files)
}

/// Output path for `input` inside `output_dir` carrying the `format` suffix.
/// Files found below `input_base` keep their relative folder under `output_dir`.
pub fn output_path(
    input: &Path,
    input_base: Option<&Path>,
    output_dir: &Path,
    format: ImageFormat,
    naming: NamingScheme,
) -> PathBuf {
    let base = match naming {
        NamingScheme::Append => input.file_name(),
        NamingScheme::Replace => input.file_stem(),
    };
    let mut name = base.map(OsString::from).unwrap_or_else(|| OsString::from("image"));
    name.push(".");
    name.push(format.extension());

    let relative = input_base
        .zip(input.parent())
        .and_then(|(base, parent)| parent.strip_prefix(base).ok());
    match relative {
        Some(dir) => output_dir.join(dir).join(name),
        None => output_dir.join(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_output_path_append() {
        let out = output_path(
            Path::new("in/photos/cat.png"),
            None,
            Path::new("out"),
            ImageFormat::Webp,
            NamingScheme::Append,
        );
        assert_eq!(out, PathBuf::from("out/cat.png.webp"));
    }

    #[test]
    fn test_output_path_replace() {
        let out = output_path(
            Path::new("cat.png"),
            None,
            Path::new("/tmp/out"),
            ImageFormat::Jpeg,
            NamingScheme::Replace,
        );
        assert_eq!(out, PathBuf::from("/tmp/out/cat.jpg"));
    }

    #[test]
    fn test_output_dir_not_repeated() {
        let out = output_path(Path::new("a.png"), None, Path::new("out"), ImageFormat::Webp, NamingScheme::Append);
        assert_eq!(out.components().count(), 2);
    }

    #[test]
    fn test_output_path_mirrors_subfolders() {
        let base = Path::new("in");
        let a = output_path(Path::new("in/a/x.png"), Some(base), Path::new("out"), ImageFormat::Webp, NamingScheme::Append);
        let b = output_path(Path::new("in/b/x.png"), Some(base), Path::new("out"), ImageFormat::Webp, NamingScheme::Append);
        assert_eq!(a, PathBuf::from("out/a/x.png.webp"));
        assert_eq!(b, PathBuf::from("out/b/x.png.webp"));

        let top = output_path(Path::new("in/y.png"), Some(base), Path::new("out"), ImageFormat::Webp, NamingScheme::Append);
        assert_eq!(top, PathBuf::from("out/y.png.webp"));
    }

    #[test]
    fn test_output_path_single_file_base() {
        let file = Path::new("in/y.png");
        let out = output_path(file, Some(file), Path::new("out"), ImageFormat::Webp, NamingScheme::Replace);
        assert_eq!(out, PathBuf::from("out/y.webp"));
    }

    #[test]
    fn test_collect_filters_by_format() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.PNG"), b"").unwrap();
        fs::write(dir.path().join("c.webp"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/d.png"), b"").unwrap();

        let files = collect_files(dir.path(), ImageFormat::Png, false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);

        let files = collect_files(dir.path(), ImageFormat::Png, true).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_collect_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.png");
        fs::write(&file, b"").unwrap();
        assert_eq!(collect_files(&file, ImageFormat::Png, false).unwrap(), vec![file]);
    }

    #[test]
    fn test_collect_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_files(&dir.path().join("missing"), ImageFormat::Png, false).unwrap_err();
        assert!(matches!(err, ConvertError::Open { .. }));
    }
}
