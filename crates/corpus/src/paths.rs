use std::path::{Path, PathBuf};

/// `<dir>/<stem><suffix><ext>`; `extension` replaces the original one
/// when given (without the leading dot).
pub fn derived_path(path: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let ext = match extension {
        Some(e) => Some(e.to_string()),
        None => path.extension().map(|e| e.to_string_lossy().into_owned()),
    };

    let mut name = format!("{stem}{suffix}");
    if let Some(e) = ext {
        name.push('.');
        name.push_str(&e);
    }
    path.with_file_name(name)
}
