//! Vector loader: finds specification files in a directory and decodes them.
//!
//! Only the top level of the directory is scanned. Files are visited in
//! file-name order so that generated output is stable across platforms. Any
//! unreadable or malformed file aborts the whole load.

use crate::errors::{GenError, GenResult};
use crate::vectors::{TestVector, VectorFile};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A decoded specification file and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub file: VectorFile,
}

/// Lists the specification files directly inside `dir`, sorted by name.
///
/// Subdirectories and files with another extension are skipped.
pub fn discover_spec_files(dir: &Path, extension: &str) -> GenResult<Vec<PathBuf>> {
    let metadata = fs::metadata(dir).map_err(|source| GenError::OpenDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(GenError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| GenError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() || !has_extension(entry.path(), extension) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Reads and decodes one specification file.
pub fn load_vector_file(path: &Path) -> GenResult<VectorFile> {
    let content = fs::read_to_string(path).map_err(|source| GenError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_yaml::from_str(&content) {
        Ok(file) => Ok(file),
        Err(source) => Err(GenError::deserialize(path, content, source)),
    }
}

/// Loads every specification file in `dir`, in discovery order.
pub fn load_dir(dir: &Path, extension: &str) -> GenResult<Vec<LoadedFile>> {
    discover_spec_files(dir, extension)?
        .into_iter()
        .map(|path| {
            let file = load_vector_file(&path)?;
            Ok(LoadedFile { path, file })
        })
        .collect()
}

/// All vectors in `dir`: file order first, then order within each file.
pub fn load_vectors(dir: &Path, extension: &str) -> GenResult<Vec<TestVector>> {
    Ok(load_dir(dir, extension)?
        .into_iter()
        .flat_map(|loaded| loaded.file.tests)
        .collect())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_exact() {
        assert!(has_extension(Path::new("valid-auth.yml"), "yml"));
        assert!(!has_extension(Path::new("valid-auth.yaml"), "yml"));
        assert!(!has_extension(Path::new("README"), "yml"));
        assert!(!has_extension(Path::new("archive.yml.bak"), "yml"));
    }
}
