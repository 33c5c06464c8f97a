/// Directory listing helpers
/// Results are keyed by file name so iteration order is lexicographic
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{GeneratorError, GeneratorResult};

/// Shader files with the given extension directly inside `dir`, sorted by file name
pub fn list_shader_files(dir: &Path, extension: &str) -> GeneratorResult<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();
    for (name, path) in list_entries(dir)? {
        if path.is_file() && name.ends_with(extension) {
            files.insert(name, path);
        }
    }
    Ok(files)
}

/// Subdirectories directly inside `dir`, sorted by name
pub fn list_subdirectories(dir: &Path) -> GeneratorResult<BTreeMap<String, PathBuf>> {
    let mut dirs = BTreeMap::new();
    for (name, path) in list_entries(dir)? {
        if path.is_dir() {
            dirs.insert(name, path);
        }
    }
    Ok(dirs)
}

fn list_entries(dir: &Path) -> GeneratorResult<Vec<(String, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|e| GeneratorError::io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| GeneratorError::io(dir, e))?;
        let path = entry.path();
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| GeneratorError::InvalidFileName(path.clone()))?;
        entries.push((name, path));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fx", "a.fx", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.fx")).unwrap();

        let files = list_shader_files(dir.path(), ".fx").unwrap();
        let names: Vec<&str> = files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a.fx", "b.fx"]);
    }

    #[test]
    fn test_lists_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("lava")).unwrap();
        fs::create_dir(dir.path().join("fire")).unwrap();
        fs::write(dir.path().join("readme.md"), "x").unwrap();

        let dirs = list_subdirectories(dir.path()).unwrap();
        let names: Vec<&str> = dirs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["fire", "lava"]);
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        match list_shader_files(&missing, ".fx").unwrap_err() {
            GeneratorError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
