//! # JasperRS Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the report workflows: writability
//! checks, listing the templates of one report directory, reading and writing
//! template text, and removing stale compiled artifacts. All of them attach
//! the offending path to any I/O error.
//!
//! ## Architecture
//!
//! - **`is_writable`**: Reports whether the current user may write to a path (permission bits plus `access(2)` on Unix).
//! - **`list_files_with_extension`**: Lists files directly inside a directory (no recursion) with a given extension, sorted by name.
//! - **`read_file_to_string`** / **`write_string_to_file`**: Read and overwrite whole files.
//! - **`remove_file`**: Deletes a single file.
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! # fn run_example(report_dir: &Path) -> Result<()> {
//! for template in io::list_files_with_extension(report_dir, "jrxml")? {
//!     let text = io::read_file_to_string(&template)?;
//!     io::write_string_to_file(&template, &text.replace("a.jrxml", "a.jasper"))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{JasperError, Result};
use anyhow::Context;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Returns `true` if `path` exists and the current user may write to it.
///
/// The permission bits must not mark it read-only, and on Unix `access(2)`
/// must grant write access, which accounts for ownership and group.
pub fn is_writable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => !meta.permissions().readonly() && access_allows_write(path),
        Err(_) => false,
    }
}

#[cfg(unix)]
fn access_allows_write(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn access_allows_write(_path: &Path) -> bool {
    true
}

/// Lists regular files directly inside `dir` whose extension equals `extension`.
///
/// Subdirectories are not descended into. Results are sorted by file name.
///
/// # Errors
///
/// Returns an `Err` if `dir` is not a directory or cannot be read.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!(JasperError::FileSystem(format!(
            "Path is not a directory: {:?}",
            dir
        )));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list directory {:?}", dir))?;
        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new(extension))
        {
            files.push(entry.into_path());
        }
    }
    debug!("Found {} .{} file(s) in {:?}", files.len(), extension, dir);
    Ok(files)
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to `path`, replacing any existing content.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Deletes a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    info!("Removed file: {:?}", path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Test writing to and reading from a file.
    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("index.jrxml");
        let content = "<jasperReport name=\"index\"/>";
        write_string_to_file(&file_path, content)?;
        assert!(file_path.exists());
        assert_eq!(read_file_to_string(&file_path)?, content);
        Ok(())
    }

    /// Test `read_file_to_string` when the target file does not exist.
    #[test]
    fn test_read_file_not_found() -> Result<()> {
        let base_dir = tempdir()?;
        let result = read_file_to_string(&base_dir.path().join("nonexistent.jrxml"));
        assert!(result.is_err());
        Ok(())
    }

    /// Only direct children with the exact extension are listed, sorted by name.
    #[test]
    fn test_list_files_with_extension() -> Result<()> {
        let base_dir = tempdir()?;
        let dir = base_dir.path();
        fs::write(dir.join("sub_b.jrxml"), "")?;
        fs::write(dir.join("index.jrxml"), "")?;
        fs::write(dir.join("index.jasper"), "")?;
        fs::write(dir.join("notes.jrxml.bak"), "")?;
        fs::create_dir(dir.join("nested"))?;
        fs::write(dir.join("nested/deep.jrxml"), "")?;
        fs::create_dir(dir.join("folder.jrxml"))?;

        let names: Vec<String> = list_files_with_extension(dir, "jrxml")?
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["index.jrxml", "sub_b.jrxml"]);
        Ok(())
    }

    #[test]
    fn test_list_files_requires_directory() -> Result<()> {
        let base_dir = tempdir()?;
        let result = list_files_with_extension(&base_dir.path().join("missing"), "jrxml");
        assert!(result.unwrap_err().to_string().contains("not a directory"));
        Ok(())
    }

    /// A directory with write bits set, owned by someone else, is not writable.
    #[test]
    #[cfg(unix)]
    fn test_is_writable_respects_ownership() -> Result<()> {
        use std::os::unix::fs::MetadataExt;

        let base_dir = tempdir()?;
        let owned = base_dir.path().join("reports");
        fs::create_dir(&owned)?;
        assert!(is_writable(&owned));

        // Root passes every access check, so ownership cannot be observed.
        if fs::metadata(&owned)?.uid() == 0 {
            return Ok(());
        }
        let root = Path::new("/");
        assert_ne!(fs::metadata(root)?.uid(), fs::metadata(&owned)?.uid());
        assert!(!is_writable(root));
        Ok(())
    }

    #[test]
    #[cfg(unix)] // Windows refuses to delete read-only files.
    fn test_remove_file_and_writability() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("index.jasper");
        assert!(!is_writable(&file_path));
        fs::write(&file_path, "compiled")?;
        assert!(is_writable(&file_path));

        let mut perms = fs::metadata(&file_path)?.permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file_path, perms)?;
        assert!(!is_writable(&file_path));

        remove_file(&file_path)?;
        assert!(!file_path.exists());
        Ok(())
    }
}
