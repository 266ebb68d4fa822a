//! File system utilities.

use std::fs;
use std::io;
use std::path::Path;

/// Writes `content` to `path` atomically using a sibling temp file and rename.
///
/// Readers never observe a half-written cache file, even if the process is
/// killed mid-write. Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.{}.tmp", std::process::id()));

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    // Same directory, so the rename stays on one filesystem.
    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}
