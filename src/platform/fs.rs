// StaffLedger - platform/fs.rs
//
// Filesystem helpers shared by the snapshot store and the CLI.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// Spreadsheet exports are not always UTF-8; invalid sequences are replaced
/// rather than failing the whole import.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "File is not valid UTF-8; decoding lossily"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    // Excel prefixes UTF-8 CSV with a byte-order mark.
    Ok(text
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(text))
}

/// Write `bytes` to `path` atomically (write temp, then rename).
///
/// Parent directories are created as needed. A failure between write and
/// rename leaves any previous file at `path` untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        e
    })
}
