use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{map_io_err, CodemodResult};

/// Read a file's full contents as a string
///
/// Fails if the file is missing, unreadable, or not valid UTF-8.
pub fn read_source(path: impl AsRef<Path>) -> CodemodResult<String> {
    let path = path.as_ref();
    debug!("Reading source file: {}", path.display());

    let content = fs::read_to_string(path).map_err(map_io_err(path))?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Overwrite a file with the given content
///
/// The write goes straight to the target path. There is no backup and no
/// temp-file rename, so an interrupted write can leave the file truncated.
pub fn write_source(path: impl AsRef<Path>, content: &str) -> CodemodResult<()> {
    let path = path.as_ref();
    debug!("Writing {} bytes to {}", content.len(), path.display());

    fs::write(path, content).map_err(map_io_err(path))
}
