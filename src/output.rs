//! Writing responses to disk.

use crate::model::ResponseModel;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output directory {path:?}: {cause}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("failed to write {path:?}: {cause}")]
    Write {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
}

/// Prints `response` and saves it as `directory/file_name`.
///
/// A missing response writes nothing and returns `Ok(None)`. The directory is
/// created on first use.
pub fn write_results(
    directory: &Path,
    file_name: &str,
    response: Option<&ResponseModel>,
) -> Result<Option<PathBuf>, OutputError> {
    let Some(response) = response else {
        debug!("No response for {}, nothing written", file_name);
        return Ok(None);
    };

    let rendered = response.to_string();
    println!("{}", rendered);

    fs::create_dir_all(directory).map_err(|cause| OutputError::CreateDirectory {
        path: directory.to_path_buf(),
        cause,
    })?;

    let path = directory.join(file_name);
    fs::write(&path, rendered).map_err(|cause| OutputError::Write {
        path: path.clone(),
        cause,
    })?;
    debug!("Wrote {}", path.display());

    Ok(Some(path))
}
