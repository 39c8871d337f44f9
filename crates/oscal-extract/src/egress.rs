//! Document writing (egress)
//!
//! Output is two-space indented JSON with non-ASCII text written as-is. The
//! bytes are staged in a temporary file beside the destination and renamed
//! over it, so the destination either holds the complete document or is left
//! as it was.

use crate::error::ExtractError;
use oscal_catalog::CatalogDocument;
use std::io::Write;
use std::path::Path;

/// Encode a document the way it is written to disk
///
/// # Errors
/// `ExtractError::Serialize` if encoding fails.
pub fn render_document(document: &CatalogDocument) -> Result<Vec<u8>, ExtractError> {
    serde_json::to_vec_pretty(document).map_err(ExtractError::Serialize)
}

/// Write a document to `path`, replacing any existing file
///
/// # Errors
/// - `ExtractError::Serialize` if encoding fails
/// - `ExtractError::Write` if the file cannot be created or renamed into place
pub fn write_document(
    document: &CatalogDocument,
    path: impl AsRef<Path>,
) -> Result<(), ExtractError> {
    let path = path.as_ref();
    let bytes = render_document(document)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".oscal-extract-").suffix(".tmp");
    // New files get the usual 0o666 less umask instead of owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut staged = builder
        .tempfile_in(dir)
        .map_err(|e| ExtractError::write(path, e))?;

    staged
        .write_all(&bytes)
        .and_then(|()| staged.flush())
        .map_err(|e| ExtractError::write(path, e))?;

    if let Some(permissions) = existing {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(|e| ExtractError::write(path, e))?;
    }

    staged
        .persist(path)
        .map_err(|e| ExtractError::write(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote filtered catalog");
    Ok(())
}
