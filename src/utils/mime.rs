use std::path::Path;

/// Best-effort MIME type from the file extension, falling back to
/// `application/octet-stream`. Never fails.
pub fn guess_mime_type(path: impl AsRef<Path>) -> String {
    mime_guess::from_path(path.as_ref())
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| ::mime::APPLICATION_OCTET_STREAM.essence_str().to_string())
}

/// Base name of `path`, used as the multipart filename.
pub fn file_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}
