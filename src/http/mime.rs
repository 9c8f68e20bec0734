use std::path::Path;

use tracing::{debug, warn};

/// Content type of the synthesized not-found page.
pub const HTML: &str = "text/html";

/// Guesses the MIME type of `path` from its extension.
///
/// Returns an empty string when the path does not exist or no type is
/// known for it; callers still emit the (empty) header field.
pub fn content_type(path: &Path) -> String {
    if !path.exists() {
        debug!("No content type for missing path {}", path.display());
        return String::new();
    }

    match mime_guess::from_path(path).first_raw() {
        Some(mime) => {
            debug!("Content Type: {}", mime);
            mime.to_string()
        }
        None => {
            warn!("Could not determine content type of {}", path.display());
            String::new()
        }
    }
}

/// Whether the substitution pass applies to content of this type.
pub fn is_text(content_type: &str) -> bool {
    content_type.starts_with("text/")
}
