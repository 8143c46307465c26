//! Name validation and filename helpers.

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;

/// Validate a folder or dataroom name: non-empty after trimming and
/// free of path separators. Returns the trimmed name.
pub fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(AppError::validation("Name cannot contain path separators"));
    }
    Ok(trimmed.to_string())
}

/// Strip any client-supplied path components from an uploaded
/// filename, keeping only the final component.
pub fn sanitize_filename(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .to_string()
}

/// Split a filename into `(base, extension)` where the extension
/// includes the leading dot (`"report.pdf"` → `("report", ".pdf")`).
/// Names without a dot yield an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// The lowercase extension of a filename, without the dot.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = split_extension(name);
    ext.strip_prefix('.').map(|e| e.to_lowercase())
}

/// Compute a folder's materialized path from its parent's path.
pub fn join_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}/{name}"),
        None => format!("/{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  reports ").unwrap(), "reports");
        assert!(validate_name("   ").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("C:\\docs\\report.pdf"), "report.pdf");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("report.pdf"), ("report", ".pdf"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(None, "contracts"), "/contracts");
        assert_eq!(join_path(Some("/contracts"), "2024"), "/contracts/2024");
    }
}
