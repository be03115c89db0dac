//! Upload validation gate.
//!
//! All checks are pure and return booleans; a rejected upload is a normal
//! outcome for the caller, never a propagated error.

use crate::config::UploadLimits;
use crate::types::UploadRequest;

/// Validate an upload against the configured limits.
///
/// Checks, in order: file name is non-empty and path-safe, the extension is
/// allow-listed and not deny-listed (case-insensitive), and the declared
/// size is within `max_file_size`.
pub fn validate_upload(request: &UploadRequest, limits: &UploadLimits) -> bool {
    if !is_safe_file_name(&request.file_name) {
        return false;
    }

    let Some(ext) = extension_of(&request.file_name) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    if !limits.allowed_extensions.iter().any(|a| *a == ext) {
        return false;
    }
    if limits.blocked_extensions.iter().any(|b| *b == ext) {
        return false;
    }

    request.declared_size <= limits.max_file_size
}

/// True if `name` is non-empty, free of path separators, and contains no
/// `..` segments.
pub fn is_safe_file_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    // A bare ".." or a ".." dot-segment smuggled into the name.
    name != ".." && !name.split('.').all(str::is_empty)
}

/// Extension of a file name (text after the last dot), if any.
pub fn extension_of(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// True if `s` parses as a decimal number (integer or float).
///
/// Used by schema/type inference; pure and locale-independent.
pub fn is_numeric_string(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && (t.parse::<i64>().is_ok() || t.parse::<f64>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, size: u64) -> UploadRequest {
        UploadRequest {
            file_name: name.to_string(),
            declared_size: size,
            content: Vec::new(),
            content_type: None,
        }
    }

    #[test]
    fn accepts_plain_csv_upload() {
        let limits = UploadLimits::default();
        assert!(validate_upload(&request("sales.csv", 512), &limits));
    }

    #[test]
    fn rejects_path_traversal_names() {
        let limits = UploadLimits::default();
        assert!(!validate_upload(&request("../etc/passwd.csv", 10), &limits));
        assert!(!validate_upload(&request("a/b.csv", 10), &limits));
        assert!(!validate_upload(&request("a\\b.csv", 10), &limits));
        assert!(!validate_upload(&request("..", 10), &limits));
        assert!(!validate_upload(&request("", 10), &limits));
    }

    #[test]
    fn rejects_disallowed_and_blocked_extensions() {
        let mut limits = UploadLimits::default();
        assert!(!validate_upload(&request("script.exe", 10), &limits));
        assert!(!validate_upload(&request("noextension", 10), &limits));

        limits.blocked_extensions.push("csv".to_string());
        assert!(!validate_upload(&request("sales.csv", 10), &limits));
    }

    #[test]
    fn default_allow_list_covers_every_dispatchable_extension() {
        let limits = UploadLimits::default();
        for ext in &limits.allowed_extensions {
            assert!(
                crate::types::FileType::from_extension(ext).is_some(),
                "allow-listed extension '{ext}' has no parser"
            );
        }
        for ext in ["csv", "tsv", "json", "xlsx", "xls", "xlsm", "ods", "xml", "txt"] {
            assert!(
                validate_upload(&request(&format!("data.{ext}"), 10), &limits),
                "dispatchable extension '{ext}' rejected by default gate"
            );
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let limits = UploadLimits::default();
        assert!(validate_upload(&request("REPORT.CSV", 10), &limits));
    }

    #[test]
    fn rejects_oversized_uploads() {
        let limits = UploadLimits::default();
        assert!(!validate_upload(
            &request("big.csv", limits.max_file_size + 1),
            &limits
        ));
        assert!(validate_upload(
            &request("fits.csv", limits.max_file_size),
            &limits
        ));
    }

    #[test]
    fn numeric_string_detection() {
        assert!(is_numeric_string("42"));
        assert!(is_numeric_string(" -3.5 "));
        assert!(is_numeric_string("1e6"));
        assert!(!is_numeric_string("abc"));
        assert!(!is_numeric_string(""));
        assert!(!is_numeric_string("12px"));
    }
}
