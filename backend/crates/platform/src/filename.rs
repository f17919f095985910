//! Upload filename handling
//!
//! Client-supplied filenames are reduced to a conservative ASCII subset
//! before they touch the filesystem, and extension checks are done on the
//! name the client sent.

use unicode_normalization::UnicodeNormalization;

/// Reduce a filename to `[A-Za-z0-9_.-]`.
///
/// Accents are decomposed and dropped, path separators become word breaks,
/// whitespace runs collapse to a single `_`, and leading or trailing `.` /
/// `_` are stripped. The result never contains a path component, though it
/// may be empty.
///
/// ```
/// use platform::filename::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Proyecto Final.pdf"), "Proyecto_Final.pdf");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Lower-cased extension after the last `.`, if any
pub fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Whether `name` carries one of `allowed` (compared case-insensitively)
pub fn has_allowed_extension<S: AsRef<str>>(name: &str, allowed: &[S]) -> bool {
    extension(name).is_some_and(|ext| {
        allowed
            .iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(&ext))
    })
}
