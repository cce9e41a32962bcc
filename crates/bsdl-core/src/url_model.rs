//! Target file name derivation from a build URL.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// File name a download is saved under: the URL's final path segment.
///
/// Query and fragment are ignored; percent-escapes are kept as-is. Returns
/// `None` when the URL cannot be parsed or ends in `/`, `.` or `..`.
///
/// # Examples
///
/// - `https://minecraft.azureedge.net/bin-linux/bedrock-server-1.20.10.01.zip` → `bedrock-server-1.20.10.01.zip`
/// - `https://minecraft.azureedge.net/bin-linux/` → `None`
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let (_, last) = parsed.path().rsplit_once('/')?;
    let name = sanitize_file_name(last);
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}

/// Replaces NUL, path separators and control characters with `_`, strips leading
/// dots and surrounding whitespace, and caps the length at NAME_MAX bytes.
fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = replaced.trim().trim_start_matches('.');
    if trimmed.is_empty() && !replaced.trim().is_empty() {
        // "." and ".." are rejected by the caller, not mangled here.
        return replaced.trim().to_string();
    }

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
