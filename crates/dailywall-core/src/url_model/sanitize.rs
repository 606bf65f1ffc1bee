//! File-system-safe filename cleanup.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes a vendor-derived name safe to join onto the image directory.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims leading/trailing whitespace and dots
/// - Limits length to 255 bytes
///
/// Well-formed vendor names (`Name_MKT123_UHD.jpg`) pass through unchanged.
pub fn sanitize_filename(name: &str) -> String {
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

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}
