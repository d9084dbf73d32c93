/// Characters that may not appear in a file name on common filesystems.
pub const FORBIDDEN_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace every forbidden filename character with `_`.
///
/// All other characters, including spaces and dots, are kept in place, so the
/// output has the same number of characters as the input.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if FORBIDDEN_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}
