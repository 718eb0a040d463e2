//! Filesystem-safe names for course titles, chapters, and lectures.
//!
//! Titles and chapter names come from scraped page text and routinely
//! carry `/`, `:`, and punctuation that breaks paths. The rules here keep
//! spaces (the on-disk tree mirrors the course page) while guaranteeing a
//! single valid Linux path component.

/// Characters stripped from course titles outright.
const TITLE_STRIP: &[char] = &['?', '.', '!', '/', ';', ':', 'ö', 'ä'];

/// Sanitizes a course title for use as the course root directory name.
/// Slashes become spaces first so word boundaries survive, then the
/// remaining punctuation set is dropped.
pub fn sanitize_course_title(raw: &str) -> String {
    let spaced = raw.replace('/', " ");
    let stripped: String = spaced.chars().filter(|c| !TITLE_STRIP.contains(c)).collect();
    scrub_path_component(stripped.trim())
}

/// Sanitizes a chapter name for use as a subdirectory name:
/// `:` becomes ` -`, `/` and `.` become `-`.
pub fn sanitize_chapter_name(raw: &str) -> String {
    let mapped = raw.replace(':', " -").replace(['/', '.'], "-");
    scrub_path_component(mapped.trim())
}

/// Last line of defense for any name used as a path component: replaces
/// NUL, path separators, and control characters with `-`, trims leading
/// and trailing dots and spaces, and caps the result at 255 bytes
/// (Linux NAME_MAX).
pub fn scrub_path_component(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '-'
            } else {
                c
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }

    let mut take = NAME_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
