//! Display filenames derived from media URLs.

use std::borrow::Cow;

use tracing::warn;

/// Characters that are not allowed in a saved filename.
const ILLEGAL_FILENAME_CHARS: &[char] = &['/', '<', '>', '*', '"', ':', '?', '\\', '|'];

/// Derive a display filename from a URL's last path segment.
///
/// Query string and fragment are dropped, percent-escapes decoded, and
/// illegal filename characters replaced with `_`.
pub fn filename_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or("");
    let last = last.split('?').next().unwrap_or("");
    let last = last.split('#').next().unwrap_or("");

    if last.is_empty() {
        warn!(url = url, "Could not get attachment name");
    }

    let decoded = percent_decode(last).unwrap_or_else(|| last.to_string());
    sanitize_filename(&decoded)
}

/// Last `/`-separated segment, with no decoding or cleanup.
pub fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or("")
}

/// Replace characters that cannot appear in a filename.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Decode `%XX` escapes. Returns `None` when any `%` is not followed by
/// two hex digits or the decoded bytes are not UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return None;
    }
    urlencoding::decode(input).map(Cow::into_owned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_last_segment() {
        assert_eq!(filename_from_url("https://a.test/x/y/z.png"), "z.png");
        assert_eq!(filename_from_url("/x/y/z.png"), "z.png");
    }

    #[test]
    fn test_query_and_fragment_dropped() {
        assert_eq!(filename_from_url("https://a.test/img.jpg?w=100&h=2#top"), "img.jpg");
        assert_eq!(filename_from_url("https://a.test/img.jpg#frag"), "img.jpg");
    }

    #[test]
    fn test_percent_decoded() {
        assert_eq!(filename_from_url("https://a.test/My%20Photo.png"), "My Photo.png");
        assert_eq!(filename_from_url("https://a.test/caf%C3%A9.png"), "café.png");
    }

    #[test]
    fn test_decoded_illegal_chars_replaced() {
        assert_eq!(filename_from_url("https://a.test/a%3Ab%2Ac.png"), "a_b_c.png");
    }

    #[test]
    fn test_malformed_escape_kept_raw() {
        assert_eq!(filename_from_url("https://a.test/100%.png"), "100%.png");
        assert_eq!(filename_from_url("https://a.test/%ZZ.png"), "%ZZ.png");
    }

    #[test]
    fn test_signed_escape_kept_raw() {
        assert_eq!(filename_from_url("https://a.test/a%+41.png"), "a%+41.png");
        assert_eq!(filename_from_url("https://a.test/a%-1.png"), "a%-1.png");
    }

    #[test]
    fn test_one_bad_escape_keeps_whole_name_raw() {
        assert_eq!(filename_from_url("https://a.test/a%ZZ%20b.png"), "a%ZZ%20b.png");
    }

    #[test]
    fn test_invalid_utf8_kept_raw() {
        assert_eq!(filename_from_url("https://a.test/bad%FF.png"), "bad%FF.png");
    }

    #[test]
    fn test_trailing_slash_gives_empty_name() {
        assert_eq!(filename_from_url("https://a.test/dir/"), "");
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(last_path_segment("/chat/v/clip.mp4"), "clip.mp4");
        assert_eq!(last_path_segment(""), "");
    }
}
