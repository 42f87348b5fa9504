//! HTML scan session for media tags.
//!
//! One [`MediaScanner`] lives for one extraction. Each message body is
//! parsed on its own and scanned in document order; the originating
//! message's id and moderation state travel alongside as a
//! [`ScanContext`] instead of being patched into the markup.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::filename::{filename_from_url, last_path_segment};
use super::url::ApiRoot;
use crate::model::attachment::{Attachment, AttachmentFile, AttachmentKind};

/// Attribute carrying the authenticated (token-protected) media URL.
pub const ATTACHMENT_SOURCE_ATTRIBUTE: &str = "data-expensify-source";

/// Attribute carrying the uploader's original filename.
pub const ATTACHMENT_ORIGINAL_FILENAME_ATTRIBUTE: &str = "data-name";

/// Attribute carrying a video's length in seconds.
pub const ATTACHMENT_DURATION_ATTRIBUTE: &str = "data-expensify-duration";

static MEDIA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img, video").expect("valid media selector"));

/// Per-message context for the tags being scanned.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    pub report_action_id: &'a str,
    pub has_been_flagged: bool,
}

/// Accumulates attachments across the messages of one thread.
pub struct MediaScanner<'r> {
    resolver: &'r ApiRoot,
    attachments: Vec<Attachment>,
}

impl<'r> MediaScanner<'r> {
    pub fn new(resolver: &'r ApiRoot) -> Self {
        Self {
            resolver,
            attachments: Vec::new(),
        }
    }

    /// Scan one message body and append its media, in document order.
    ///
    /// Malformed markup never fails: the parser recovers and whatever
    /// tree it produced is scanned.
    pub fn feed(&mut self, ctx: ScanContext<'_>, html: &str) {
        if html.is_empty() {
            return;
        }

        let fragment = Html::parse_fragment(html);
        if !fragment.errors.is_empty() {
            debug!(
                report_action_id = ctx.report_action_id,
                errors = fragment.errors.len(),
                "Recovered from malformed message HTML"
            );
        }

        for element in fragment.select(&MEDIA_SELECTOR) {
            let attachment = match element.value().name() {
                "video" => Some(self.video_attachment(element, ctx)),
                "img" => self.image_attachment(element, ctx),
                _ => None,
            };
            if let Some(attachment) = attachment {
                self.attachments.push(attachment);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// End the session and return the attachments, oldest first.
    pub fn finish(self) -> Vec<Attachment> {
        self.attachments
    }

    fn video_attachment(&self, element: ElementRef<'_>, ctx: ScanContext<'_>) -> Attachment {
        let el = element.value();
        let auth_source = non_empty(el.attr(ATTACHMENT_SOURCE_ATTRIBUTE));
        let raw = auth_source.or_else(|| non_empty(el.attr("src"))).unwrap_or("");

        Attachment {
            kind: AttachmentKind::Video,
            source: self.resolver.resolve(raw),
            is_auth_token_required: auth_source.is_some(),
            file: AttachmentFile {
                name: last_path_segment(raw).to_string(),
            },
            duration: Some(parse_duration(el.attr(ATTACHMENT_DURATION_ATTRIBUTE))),
            is_receipt: false,
            has_been_flagged: ctx.has_been_flagged,
            report_action_id: None,
        }
    }

    /// `None` for images without a `src`.
    fn image_attachment(&self, element: ElementRef<'_>, ctx: ScanContext<'_>) -> Option<Attachment> {
        let el = element.value();
        let src = non_empty(el.attr("src"))?;
        let auth_source = non_empty(el.attr(ATTACHMENT_SOURCE_ATTRIBUTE));
        let source = self.resolver.resolve(auth_source.unwrap_or(src));
        let name = non_empty(el.attr(ATTACHMENT_ORIGINAL_FILENAME_ATTRIBUTE))
            .map(str::to_string)
            .unwrap_or_else(|| filename_from_url(&source));

        Some(Attachment {
            kind: AttachmentKind::Image,
            source,
            is_auth_token_required: auth_source.is_some(),
            file: AttachmentFile { name },
            duration: None,
            is_receipt: false,
            has_been_flagged: ctx.has_been_flagged,
            report_action_id: Some(ctx.report_action_id.to_string()),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Numeric value of a duration attribute, following JavaScript's
/// `Number(string)`: a missing attribute is NaN, a blank one is 0, and
/// unsigned `0x`/`0o`/`0b` literals are read in their radix.
pub fn parse_duration(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return f64::NAN;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(parsed) = parse_radix_literal(trimmed) {
        return parsed;
    }
    // Rust also accepts "inf"/"nan" spellings, which are not numbers here.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `Some` for a `0x`/`0o`/`0b` prefixed literal, NaN when its digits are bad.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(digits.chars().fold(0.0, |acc, c| {
        acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ApiRoot {
        ApiRoot::new("https://api.example.test/", &[]).unwrap()
    }

    fn ctx(id: &str, flagged: bool) -> ScanContext<'_> {
        ScanContext {
            report_action_id: id,
            has_been_flagged: flagged,
        }
    }

    #[test]
    fn test_image_with_plain_src() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("7", false), r#"<img src="/x/y/z.png" />"#);
        let out = scanner.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, AttachmentKind::Image);
        assert_eq!(out[0].file.name, "z.png");
        assert_eq!(out[0].source, "https://api.example.test/x/y/z.png");
        assert!(!out[0].is_auth_token_required);
        assert_eq!(out[0].report_action_id.as_deref(), Some("7"));
        assert!(out[0].duration.is_none());
    }

    #[test]
    fn test_image_prefers_auth_source_and_explicit_name() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(
            ctx("8", true),
            r#"<img src="/thumb/t.jpg" data-expensify-source="/full/f.jpg" data-name="holiday.jpg" />"#,
        );
        let out = scanner.finish();
        assert_eq!(out[0].source, "https://api.example.test/full/f.jpg");
        assert_eq!(out[0].file.name, "holiday.jpg");
        assert!(out[0].is_auth_token_required);
        assert!(out[0].has_been_flagged);
    }

    #[test]
    fn test_image_without_src_ignored() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("1", false), r#"<img data-expensify-source="/a.png"><img src="">"#);
        assert!(scanner.is_empty());
    }

    #[test]
    fn test_video_attachment() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(
            ctx("9", true),
            r#"<video data-expensify-source="/videos/clip.mp4" data-expensify-duration="12.5">clip.mp4</video>"#,
        );
        let out = scanner.finish();
        assert_eq!(out.len(), 1);
        assert!(out[0].is_video());
        assert_eq!(out[0].file.name, "clip.mp4");
        assert_eq!(out[0].source, "https://api.example.test/videos/clip.mp4");
        assert_eq!(out[0].duration, Some(12.5));
        assert!(out[0].is_auth_token_required);
        assert!(out[0].has_been_flagged);
        assert!(out[0].report_action_id.is_none());
    }

    #[test]
    fn test_video_without_duration_is_nan() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("9", false), r#"<video data-expensify-source="/v/a.mp4"></video>"#);
        let out = scanner.finish();
        assert!(out[0].duration.unwrap().is_nan());
    }

    #[test]
    fn test_video_without_source_still_emitted() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("9", false), "<video></video>");
        let out = scanner.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source, "");
        assert_eq!(out[0].file.name, "");
        assert!(!out[0].is_auth_token_required);
    }

    #[test]
    fn test_document_order_within_message() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(
            ctx("1", false),
            r#"<p>look</p><img src="/a.png" /><br /><video data-expensify-source="/b.mp4"></video><img src="/c.png" />"#,
        );
        let names: Vec<String> = scanner.finish().into_iter().map(|a| a.file.name).collect();
        assert_eq!(names, vec!["a.png", "b.mp4", "c.png"]);
    }

    #[test]
    fn test_malformed_html_recovers() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("1", false), r#"<div><img src="/ok.png" <<b>></span"#);
        scanner.feed(ctx("2", false), r#"<img src="/next.png">"#);
        let out = scanner.finish();
        assert_eq!(out.last().unwrap().file.name, "next.png");
        assert_eq!(out.last().unwrap().report_action_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_uppercase_tags_match() {
        let r = resolver();
        let mut scanner = MediaScanner::new(&r);
        scanner.feed(ctx("1", false), r#"<IMG SRC="/Upper.PNG">"#);
        assert_eq!(scanner.finish()[0].file.name, "Upper.PNG");
    }

    #[test]
    fn test_parse_duration_rules() {
        assert_eq!(parse_duration(Some("12.5")), 12.5);
        assert_eq!(parse_duration(Some(" 3 ")), 3.0);
        assert_eq!(parse_duration(Some("")), 0.0);
        assert_eq!(parse_duration(Some("1e2")), 100.0);
        assert!(parse_duration(None).is_nan());
        assert!(parse_duration(Some("abc")).is_nan());
        assert!(parse_duration(Some("inf")).is_nan());
        assert!(parse_duration(Some("Infinity")).is_infinite());
    }

    #[test]
    fn test_parse_duration_radix_literals() {
        assert_eq!(parse_duration(Some("0x10")), 16.0);
        assert_eq!(parse_duration(Some(" 0XfF ")), 255.0);
        assert_eq!(parse_duration(Some("0o17")), 15.0);
        assert_eq!(parse_duration(Some("0b101")), 5.0);
        assert!(parse_duration(Some("0x")).is_nan());
        assert!(parse_duration(Some("0b12")).is_nan());
        assert!(parse_duration(Some("-0x10")).is_nan());
        assert!(parse_duration(Some("0x+1")).is_nan());
    }

    #[test]
    fn test_scanners_share_selector() {
        let r = resolver();
        let mut first = MediaScanner::new(&r);
        first.feed(ctx("1", false), r#"<img src="/a.png">"#);
        let mut second = MediaScanner::new(&r);
        second.feed(ctx("2", false), r#"<video data-expensify-source="/b.mp4"></video>"#);
        assert_eq!(first.finish()[0].file.name, "a.png");
        assert_eq!(second.finish()[0].file.name, "b.mp4");
    }
}
