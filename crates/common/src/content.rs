//! Content-type → disposition rules for streamed files.
//!
//! Browsers render a small set of types directly; everything else is offered as
//! a download under its original filename.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// MIME types a browser is expected to display in-page.
pub const INLINE_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "text/plain",
    "text/html",
];

/// Fallback when the extension lookup yields nothing.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// How a streamed file should be presented by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Render in the browser window.
    Inline,
    /// Prompt the user to save the file.
    Attachment,
}

impl Disposition {
    /// Resolve the disposition for a content type.
    ///
    /// Exact (case-insensitive) match against [`INLINE_TYPES`] yields
    /// [`Disposition::Inline`]; any other type, including ones carrying
    /// parameters, yields [`Disposition::Attachment`].
    pub fn for_content_type(content_type: &str) -> Self {
        if INLINE_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(content_type))
        {
            Disposition::Inline
        } else {
            Disposition::Attachment
        }
    }

    /// Render the `Content-Disposition` header value for `filename`.
    ///
    /// Inline files carry no filename. Attachments get a quoted ASCII
    /// `filename` and, when the name is not plain ASCII, an RFC 5987
    /// `filename*` parameter with the UTF-8 name percent-encoded.
    pub fn header_value(self, filename: &str) -> String {
        match self {
            Disposition::Inline => "inline".to_owned(),
            Disposition::Attachment => {
                let fallback: String = filename
                    .chars()
                    .map(|c| match c {
                        '"' | '\\' => '_',
                        c if c.is_ascii() && !c.is_ascii_control() => c,
                        _ => '_',
                    })
                    .collect();
                if fallback == filename {
                    format!("attachment; filename=\"{fallback}\"")
                } else {
                    format!(
                        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
                        utf8_percent_encode(filename, ATTR_CHAR_ESCAPES)
                    )
                }
            }
        }
    }
}

/// Bytes outside the RFC 5987 `attr-char` set.
const ATTR_CHAR_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');
