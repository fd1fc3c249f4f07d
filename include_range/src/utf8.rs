//! The string-literal strategy: `"...".as_bytes()`.
//!
//! The range is decoded as UTF-8 through a [`WINDOW_SIZE`] window and escaped
//! into a Rust string literal. Decoding is strict (no overlong forms, no
//! surrogates, nothing above U+10FFFF). The first invalid sequence abandons the
//! whole strategy: the partial literal is dropped and the source is rewound so
//! a numeric strategy can start from the beginning.
use std::io::{self, Read, Seek};

use crate::{
    chunked::ChunkedText,
    source::{RangeSource, WINDOW_SIZE},
    unit::Frame,
};

const LITERAL_OPEN: &str = "\"";
const LITERAL_CLOSE: &str = "\".as_bytes()";

/// Longest UTF-8 sequence, minus the byte that starts it.
const MAX_CARRY: usize = 3;

/// Result of decoding the sequence at the front of a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// A scalar and the number of bytes it occupied.
    Scalar(char, usize),
    /// A valid prefix whose continuation bytes are not available yet.
    Incomplete,
    Invalid,
}

/// Decodes the first scalar of `bytes`, which must not be empty.
fn decode(bytes: &[u8]) -> Step {
    let lead = bytes[0];
    if lead < 0x80 {
        return Step::Scalar(char::from(lead), 1);
    }

    // Width, the accepted range of the first continuation byte, and the
    // payload bits of the lead byte. Restricting the second byte is what rules
    // out overlong forms, surrogates and values above U+10FFFF.
    let (width, second, mut scalar) = match lead {
        0xC2..=0xDF => (2, 0x80..=0xBF, u32::from(lead & 0x1F)),
        0xE0 => (3, 0xA0..=0xBF, u32::from(lead & 0x0F)),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF, u32::from(lead & 0x0F)),
        0xED => (3, 0x80..=0x9F, u32::from(lead & 0x0F)),
        0xF0 => (4, 0x90..=0xBF, u32::from(lead & 0x07)),
        0xF1..=0xF3 => (4, 0x80..=0xBF, u32::from(lead & 0x07)),
        0xF4 => (4, 0x80..=0x8F, u32::from(lead & 0x07)),
        _ => return Step::Invalid,
    };

    for (index, &byte) in bytes.iter().enumerate().take(width).skip(1) {
        let accepted = if index == 1 {
            second.contains(&byte)
        } else {
            (0x80..=0xBF).contains(&byte)
        };
        if !accepted {
            return Step::Invalid;
        }
        scalar = (scalar << 6) | u32::from(byte & 0x3F);
    }
    if bytes.len() < width {
        return Step::Incomplete;
    }

    char::from_u32(scalar).map_or(Step::Invalid, |ch| Step::Scalar(ch, width))
}

/// Appends `ch` to `out` as it must appear inside a Rust string literal.
fn escape_into(ch: char, out: &mut String) {
    let escaped = match ch {
        '"' => "\\\"",
        '\\' => "\\\\",
        '\0' => "\\0",
        '\u{07}' => "\\x07",
        '\u{08}' => "\\x08",
        '\u{0B}' => "\\x0B",
        '\u{0C}' => "\\x0C",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        // Bidirectional overrides are rejected in literals by a deny-by-default lint.
        '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => {
            out.push_str(&ch.escape_unicode().to_string());
            return;
        }
        _ => {
            out.push(ch);
            return;
        }
    };
    out.push_str(escaped);
}

/// Renders the range as a string literal inside `frame`.
///
/// Returns `Ok(None)` if the range is not valid UTF-8; the source has then
/// been rewound to the start of the range.
///
/// # Errors
/// Propagates I/O errors from the source.
pub(crate) fn encode<R: Read + Seek>(
    source: &mut RangeSource<R>,
    frame: &Frame,
) -> io::Result<Option<ChunkedText>> {
    let payload_hint = usize::try_from(source.len()).unwrap_or(0);
    let mut out = String::with_capacity(
        frame.head.len() + LITERAL_OPEN.len() + payload_hint + LITERAL_CLOSE.len() + frame.tail.len(),
    );
    out.push_str(&frame.head);
    out.push_str(LITERAL_OPEN);

    let mut window = [0u8; MAX_CARRY + WINDOW_SIZE];
    let mut carried = 0;
    loop {
        let read = source.read_window(&mut window[carried..carried + WINDOW_SIZE])?;
        if read == 0 {
            if carried > 0 {
                log::debug!("range ends inside a multi-byte sequence");
                source.rewind()?;
                return Ok(None);
            }
            break;
        }

        let filled = carried + read;
        let mut at = 0;
        while at < filled {
            match decode(&window[at..filled]) {
                Step::Scalar(ch, width) => {
                    escape_into(ch, &mut out);
                    at += width;
                }
                Step::Incomplete => break,
                Step::Invalid => {
                    log::debug!("invalid UTF-8 sequence starting with {:#04x}", window[at]);
                    source.rewind()?;
                    return Ok(None);
                }
            }
        }
        window.copy_within(at..filled, 0);
        carried = filled - at;
    }

    out.push_str(LITERAL_CLOSE);
    out.push_str(&frame.tail);
    Ok(Some(ChunkedText::from_string(out)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;
    use crate::bounds::ByteRange;

    fn frame() -> Frame {
        Frame {
            head: "<".into(),
            tail: ">".into(),
        }
    }

    fn run(bytes: &[u8]) -> Option<String> {
        let range = ByteRange {
            start: 0,
            len: bytes.len() as u64,
        };
        let mut source = RangeSource::new(Cursor::new(bytes.to_vec()), range).unwrap();
        encode(&mut source, &frame())
            .unwrap()
            .map(|text| String::from_utf8(text.reader().read_remaining()).unwrap())
    }

    #[test]
    fn decodes_every_width() {
        for ch in ['A', 'é', '€', '😀', '\u{7FF}', '\u{FFFF}', '\u{10FFFF}'] {
            let mut buf = [0; 4];
            let encoded = ch.encode_utf8(&mut buf);
            assert_eq!(
                decode(encoded.as_bytes()),
                Step::Scalar(ch, encoded.len()),
                "{ch:?}"
            );
        }
    }

    #[rstest]
    #[case::lone_continuation(&[0x80])]
    #[case::overlong_two(&[0xC0, 0x80])]
    #[case::overlong_c1(&[0xC1, 0xBF])]
    #[case::overlong_three(&[0xE0, 0x80, 0x80])]
    #[case::overlong_four(&[0xF0, 0x80, 0x80, 0x80])]
    #[case::surrogate(&[0xED, 0xA0, 0x80])]
    #[case::above_max(&[0xF4, 0x90, 0x80, 0x80])]
    #[case::lead_f5(&[0xF5, 0x80, 0x80, 0x80])]
    #[case::ff(&[0xFF])]
    #[case::bad_continuation(&[0xE2, 0x82, 0x41])]
    fn rejects(#[case] bytes: &[u8]) {
        assert_eq!(decode(bytes), Step::Invalid);
    }

    #[rstest]
    #[case(&[0xC3])]
    #[case(&[0xE2, 0x82])]
    #[case(&[0xF0, 0x9F, 0x98])]
    fn truncated_prefix_needs_more(#[case] bytes: &[u8]) {
        assert_eq!(decode(bytes), Step::Incomplete);
    }

    #[test]
    fn plain_text() {
        assert_eq!(run(b"hello").as_deref(), Some("<\"hello\".as_bytes()>"));
    }

    #[test]
    fn empty_range() {
        assert_eq!(run(b"").as_deref(), Some("<\"\".as_bytes()>"));
    }

    #[test]
    fn escapes() {
        let input = "q\" b\\ \0 \u{7} \u{8} \u{B} \u{C} \n \r \t \u{202E} é\u{1}";
        assert_eq!(
            run(input.as_bytes()).as_deref(),
            Some(
                "<\"q\\\" b\\\\ \\0 \\x07 \\x08 \\x0B \\x0C \\n \\r \\t \\u{202e} é\u{1}\".as_bytes()>"
            )
        );
    }

    #[test]
    fn sequences_split_across_windows() {
        let mut text = "a".repeat(WINDOW_SIZE - 1);
        text.push('😀');
        text.push_str(&"€".repeat(WINDOW_SIZE));
        let out = run(text.as_bytes()).unwrap();
        assert_eq!(out, format!("<\"{text}\".as_bytes()>"));
    }

    #[test]
    fn invalid_input_is_abandoned_and_rewound() {
        let bytes = [0x41, 0x00, 0xFF];
        let range = ByteRange { start: 0, len: 3 };
        let mut source = RangeSource::new(Cursor::new(bytes.to_vec()), range).unwrap();
        assert!(encode(&mut source, &frame()).unwrap().is_none());

        let mut buf = [0; 3];
        assert_eq!(source.read_window(&mut buf).unwrap(), 3);
        assert_eq!(buf, bytes);
    }

    #[test]
    fn truncated_at_end_of_range_is_invalid() {
        let mut bytes = "x".repeat(WINDOW_SIZE + 5).into_bytes();
        bytes.extend_from_slice(&[0xE2, 0x82]);
        assert_eq!(run(&bytes), None);
    }

    #[test]
    fn invalid_after_many_valid_windows() {
        let mut bytes = "ok".repeat(WINDOW_SIZE * 3).into_bytes();
        bytes.push(0x80);
        assert_eq!(run(&bytes), None);
    }
}
