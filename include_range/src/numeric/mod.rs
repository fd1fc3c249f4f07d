//! The numeric strategies: `&[65,0,255,]`.
//!
//! Both emitters produce a borrowed array literal with one decimal element per
//! byte, each followed by a comma. They differ only in how the text is laid out
//! in memory and in whitespace: [`naive`] grows one buffer, [`fast`] writes
//! table records into newline-terminated chunks.
pub(crate) mod fast;
pub(crate) mod naive;

const LIST_OPEN: &str = "&[";
const LIST_CLOSE: &str = "]";

/// Decodes the elements of a numeric list literal found in `text`.
#[cfg(test)]
pub(crate) fn decode_list(text: &str) -> Vec<u8> {
    let start = text.find(LIST_OPEN).expect("no list literal") + LIST_OPEN.len();
    let end = start + text[start..].find(LIST_CLOSE).expect("unterminated list");
    text[start..end]
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(|element| element.parse().expect("element is not a byte"))
        .collect()
}
