use crate::types::RawTagValue;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Decodes the instrument block into ordered tokens
///
/// An absent tag yields no tokens. See [`decode_with_header`] for the
/// tokenizing rules.
pub fn decode(raw: Option<&RawTagValue>) -> Vec<String> {
    decode_with_header(raw, 0)
}

/// Decodes the instrument block, discarding leading header lines first
///
/// # Algorithm
///
/// 1. Text is used as-is, bytes are decoded as lossy UTF-8, lists of
///    scalars are joined with newlines
/// 2. The first `header_lines` lines are discarded
/// 3. Lines are split on CR/LF, then on `;`
/// 4. Fragments are trimmed and empty ones dropped, order preserved
///
/// A value of any other shape degrades to an empty token list.
pub fn decode_with_header(raw: Option<&RawTagValue>, header_lines: usize) -> Vec<String> {
    let Some(raw) = raw else {
        debug!("No instrument block present");
        return Vec::new();
    };

    match block_text(raw) {
        Some(text) => tokenize(&text, header_lines),
        None => {
            warn!("Instrument block has an unexpected shape, ignoring it");
            Vec::new()
        }
    }
}

/// Renders the raw instrument value as one text block
///
/// Returns `None` for bare numeric scalars and nested lists, which no
/// instrument writes into this tag.
fn block_text(raw: &RawTagValue) -> Option<String> {
    match raw {
        RawTagValue::Text(s) => Some(s.clone()),
        RawTagValue::Bytes(b) => Some(String::from_utf8_lossy(b).into_owned()),
        RawTagValue::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    RawTagValue::List(_) => return None,
                    RawTagValue::Bytes(b) => parts.push(String::from_utf8_lossy(b).into_owned()),
                    scalar => parts.push(scalar.to_string()),
                }
            }
            Some(parts.join("\n"))
        }
        RawTagValue::Int(_) | RawTagValue::Float(_) | RawTagValue::Rational(_, _) => None,
    }
}

/// Splits instrument text into trimmed, non-empty tokens
pub fn tokenize(text: &str, header_lines: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split('\r'))
        .skip(header_lines)
        .flat_map(|line| line.split(';'))
        .map(|fragment| fragment.trim_matches(|c: char| c.is_whitespace() || c == '\0'))
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a `key=value` or `key:value` token at its first delimiter
///
/// `=` takes precedence over `:` so time values survive in `Time = 12:30:00`.
/// Returns `None` when the token has no delimiter or an empty key.
fn split_delimited(token: &str) -> Option<(String, String)> {
    let (key, value) = token.split_once('=').or_else(|| token.split_once(':'))?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

fn has_delimiter(token: &str) -> bool {
    token.contains('=') || token.contains(':')
}

/// Interprets tokens as key/value pairs
///
/// A token carrying its own delimiter becomes one pair. Other tokens pair
/// positionally with the token that follows them, even when that token has a
/// delimiter of its own: `["AP_WD", "WD = 8.5 mm"]` gives `AP_WD = "WD = 8.5 mm"`.
/// Leftovers, a trailing key or a delimiter token with an empty key, are
/// stored as `item_<index>`.
/// Later duplicates overwrite earlier ones.
///
/// # Example
///
/// ```
/// use semmeta_core::extraction::pairify;
///
/// let tokens: Vec<String> = ["AP_WD", "5.2 mm", "Mag = 1.00 K X"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let pairs = pairify(&tokens);
///
/// assert_eq!(pairs["AP_WD"], "5.2 mm");
/// assert_eq!(pairs["Mag"], "1.00 K X");
/// ```
pub fn pairify(tokens: &[String]) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];

        if let Some((key, value)) = split_delimited(token) {
            pairs.insert(key, value);
            index += 1;
            continue;
        }

        match tokens.get(index + 1) {
            Some(value) if !has_delimiter(token) => {
                pairs.insert(token.clone(), value.clone());
                index += 2;
            }
            _ => {
                debug!("Unpaired instrument token at {}: {}", index, token);
                pairs.insert(format!("item_{}", index), token.clone());
                index += 1;
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_decode_preserves_token_order() {
        let raw = RawTagValue::from("A=1;B=2\r\nC=3");
        assert_eq!(decode(Some(&raw)), tokens(&["A=1", "B=2", "C=3"]));
    }

    #[test]
    fn test_decode_absent_tag() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn test_decode_trims_and_drops_empty_fragments() {
        let raw = RawTagValue::from("  AP_WD  \r\n\r\n ; ;WD = 5.2 mm ;\n\n");
        assert_eq!(decode(Some(&raw)), tokens(&["AP_WD", "WD = 5.2 mm"]));
    }

    #[test]
    fn test_decode_bytes_lossy() {
        let mut bytes = b"AP_WD\r\n5.2 ".to_vec();
        bytes.push(0xB5); // latin-1 micro sign
        bytes.extend_from_slice(b"m\r\n");
        let tokens = decode(Some(&RawTagValue::Bytes(bytes)));
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], "AP_WD");
        assert_eq!(tokens[1], "5.2 \u{FFFD}m");
    }

    #[test]
    fn test_decode_list_joins_with_newlines() {
        let raw = RawTagValue::List(vec![
            RawTagValue::from("AP_WD = 5.2 mm\r\nAP_MAG = 100 X"),
            RawTagValue::Int(7),
        ]);
        assert_eq!(
            decode(Some(&raw)),
            tokens(&["AP_WD = 5.2 mm", "AP_MAG = 100 X", "7"])
        );
    }

    #[test]
    fn test_decode_unexpected_shape_degrades() {
        assert!(decode(Some(&RawTagValue::Int(3))).is_empty());
        let nested = RawTagValue::List(vec![RawTagValue::List(vec![RawTagValue::Int(1)])]);
        assert!(decode(Some(&nested)).is_empty());
    }

    #[test]
    fn test_decode_with_header_skips_lines() {
        let raw = RawTagValue::from("0 1 2\r\nheader\r\nAP_WD\r\n5.2 mm");
        assert_eq!(
            decode_with_header(Some(&raw), 2),
            tokens(&["AP_WD", "5.2 mm"])
        );
        assert!(decode_with_header(Some(&raw), 10).is_empty());
    }

    #[test]
    fn test_pairify_positional() {
        let pairs = pairify(&tokens(&["AP_WD", "5.2 mm", "AP_BEAM_TIME", "12"]));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["AP_WD"], "5.2 mm");
        assert_eq!(pairs["AP_BEAM_TIME"], "12");
    }

    #[test]
    fn test_pairify_delimited() {
        let pairs = pairify(&tokens(&["AP_WD = 5.2 mm", "ColorMap: 1,2,3", "Time = 12:30:00"]));
        assert_eq!(pairs["AP_WD"], "5.2 mm");
        assert_eq!(pairs["ColorMap"], "1,2,3");
        assert_eq!(pairs["Time"], "12:30:00");
    }

    #[test]
    fn test_pairify_zeiss_layout() {
        // Parameter id line followed by its labelled value line
        let pairs = pairify(&tokens(&["AP_WD", "WD = 8.5 mm", "AP_MAG", "Mag = 2.00 K X"]));
        assert_eq!(pairs["AP_WD"], "WD = 8.5 mm");
        assert_eq!(pairs["AP_MAG"], "Mag = 2.00 K X");
    }

    #[test]
    fn test_pairify_leftovers_become_items() {
        let pairs = pairify(&tokens(&["A=1", "=orphan", "TRAILING"]));
        assert_eq!(pairs["A"], "1");
        assert_eq!(pairs["item_1"], "=orphan");
        assert_eq!(pairs["item_2"], "TRAILING");
    }

    #[test]
    fn test_pairify_empty() {
        assert!(pairify(&[]).is_empty());
    }
}
