use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Decode numeric character references (`&#8217;`, `&#x2019;`) and the common
/// named entities left over from the HTML conversion.
pub fn decode_entities(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"&#([0-9]+);|&#[xX]([0-9a-fA-F]+);").unwrap());
    if !s.contains('&') {
        return s.to_string();
    }
    let decoded = re.replace_all(s, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
            (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
            _ => None,
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });
    decoded
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace (line breaks included) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Two-digit year of a four-digit year, `"%02d"` style.
pub fn short_year(year: u16) -> u8 {
    (year % 100) as u8
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_references() {
        assert_eq!(decode_entities("NORWAY&#8217;S"), "NORWAY\u{2019}S");
        assert_eq!(decode_entities("&#x201C;X&#x201d;"), "\u{201C}X\u{201D}");
    }

    #[test]
    fn named_references() {
        assert_eq!(decode_entities("R&amp;D &lt;b&gt;"), "R&D <b>");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn invalid_code_point_is_kept() {
        assert_eq!(decode_entities("&#55296;"), "&#55296;");
    }

    #[test]
    fn collapse() {
        assert_eq!(collapse_whitespace("  A \n B\t\tC "), "A B C");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(short_year(2008), 8);
        assert_eq!(short_year(1966), 66);
        assert_eq!(format!("{:02}", short_year(2000)), "00");
    }
}
