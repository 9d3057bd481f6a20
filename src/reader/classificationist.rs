use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)classified\s+by\b:?").unwrap());

static INITIALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]\.)+$").unwrap());

/// Role words which precede the name (`Acting Deputy Chief of Mission ...`).
const TITLE_WORDS: &[&str] = &[
    "acting", "deputy", "chief", "of", "mission", "ambassador", "political", "economic",
    "counselor", "minister", "dcm", "poloff", "econoff", "charge", "d'affaires", "cda",
    "principal", "officer", "assistant", "secretary", "consul", "general", "the",
];

const STOP_WORDS: &[&str] = &["for", "-", "reason", "reasons"];

/// Bylines that cite an authority instead of a person (`SECTION 1.5`, `E.O. 12958`).
const NON_NAME_HEADS: &[&str] = &["section", "sec", "sect", "e.o.", "eo", "executive", "order"];

/// Returns the name of the official who classified the cable.
///
/// `CLASSIFIED BY SECTION 1.5 (B)` and other bylines without a personal name
/// yield `None`. With `normalize` set an all-caps name is title-cased.
pub fn parse_classificationist(content: &str, normalize: bool) -> Option<String> {
    let marker = MARKER.find(content)?;
    let tokens: Vec<&str> = content[marker.end()..].split_whitespace().collect();

    let mut name: Vec<String> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let lower = token.to_lowercase();
        if name.is_empty() {
            if TITLE_WORDS.contains(&lower.as_str()) || token.contains('/') || token == "-" {
                i += 1;
                continue;
            }
            // AMBASSADOR TO SUDAN
            if lower == "to" {
                i += 2;
                continue;
            }
            let head = lower.trim_end_matches([',', ';', ':']);
            if NON_NAME_HEADS.iter().any(|h| *h == head) {
                return None;
            }
        }
        if STOP_WORDS.contains(&lower.as_str()) || token.chars().any(|c| c.is_ascii_digit()) {
            break;
        }
        if let Some(stripped) = token.strip_suffix([',', ';', ':']) {
            let mut last = stripped.to_string();
            if let Some(suffix) = tokens.get(i + 1).and_then(|t| name_suffix(t)) {
                last.push_str(", ");
                last.push_str(&suffix);
            }
            name.push(last);
            break;
        }
        if let Some(stripped) = token.strip_suffix('.') {
            if !INITIALS.is_match(token) {
                name.push(stripped.to_string());
                break;
            }
        }
        name.push(token.to_string());
        i += 1;
    }

    if name.is_empty() {
        return None;
    }
    let name = name.join(" ");
    if normalize && name.to_uppercase() == name {
        Some(title_case(&name))
    } else {
        Some(name)
    }
}

/// `JR.`/`SR.` following the surname, uppercased.
fn name_suffix(token: &str) -> Option<String> {
    let bare = token.trim_end_matches([',', '.', ';', ':']).to_uppercase();
    if bare == "JR" || bare == "SR" {
        Some(token.trim_end_matches([',', ';', ':']).to_uppercase())
    } else {
        None
    }
}

/// Uppercase letters that follow a non-letter, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}

// ── Tests ──
