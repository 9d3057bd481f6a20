use chrono::NaiveDate;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::utils::{collapse_whitespace, decode_entities};

static DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bDECL(?:ASSIFY)?(?:\s+ON)?\s*:?\s*([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})\b")
        .unwrap()
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*TAGS?\b[ \t]*:?[ \t]*(.*)$").unwrap());

static TAG_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

static SUMMARY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bSUMMARY(?:\s+AND\s+(?:COMMENT|ACTION\s+REQUEST))?\s*(?::|\.|-+)").unwrap()
});

static END_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bEND\s*$").unwrap());

static SUMMARY_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bEND\s+(?:OF\s+)?SUMMARY\b").unwrap());

static NEXT_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*¶?[0-9]{1,2}[ \t]*\.").unwrap());

/// `¶2. (C)` and bare `(SBU)` labels inside a multi-paragraph summary.
static PARAGRAPH_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"¶?[0-9]{1,2}\s*\.\s*\([A-Z/]{1,8}\)\s*|\([A-Z/]{1,8}\)\s*").unwrap()
});

/// `1. (C)`, `¶4. (S//NF)`
static PARAGRAPH_CLASSIFICATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*¶?[0-9]{1,2}\s*\.\s*\(([A-Z]{1,4}(?://?[A-Z]{1,5})*)\)").unwrap()
});

pub(crate) static FIRST_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*¶?1[ \t]*\.(?:[^0-9]|$)").unwrap());

/// `E.O. 12958: DECL: 02/12/2020` -> `2020-02-12`.
///
/// Two-digit years below 50 are taken as 20xx. `OADR` and impossible dates
/// yield `None`.
pub fn parse_nondisclosure_deadline(content: &str) -> Option<String> {
    let caps = DECL.captures(content)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = match caps[3].len() {
        2 => {
            let yy: i32 = caps[3].parse().ok()?;
            if yy < 50 {
                2000 + yy
            } else {
                1900 + yy
            }
        }
        4 => caps[3].parse().ok()?,
        _ => return None,
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// The `TAGS:` line, continued on the next line while it ends with a comma.
pub fn parse_tags(content: &str, reference_id: Option<&str>) -> Vec<String> {
    let Some(caps) = TAGS.captures(content) else {
        debug!(reference_id, "no tags");
        return Vec::new();
    };
    let (Some(first), Some(whole)) = (caps.get(1), caps.get(0)) else {
        return Vec::new();
    };
    let mut text = first.as_str().to_string();
    let mut current = first.as_str();
    for line in content[whole.end()..].lines().skip(1) {
        if !current.trim_end().ends_with(',') {
            break;
        }
        text.push(' ');
        text.push_str(line);
        current = line;
    }
    TAG_SEPARATOR
        .split(&text)
        .map(|t| t.trim_matches(['.', ';', ':']))
        .filter(|t| !t.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Text between `SUMMARY:` and `END SUMMARY`, or up to the next numbered paragraph.
pub fn parse_summary(content: &str, reference_id: Option<&str>) -> Option<String> {
    let start = SUMMARY_START
        .find_iter(content)
        .find(|m| !END_PREFIX.is_match(&content[..m.start()]))?;
    let mut rest = &content[start.end()..];
    if let Some(end) = SUMMARY_END.find(rest) {
        rest = &rest[..end.start()];
    } else if let Some(next) = NEXT_PARAGRAPH.find(rest) {
        rest = &rest[..next.start()];
    }
    let summary = collapse_whitespace(&PARAGRAPH_LABEL.replace_all(rest, " "));
    let summary = decode_entities(&summary);
    if summary.is_empty() {
        debug!(reference_id, "empty summary");
        None
    } else {
        Some(summary)
    }
}

/// Distinct paragraph classifications (`C`, `SBU`, `S//NF`) in order of appearance.
pub fn parse_classification(content: &str) -> Vec<String> {
    PARAGRAPH_CLASSIFICATION
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .unique()
        .collect()
}

/// Splits the content at the first paragraph (`1.` / `¶1.`).
///
/// Without a first paragraph the whole content is body.
pub fn header_body_from_content(content: &str) -> (Option<String>, Option<String>) {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    match FIRST_PARAGRAPH.find(content) {
        Some(m) => (non_empty(&content[..m.start()]), non_empty(&content[m.start()..])),
        None => (None, non_empty(content)),
    }
}

// ── Tests ──
