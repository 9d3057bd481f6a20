use regex::{Match, Regex};
use std::sync::LazyLock;

use super::content::FIRST_PARAGRAPH;
use crate::utils::{collapse_whitespace, decode_entities};

/// `SUBJECT:`, `SUBJ:`, and `UBJECT:` where the first letter got lost.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:SUBJECT|SUBJ|UBJECT)[ \t]*:").unwrap());

/// `SUBJECT` without colon at the start of a line.
static BARE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*SUBJECT\b").unwrap());

static SUBJECT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \t]*LINE\b").unwrap());

static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        &[
            r"\n[ \t]*\n",
            r"(?i:\bREF(?:TELS?|S)?\b)",
            r"(?i:REF(?:TELS?|S)?(?:\(S\))?[ \t]*:)",
            r"(?i:classified\s+by)",
            r"\n[ \t]*¶?[0-9]{1,2}[ \t]*\.",
            r"\n[ \t]*-{3,}",
            r"\b[A-Z]+\s+0[0-9]{3,}\s+[0-9]+(?:\.[0-9]+)?\s+OF\s+[0-9]+",
            r"\n[ \t]*PAGE\s+[0-9]+",
            // C O N F I D E N T I A L
            r"\b(?:[A-Za-z] ){4,}[A-Za-z]\b",
            r"(?i:\bSENSI?TIVE\s+BUT\b)",
            r"(?i:\n[ \t]*THIS\s+(?:IS\s+AN\s+ACTION\s+REQUEST|MESSAGE)\b)",
        ]
        .join("|"),
    )
    .unwrap()
});

/// `(C)`, `(SBU)`, `(S/NF)`
static CLASSIFICATION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([A-Z]{1,4}(?:/[A-Z]{1,4})*\)\s*").unwrap());

/// Last marker before the first numbered paragraph; quoted e-mails in the
/// body carry their own `Subject:` lines.
fn find_marker(content: &str) -> Option<Match<'_>> {
    let content = match FIRST_PARAGRAPH.find(content) {
        Some(p) => &content[..p.start()],
        None => content,
    };
    let mut last = MARKER
        .find_iter(content)
        .filter(|m| !content[..m.start()].ends_with('('))
        .last();
    for m in BARE_MARKER.find_iter(content) {
        if SUBJECT_LINE.is_match(&content[m.end()..]) {
            continue;
        }
        if last.map_or(true, |l| m.start() > l.start()) {
            last = Some(m);
        }
    }
    last
}

/// Returns the subject of the cable, or an empty string if there is none.
///
/// With `clean` set a leading paragraph classification like `(C)` is removed.
pub fn parse_subject(content: &str, clean: bool) -> String {
    let Some(marker) = find_marker(content) else {
        return String::new();
    };
    let mut rest = content[marker.end()..].trim_start();
    if let Some(b) = BOUNDARY.find(rest) {
        rest = &rest[..b.start()];
    }
    let subject = decode_entities(&collapse_whitespace(rest));
    let subject = subject.trim();
    if clean {
        CLASSIFICATION_PREFIX.replace(subject, "").trim().to_string()
    } else {
        subject.to_string()
    }
}

// ── Tests ──
