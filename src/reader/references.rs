use regex::{Match, Regex};
use std::sync::LazyLock;
use tracing::{debug, trace};

use crate::stations::{station, station_alternation, CableId, MAX_SERIAL_LENGTH};
use crate::utils::short_year;

static REF_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)REF(?:TELS?|S)?\b(?:\(S\))?\s*:?").unwrap());

static CLASSIFIED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)classified\s+by").unwrap());

static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*¶?[0-9]{1,2}\.").unwrap());

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n\s*").unwrap());

/// What a blank line inside the block must be followed by for the list to go on.
static CONTINUES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:¶?\(?[A-Za-z][.):]|[0-9])").unwrap());

/// `ROME 00012 002.2 OF 004` section headers repeated on every page.
static PAGE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]+\s+0[0-9]+\s+[0-9]+(?:\.[0-9]+)?\s+OF\s+[0-9]+").unwrap()
});

static APOSTROPHE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"['’]").unwrap());

/// Multi-word and alias spellings folded to a vocabulary entry, applied in order.
static SYNONYMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bSECSTATE\b", "STATE"),
        (r"\bTHE\s+HAGUE\b", "THEHAGUE"),
        (r"\bSAO\s+PAULO\b", "SAOPAULO"),
        (r"\bRIO(?:\s+DE\s+JAN(?:EIRO)?)?\b", "RIODEJANEIRO"),
        (r"\bLA\s+PAZ\b", "LAPAZ"),
        (r"\bPORT[\s-]+AU[\s-]+PRINCE\b", "PORTAUPRINCE"),
        (r"\bPORT[\s-]+OF[\s-]+SPAIN\b", "PORTOFSPAIN"),
        (r"\b(?:US)?UNESCO\s*PARIS\s*FR\b|\bPARIS\s+FR\b", "UNESCOPARISFR"),
        (r"\bUNVIE(?:\s+VIENNA)?\b", "UNVIEVIENNA"),
    ]
    .into_iter()
    .map(|(pattern, canonical)| (Regex::new(pattern).unwrap(), canonical))
    .collect()
});

/// `(A)`, `¶(B)`, `C)` enumeration labels.
static PAREN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"¶?\([A-Z]\)|\b[A-Z]\)").unwrap());

/// Semicolons and `A.`, `B:`, `¶C.` labels separate entries.
static ENTRY_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";|(?:^|\s)¶?[A-Z][.:](?:\s|$)").unwrap());

/// `[year] STATION serial [(yy)]`
static REF_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\b((?:19|20)[0-9]{{2}}|0[0-9]{{2}}|[0-9]{{2}})\s+)?\b({})\s+([0-9]+)\b(?:\s*\(([0-9]{{2}})\))?",
        station_alternation()
    ))
    .unwrap()
});

static AND_SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+AND\s+([0-9]+)\b").unwrap());

static STATION_AHEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s+(?:{})\b", station_alternation())).unwrap());

static BARE_SERIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:((?:19|20)[0-9]{2}|0[0-9]{2}|[0-9]{2})\s+)?([0-9]+)$").unwrap()
});

/// Parses the references to other cables out of `content`.
///
/// `year` is the four-digit year of the citing cable; references without an
/// explicit year inherit it. The result keeps document order and duplicates.
/// Anything that does not look like a cable reference (e-mails, report
/// numbers, phone calls) is dropped silently.
pub fn parse_references(content: &str, year: u16, reference_id: Option<&str>) -> Vec<String> {
    let Some(marker) = find_marker(content) else {
        return Vec::new();
    };
    let rest = &content[marker.end()..];
    let block = normalize_block(&rest[..block_end(rest)]);
    let default_year = short_year(year);

    let mut refs = Vec::new();
    let mut last_station: Option<&'static str> = None;
    for entry in ENTRY_SPLIT.split(&block) {
        let mut found = false;
        for caps in REF_IN_TEXT.captures_iter(entry) {
            let Some(station) = station(&caps[2]) else {
                continue;
            };
            let year_token = caps.get(1).or_else(|| caps.get(4)).map(|m| m.as_str());
            let yy = resolve_year(year_token, default_year);
            let Some(serial) = parse_serial(&caps[3]) else {
                trace!(reference_id, entry, "discarded serial");
                continue;
            };
            refs.push(CableId { year: yy, station, serial }.to_string());
            last_station = Some(station);
            found = true;

            // `BRASILIA 2799 AND 2764`
            let mut pos = caps.get(0).map_or(entry.len(), |m| m.end());
            while let Some(and) = AND_SERIAL.captures(&entry[pos..]) {
                let end = pos + and.get(0).map_or(0, |m| m.end());
                if STATION_AHEAD.is_match(&entry[end..]) {
                    break;
                }
                if let Some(serial) = parse_serial(&and[1]) {
                    refs.push(CableId { year: yy, station, serial }.to_string());
                }
                pos = end;
            }
        }
        if found {
            continue;
        }
        match (last_station, BARE_SERIAL.captures(entry.trim())) {
            (Some(station), Some(caps)) => {
                let yy = resolve_year(caps.get(1).map(|m| m.as_str()), default_year);
                if let Some(serial) = parse_serial(&caps[2]) {
                    refs.push(CableId { year: yy, station, serial }.to_string());
                }
            }
            _ => trace!(reference_id, entry = entry.trim(), "not a cable reference"),
        }
    }
    debug!(reference_id, count = refs.len(), "parsed references");
    refs
}

/// First marker that opens a line or carries a colon; a prose `REF` such as
/// `TERMS OF REF` in the subject only counts when nothing better follows.
fn find_marker(content: &str) -> Option<Match<'_>> {
    let mut markers = REF_MARKER.find_iter(content);
    let first = markers.next()?;
    let opens_block = |m: &Match<'_>| {
        let line_start = content[..m.start()].rfind('\n').map_or(0, |i| i + 1);
        m.as_str().trim_end().ends_with(':') || content[line_start..m.start()].trim().is_empty()
    };
    if opens_block(&first) {
        return Some(first);
    }
    markers.find(|m| opens_block(m)).or(Some(first))
}

/// End of the reference block, relative to the text following the marker.
fn block_end(text: &str) -> usize {
    let mut end = text.len();
    if let Some(m) = CLASSIFIED_BY.find(text) {
        end = end.min(m.start());
    }
    if let Some(m) = PARAGRAPH.find(text) {
        end = end.min(m.start());
    }
    for blank in BLANK_LINE.find_iter(text) {
        if blank.start() >= end {
            break;
        }
        if !CONTINUES.is_match(&text[blank.end()..]) {
            end = blank.start();
            break;
        }
    }
    end
}

fn normalize_block(block: &str) -> String {
    let upper = block.to_uppercase();
    let text = PAGE_BREAK.replace_all(&upper, " ");
    let mut text = APOSTROPHE.replace_all(&text, "").into_owned();
    for (re, canonical) in SYNONYMS.iter() {
        text = re.replace_all(&text, *canonical).into_owned();
    }
    PAREN_LABEL.replace_all(&text, " ").into_owned()
}

/// `2008` -> 8, `08` -> 8, absent -> the citing cable's year.
///
/// A three-digit token such as `094` loses its leading zero. That is not a
/// calendar year, but it is how such references have always been resolved.
fn resolve_year(token: Option<&str>, default: u8) -> u8 {
    let digits = match token {
        Some(t) if t.len() == 4 => &t[2..],
        Some(t) if t.len() == 3 => &t[1..],
        Some(t) => t,
        None => return default,
    };
    digits.parse().unwrap_or(default)
}

/// Serial without leading zeros; all-zero or overlong serials are rejected.
fn parse_serial(token: &str) -> Option<u32> {
    let digits = token.trim_start_matches('0');
    if digits.is_empty() || digits.len() > MAX_SERIAL_LENGTH {
        return None;
    }
    digits.parse().ok()
}

// ── Tests ──
