use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static TRANSMISSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"VZCZC[A-Z0-9]+").unwrap());

/// `[ROUTE/]NAME [PRECEDENCE] [MCN]`
static RECIPIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([A-Z0-9]+)/)?(.+?)(?:\s+(FLASH|NIACT\s+IMMEDIATE|IMMEDIATE|PRIORITY|ROUTINE))?(?:\s+([0-9]{1,6}))?$",
    )
    .unwrap()
});

/// An addressee from the `TO` or `INFO` block of the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub route: Option<String>,
    pub name: String,
    pub precedence: Option<String>,
    pub mcn: Option<String>,
}

pub fn parse_transmission_id(header: &str, reference_id: Option<&str>) -> Option<String> {
    let tid = TRANSMISSION_ID.find(header).map(|m| m.as_str().to_string());
    if tid.is_none() {
        debug!(reference_id, "no transmission id");
    }
    tid
}

/// Recipients listed after `TO`, up to the `INFO` block.
pub fn parse_recipients(header: &str, reference_id: Option<&str>) -> Vec<Recipient> {
    let recipients = parse_block(header, "TO", &["INFO", "BT"]);
    if recipients.is_empty() {
        debug!(reference_id, "no recipients");
    }
    recipients
}

/// Recipients listed after `INFO`.
pub fn parse_info_recipients(header: &str, reference_id: Option<&str>) -> Vec<Recipient> {
    let recipients = parse_block(header, "INFO", &["BT"]);
    if recipients.is_empty() {
        debug!(reference_id, "no info recipients");
    }
    recipients
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_block(header: &str, keyword: &str, stops: &[&str]) -> Vec<Recipient> {
    let mut lines = header.lines().map(str::trim);
    let Some(first) = lines.by_ref().find_map(|l| strip_keyword(l, keyword)) else {
        return Vec::new();
    };
    std::iter::once(first)
        .chain(lines.take_while(|l| {
            !l.is_empty() && !stops.iter().any(|stop| strip_keyword(l, stop).is_some())
        }))
        .filter_map(parse_recipient)
        .collect()
}

fn parse_recipient(line: &str) -> Option<Recipient> {
    if line.is_empty() {
        return None;
    }
    let caps = RECIPIENT.captures(line)?;
    let text = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    Some(Recipient {
        route: text(1),
        name: caps[2].trim().to_string(),
        precedence: text(3).map(|p| p.split_whitespace().collect::<Vec<_>>().join(" ")),
        mcn: text(4),
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "VZCZCXRO2216
OO RUEHCN RUEHGH
DE RUEHKO #0397/01 0430931
ZNY CCCCC ZZH
O 120931Z FEB 10
FM AMEMBASSY TOKYO
TO RUEHC/SECSTATE WASHDC IMMEDIATE 9220
RUEHBJ/AMEMBASSY BEIJING PRIORITY 8177
INFO RUEHUL/AMEMBASSY SEOUL PRIORITY 1234
RUEKJCS/SECDEF WASHDC PRIORITY
RHHMUNA/CDR USPACOM HONOLULU HI NIACT IMMEDIATE
BT
";

    #[test]
    fn transmission_id() {
        assert_eq!(parse_transmission_id(HEADER, None).as_deref(), Some("VZCZCXRO2216"));
        assert_eq!(parse_transmission_id("FM AMEMBASSY TOKYO", None), None);
    }

    #[test]
    fn to_block() {
        let r = parse_recipients(HEADER, Some("10TOKYO397"));
        assert_eq!(r.len(), 2);
        assert_eq!(r[0].route.as_deref(), Some("RUEHC"));
        assert_eq!(r[0].name, "SECSTATE WASHDC");
        assert_eq!(r[0].precedence.as_deref(), Some("IMMEDIATE"));
        assert_eq!(r[0].mcn.as_deref(), Some("9220"));
        assert_eq!(r[1].name, "AMEMBASSY BEIJING");
    }

    #[test]
    fn info_block() {
        let r = parse_info_recipients(HEADER, None);
        let names: Vec<&str> = r.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, ["AMEMBASSY SEOUL", "SECDEF WASHDC", "CDR USPACOM HONOLULU HI"]);
        assert_eq!(r[1].mcn, None);
        assert_eq!(r[2].precedence.as_deref(), Some("NIACT IMMEDIATE"));
    }

    #[test]
    fn recipient_without_route() {
        let r = parse_recipients("FM AMEMBASSY ROME\nTO SECSTATE WASHDC 4321\n", None);
        assert_eq!(
            r,
            [Recipient {
                route: None,
                name: "SECSTATE WASHDC".into(),
                precedence: None,
                mcn: Some("4321".into()),
            }]
        );
    }

    #[test]
    fn missing_blocks() {
        assert!(parse_recipients("", None).is_empty());
        assert!(parse_info_recipients("TO SECSTATE WASHDC\nBT", None).is_empty());
        // TOKYO is not a TO line
        assert!(parse_recipients("TOKYO 123", None).is_empty());
    }
}
