use itertools::Itertools;
use regex::Regex;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::CableError;

/// Length of the longest station name, `BANDARSERIBEGAWAN`.
pub const MAX_ORIGIN_LENGTH: usize = 17;

/// Bounds for the serial part of an identifier, in digits.
pub const MIN_SERIAL_LENGTH: usize = 1;
pub const MAX_SERIAL_LENGTH: usize = 7;

/// Canonical station names, grouped alphabetically in their historical order.
pub const STATIONS: &[&str] = &[
    // A
    "ABIDJAN", "ABUDHABI", "ABUJA", "ACCRA", "ADDISABABA", "AITTAIPEI",
    "ALGIERS", "AMMAN", "AMSTERDAM", "ANKARA", "ASHGABAT", "ASMARA",
    "ASTANA", "ASUNCION", "ATHENS", "ADANA", "ALMATY", "APIA",
    "AUCKLAND", "ANTANANARIVO", "ALEXANDRIA",
    // B
    "BAGHDAD", "BAKU", "BAMAKO", "BANDARSERIBEGAWAN", "BANGKOK", "BANJUL",
    "BARCELONA", "BASRAH", "BEIJING", "BEIRUT", "BELGRADE", "BERLIN",
    "BERN", "BISHKEK", "BOGOTA", "BRASILIA", "BRATISLAVA", "BRIDGETOWN",
    "BRUSSELS", "BUCHAREST", "BUDAPEST", "BUENOSAIRES", "BUJUMBURA", "BRAZZAVILLE",
    "BELIZE", "BELFAST", "BELMOPAN", "BONN", "BANGUI", "BENIN",
    // C
    "CAIRO", "CALCUTTA", "CANBERRA", "CAPETOWN", "CARACAS", "CASABLANCA",
    "CHENNAI", "CHISINAU", "CIUDADJUAREZ", "COLOMBO", "CONAKRY", "COPENHAGEN",
    "CURACAO", "CALGARY", "CHIANGMAI", "CHENGDU", "COTONOU", "CDGENEVA",
    "CDCATLANTAGA", "CHARLESTON", "CDC",
    // D
    "DAKAR", "DAMASCUS", "DARESSALAAM", "DHAKA", "DJIBOUTI", "DOHA",
    "DUBAI", "DUBLIN", "DUSHANBE", "DHAHRAN", "DILI", "DURBAN",
    "DAMASCCUS", "DUSSELDORF", "USDOJ",
    // F
    "FREETOWN", "FUKUOKA", "FSINFATC", "FRANKFURT", "FLORENCE", "FESTTWO",
    // G
    "GABORONE", "GENEVA", "GUATEMALA", "GUADALAJARA", "GUAYAQUIL", "GUANGZHOU",
    "GEORGETOWN", "GRENADA",
    // H
    "HAMBURG", "HANOI", "HARARE", "HAVANA", "HAMILTON", "HELSINKI",
    "HERMOSILLO", "HALIFAX", "HOCHIMINHCITY", "HONGKONG", "HILLAH", "HYDERABAD",
    // I
    "IRANRPODUBAI", "ISLAMABAD", "ISTANBUL", "IZMIR",
    // J
    "JEDDAH", "JERUSALEM", "JAKARTA", "JOHANNESBURG",
    // K
    "KABUL", "KAMPALA", "KATHMANDU", "KHARTOUM", "KIEV", "KIGALI",
    "KINSHASA", "KUALALUMPUR", "KUWAIT", "KYIV", "KOLKATA", "KINGSTON",
    "KARACHI", "KRAKOW", "KOLONIA", "KIRKUK", "KOROR", "KADUNA",
    // L
    "LAGOS", "LAPAZ", "LAHORE", "LILONGWE", "LIMA", "LISBON",
    "LJUBLJANA", "LONDON", "LUANDA", "LUXEMBOURG", "LIBREVILLE", "LUSAKA",
    "LEIPZIG", "LOME",
    // M
    "MALABO", "MADRID", "MANAGUA", "MANAMA", "MAPUTO", "MBABANE",
    "MEXICO", "MILAN", "MINSK", "MONROVIA", "MONTERREY", "MONTEVIDEO",
    "MONTREAL", "MOSCOW", "MUMBAI", "MUNICH", "MUSCAT", "MELBOURNE",
    "MANILA", "MATAMOROS", "MASERU", "MOGADISHU", "MARSEILLE", "MERIDA",
    "MAJURO", "MOSUL", "MONTEREY",
    // N
    "NAIROBI", "NAPLES", "NASSAU", "NEWDELHI", "NIAMEY", "NICOSIA",
    "NDJAMENA", "NAHA", "NUEVOLAREDO", "NAGOYA", "NOUAKCHOTT", "NOGALES",
    // O
    "OSLO", "OTTAWA", "OUAGADOUGOU", "OSAKAKOBE",
    // P
    "PANAMA", "PARAMARIBO", "PARIS", "PARTO", "PESHAWAR", "PHNOMPENH",
    "PORTAUPRINCE", "PRAGUE", "PRETORIA", "PRISTINA", "PORTLOUIS", "PORTOFSPAIN",
    "PODGORICA", "PORTMORESBY", "PERTH", "PONTADELGADA", "PARISFR", "PRAIA",
    // Q
    "QUITO", "QUEBEC",
    // R
    "RABAT", "RANGOON", "RECIFE", "REYKJAVIK", "RIGA", "RIODEJANEIRO",
    "RIYADH", "ROME", "RPODUBAI",
    // S
    "SANAA", "SANJOSE", "SANSALVADOR", "SANTIAGO", "SANTODOMINGO", "SAOPAULO",
    "SARAJEVO", "SEOUL", "SHANGHAI", "SHENYANG", "SINGAPORE", "SKOPJE",
    "SOFIA", "STATE", "STOCKHOLM", "STRASBOURG", "STPETERSBURG", "SUVA",
    "SAPPORO", "SECDEF", "SYDNEY", "SURABAYA",
    // T
    "TALLINN", "TASHKENT", "TAIPEI", "TBILISI", "TEGUCIGALPA", "TEHRAN",
    "TELAVIV", "THEHAGUE", "TIJUANA", "TOKYO", "TRIPOLI", "TUNIS",
    "TORONTO", "THESSALONIKI", "TIRANA",
    // U
    "ULAANBAATAR", "UNVIEVIENNA", "USNATO", "USUNNEWYORK", "USEUBRUSSELS", "USOSCE",
    "UNROME", "USTRGENEVA", "USDAFAS", "USDOC", "USCBP", "UNESCOPARISFR",
    "UNESCOPARIS",
    // V
    "VATICAN", "VIENNA", "VILNIUS", "VLADIVOSTOK", "VALLETTA", "VANCOUVER",
    "VIENTIANE",
    // W
    "WARSAW", "WELLINGTON", "WINDHOEK", "WASHDC", "WHITEHOUSE",
    // Y
    "YAOUNDE", "YEREVAN", "YEKATERINBURG",
    // Z
    "ZAGREB",
];

/// Station names in match precedence: longest first, ties keep vocabulary order.
///
/// Every pattern that matches a station is built from this list, so a name that
/// starts with another (`CDC` / `CDCATLANTAGA`) never loses to its prefix.
pub static STATIONS_BY_PRECEDENCE: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    STATIONS
        .iter()
        .copied()
        .sorted_by_key(|s| Reverse(s.len()))
        .collect()
});

/// `A|B|C` alternation over [`STATIONS_BY_PRECEDENCE`], ready to embed in a regex.
pub fn station_alternation() -> &'static str {
    static ALT: LazyLock<String> = LazyLock::new(|| STATIONS_BY_PRECEDENCE.iter().join("|"));
    &ALT
}

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^([0-9]{{2}})({})([1-9][0-9]{{{},{}}})$",
        station_alternation(),
        MIN_SERIAL_LENGTH - 1,
        MAX_SERIAL_LENGTH - 1
    ))
    .unwrap()
});

/// Returns the interned vocabulary entry equal to `name`.
pub fn station(name: &str) -> Option<&'static str> {
    if name.len() > MAX_ORIGIN_LENGTH {
        return None;
    }
    STATIONS.iter().copied().find(|s| *s == name)
}

pub fn is_station(name: &str) -> bool {
    station(name).is_some()
}

/// A cable identifier, `<yy><STATION><serial>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CableId {
    pub year: u8,
    pub station: &'static str,
    pub serial: u32,
}

impl fmt::Display for CableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}{}", self.year, self.station, self.serial)
    }
}

impl FromStr for CableId {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_identifier(s).ok_or_else(|| CableError::InvalidIdentifier(s.to_string()))
    }
}

/// Parses a whole-string identifier such as `09BERLIN1167`.
pub fn parse_identifier(s: &str) -> Option<CableId> {
    let caps = IDENTIFIER_RE.captures(s)?;
    let year = caps[1].parse().ok()?;
    let station = station(&caps[2])?;
    let serial = caps[3].parse().ok()?;
    Some(CableId {
        year,
        station,
        serial,
    })
}

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s)
}

// ── Tests ──
