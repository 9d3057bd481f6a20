//! Exact-match correction tables for document identifiers.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Identifiers whose structure was damaged in transmission (section headers
/// glued into the identifier), mapped to the identifier they stand for.
pub const MALFORMED_CABLE_IDS: &[(&str, &str)] = &[
    ("08SCTION02OF02SAOPAULO335", "08SAOPAULO335"),
    ("09SECTION02OF03QRIPOLI583", "09TRIPOLI583"),
    ("08ECTION01OF02MANAMA492", "08MANAMA492"),
];

/// Identifiers with no structurally derivable form, mapped to the identifier
/// which would be correct.
pub const INVALID_CABLE_IDS: &[(&str, &str)] = &[
    ("09EFTOHELSINKI235", "09HELSINKI235"),
    ("08SECTION01GF02BISHIEK21", "08BISHKEK1021"),
    ("09SECTION01OF03SANJOSE525", "09SANJOSE525"),
    ("07EFTOOTTAWA1217", "07OTTAWA1217"),
    ("06BRAILIA1079", "06BRASILIA1079"),
    ("07BRASIIA1568", "07BRASILIA1568"),
    ("06EFTOSANAA1621", "06SANAA1621"),
    ("08EFTOPHNOMPENH416", "08PHNOMPENH416"),
    ("09EFTOLONDON2468", "09LONDON2468"),
    ("09EFTOLONDON2884", "09LONDON2884"),
    ("09EFTOLONDON2858", "09LONDON2858"),
    ("08EFTOLONDON2883", "08LONDON2883"),
    ("09EFTOLONDON2187", "09LONDON2187"),
    ("10EFTOLONDON16", "10LONDON16"),
    ("09EFTOLONDON2363", "09LONDON2363"),
    ("09EFTOLONDON2618", "09LONDON2618"),
    ("09EFTOLONDON2240", "09LONDON2240"),
    ("09EFTOLONDON2211", "09LONDON2211"),
    ("09EFTOLONDON2521", "09LONDON2521"),
    ("09EFTOLONDON2688", "09LONDON2688"),
    ("09EFTOLONDON2905", "09LONDON2905"),
    ("09EFTOTRIPOLI704", "09TRIPOLI704"),
    ("09EFTOLONDON2239", "09LONDON2239"),
    ("09BAU339", "09BAKU339"),
    ("09EFTOSANAA433", "09SANAA433"),
    ("10EFTOKABUL597", "10KABUL597"),
    ("09SECION02OF02NAIROBI417", "09NAIROBI417"),
    ("08AITTAIPIE1698", "08TAIPEI1698"),
    ("07SECTION02OF03EIJING483", "07BEIJING483"),
    ("09COPENHAEN13", "09COPENHAGEN13"),
    ("09EFTOASMARA34", "09ASMARA34"),
    ("06EFTOUSUNNEWYORK1560", "06USUNNEWYORK1560"),
    ("08EFTOJAKARTA2073", "08JAKARTA2073"),
    ("06EFTOANKARA4972", "06ANKARA4972"),
    ("08SECTIN03OF03KABUL3036", "08KABUL3036"),
    ("07EFTOATHENS404", "07ATHENS404"),
    ("06EFTOANKARA5010", "06ANKARA5010"),
    ("10EFTOKABUL668", "10KABUL668"),
    ("06EFTOKABUL5893", "06KABUL5893"),
    ("08EFTODAMASCUS487", "08DAMASCUS487"),
    ("06EFTOANKARA5097", "06ANKARA5097"),
    ("08SECTIO01OF02JERUSALEM1847", "08JERUSALEM1847"),
    ("07SECTION01OF03ANKARA365", "07ANKARA365"),
    ("07EFTOSANAA2300", "07SANAA2300"),
    ("07EFTOSANAA588", "07SANAA588"),
    ("06EFTOPORTMORESBY350", "06PORTMORESBY350"),
    ("09AMEMBASSYHANOI1292", "09HANOI1292"),
    ("06EFTOCARACAS943", "06CARACAS943"),
    ("06EFTOCARACAS2252", "06CARACAS2252"),
    ("07EFTOSANAA784", "07SANAA784"),
    ("06EFTOSANAA1996", "06SANAA1996"),
    ("08SECTON01OF02BEIRUT896", "08BEIRUT896"),
    ("06EFTOBAKU1165", "06BAKU1165"),
    ("092OF5", "09STATE126780"),
    ("07EFTORABAT521", "07RABAT521"),
    ("08ECTION02OF02ATHENS959", "08ATHENS959"),
    ("09AMEMBASSYHANOI1284", "09HANOI1284"),
    ("06EFTOISLAMABAD17875", "06ISLAMABAD17875"),
    ("09SQCTION02OF02DUSHANBE143", "09DUSHANBE143"),
    ("08THEHAGU799", "08THEHAGUE799"),
    ("08EFTOBUENOSAIRES648", "08BUENOSAIRES648"),
    ("08IHARTOUM1126", "08KHARTOUM1126"),
    ("07QXICO3307", "07MEXICO3307"),
    ("07ANILA1702", "07MANILA1702"),
    ("09GUATEMLA692", "09GUATEMALA692"),
    ("09AMEMBASSYHANOI1234", "09HANOI1234"),
    ("06EFTOATHENS2950", "06ATHENS2950"),
    ("10EFTOLONDON223", "10LONDON223"),
    ("10EFTOBANDARSERIBEGAWAN24", "10BANDARSERIBEGAWAN24"),
    ("10EFTOLONDON224", "10LONDON224"),
    ("06KINSHAA1386", "06KINSHASA1386"),
    ("09EFTOUSUNNEWYORK584", "09USUNNEWYORK584"),
    ("09KINHASA1056", "09KINSHASA1056"),
    ("06MILSK1226", "06MINSK1226"),
    ("06SECTIO03OF03MINSK1128", "06MINSK1128"),
    ("07EFTOBAGHDAD1098", "07BAGHDAD1098"),
    ("07SETION02OF02BAKU1501", "07BAKU1501"),
    ("07SECTON03OF04DAKAR269", "07DAKAR269"),
    ("06EFTOPORTMORESBY194", "06PORTMORESBY194"),
    ("06EFTOPORTMORESBY197", "06PORTMORESBY197"),
    ("06PORTOFPAIN568", "06PORTOFSPAIN568"),
    ("06EFTOATHENS1738", "06ATHENS1738"),
    ("06EFTOBAKU1149", "06BAKU1149"),
    ("07EFTOBUENOSAIRES1049", "07BUENOSAIRES1049"),
    ("09SIFIEDABUJA1673", "09ABUJA1673"),
    ("09SECTIOQ1OF06HARARE876", "09HARARE876"),
    ("07EFTOATHENS781", "07ATHENS781"),
    ("08SECTIN02OF02PORTOFSPAIN546", "08PORTOFSPAIN546"),
    ("09EFTORIYADH1110", "09RIYADH1110"),
    ("07EFTOATHENS543", "07ATHENS543"),
    ("06EFTORABAT1713", "06RABAT1713"),
    ("06EFTOBAKU1420", "06BAKU1420"),
    ("07EFTOUSUNNEWYORK181", "07USUNNEWYORK181"),
    ("06ANOI582", "06HANOI582"),
    ("08INSHASA1164", "08KINSHASA1164"),
    ("07THEHAGE742", "07THEHAGUE742"),
    ("08FSCCHARLESTON1712", "08CHARLESTON1712"),
    ("06EFTORANGOON1092", "06RANGOON1092"),
    ("06SECTIKN01OF03MINSK1223", "06MINSK1223"),
    ("09SECTION02F02BRUSSELS1639", "09BRUSSELS1639"),
    ("06EFTOSKOPJE206", "06SKOPJE206"),
    ("09EFTOYEREVAN678", "09YEREVAN678"),
    ("09SCTION08OF09NAIROBI809", "09NAIROBI809"),
    ("07EFTOBAGHDAD867", "07BAGHDAD867"),
    ("08EFTOUSUNNEWYORK457", "08USUNNEWYORK457"),
    ("09EFTOYEREVAN677", "09YEREVAN677"),
    ("09SECTION0QF05HANOI297", "09HANOI297"),
    ("09EFTOYEREVAN540", "09YEREVAN540"),
    ("07EFTOATHENS174", "07ATHENS174"),
    ("06EFTOPORTMORESBY364", "06PORTMORESBY364"),
    ("07KAPALA518", "07KAMPALA518"),
    ("07EFTORABAT171", "07RABAT171"),
    ("08EFTOMONTEVIDEO541", "08MONTEVIDEO541"),
    ("06NDJAENA1382", "06NDJAMENA1382"),
    ("09AMEMBASSYHANOI1246", "09HANOI1246"),
    ("09NSSAU504", "09NASSAU504"),
    ("09BRUSSLS1332", "09BRUSSELS1332"),
    ("09BRUSELS1292", "09BRUSEELS1292"),
    ("08EFTOMONTEVIDEO718", "08MONTEVIDEO718"),
    ("07EFTOLAPAZ1740", "07LAPAZ1740"),
    ("07EFTOATHENS373", "07ATHENS373"),
    ("09EFTOMONTEVIDEO137", "09MONTEVIDEO137"),
    ("09EFTOYEREVAN559", "09YEREVAN559"),
    ("09NDJAENA423", "09NDJAMENA423"),
    ("08SANODOMINGO1611", "08SANTODOMINGO1611"),
    ("06EFTOSKOPJE971", "06SKOPJE971"),
    ("08SECTON02OF02TIRANA398", "08TIRANA398"),
    ("07EFTOATHENS298", "07ATHENS298"),
    ("07EFTOATHENS299", "07ATHENS299"),
    ("06EFTOBAKU1204", "06BAKU1204"),
    ("09AMEMBASSYHANOI1274", "09HANOI1274"),
    ("06MAILA1222", "06MANILA1222"),
    ("08ACCRA001382SUSPECTEDDUPLICATE1392", "08ACCRA1392"),
    ("07SOIA828", "07SOFIA828"),
    ("10AQNA272", "10ASTANA272"),
    ("06EFTOCAIRO6192", "06CAIRO6192"),
    ("07EFTOBAGHDAD1116", "07BAGHDAD1116"),
    ("07POTAUPRINCE943", "07PORTAUPRINCE943"),
    ("07EFTORABAT264", "07RABAT264"),
    ("08BANGOK1382", "08BANGKOK1382"),
    ("08SECTIN01OF02BUDAPEST836", "08BUDAPEST836"),
    ("09EFTOYEREVAN874", "09YEREVAN874"),
    ("06EFTOMAPUTO981", "06MAPUTO981"),
    ("07BUENOSQRES633", "07BUENOSAIRES633"),
    ("10SECION03OF08VIENNA176", "10VIENNA176"),
    ("09AMEMBASSYHANOI1290", "09HANOI1290"),
    ("06EFTOBRUSSELS3952", "06BRUSSELS3952"),
    ("07GEORGETON514", "07GEORGETOWN514"),
    ("06ATANANARIVO1320", "06ANTANANARIVO1320"),
    ("06EFTOBAKU1453", "06BAKU1453"),
    ("08SANTOOMINGO1959", "08SANTODOMINGO1959"),
    ("09EFTOASMARA373", "09ASMARA373"),
];

/// Invalid-table keys whose serial number is a guess.
pub const LOW_CONFIDENCE_IDS: &[&str] = &["092OF5"];

static MALFORMED: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MALFORMED_CABLE_IDS.iter().copied().collect());

static MALFORMED_REVERSE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MALFORMED_CABLE_IDS.iter().map(|&(k, v)| (v, k)).collect());

static INVALID: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| INVALID_CABLE_IDS.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionKind {
    Unchanged,
    Malformed,
    Invalid,
    /// Best guess; callers should treat the identifier as advisory.
    InvalidLowConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corrected<'a> {
    pub identifier: &'a str,
    pub kind: CorrectionKind,
}

impl Corrected<'_> {
    pub fn is_corrected(&self) -> bool {
        self.kind != CorrectionKind::Unchanged
    }

    pub fn is_low_confidence(&self) -> bool {
        self.kind == CorrectionKind::InvalidLowConfidence
    }
}

/// Looks `raw` up in the malformed table, then the invalid table.
/// A miss returns `raw` unchanged.
pub fn correct_identifier(raw: &str) -> Corrected<'_> {
    if let Some(&fixed) = MALFORMED.get(raw) {
        return Corrected {
            identifier: fixed,
            kind: CorrectionKind::Malformed,
        };
    }
    if let Some(&fixed) = INVALID.get(raw) {
        let kind = if LOW_CONFIDENCE_IDS.iter().any(|k| *k == raw) {
            CorrectionKind::InvalidLowConfidence
        } else {
            CorrectionKind::Invalid
        };
        return Corrected {
            identifier: fixed,
            kind,
        };
    }
    Corrected {
        identifier: raw,
        kind: CorrectionKind::Unchanged,
    }
}

/// Reverse lookup in the malformed table: the identifier legacy links were published under.
pub fn malformed_alias(corrected: &str) -> Option<&'static str> {
    MALFORMED_REVERSE.get(corrected).copied()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::is_identifier;

    #[test]
    fn malformed_forward_lookup() {
        let c = correct_identifier("08SCTION02OF02SAOPAULO335");
        assert_eq!(c.identifier, "08SAOPAULO335");
        assert_eq!(c.kind, CorrectionKind::Malformed);
        assert!(!c.is_low_confidence());
    }

    #[test]
    fn malformed_reverse_lookup() {
        assert_eq!(malformed_alias("09TRIPOLI583"), Some("09SECTION02OF03QRIPOLI583"));
        assert_eq!(malformed_alias("09BERLIN1167"), None);
    }

    #[test]
    fn invalid_lookup() {
        let c = correct_identifier("08BANGOK1382");
        assert_eq!(c.identifier, "08BANGKOK1382");
        assert_eq!(c.kind, CorrectionKind::Invalid);
    }

    #[test]
    fn low_confidence_is_surfaced() {
        let c = correct_identifier("092OF5");
        assert_eq!(c.identifier, "09STATE126780");
        assert!(c.is_corrected());
        assert!(c.is_low_confidence());
    }

    #[test]
    fn unknown_identifier_passes_through() {
        let c = correct_identifier("09BERLIN1167");
        assert_eq!(c.identifier, "09BERLIN1167");
        assert!(!c.is_corrected());
        // exact match only
        assert_eq!(correct_identifier("08bangok1382").identifier, "08bangok1382");
        assert_eq!(correct_identifier(" 08BANGOK1382").identifier, " 08BANGOK1382");
    }

    #[test]
    fn tables_have_unique_keys() {
        assert_eq!(MALFORMED.len(), MALFORMED_CABLE_IDS.len());
        assert_eq!(INVALID.len(), INVALID_CABLE_IDS.len());
        assert!(LOW_CONFIDENCE_IDS.iter().all(|k| INVALID.contains_key(k)));
    }

    #[test]
    fn malformed_targets_are_valid_identifiers() {
        assert!(MALFORMED_CABLE_IDS.iter().all(|(_, v)| is_identifier(v)));
    }
}
