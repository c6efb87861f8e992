// src/clock/abbrev.rs

use super::{Instant, NameStyle, ZoneFormatter, ZoneId};
use log::debug;

/// Display label such as "IST (GMT+5:30)" for `zone` at `instant`.
///
/// Display-only: an unresolvable zone yields an empty string.
pub fn zone_abbreviation<F: ZoneFormatter + ?Sized>(
    formatter: &F,
    instant: Instant,
    zone: &ZoneId,
) -> String {
    let (short, offset) = match (
        formatter.format_name(instant, zone, NameStyle::Short),
        formatter.format_name(instant, zone, NameStyle::ShortOffset),
    ) {
        (Ok(short), Ok(offset)) => (short, offset),
        (Err(e), _) | (_, Err(e)) => {
            debug!("No abbreviation for {}: {}", zone, e);
            return String::new();
        }
    };

    let abbrev = if is_numeric_offset(&short) {
        formatter
            .format_name(instant, zone, NameStyle::Long)
            .ok()
            .and_then(|long| acronym(&long))
    } else {
        Some(short)
    };

    match abbrev {
        Some(a) if a == offset => a,
        Some(a) => format!("{a} ({offset})"),
        None => offset,
    }
}

/// Matches `GMT±H[:MM]` and `UTC±H[:MM]`.
fn is_numeric_offset(name: &str) -> bool {
    let Some(rest) = name
        .strip_prefix("GMT")
        .or_else(|| name.strip_prefix("UTC"))
    else {
        return false;
    };
    let Some(rest) = rest
        .strip_prefix('+')
        .or_else(|| rest.strip_prefix('-'))
        .or_else(|| rest.strip_prefix('\u{2212}'))
    else {
        return false;
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (rest, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    (1..=2).contains(&hours.len())
        && digits(hours)
        && minutes.map_or(true, |m| m.len() == 2 && digits(m))
}

/// "India Standard Time" -> "IST". Only 2-5 letter results are accepted,
/// and a long name that is itself an offset ("GMT+03:00") yields nothing.
fn acronym(long_name: &str) -> Option<String> {
    if long_name.starts_with("GMT") || long_name.starts_with("UTC") {
        return None;
    }
    let letters: String = long_name.chars().filter(|c| c.is_uppercase()).collect();
    (2..=5)
        .contains(&letters.chars().count())
        .then_some(letters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::testing::FixedFormatter;
    use crate::clock::TzFormatter;
    use chrono::{TimeZone, Utc};

    fn jan() -> Instant {
        Instant::from(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).single().unwrap())
    }

    #[test]
    fn kolkata_gets_acronym_and_offset() {
        let label = zone_abbreviation(&TzFormatter::new(), jan(), &"Asia/Kolkata".into());
        assert_eq!(label, "IST (GMT+5:30)");
    }

    #[test]
    fn acronym_synthesized_from_long_name() {
        let f = FixedFormatter::new().zone("Asia/Kolkata", 330, "GMT+5:30", "India Standard Time");
        let label = zone_abbreviation(&f, jan(), &"Asia/Kolkata".into());
        assert_eq!(label, "IST (GMT+5:30)");
    }

    #[test]
    fn overlong_acronym_falls_back_to_offset() {
        let f = FixedFormatter::new().zone(
            "Fake/Long",
            180,
            "GMT+3",
            "Very Long Winded Regional Standard Time",
        );
        assert_eq!(zone_abbreviation(&f, jan(), &"Fake/Long".into()), "GMT+3");
    }

    #[test]
    fn offset_shaped_long_name_is_not_an_acronym() {
        let label = zone_abbreviation(&TzFormatter::new(), jan(), &"Asia/Dubai".into());
        assert_eq!(label, "GMT+4");
    }

    #[test]
    fn abbreviation_equal_to_offset_is_not_repeated() {
        let label = zone_abbreviation(&TzFormatter::new(), jan(), &"Europe/London".into());
        assert_eq!(label, "GMT");
    }

    #[test]
    fn letter_abbreviation_used_directly() {
        let label = zone_abbreviation(&TzFormatter::new(), jan(), &"America/New_York".into());
        assert_eq!(label, "EST (GMT-5)");
    }

    #[test]
    fn unknown_zone_yields_empty_label() {
        assert_eq!(zone_abbreviation(&TzFormatter::new(), jan(), &"Nope/Nope".into()), "");
    }

    #[test]
    fn numeric_offset_pattern() {
        assert!(is_numeric_offset("GMT+5:30"));
        assert!(is_numeric_offset("UTC-10"));
        assert!(is_numeric_offset("GMT\u{2212}3"));
        assert!(!is_numeric_offset("GMT"));
        assert!(!is_numeric_offset("IST"));
        assert!(!is_numeric_offset("GMT+530"));
        assert!(!is_numeric_offset("GMT+5:3"));
    }
}
