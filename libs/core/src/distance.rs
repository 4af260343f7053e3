use lazy_static::lazy_static;
use regex::Regex;

use crate::command::{Distance, UnitCode};

lazy_static! {
    // Longer unit tokens first so "mi" is not consumed as "m".
    static ref DISTANCE_REGEX: Regex =
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(km|км|mi|ft|m|м)\b").unwrap();
}

/// Extracts a distance from navigation notification text, in metres.
///
/// Notifications phrase the remaining distance in the user's locale ("400 m",
/// "1.2 km", "0,3 км", "500 ft", "0.5 mi"); the first recognizable quantity
/// wins. Returns `None` when the text contains no distance.
///
/// # Examples
///
/// ```
/// use navhud_core::parse_distance;
///
/// assert_eq!(Some(400), parse_distance("In 400 m, turn left"));
/// assert_eq!(Some(1200), parse_distance("1.2 km"));
/// assert_eq!(Some(805), parse_distance("0.5 mi"));
/// assert_eq!(None, parse_distance("Turn left"));
/// ```
pub fn parse_distance(text: &str) -> Option<u32> {
    let captures = DISTANCE_REGEX.captures(text)?;
    let value: f32 = captures[1].replace(',', ".").parse().ok()?;
    let factor = match captures[2].to_lowercase().as_str() {
        "km" | "км" => 1000.0,
        "mi" => 1609.34,
        "ft" => 0.3048,
        _ => 1.0,
    };
    Some((value * factor).round() as u32)
}

/// Converts a distance in metres to the value and unit shown on the display.
///
/// Under a kilometre the distance is shown in whole metres. From one kilometre
/// up it switches to kilometres with one decimal place, dropping the decimal
/// once it stops fitting at ten kilometres.
///
/// # Examples
///
/// ```
/// use navhud_core::{format_distance, Distance, UnitCode};
///
/// assert_eq!((Distance::Whole(400), UnitCode::METRES), format_distance(400));
/// assert_eq!((Distance::Decimal(1.2), UnitCode::KILOMETRES), format_distance(1250));
/// assert_eq!((Distance::Whole(12), UnitCode::KILOMETRES), format_distance(12_800));
/// ```
pub fn format_distance(metres: u32) -> (Distance, UnitCode) {
    if metres < 1000 {
        return (Distance::Whole(metres), UnitCode::METRES);
    }

    let tenths = metres / 100;
    if tenths >= 100 {
        (Distance::Whole(tenths / 10), UnitCode::KILOMETRES)
    } else {
        (Distance::Decimal(tenths as f32 / 10.0), UnitCode::KILOMETRES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("400 m", Some(400); "metres with space")]
    #[test_case("400m", Some(400); "metres without space")]
    #[test_case("1.2 km", Some(1200); "decimal kilometres")]
    #[test_case("1,2 km", Some(1200); "comma decimal separator")]
    #[test_case("2 KM", Some(2000); "case insensitive")]
    #[test_case("300 м", Some(300); "cyrillic metres")]
    #[test_case("0,4 км", Some(400); "cyrillic kilometres")]
    #[test_case("0.5 mi", Some(805); "miles")]
    #[test_case("1 mi", Some(1609); "whole mile")]
    #[test_case("500 ft", Some(152); "feet")]
    #[test_case("In 400 m, turn left onto Main St", Some(400); "embedded in sentence")]
    #[test_case("Turn left", None; "no distance")]
    #[test_case("", None; "empty")]
    fn parses_notification_text(text: &str, expected: Option<u32>) {
        assert_eq!(expected, parse_distance(text));
    }

    #[test]
    fn mi_is_not_mistaken_for_metres() {
        assert_eq!(Some(3219), parse_distance("2 mi"));
    }

    #[test_case(0, Distance::Whole(0), UnitCode::METRES; "zero")]
    #[test_case(999, Distance::Whole(999), UnitCode::METRES; "just under a kilometre")]
    #[test_case(1000, Distance::Decimal(1.0), UnitCode::KILOMETRES; "exactly one kilometre")]
    #[test_case(1250, Distance::Decimal(1.2), UnitCode::KILOMETRES; "truncates to tenths")]
    #[test_case(9999, Distance::Decimal(9.9), UnitCode::KILOMETRES; "just under ten kilometres")]
    #[test_case(10_000, Distance::Whole(10), UnitCode::KILOMETRES; "ten kilometres drops decimal")]
    #[test_case(12_800, Distance::Whole(12), UnitCode::KILOMETRES; "truncates whole kilometres")]
    fn formats_for_display(metres: u32, value: Distance, unit: UnitCode) {
        assert_eq!((value, unit), format_distance(metres));
    }
}
