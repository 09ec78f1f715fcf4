//! Free-text ingredient line parsing for quick-add and pasted imports.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ParsedLine;

// Unit tokens are a run of letters (accented Latin included) plus the
// abbreviation marks used in recipe shorthand ("g.", "°", "º", "ª").
static AMOUNT_UNIT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)\s+([\p{L}.°ºª]+)\s+(\S.*)$").unwrap());

static AMOUNT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:[.,]\d+)?)\s+(\S.*)$").unwrap());

/// Parse one ingredient line into an amount/unit/name triple.
///
/// A leading bullet marker (`-`, `*`, `•`) and surrounding whitespace are
/// stripped first; an empty remainder yields `None` and the caller skips the
/// line. Three interpretations are tried in order, each more permissive than
/// the last:
///
/// 1. amount + unit + name — `"200 g farinha"`
/// 2. amount + name — `"3 ovos"`
/// 3. name only — `"sal a gosto"`
///
/// The decimal separator may be written as a comma or a dot. Units are
/// lowercased as extracted; there is no alias table and no known-units check.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut cleaned = line.trim();
    for marker in ["-", "*", "•"] {
        if let Some(rest) = cleaned.strip_prefix(marker) {
            cleaned = rest.trim_start();
            break;
        }
    }
    if cleaned.is_empty() {
        return None;
    }

    if let Some(caps) = AMOUNT_UNIT_NAME.captures(cleaned) {
        // A numeric group that fails conversion falls through to the next
        // pattern rather than erroring.
        if let Some(amount) = parse_amount(&caps[1]) {
            return Some(ParsedLine {
                amount: Some(amount),
                unit: Some(caps[2].to_lowercase()),
                name: caps[3].trim().to_string(),
            });
        }
    }

    if let Some(caps) = AMOUNT_NAME.captures(cleaned) {
        if let Some(amount) = parse_amount(&caps[1]) {
            return Some(ParsedLine {
                amount: Some(amount),
                unit: None,
                name: caps[2].trim().to_string(),
            });
        }
    }

    Some(ParsedLine {
        amount: None,
        unit: None,
        name: cleaned.to_string(),
    })
}

/// Parse a pasted block line by line, skipping lines that yield no result.
pub fn parse_lines(text: &str) -> Vec<ParsedLine> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(amount: Option<f64>, unit: Option<&str>, name: &str) -> ParsedLine {
        ParsedLine {
            amount,
            unit: unit.map(str::to_string),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_amount_unit_name() {
        assert_eq!(
            parse_line("200 g farinha"),
            Some(parsed(Some(200.0), Some("g"), "farinha"))
        );
    }

    #[test]
    fn test_amount_without_unit() {
        assert_eq!(parse_line("3 ovos"), Some(parsed(Some(3.0), None, "ovos")));
    }

    #[test]
    fn test_name_only_fallback() {
        assert_eq!(
            parse_line("sal a gosto"),
            Some(parsed(None, None, "sal a gosto"))
        );
    }

    #[test]
    fn test_bullet_markers_are_stripped() {
        let plain = parse_line("1 xíc leite");
        assert_eq!(parse_line("- 1 xíc leite"), plain);
        assert_eq!(parse_line("* 1 xíc leite"), plain);
        assert_eq!(parse_line("• 1 xíc leite"), plain);
        assert_eq!(plain, Some(parsed(Some(1.0), Some("xíc"), "leite")));
    }

    #[test]
    fn test_empty_lines_yield_nothing() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("-   "), None);
        assert_eq!(parse_line("*"), None);
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(
            parse_line("1,5 kg batata"),
            Some(parsed(Some(1.5), Some("kg"), "batata"))
        );
    }

    #[test]
    fn test_decimal_dot() {
        assert_eq!(
            parse_line("0.5 l caldo de legumes"),
            Some(parsed(Some(0.5), Some("l"), "caldo de legumes"))
        );
    }

    #[test]
    fn test_unit_is_lowercased() {
        assert_eq!(
            parse_line("250 ML creme de leite"),
            Some(parsed(Some(250.0), Some("ml"), "creme de leite"))
        );
    }

    #[test]
    fn test_unit_abbreviation_punctuation() {
        assert_eq!(
            parse_line("2 colh. sopa de azeite"),
            Some(parsed(Some(2.0), Some("colh."), "sopa de azeite"))
        );
    }

    // Any word after the number is taken as the unit when more words follow;
    // everything after it lands in the name.
    #[test]
    fn test_word_after_amount_becomes_unit() {
        assert_eq!(
            parse_line("2 ovos caipiras grandes"),
            Some(parsed(Some(2.0), Some("ovos"), "caipiras grandes"))
        );
    }

    #[test]
    fn test_two_tokens_put_word_in_name() {
        assert_eq!(parse_line("200 g"), Some(parsed(Some(200.0), None, "g")));
    }

    #[test]
    fn test_double_decimal_falls_back_to_name() {
        assert_eq!(
            parse_line("1.5.2 fermento"),
            Some(parsed(None, None, "1.5.2 fermento"))
        );
    }

    #[test]
    fn test_parse_lines_skips_blanks() {
        let text = "- 200 g farinha\n\n   \n3 ovos\n- \nsal a gosto";
        let lines = parse_lines(text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].name, "farinha");
        assert_eq!(lines[1].name, "ovos");
        assert_eq!(lines[2].name, "sal a gosto");
    }
}
