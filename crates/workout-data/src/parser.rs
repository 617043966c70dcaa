//! Set-line parsing.
//!
//! Two line shapes are recognised:
//!
//! * `Set N : W kg x R` – a weighted set, load `W` kg for `R` reps.
//! * `Set N : R reps` – a bodyweight set, loaded with the caller's bodyweight.
//!
//! Each shape is matched by one anchored regular expression; numeric tokens
//! are captured loosely and parsed afterwards so that a bad number is
//! reported as such rather than as an unknown shape.

use std::sync::OnceLock;

use regex::Regex;
use workout_core::error::LineError;
use workout_core::models::ParsedSet;

const WEIGHTED_KIND: &str = "weighted";
const BODYWEIGHT_KIND: &str = "bodyweight";

fn weighted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Set\s*(?P<num>\d+)?[^:]*:\s*(?P<weight>\S+)\s+kg\s+x\s+(?P<reps>\S+)\s*$")
            .expect("regex is valid")
    })
}

fn bodyweight_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Set\s*(?P<num>\d+)?[^:]*\s:\s+(?P<reps>\S+)\s+reps\s*$")
            .expect("regex is valid")
    })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Whether a raw line is a set line the session extractor should parse.
///
/// The line must start with `Set` (no leading whitespace) and mention either
/// `kg` or `reps`.
pub fn is_set_line(line: &str) -> bool {
    line.starts_with("Set") && (line.contains("kg") || line.contains("reps"))
}

/// Parse one set line.
///
/// A line mentioning `kg` is parsed as a weighted set; otherwise a line
/// mentioning `reps` is parsed as a bodyweight set loaded with `bodyweight`.
/// The bodyweight branch is only taken when `reps` is present.
pub fn parse_set_line(line: &str, bodyweight: f64) -> Result<ParsedSet, LineError> {
    if line.contains("kg") {
        parse_weighted(line)
    } else if line.contains("reps") {
        parse_bodyweight(line, bodyweight)
    } else {
        Err(LineError::UnrecognizedShape)
    }
}

/// Volume (`weight * reps`) of a single weighted set line.
///
/// ```
/// use workout_data::parser::weighted_set_volume;
///
/// assert_eq!(weighted_set_volume("Set 3 : 30 kg x 14").unwrap(), 420.0);
/// assert!(weighted_set_volume("Set 3 : 12 reps").is_err());
/// ```
pub fn weighted_set_volume(line: &str) -> Result<f64, LineError> {
    parse_weighted(line).map(|set| set.volume)
}

// ── Line shapes ───────────────────────────────────────────────────────────────

fn parse_weighted(line: &str) -> Result<ParsedSet, LineError> {
    require_delimiter(line, WEIGHTED_KIND, " x ")?;
    require_delimiter(line, WEIGHTED_KIND, ":")?;

    let caps = weighted_re()
        .captures(line.trim_end())
        .ok_or(LineError::UnrecognizedShape)?;

    let weight = parse_weight(&caps["weight"])?;
    let reps = parse_reps(&caps["reps"])?;
    let declared = caps.name("num").and_then(|m| m.as_str().parse().ok());

    Ok(ParsedSet::weighted(declared, weight, reps))
}

fn parse_bodyweight(line: &str, bodyweight: f64) -> Result<ParsedSet, LineError> {
    require_delimiter(line, BODYWEIGHT_KIND, " : ")?;

    let caps = bodyweight_re()
        .captures(line.trim_end())
        .ok_or(LineError::UnrecognizedShape)?;

    let reps = parse_reps(&caps["reps"])?;
    let declared = caps.name("num").and_then(|m| m.as_str().parse().ok());

    Ok(ParsedSet::bodyweight(declared, bodyweight, reps))
}

// ── Token helpers ─────────────────────────────────────────────────────────────

fn require_delimiter(
    line: &str,
    kind: &'static str,
    delimiter: &'static str,
) -> Result<(), LineError> {
    if line.contains(delimiter) {
        Ok(())
    } else {
        Err(LineError::MissingDelimiter { kind, delimiter })
    }
}

fn parse_weight(token: &str) -> Result<f64, LineError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| LineError::InvalidNumber {
            field: "weight",
            token: token.to_string(),
        })
}

fn parse_reps(token: &str) -> Result<u32, LineError> {
    token.parse::<u32>().map_err(|_| LineError::InvalidNumber {
        field: "reps",
        token: token.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use workout_core::models::SetKind;

    // ── weighted sets ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_weighted_basic() {
        let set = parse_set_line("Set 1 : 40 kg x 10", 80.0).unwrap();
        assert_eq!(set.kind, SetKind::Weighted);
        assert_eq!(set.declared_number, Some(1));
        assert_eq!(set.weight, 40.0);
        assert_eq!(set.reps, 10);
        assert_eq!(set.volume, 400.0);
    }

    #[test]
    fn test_parse_weighted_decimal_weight_and_trailing_whitespace() {
        let set = parse_set_line("Set 4 : 22.5 kg x 12  \r", 80.0).unwrap();
        assert_eq!(set.weight, 22.5);
        assert_eq!(set.reps, 12);
        assert_eq!(set.volume, 270.0);
    }

    #[test]
    fn test_parse_weighted_ignores_bodyweight() {
        let set = parse_set_line("Set 2 : 42 kg x 8", 95.0).unwrap();
        assert_eq!(set.weight, 42.0);
        assert_eq!(set.volume, 336.0);
    }

    #[test]
    fn test_parse_weighted_missing_x_delimiter() {
        let err = parse_set_line("Set 1 : 40 kg 10", 80.0).unwrap_err();
        assert_eq!(
            err,
            LineError::MissingDelimiter {
                kind: "weighted",
                delimiter: " x "
            }
        );
    }

    #[test]
    fn test_parse_weighted_missing_colon() {
        let err = parse_set_line("Set 1 40 kg x 10", 80.0).unwrap_err();
        assert_eq!(
            err,
            LineError::MissingDelimiter {
                kind: "weighted",
                delimiter: ":"
            }
        );
    }

    #[test]
    fn test_parse_weighted_invalid_weight() {
        let err = parse_set_line("Set 1 : forty kg x 10", 80.0).unwrap_err();
        assert_eq!(
            err,
            LineError::InvalidNumber {
                field: "weight",
                token: "forty".to_string()
            }
        );
    }

    #[test]
    fn test_parse_weighted_rejects_non_finite_weight() {
        assert!(parse_set_line("Set 1 : inf kg x 10", 80.0).is_err());
        assert!(parse_set_line("Set 1 : NaN kg x 10", 80.0).is_err());
    }

    #[test]
    fn test_parse_weighted_invalid_reps() {
        let err = parse_set_line("Set 1 : 40 kg x ten", 80.0).unwrap_err();
        assert_eq!(
            err,
            LineError::InvalidNumber {
                field: "reps",
                token: "ten".to_string()
            }
        );
    }

    #[test]
    fn test_parse_weighted_trailing_text_is_rejected() {
        assert!(parse_set_line("Set 1 : 40 kg x 10 (warmup)", 80.0).is_err());
    }

    #[test]
    fn test_parse_weighted_non_numeric_set_label() {
        let set = parse_set_line("Set A : 40 kg x 10", 80.0).unwrap();
        assert_eq!(set.declared_number, None);
        assert_eq!(set.volume, 400.0);
    }

    // ── bodyweight sets ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_bodyweight_basic() {
        let set = parse_set_line("Set 1 : 12 reps", 80.0).unwrap();
        assert_eq!(set.kind, SetKind::Bodyweight);
        assert_eq!(set.weight, 80.0);
        assert_eq!(set.reps, 12);
        assert_eq!(set.volume, 960.0);
    }

    #[test]
    fn test_parse_bodyweight_uses_supplied_bodyweight() {
        let set = parse_set_line("Set 3 : 5 reps", 72.5).unwrap();
        assert_eq!(set.weight, 72.5);
        assert_eq!(set.volume, 362.5);
    }

    #[test]
    fn test_parse_bodyweight_missing_spaced_colon() {
        let err = parse_set_line("Set 1: 12 reps", 80.0).unwrap_err();
        assert_eq!(
            err,
            LineError::MissingDelimiter {
                kind: "bodyweight",
                delimiter: " : "
            }
        );
    }

    #[test]
    fn test_parse_bodyweight_invalid_reps() {
        let err = parse_set_line("Set 1 : many reps", 80.0).unwrap_err();
        assert!(matches!(err, LineError::InvalidNumber { field: "reps", .. }));
    }

    // ── unrecognised lines ────────────────────────────────────────────────────

    #[test]
    fn test_parse_line_without_kg_or_reps_is_an_error() {
        let err = parse_set_line("Set 1 : 40 x 10", 80.0).unwrap_err();
        assert_eq!(err, LineError::UnrecognizedShape);
    }

    #[test]
    fn test_is_set_line() {
        assert!(is_set_line("Set 1 : 40 kg x 10"));
        assert!(is_set_line("Set 1 : 12 reps"));
        assert!(!is_set_line("Set 1 : 40 x 10"));
        assert!(!is_set_line("  Set 1 : 40 kg x 10"));
        assert!(!is_set_line("Bench Press (Barbell)"));
    }

    // ── weighted_set_volume ───────────────────────────────────────────────────

    #[test]
    fn test_weighted_set_volume() {
        assert_eq!(weighted_set_volume("Set 1 : 40 kg x 9").unwrap(), 360.0);
    }

    #[test]
    fn test_weighted_set_volume_rejects_bodyweight_line() {
        let err = weighted_set_volume("Set 1 : 12 reps").unwrap_err();
        assert!(matches!(err, LineError::MissingDelimiter { .. }));
    }
}
