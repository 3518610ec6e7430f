use regex::Regex;
use std::sync::LazyLock;

use crate::app::error::ParseError;

static ID_AND_SHORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{7})  (.+)$").unwrap());
static CREDIT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.[05]|-) CREDIT HOURS = (.+)$").unwrap());
static BARE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(.+\)$").unwrap());
static PREFIXED_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((.+)\)  (.+)$").unwrap());

/// First line of the name block: `<7-digit id><two spaces><short name>`.
pub fn parse_id_and_short_name(line: &str) -> Result<(String, String), ParseError> {
    let caps = ID_AND_SHORT_NAME
        .captures(line)
        .ok_or_else(|| ParseError::UnexpectedLineShape(line.to_string()))?;
    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Credit header: `<N.0|N.5|-> CREDIT HOURS = <type>`. A dash means the
/// credit amount is not applicable; `(S/U)` collapses to `S/U`.
pub fn parse_credit_header(line: &str) -> Result<(Option<f64>, String), ParseError> {
    let caps = CREDIT_HEADER
        .captures(line)
        .ok_or_else(|| ParseError::UnexpectedLineShape(line.to_string()))?;
    let credit = match &caps[1] {
        "-" => None,
        amount => Some(
            amount
                .parse::<f64>()
                .map_err(|_| ParseError::UnexpectedLineShape(line.to_string()))?,
        ),
    };
    // The page pads the type half with a second space.
    let mut credit_type = caps[2].trim().to_string();
    if credit_type == "(S/U)" {
        credit_type = "S/U".to_string();
    }
    Ok((credit, credit_type))
}

/// Detailed credit line. Empty means absent; a bare parenthetical is
/// unwrapped; a parenthetical prefix plus trailing text becomes
/// `<prefix> (<text>)`.
pub fn parse_credit_detail(line: &str) -> Result<Option<String>, ParseError> {
    if line.is_empty() {
        return Ok(None);
    }
    if BARE_PARENTHETICAL.is_match(line) {
        return Ok(Some(line[1..line.len() - 1].to_string()));
    }
    let caps = PREFIXED_PARENTHETICAL
        .captures(line)
        .ok_or_else(|| ParseError::UnexpectedLineShape(line.to_string()))?;
    Ok(Some(format!("{} ({})", &caps[1], &caps[2])))
}

/// The page uses a lone dash as the "no prerequisite" placeholder.
pub fn normalize_prerequisite(text: &str) -> Option<String> {
    let text = text.trim();
    if text == "-" {
        None
    } else {
        Some(text.to_string())
    }
}
