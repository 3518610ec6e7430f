use regex::Regex;
use std::sync::LazyLock;

use crate::app::error::ParseError;

/// Difference between the Buddhist calendar year used by the site and the
/// common-era year.
pub const BUDDHIST_YEAR_OFFSET: i32 = 543;

/// Thai month abbreviations as they appear in exam lines.
static MONTH_TO_NUM: LazyLock<Vec<(&'static str, &'static str)>> = LazyLock::new(|| {
    vec![
        ("ม.ค.", "01"),
        ("ก.พ.", "02"),
        ("มี.ค.", "03"),
        ("เม.ย.", "04"),
        ("พ.ค.", "05"),
        ("มิ.ย.", "06"),
        ("ก.ค.", "07"),
        ("ส.ค.", "08"),
        ("ก.ย.", "09"),
        ("ต.ค.", "10"),
        ("พ.ย.", "11"),
        ("ธ.ค.", "12"),
    ]
});

// e.g. "15 ส.ค. 2567 เวลา 13:00-16:00 น."
static EXAM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}) (.+\..+\.) (\d{4}) เวลา (\d{1,2}:\d{2})-(\d{1,2}:\d{2}) น\.$")
        .unwrap()
});

/// Prefix the site prints when an exam date is still to be determined.
const DEFERRED_PREFIX: &str = "TDF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSchedule {
    pub date: String,
    pub start: String,
    pub end: String,
}

fn month_number(abbrev: &str) -> Result<&'static str, ParseError> {
    MONTH_TO_NUM
        .iter()
        .find(|(name, _)| *name == abbrev)
        .map(|(_, num)| *num)
        .ok_or_else(|| ParseError::UnknownMonthAbbreviation(abbrev.to_string()))
}

/// Parses one exam line into an ISO-ordered `YYYY-MM-DD` date plus start and
/// end times. Returns `None` for a deferred ("TDF") exam. `apply_year_offset`
/// converts the Buddhist year to common era; when false the year passes
/// through untouched.
pub fn parse_exam_line(
    line: &str,
    apply_year_offset: bool,
) -> Result<Option<ExamSchedule>, ParseError> {
    if line.starts_with(DEFERRED_PREFIX) {
        return Ok(None);
    }
    let caps = EXAM_LINE
        .captures(line)
        .ok_or_else(|| ParseError::UnexpectedLineShape(line.to_string()))?;
    let day: u32 = caps[1]
        .parse()
        .map_err(|_| ParseError::UnexpectedLineShape(line.to_string()))?;
    let month = month_number(&caps[2])?;
    let mut year: i32 = caps[3]
        .parse()
        .map_err(|_| ParseError::UnexpectedLineShape(line.to_string()))?;
    if apply_year_offset {
        year -= BUDDHIST_YEAR_OFFSET;
    }
    Ok(Some(ExamSchedule {
        date: format!("{year:04}-{month}-{day:02}"),
        start: caps[4].to_string(),
        end: caps[5].to_string(),
    }))
}
