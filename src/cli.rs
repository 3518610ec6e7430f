use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

use crate::app::error::ScrapeError;

#[derive(Parser, Debug)]
#[command(about = "A tool for scraping course information from reg.chula.ac.th")]
#[command(group(ArgGroup::new("scope").required(true).args(["id", "all"])))]
pub struct Args {
    /// Course IDs or prefixes to scrape, each 2 to 7 characters long
    #[arg(short, long, num_args = 1..)]
    pub id: Vec<String>,

    /// Scrape every available course
    #[arg(short, long)]
    pub all: bool,

    /// Study program
    #[arg(short, long, value_enum, default_value_t = StudyProgram::Bisemester)]
    pub program: StudyProgram,

    /// Semester override; the site's current semester when omitted
    #[arg(short, long, value_parser = ["1", "2", "3"])]
    pub semester: Option<String>,

    /// Academic year override; the site's current year when omitted
    #[arg(short, long)]
    pub year: Option<String>,

    /// Restrict an --all run to these two-digit faculty codes
    #[arg(short, long, num_args = 1.., conflicts_with = "id")]
    pub faculty: Vec<String>,

    /// Scrape group courses instead of normal courses
    #[arg(short, long)]
    pub group_courses: bool,

    /// Run the browser with its GUI visible
    #[arg(long)]
    pub gui: bool,

    /// Output file
    #[arg(short, long, default_value = "regchula_courses.json")]
    pub output: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyProgram {
    /// Bisemester
    #[value(name = "S")]
    Bisemester,
    /// Trisemester
    #[value(name = "T")]
    Trisemester,
    /// International
    #[value(name = "I")]
    International,
}

impl StudyProgram {
    pub fn code(self) -> &'static str {
        match self {
            StudyProgram::Bisemester => "S",
            StudyProgram::Trisemester => "T",
            StudyProgram::International => "I",
        }
    }
}

/// Which query values get cycled through the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSelection {
    Ids(Vec<String>),
    Faculties(Vec<String>),
    All,
}

#[derive(Debug, Clone)]
pub struct ScrapePlan {
    pub scopes: ScopeSelection,
    pub program: StudyProgram,
    pub semester: Option<String>,
    pub year: Option<String>,
    pub group_courses: bool,
    pub headless: bool,
    pub output: PathBuf,
}

impl Args {
    /// Validates everything that can be checked before the browser starts.
    pub fn into_plan(self) -> Result<ScrapePlan, ScrapeError> {
        for id in &self.id {
            if !(2..=7).contains(&id.chars().count()) {
                return Err(ScrapeError::Configuration(format!(
                    "{id}: course IDs must have length between 2 and 7"
                )));
            }
        }
        for code in &self.faculty {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(ScrapeError::Configuration(format!(
                    "{code}: faculty codes are two digits"
                )));
            }
        }
        let scopes = if !self.id.is_empty() {
            ScopeSelection::Ids(self.id)
        } else if !self.faculty.is_empty() {
            ScopeSelection::Faculties(self.faculty)
        } else {
            ScopeSelection::All
        };
        Ok(ScrapePlan {
            scopes,
            program: self.program,
            semester: self.semester,
            year: self.year,
            group_courses: self.group_courses,
            headless: !self.gui,
            output: self.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("regchula_scraper").chain(args.iter().copied()))
    }

    #[test]
    fn requires_id_or_all() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--all"]).is_ok());
        assert!(parse(&["--id", "2110"]).is_ok());
        assert!(parse(&["--all", "--id", "2110"]).is_err());
    }

    #[test]
    fn default_values() {
        let args = parse(&["--all"]).unwrap();
        assert_eq!(args.program, StudyProgram::Bisemester);
        assert_eq!(args.output, PathBuf::from("regchula_courses.json"));
        assert!(!args.gui);
        let plan = args.into_plan().unwrap();
        assert!(plan.headless);
        assert_eq!(plan.scopes, ScopeSelection::All);
    }

    #[test]
    fn id_length_is_validated() {
        let too_short = parse(&["--id", "2"]).unwrap().into_plan();
        assert!(matches!(too_short, Err(ScrapeError::Configuration(_))));
        let too_long = parse(&["--id", "21101011"]).unwrap().into_plan();
        assert!(too_long.is_err());
        let ok = parse(&["--id", "21", "2110101"]).unwrap().into_plan().unwrap();
        assert_eq!(
            ok.scopes,
            ScopeSelection::Ids(vec!["21".to_string(), "2110101".to_string()])
        );
    }

    #[test]
    fn faculty_codes_are_two_digits() {
        let bad = parse(&["--all", "--faculty", "2x"]).unwrap().into_plan();
        assert!(matches!(bad, Err(ScrapeError::Configuration(_))));
        let ok = parse(&["--all", "--faculty", "21", "33"])
            .unwrap()
            .into_plan()
            .unwrap();
        assert_eq!(
            ok.scopes,
            ScopeSelection::Faculties(vec!["21".to_string(), "33".to_string()])
        );
    }

    #[test]
    fn semester_values_are_restricted() {
        assert!(parse(&["--all", "--semester", "2"]).is_ok());
        assert!(parse(&["--all", "--semester", "4"]).is_err());
    }

    #[test]
    fn program_uses_single_letter_names() {
        let args = parse(&["--all", "--program", "T"]).unwrap();
        assert_eq!(args.program, StudyProgram::Trisemester);
        assert_eq!(args.program.code(), "T");
    }
}
