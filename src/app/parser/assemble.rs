use serde::Deserialize;

use crate::app::error::ParseError;
use crate::app::models::{CourseRecord, GroupCourseRecord, SubCourse};
use crate::app::parser::calendar::{ExamSchedule, parse_exam_line};
use crate::app::parser::normalize::{
    normalize_prerequisite, parse_credit_detail, parse_credit_header, parse_id_and_short_name,
};
use crate::app::parser::table::reconstruct_sections;

/// The five fixed regions of one course detail view, as the driver reads
/// them off the page.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseFragments {
    /// Id+short-name line, Thai name, English name.
    pub name_lines: Vec<String>,
    /// Credit header line, then the detailed-credit line (possibly empty).
    pub credit_lines: Vec<String>,
    pub prerequisite: String,
    /// Mid-term line, then final line.
    pub exam_lines: Vec<String>,
    pub table_rows: Vec<Vec<String>>,
}

/// The flat sub-course table of one group course.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupFragments {
    pub group_course_id: String,
    pub rows: Vec<Vec<String>>,
}

fn line(lines: &[String], index: usize) -> Result<&str, ParseError> {
    lines
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| ParseError::UnexpectedLineShape(format!("missing line {index}")))
}

fn exam_fields(
    schedule: Option<ExamSchedule>,
) -> (Option<String>, Option<String>, Option<String>) {
    match schedule {
        Some(exam) => (Some(exam.date), Some(exam.start), Some(exam.end)),
        None => (None, None, None),
    }
}

/// Builds one course record out of its raw fragments. Any parse failure
/// abandons the whole record; nothing partial escapes.
pub fn assemble_course(
    fragments: &CourseFragments,
    apply_year_offset: bool,
) -> Result<CourseRecord, ParseError> {
    let (course_id, course_short_name) = parse_id_and_short_name(line(&fragments.name_lines, 0)?)?;
    let course_th_name = line(&fragments.name_lines, 1)?.to_string();
    let course_en_name = line(&fragments.name_lines, 2)?.to_string();

    let (credit, credit_type) = parse_credit_header(line(&fragments.credit_lines, 0)?)?;
    let detailed_credit_type = parse_credit_detail(line(&fragments.credit_lines, 1)?)?;
    let prerequisite = normalize_prerequisite(&fragments.prerequisite);

    let (mid_term_date, mid_term_start, mid_term_end) = exam_fields(parse_exam_line(
        line(&fragments.exam_lines, 0)?,
        apply_year_offset,
    )?);
    let (final_date, final_start, final_end) = exam_fields(parse_exam_line(
        line(&fragments.exam_lines, 1)?,
        apply_year_offset,
    )?);

    let sections = reconstruct_sections(&fragments.table_rows)?;

    Ok(CourseRecord {
        course_id,
        course_short_name,
        course_th_name,
        course_en_name,
        credit,
        credit_type,
        detailed_credit_type,
        prerequisite,
        mid_term_date,
        mid_term_start,
        mid_term_end,
        final_date,
        final_start,
        final_end,
        sections,
    })
}

/// Group-course mode: columns 0 and 2 of every row are the sub-course id and
/// section number, kept as source text.
pub fn assemble_group_course(
    fragments: &GroupFragments,
) -> Result<GroupCourseRecord, ParseError> {
    let mut sub_courses = Vec::with_capacity(fragments.rows.len());
    for row in &fragments.rows {
        let cell = |index: usize| {
            row.get(index)
                .cloned()
                .ok_or(ParseError::TruncatedRow {
                    index,
                    width: row.len(),
                })
        };
        sub_courses.push(SubCourse {
            course_id: cell(0)?,
            sect_num: cell(2)?,
        });
    }
    Ok(GroupCourseRecord {
        group_course_id: fragments.group_course_id.clone(),
        sub_courses,
    })
}
