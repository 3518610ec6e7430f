use serde::{Deserialize, Serialize};

/// One normalized course, in the exact key order the output file uses.
/// Optional fields serialize as `null` when the source marks them absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: String,
    pub course_short_name: String,
    pub course_th_name: String,
    pub course_en_name: String,
    pub credit: Option<f64>,
    pub credit_type: String,
    pub detailed_credit_type: Option<String>,
    pub prerequisite: Option<String>,
    pub mid_term_date: Option<String>,
    pub mid_term_start: Option<String>,
    pub mid_term_end: Option<String>,
    pub final_date: Option<String>,
    pub final_start: Option<String>,
    pub final_end: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub sect_num: u32,
    /// 1 when the status column is empty (open), 0 when marked closed/full.
    pub sect_status: u8,
    pub registered: u32,
    pub maximum: u32,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// 1-based position within the owning section.
    pub slot_id: u32,
    pub teaching_method: String,
    pub day: String,
    pub time: String,
    pub building: String,
    pub room: String,
    pub teacher: String,
    pub note: Option<String>,
}

/// An umbrella registration unit pointing at several course/section pairs.
/// Sub-course values are kept as the source text, uncoerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCourseRecord {
    pub group_course_id: String,
    pub sub_courses: Vec<SubCourse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCourse {
    pub course_id: String,
    pub sect_num: String,
}
