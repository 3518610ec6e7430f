//! JavaScript evaluated inside the query page. The site is a frameset;
//! every script reaches into the named frame it needs from the top document
//! (same origin, so this is allowed).

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

fn js_opt_string(value: Option<&str>) -> String {
    match value {
        Some(value) => js_string(value),
        None => "null".to_string(),
    }
}

/// Option values of the faculty dropdown, minus the leading placeholder.
pub const FACULTY_OPTIONS_JS: &str = r#"
    (() => {
        const doc = window.frames['cs_search'].document;
        const options = doc.getElementById('faculty').options;
        return Array.from(options).slice(1).map(option => option.value);
    })()
"#;

/// Fills the search form: program/semester/year/course-type selects plus the
/// course number field. Omitted semester/year keep the site's defaults.
pub fn fill_search_js(
    program: &str,
    semester: Option<&str>,
    year: Option<&str>,
    group_mode: bool,
    term: &str,
) -> String {
    format!(
        r#"
    (() => {{
        const doc = window.frames['cs_search'].document;
        const semester = {semester};
        const year = {year};
        doc.getElementById('studyProgram').value = {program};
        if (semester !== null) doc.getElementById('semester').value = semester;
        if (year !== null) doc.getElementById('acadyearEfd').value = year;
        if ({group_mode}) doc.getElementById('coursetype').value = '2';
        doc.getElementById('courseno').value = {term};
        return true;
    }})()
    "#,
        program = js_string(program),
        semester = js_opt_string(semester),
        year = js_opt_string(year),
        term = js_string(term),
    )
}

pub const CLICK_SUBMIT_JS: &str = r#"
    (() => {
        window.frames['cs_search'].document.getElementsByName('submit')[0].click();
        return true;
    })()
"#;

/// Anchor texts of the result list, or null while `Table4` has not rendered.
pub const RESULT_LINKS_JS: &str = r#"
    (() => {
        const doc = window.frames['cs_left'].document;
        const table = doc.getElementById('Table4');
        if (!table) return null;
        return Array.from(table.getElementsByTagName('a')).map(a => a.innerText.trim());
    })()
"#;

pub fn click_link_js(index: usize) -> String {
    format!(
        r#"
    (() => {{
        const doc = window.frames['cs_left'].document;
        const links = doc.getElementById('Table4').getElementsByTagName('a');
        if ({index} >= links.length) return false;
        links[{index}].click();
        return true;
    }})()
    "#
    )
}

/// The five fixed regions of the course detail form, or null while the form
/// has not rendered. Shapes match `parser::assemble::CourseFragments`.
pub const COURSE_FRAGMENTS_JS: &str = r#"
    (() => {
        const doc = window.frames['cs_right'].document;
        const form = doc.getElementsByTagName('form')[0];
        if (!form) return null;
        const tables = form.getElementsByTagName('table');
        if (tables.length < 5) return null;
        const text = el => el.innerText.trim();
        const nameRows = Array.from(tables[1].rows).slice(3);
        const creditRows = Array.from(tables[2].rows);
        const examFonts = tables[3].getElementsByTagName('font');
        if (nameRows.length < 3 || creditRows.length < 3 || examFonts.length < 4) return null;
        const prereqFonts = creditRows[2].getElementsByTagName('font');
        return {
            name_lines: nameRows.map(text),
            credit_lines: creditRows.slice(0, 2).map(text),
            prerequisite: prereqFonts.length > 1 ? text(prereqFonts[1]) : '-',
            exam_lines: [text(examFonts[1]), text(examFonts[3])],
            table_rows: Array.from(tables[4].rows).slice(2)
                .map(row => Array.from(row.cells).map(text))
        };
    })()
"#;

/// Sub-course rows of a group course, or null while `Table1` has not
/// rendered. The header row is dropped.
pub const GROUP_ROWS_JS: &str = r#"
    (() => {
        const doc = window.frames['cs_right'].document;
        const table = doc.getElementById('Table1');
        if (!table) return null;
        return Array.from(table.rows).slice(1)
            .map(row => Array.from(row.cells).map(cell => cell.innerText.trim()));
    })()
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_search_escapes_values() {
        let js = fill_search_js("S", Some("1"), None, false, "2110");
        assert!(js.contains(r#"doc.getElementById('studyProgram').value = "S";"#));
        assert!(js.contains(r#"const semester = "1";"#));
        assert!(js.contains("const year = null;"));
        assert!(js.contains(r#"doc.getElementById('courseno').value = "2110";"#));
        assert!(js.contains("if (false) doc.getElementById('coursetype')"));
    }

    #[test]
    fn click_link_embeds_index() {
        let js = click_link_js(3);
        assert!(js.contains("links[3].click()"));
        assert!(js.contains("if (3 >= links.length)"));
    }
}
