use crate::app::error::ParseError;
use crate::app::models::{Section, Slot};

/// What one raw row of the schedule table means. Classification is a pure
/// function of the row width; the fold below carries no other state than the
/// section list itself.
#[derive(Debug)]
enum RowKind {
    /// Width 10: opens a new section and carries that section's first slot.
    NewSection {
        sect_num: u32,
        sect_status: u8,
        registered: u32,
        maximum: u32,
    },
    /// Width 8: the two leading section columns are missing, so the slot
    /// columns of this row sit one position to the left.
    ContinuationShifted,
    /// Any other width: plain continuation row, no column shift.
    Continuation,
}

impl RowKind {
    fn classify(row: &[String]) -> Result<Self, ParseError> {
        match row.len() {
            10 => {
                let sect_num = cell(row, 1)?
                    .parse()
                    .map_err(|_| ParseError::BadSectionRow(format!("sect_num {:?}", row[1])))?;
                let sect_status = if cell(row, 0)?.is_empty() { 1 } else { 0 };
                let (registered, maximum) = parse_capacity(cell(row, 9)?)?;
                Ok(RowKind::NewSection {
                    sect_num,
                    sect_status,
                    registered,
                    maximum,
                })
            }
            8 => Ok(RowKind::ContinuationShifted),
            _ => Ok(RowKind::Continuation),
        }
    }

    fn column_offset(&self) -> isize {
        match self {
            RowKind::ContinuationShifted => -1,
            _ => 0,
        }
    }
}

/// Folds the flat row list into sections, each with its ordered slots.
pub fn reconstruct_sections(rows: &[Vec<String>]) -> Result<Vec<Section>, ParseError> {
    let mut sections: Vec<Section> = Vec::new();
    for row in rows {
        let kind = RowKind::classify(row)?;
        let offset = kind.column_offset();
        if let RowKind::NewSection {
            sect_num,
            sect_status,
            registered,
            maximum,
        } = kind
        {
            sections.push(Section {
                sect_num,
                sect_status,
                registered,
                maximum,
                slots: Vec::new(),
            });
        }
        let current = sections.last_mut().ok_or(ParseError::SlotBeforeSection)?;
        let slot = read_slot(row, offset, current.slots.len() as u32 + 1)?;
        current.slots.push(slot);
    }
    Ok(sections)
}

/// Splits the `registered/maximum` cell into its two counts.
fn parse_capacity(cell: &str) -> Result<(u32, u32), ParseError> {
    let (registered, maximum) = cell
        .split_once('/')
        .ok_or_else(|| ParseError::BadSectionRow(format!("capacity {cell:?}")))?;
    let parse = |half: &str| {
        half.trim()
            .parse()
            .map_err(|_| ParseError::BadSectionRow(format!("capacity {cell:?}")))
    };
    Ok((parse(registered)?, parse(maximum)?))
}

/// The six slot columns plus the note column, at their offset-adjusted
/// positions.
fn read_slot(row: &[String], offset: isize, slot_id: u32) -> Result<Slot, ParseError> {
    let col = |index: isize| cell(row, (index + offset) as usize);
    let note = col(8)?;
    Ok(Slot {
        slot_id,
        teaching_method: col(2)?.to_string(),
        day: col(3)?.to_string(),
        time: col(4)?.to_string(),
        building: col(5)?.to_string(),
        room: col(6)?.to_string(),
        teacher: col(7)?.to_string(),
        note: if note.is_empty() {
            None
        } else {
            Some(note.to_string())
        },
    })
}

fn cell(row: &[String], index: usize) -> Result<&str, ParseError> {
    row.get(index)
        .map(String::as_str)
        .ok_or(ParseError::TruncatedRow {
            index,
            width: row.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn section_row(sect_num: &str, capacity: &str) -> Vec<String> {
        row(&[
            "", sect_num, "LECT", "MO", "9:00-10:00", "ENG", "101", "JOHN", "", capacity,
        ])
    }

    #[test]
    fn mixed_width_rows_build_two_sections() {
        let rows = vec![
            section_row("1", "10/40"),
            // width 8: slot columns shifted one to the left
            row(&["", "LAB", "TU", "13:00-16:00", "ENG", "205", "JANE", "lab group A"]),
            section_row("2", "5/30"),
            // width 10 continuation: no new section, offset 0
            row(&["", "", "LECT", "WE", "9:00-10:00", "ENG", "101", "JOHN", "", ""]),
        ];
        let sections = reconstruct_sections(&rows).unwrap();
        assert_eq!(sections.len(), 2);

        let first = &sections[0];
        assert_eq!(first.sect_num, 1);
        assert_eq!(first.sect_status, 1);
        assert_eq!((first.registered, first.maximum), (10, 40));
        assert_eq!(first.slots.len(), 2);
        // Shifted row: teaching method comes from column 1, not 2.
        assert_eq!(first.slots[1].teaching_method, "LAB");
        assert_eq!(first.slots[1].day, "TU");
        assert_eq!(first.slots[1].note.as_deref(), Some("lab group A"));
        assert_eq!(first.slots[1].slot_id, 2);

        let second = &sections[1];
        assert_eq!(second.sect_num, 2);
        assert_eq!(second.slots.len(), 2);
        assert_eq!(second.slots[0].slot_id, 1);
        assert_eq!(second.slots[1].slot_id, 2);
    }

    #[test]
    fn shift_applies_to_one_row_only() {
        let rows = vec![
            section_row("1", "0/25"),
            row(&["", "LECT", "TU", "10:00-11:00", "ENG", "101", "JOHN", ""]),
            row(&["", "", "LECT", "TH", "10:00-11:00", "ENG", "101", "JOHN", "", ""]),
        ];
        let sections = reconstruct_sections(&rows).unwrap();
        assert_eq!(sections[0].slots.len(), 3);
        assert_eq!(sections[0].slots[1].teaching_method, "LECT");
        assert_eq!(sections[0].slots[1].day, "TU");
        assert_eq!(sections[0].slots[2].day, "TH");
    }

    #[test]
    fn closed_section_status_is_zero() {
        let mut closed = section_row("1", "40/40");
        closed[0] = "CLOSED".to_string();
        let sections = reconstruct_sections(&[closed]).unwrap();
        assert_eq!(sections[0].sect_status, 0);
    }

    #[test]
    fn empty_note_is_absent() {
        let sections = reconstruct_sections(&[section_row("1", "1/2")]).unwrap();
        assert_eq!(sections[0].slots[0].note, None);
        let mut with_note = section_row("1", "1/2");
        with_note[8] = "by appointment".to_string();
        let sections = reconstruct_sections(&[with_note]).unwrap();
        assert_eq!(
            sections[0].slots[0].note.as_deref(),
            Some("by appointment")
        );
    }

    #[test]
    fn slot_before_section_is_rejected() {
        let rows = vec![row(&[
            "LECT", "MO", "9:00", "ENG", "101", "JOHN", "", "x",
        ])];
        assert!(matches!(
            reconstruct_sections(&rows),
            Err(ParseError::SlotBeforeSection)
        ));
    }

    #[test]
    fn malformed_capacity_is_rejected() {
        assert!(matches!(
            reconstruct_sections(&[section_row("1", "lots")]),
            Err(ParseError::BadSectionRow(_))
        ));
    }

    #[test]
    fn truncated_continuation_row_is_rejected() {
        let rows = vec![
            section_row("1", "1/2"),
            row(&["", "", "LECT", "MO"]),
        ];
        assert!(matches!(
            reconstruct_sections(&rows),
            Err(ParseError::TruncatedRow { .. })
        ));
    }
}
