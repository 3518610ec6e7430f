/// What became of one result link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Assembled and appended to the output file.
    Written,
    /// Malformed or timed out; logged and left out of the output.
    Skipped,
}

#[derive(Debug, Default, Clone)]
pub struct ScrapeStats {
    pub written: usize,
    pub skipped: usize,
    /// Search scopes that yielded no results (empty list or no-data modal).
    pub empty_scopes: usize,
}

impl ScrapeStats {
    pub fn add_record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Written => self.written += 1,
            RecordOutcome::Skipped => self.skipped += 1,
        }
    }
}
