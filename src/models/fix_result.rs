use super::Diagnostic;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of handling one diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixOutcome {
    /// A fixer edited the file
    Success,
    /// A fixer claimed the diagnostic but could not fix it, or none claimed it
    Failure,
    /// Policy said to leave it alone
    Ignored,
    /// Policy said to surface it without fixing
    Reported,
}

impl FixOutcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            FixOutcome::Success => "✅",
            FixOutcome::Failure => "❌",
            FixOutcome::Ignored => "⏭️ ",
            FixOutcome::Reported => "📋",
        }
    }
}

/// Result of a single fix attempt
#[derive(Debug, Clone, Serialize)]
pub struct FixResult {
    pub diagnostic: Diagnostic,
    pub outcome: FixOutcome,
    /// File content after the attempt (unchanged unless `outcome` is `Success`)
    #[serde(skip)]
    pub content: String,
    /// What was done, or why nothing was
    pub description: String,
    /// Individual edits, one line each
    pub changes: Vec<String>,
}

impl FixResult {
    pub fn success(
        diagnostic: Diagnostic,
        content: impl Into<String>,
        description: impl Into<String>,
        changes: Vec<String>,
    ) -> Self {
        Self {
            diagnostic,
            outcome: FixOutcome::Success,
            content: content.into(),
            description: description.into(),
            changes,
        }
    }

    pub fn failure(
        diagnostic: Diagnostic,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::unchanged(diagnostic, FixOutcome::Failure, content, reason)
    }

    pub fn ignored(diagnostic: Diagnostic, content: impl Into<String>) -> Self {
        Self::unchanged(diagnostic, FixOutcome::Ignored, content, "Ignored by policy")
    }

    pub fn reported(diagnostic: Diagnostic, content: impl Into<String>) -> Self {
        Self::unchanged(diagnostic, FixOutcome::Reported, content, "Reported by policy")
    }

    fn unchanged(
        diagnostic: Diagnostic,
        outcome: FixOutcome,
        content: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            diagnostic,
            outcome,
            content: content.into(),
            description: description.into(),
            changes: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == FixOutcome::Success
    }
}

/// Everything that happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileFixReport {
    pub file: PathBuf,
    /// Diagnostics for this file, in input order
    pub diagnostics: Vec<Diagnostic>,
    /// Results in processing order
    pub fix_results: Vec<FixResult>,
    #[serde(skip)]
    pub original_content: String,
    #[serde(skip)]
    pub final_content: String,
    pub fixed_count: usize,
    pub unfixed_diagnostics: Vec<Diagnostic>,
}

impl FileFixReport {
    pub fn new(file: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>, content: String) -> Self {
        Self {
            file: file.into(),
            diagnostics,
            fix_results: Vec::new(),
            final_content: content.clone(),
            original_content: content,
            fixed_count: 0,
            unfixed_diagnostics: Vec::new(),
        }
    }

    /// Record a result; a success becomes the new running content
    pub fn record(&mut self, result: FixResult) {
        if result.is_success() {
            self.final_content = result.content.clone();
            self.fixed_count += 1;
        }
        self.fix_results.push(result);
    }

    /// Collect unfixed diagnostics from the recorded results
    pub fn finish(mut self) -> Self {
        self.unfixed_diagnostics = self
            .fix_results
            .iter()
            .filter(|result| !result.is_success())
            .map(|result| result.diagnostic.clone())
            .collect();
        self
    }

    pub fn has_changes(&self) -> bool {
        self.final_content != self.original_content
    }

    pub fn count(&self, outcome: FixOutcome) -> usize {
        self.fix_results
            .iter()
            .filter(|result| result.outcome == outcome)
            .count()
    }
}

/// Result of a whole batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub reports: Vec<FileFixReport>,
    /// Files named by diagnostics that could not be read
    pub missing_files: Vec<PathBuf>,
}

/// Aggregate counters over a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixStatistics {
    pub total_files: usize,
    pub files_with_changes: usize,
    pub missing_files: usize,
    pub total_diagnostics: usize,
    pub fixed: usize,
    pub ignored: usize,
    pub reported: usize,
    pub failed: usize,
}

impl FixStatistics {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        let reports = &outcome.reports;
        Self {
            total_files: reports.len(),
            files_with_changes: reports.iter().filter(|r| r.has_changes()).count(),
            missing_files: outcome.missing_files.len(),
            total_diagnostics: reports.iter().map(|r| r.diagnostics.len()).sum(),
            fixed: reports.iter().map(|r| r.count(FixOutcome::Success)).sum(),
            ignored: reports.iter().map(|r| r.count(FixOutcome::Ignored)).sum(),
            reported: reports.iter().map(|r| r.count(FixOutcome::Reported)).sum(),
            failed: reports.iter().map(|r| r.count(FixOutcome::Failure)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(line: usize) -> Diagnostic {
        Diagnostic::new("a.php", line, format!("issue {}", line))
    }

    #[test]
    fn test_report_threads_successful_content() {
        let mut report = FileFixReport::new("a.php", vec![diag(1), diag(2), diag(3)], "v0".into());

        report.record(FixResult::success(diag(3), "v1", "first", vec![]));
        report.record(FixResult::failure(diag(2), "v1", "nope"));
        report.record(FixResult::ignored(diag(1), "v0"));
        let report = report.finish();

        assert_eq!(report.final_content, "v1");
        assert_eq!(report.original_content, "v0");
        assert_eq!(report.fixed_count, 1);
        assert!(report.has_changes());
        assert_eq!(report.unfixed_diagnostics, vec![diag(2), diag(1)]);
    }

    #[test]
    fn test_statistics_fold() {
        let mut changed = FileFixReport::new("a.php", vec![diag(1), diag(2)], "x".into());
        changed.record(FixResult::success(diag(2), "y", "done", vec![]));
        changed.record(FixResult::reported(diag(1), "y"));

        let mut untouched = FileFixReport::new("b.php", vec![diag(5), diag(6)], "z".into());
        untouched.record(FixResult::ignored(diag(5), "z"));
        untouched.record(FixResult::failure(diag(6), "z", "no fixer"));

        let outcome = BatchOutcome {
            reports: vec![changed.finish(), untouched.finish()],
            missing_files: vec![PathBuf::from("gone.php")],
        };
        let stats = FixStatistics::from_outcome(&outcome);

        assert_eq!(
            stats,
            FixStatistics {
                total_files: 2,
                files_with_changes: 1,
                missing_files: 1,
                total_diagnostics: 4,
                fixed: 1,
                ignored: 1,
                reported: 1,
                failed: 1,
            }
        );
    }
}
