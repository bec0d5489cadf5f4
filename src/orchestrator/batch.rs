//! Batch fixing across a whole PHPStan report
//!
//! Diagnostics are grouped per file and fixed bottom-up. Every insertion
//! shifts the lines below it, so handling the highest line first keeps the
//! recorded line of each pending diagnostic valid. A fix that lands above
//! its own line (a docblock over the declaration) shifts the pending lines
//! at or below the edit by the same amount. Edits within one file are
//! threaded: each fix sees the content left by the previous one.

use crate::fixers::Registry;
use crate::models::{BatchOutcome, Diagnostic, FileFixReport, FixResult};
use crate::policy::{PolicyAction, PolicyResolver};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `(processed_so_far, total_attemptable, current_file)`
///
/// Called once a file has been processed, so the first call reports 1.
pub type ProgressCallback<'p> = dyn FnMut(usize, usize, &Path) + 'p;

/// Applies policy and dispatches diagnostics file by file
///
/// Reads files but never writes them; persistence belongs to the caller.
pub struct BatchFixer<'a> {
    registry: &'a Registry,
    policy: &'a PolicyResolver,
    project_root: PathBuf,
}

impl<'a> BatchFixer<'a> {
    pub fn new(
        registry: &'a Registry,
        policy: &'a PolicyResolver,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            policy,
            project_root: project_root.into(),
        }
    }

    pub fn fix_all(&self, diagnostics: &[Diagnostic]) -> BatchOutcome {
        self.fix_all_with_progress(diagnostics, None)
    }

    /// Fix every file named by `diagnostics`
    ///
    /// Files missing from disk are skipped and listed in `missing_files`;
    /// they count toward neither side of the progress callback. Each file is
    /// read only when its turn comes.
    pub fn fix_all_with_progress(
        &self,
        diagnostics: &[Diagnostic],
        mut progress: Option<&mut ProgressCallback<'_>>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let mut present = Vec::new();

        for (file, group) in group_by_file(diagnostics) {
            if self.resolve_path(&file).is_file() {
                present.push((file, group));
            } else {
                warn!("Skipping {}: file not found", file.display());
                outcome.missing_files.push(file);
            }
        }

        let total = present.len();
        let mut processed = 0;
        for (file, group) in present {
            let path = self.resolve_path(&file);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    outcome.missing_files.push(file);
                    continue;
                }
            };

            let report = self.fix_file(&file, group, content);
            info!(
                "{}: {}/{} fixed",
                file.display(),
                report.fixed_count,
                report.diagnostics.len()
            );
            outcome.reports.push(report);

            processed += 1;
            if let Some(callback) = progress.as_deref_mut() {
                callback(processed, total, &file);
            }
        }

        outcome
    }

    /// Fix one file's diagnostics against its content
    ///
    /// Policy short-circuits come first in input order, followed by dispatch
    /// results in descending line order.
    pub fn fix_file(
        &self,
        file: &Path,
        diagnostics: Vec<Diagnostic>,
        content: String,
    ) -> FileFixReport {
        let mut report = FileFixReport::new(file, diagnostics, content);
        let mut pending = Vec::new();

        for diagnostic in &report.diagnostics {
            match self.policy.action_for(&diagnostic.message) {
                PolicyAction::Fix => pending.push(diagnostic.clone()),
                PolicyAction::Ignore => {
                    debug!("Ignoring {}", diagnostic.format());
                    report
                        .fix_results
                        .push(FixResult::ignored(diagnostic.clone(), &report.final_content));
                }
                PolicyAction::Report => {
                    report
                        .fix_results
                        .push(FixResult::reported(diagnostic.clone(), &report.final_content));
                }
            }
        }

        // Stable: diagnostics on the same line keep their input order
        pending.sort_by_key(|d| Reverse(d.line));

        // Current line of each pending diagnostic in the edited content
        let mut lines: Vec<usize> = pending.iter().map(|d| d.line).collect();

        for (index, original) in pending.iter().enumerate() {
            let mut target = original.clone();
            target.line = lines[index];

            let mut result = self
                .registry
                .dispatch(&target, &report.final_content)
                .unwrap_or_else(|| {
                    FixResult::failure(
                        target.clone(),
                        &report.final_content,
                        "No fixer available for this diagnostic",
                    )
                });

            if result.is_success() {
                if let Some(shift) = LineShift::between(&report.final_content, &result.content) {
                    lines[index + 1..].iter_mut().for_each(|line| shift.apply(line));
                }
            }

            result.diagnostic = original.clone();
            report.record(result);
        }

        report.finish()
    }

    /// Resolve a report path against the project root
    pub fn resolve_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.project_root.join(file)
        }
    }
}

/// Line movement caused by one edit
///
/// Docblock edits land above the declaration they document, so a pending
/// diagnostic on that declaration (or inside its body) moves with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineShift {
    /// First 1-based line that differs
    from: usize,
    delta: isize,
}

impl LineShift {
    fn between(before: &str, after: &str) -> Option<Self> {
        let delta = after.lines().count() as isize - before.lines().count() as isize;
        if delta == 0 {
            return None;
        }

        let unchanged = before
            .lines()
            .zip(after.lines())
            .take_while(|(a, b)| a == b)
            .count();
        Some(Self {
            from: unchanged + 1,
            delta,
        })
    }

    fn apply(&self, line: &mut usize) {
        if *line >= self.from {
            *line = (*line as isize + self.delta).max(1) as usize;
        }
    }
}

/// Group by file in order of first appearance, keeping input order per file
fn group_by_file(diagnostics: &[Diagnostic]) -> Vec<(PathBuf, Vec<Diagnostic>)> {
    let mut groups: Vec<(PathBuf, Vec<Diagnostic>)> = Vec::new();
    for diagnostic in diagnostics {
        match groups.iter_mut().find(|(file, _)| *file == diagnostic.file) {
            Some((_, group)) => group.push(diagnostic.clone()),
            None => groups.push((diagnostic.file.clone(), vec![diagnostic.clone()])),
        }
    }
    groups
}
