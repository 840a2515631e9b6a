//! Footer counts per action and per severity

use tfscope_core::{Action, Diagnostic, ResourceChange, Severity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub create: usize,
    pub update: usize,
    pub destroy: usize,
    pub replace: usize,
    pub import: usize,
    pub unknown: usize,
}

impl Summary {
    pub fn from_model(resources: &[ResourceChange], diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Summary::default();
        for diag in diagnostics {
            match diag.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
        }
        for rc in resources {
            match rc.action {
                Action::Create => summary.create += 1,
                Action::Update => summary.update += 1,
                Action::Destroy => summary.destroy += 1,
                Action::Replace => summary.replace += 1,
                Action::Import => summary.import += 1,
                Action::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    /// Resource count for one action
    pub fn count(&self, action: Action) -> usize {
        match action {
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Destroy => self.destroy,
            Action::Replace => self.replace,
            Action::Import => self.import,
            Action::Unknown => self.unknown,
        }
    }

    /// Nothing to report: the footer shows "No changes"
    pub fn is_empty(&self) -> bool {
        *self == Summary::default()
    }
}
