//! Per-session symptom selection (the severity store).
//!
//! Selection order is preserved and names never repeat: selecting a symptom twice toggles it
//! off. A symptom starts at [`Severity::DEFAULT`] the first time it is selected; if the user
//! adjusted it, deselected it and selects it again, the adjusted severity comes back.

use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triage_types::Severity;

/// A symptom the user selected, with its current severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSymptom {
    pub name: String,
    pub severity: Severity,
}

impl SelectedSymptom {
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymptomSelection {
    selected: Vec<String>,
    severities: HashMap<String, Severity>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles membership of `name`.
    ///
    /// Returns `true` if the symptom is selected after the call.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
            return false;
        }

        self.severities
            .entry(name.to_string())
            .or_insert(Severity::DEFAULT);
        self.selected.push(name.to_string());
        true
    }

    /// Sets the severity of a currently selected symptom.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::SymptomNotSelected` if `name` is not selected.
    pub fn set_severity(&mut self, name: &str, severity: Severity) -> TriageResult<()> {
        if !self.is_selected(name) {
            return Err(TriageError::SymptomNotSelected(name.to_string()));
        }
        self.severities.insert(name.to_string(), severity);
        Ok(())
    }

    /// Severity of a selected symptom; `None` when it is not selected.
    pub fn severity_of(&self, name: &str) -> Option<Severity> {
        if !self.is_selected(name) {
            return None;
        }
        Some(
            self.severities
                .get(name)
                .copied()
                .unwrap_or(Severity::DEFAULT),
        )
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Snapshot of the selection in the order symptoms were selected.
    pub fn selections(&self) -> Vec<SelectedSymptom> {
        self.selected
            .iter()
            .map(|name| {
                let severity = self
                    .severities
                    .get(name)
                    .copied()
                    .unwrap_or(Severity::DEFAULT);
                SelectedSymptom::new(name.clone(), severity)
            })
            .collect()
    }

    /// Deselects everything and forgets remembered severities.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.severities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sev(v: i64) -> Severity {
        Severity::new(v).expect("valid severity")
    }

    #[test]
    fn toggle_adds_with_default_severity_then_removes() {
        let mut selection = SymptomSelection::new();
        assert!(selection.toggle("Loose teeth"));
        assert_eq!(selection.severity_of("Loose teeth"), Some(Severity::DEFAULT));

        assert!(!selection.toggle("Loose teeth"));
        assert!(selection.is_empty());
        assert_eq!(selection.severity_of("Loose teeth"), None);
    }

    #[test]
    fn selections_preserve_selection_order() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Dry mouth");
        selection.toggle("Bleeding gums");
        selection.toggle("Tooth sensitivity");
        selection.toggle("Bleeding gums");

        let names: Vec<String> = selection.selections().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Dry mouth", "Tooth sensitivity"]);
    }

    #[test]
    fn reselecting_restores_adjusted_severity() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Swollen gums");
        selection.set_severity("Swollen gums", sev(8)).expect("selected");

        selection.toggle("Swollen gums");
        selection.toggle("Swollen gums");

        assert_eq!(selection.severity_of("Swollen gums"), Some(sev(8)));
    }

    #[test]
    fn set_severity_requires_selection() {
        let mut selection = SymptomSelection::new();
        let err = selection
            .set_severity("Dry mouth", sev(3))
            .expect_err("not selected");
        assert!(matches!(err, TriageError::SymptomNotSelected(name) if name == "Dry mouth"));
    }

    #[test]
    fn clear_forgets_severities() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Dry mouth");
        selection.set_severity("Dry mouth", sev(9)).expect("selected");
        selection.clear();

        selection.toggle("Dry mouth");
        assert_eq!(selection.severity_of("Dry mouth"), Some(Severity::DEFAULT));
    }
}
