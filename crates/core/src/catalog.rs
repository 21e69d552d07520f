//! The symptom catalog.
//!
//! A fixed, ordered table of symptoms keyed by name. The catalog is built once at startup
//! (either the built-in dental table or a YAML override) and is read-only afterwards.
//! Definition order is preserved: it drives display order and tie-breaking in the
//! candidate-condition shortlist.

use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Symptom {
    /// Unique display name, used as the lookup key.
    pub name: String,
    /// Importance weight; must be finite and positive.
    pub weight: f64,
    /// Conditions this symptom is associated with, in clinical priority order.
    #[serde(default)]
    pub associated_conditions: Vec<String>,
}

impl Symptom {
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        associated_conditions: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            associated_conditions: associated_conditions
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    symptoms: Vec<Symptom>,
}

/// Ordered, name-indexed symptom table.
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    symptoms: Vec<Symptom>,
    index: HashMap<String, usize>,
}

impl SymptomCatalog {
    /// Builds a catalog from entries in display order.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidCatalog` if:
    /// - the list is empty,
    /// - a name is blank or appears twice,
    /// - a weight is not a finite positive number.
    pub fn new(symptoms: Vec<Symptom>) -> TriageResult<Self> {
        if symptoms.is_empty() {
            return Err(TriageError::InvalidCatalog(
                "catalog must contain at least one symptom".into(),
            ));
        }

        let mut index = HashMap::with_capacity(symptoms.len());
        for (position, symptom) in symptoms.iter().enumerate() {
            if symptom.name.trim().is_empty() {
                return Err(TriageError::InvalidCatalog(format!(
                    "symptom at position {position} has an empty name"
                )));
            }
            if !symptom.weight.is_finite() || symptom.weight <= 0.0 {
                return Err(TriageError::InvalidCatalog(format!(
                    "symptom '{}' has invalid weight {}",
                    symptom.name, symptom.weight
                )));
            }
            if index.insert(symptom.name.clone(), position).is_some() {
                return Err(TriageError::InvalidCatalog(format!(
                    "duplicate symptom name '{}'",
                    symptom.name
                )));
            }
        }

        Ok(Self { symptoms, index })
    }

    /// The built-in dental symptom table.
    pub fn builtin() -> Self {
        let symptoms = vec![
            Symptom::new("Tooth sensitivity", 1.0, &["Caries", "Enamel erosion"]),
            Symptom::new("Swollen gums", 1.2, &["Infection", "Periodontitis"]),
            Symptom::new("Persistent bad breath", 1.0, &["Gum disease", "Poor hygiene"]),
            Symptom::new(
                "Pain while chewing",
                1.5,
                &["Caries", "Fractured tooth", "Impacted teeth"],
            ),
            Symptom::new(
                "Loose teeth",
                1.5,
                &["Gum disease", "Bone loss", "Possible diabetes"],
            ),
            Symptom::new("Bleeding gums", 1.2, &["Gingivitis"]),
            Symptom::new(
                "Jaw pain or difficulty opening mouth",
                1.3,
                &["TMJ disorders", "Impacted tooth"],
            ),
            Symptom::new("Discoloration or dark spots", 1.5, &["Dental caries", "Necrosis"]),
            Symptom::new(
                "Ulcers or white patches",
                1.5,
                &["Oral thrush", "Canker sores", "Leukoplakia"],
            ),
            Symptom::new("Dry mouth", 1.4, &["Possible diabetes", "Salivary dysfunction"]),
        ];

        let index = symptoms
            .iter()
            .enumerate()
            .map(|(position, s)| (s.name.clone(), position))
            .collect();

        Self { symptoms, index }
    }

    /// Parses a catalog from YAML of the form `symptoms: [{name, weight, associated_conditions}]`.
    pub fn from_yaml(input: &str) -> TriageResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(input).map_err(TriageError::CatalogParse)?;
        Self::new(file.symptoms)
    }

    /// Reads and parses a YAML catalog file.
    pub fn load(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(TriageError::CatalogRead)?;
        let catalog = Self::from_yaml(&contents)?;
        tracing::info!(
            path = %path.display(),
            symptoms = catalog.len(),
            "loaded symptom catalog"
        );
        Ok(catalog)
    }

    /// Looks up a symptom by exact name. Absent names are not an error.
    pub fn lookup(&self, name: &str) -> Option<&Symptom> {
        self.index.get(name).map(|&i| &self.symptoms[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates symptoms in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.iter()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

impl Default for SymptomCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
