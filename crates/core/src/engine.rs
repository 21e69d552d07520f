//! OPG recommendation engine.
//!
//! Converts a set of selected symptoms into a recommendation on whether a panoramic
//! radiograph (OPG) is advisable. Each symptom found in the catalog contributes
//! `weight * (severity / 5) * 20`; the contributions are averaged over *all* selections,
//! including names the catalog does not know, which therefore dilute the average.
//!
//! The tier is chosen from the unrounded average. Only the reported `score` is rounded.

use crate::catalog::{Symptom, SymptomCatalog};
use crate::constants::{
    CONSIDER_THRESHOLD, CONTRIBUTION_SCALE, MAX_SCORE, NEUTRAL_SEVERITY, STRONG_THRESHOLD,
};
use crate::selection::SelectedSymptom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use triage_types::Severity;

/// Advisory class produced by thresholding the average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpgTier {
    Strong,
    Consider,
    Unnecessary,
}

impl OpgTier {
    /// Classifies an unrounded average score. Lower bounds are inclusive.
    pub fn classify(average_score: f64) -> Self {
        if average_score >= STRONG_THRESHOLD {
            OpgTier::Strong
        } else if average_score >= CONSIDER_THRESHOLD {
            OpgTier::Consider
        } else {
            OpgTier::Unnecessary
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            OpgTier::Strong => "STRONGLY RECOMMEND OPG: High probability of significant findings",
            OpgTier::Consider => "Consider OPG: Moderate probability of clinical findings",
            OpgTier::Unnecessary => "OPG not necessary: Low probability of significant findings",
        }
    }

    pub fn needs_imaging(self) -> bool {
        !matches!(self, OpgTier::Unnecessary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpgTier::Strong => "strong",
            OpgTier::Consider => "consider",
            OpgTier::Unnecessary => "unnecessary",
        }
    }
}

impl std::fmt::Display for OpgTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of [`recommend`]. Derived entirely from its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub tier: OpgTier,
    pub advisory_text: String,
    pub needs_imaging: bool,
    /// Average score rounded half-up and capped at 100.
    pub score: u8,
    /// The unrounded average the tier was chosen from.
    pub average_score: f64,
}

/// Weighted contribution of one resolved symptom at the given severity.
pub fn contribution(symptom: &Symptom, severity: Severity) -> f64 {
    let severity_multiplier = f64::from(severity.value()) / NEUTRAL_SEVERITY;
    (symptom.weight * severity_multiplier) * CONTRIBUTION_SCALE
}

/// Computes the OPG recommendation for a set of selections.
///
/// Callers must reject an empty selection before calling; an empty slice scores 0 here.
/// Names missing from `catalog` contribute nothing but still count towards the average.
pub fn recommend(catalog: &SymptomCatalog, selections: &[SelectedSymptom]) -> RecommendationResult {
    let total_score: f64 = selections
        .iter()
        .filter_map(|selected| {
            catalog
                .lookup(&selected.name)
                .map(|symptom| contribution(symptom, selected.severity))
        })
        .sum();

    let average_score = if selections.is_empty() {
        0.0
    } else {
        total_score / selections.len() as f64
    };

    let tier = OpgTier::classify(average_score);

    RecommendationResult {
        tier,
        advisory_text: tier.advisory().to_string(),
        needs_imaging: tier.needs_imaging(),
        score: round_score(average_score),
        average_score,
    }
}

fn round_score(average_score: f64) -> u8 {
    // Averages are non-negative, so this rounds half-up.
    average_score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// A condition on the local shortlist with its accumulated weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCondition {
    pub name: String,
    /// Sum of the contributions of every selected symptom associated with this condition.
    pub weight: f64,
    /// `weight` as a fraction of all candidate weight, in 0..=1.
    pub share: f64,
}

/// Ranks the conditions associated with the selected symptoms.
///
/// Conditions are ordered by accumulated contribution, highest first. Ties keep the order in
/// which the condition first appears when walking the catalog in definition order.
pub fn candidate_conditions(
    catalog: &SymptomCatalog,
    selections: &[SelectedSymptom],
) -> Vec<CandidateCondition> {
    let severities: HashMap<&str, Severity> = selections
        .iter()
        .map(|s| (s.name.as_str(), s.severity))
        .collect();

    let mut candidates: Vec<CandidateCondition> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for symptom in catalog.iter() {
        let Some(&severity) = severities.get(symptom.name.as_str()) else {
            continue;
        };
        let weight = contribution(symptom, severity);

        for condition in &symptom.associated_conditions {
            match positions.get(condition.as_str()) {
                Some(&i) => candidates[i].weight += weight,
                None => {
                    positions.insert(condition.as_str(), candidates.len());
                    candidates.push(CandidateCondition {
                        name: condition.clone(),
                        weight,
                        share: 0.0,
                    });
                }
            }
        }
    }

    let total: f64 = candidates.iter().map(|c| c.weight).sum();
    if total > 0.0 {
        for candidate in &mut candidates {
            candidate.share = candidate.weight / total;
        }
    }

    // Stable sort keeps catalog order for equal weights.
    candidates.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    candidates
}
