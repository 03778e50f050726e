use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{AnswerValue, MaturityLevel, SectionKind};
use super::super::scoring::CsoScores;

/// Error raised when an admin-authored condition fails schema validation.
#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error("condition is not valid: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Inclusive numeric band; an absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ScoreBand {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Band applied to one named section's raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScoreBand {
    pub section: SectionKind,
    #[serde(flatten)]
    pub band: ScoreBand,
}

/// Declarative predicate over a computed score sheet.
///
/// Every present clause must pass (logical AND); an absent clause is
/// vacuously satisfied. Admin-authored JSON is parsed through
/// [`RuleCondition::from_json`] so malformed payloads are rejected at
/// load time instead of being duck-typed during evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RuleCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<ScoreBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_score: Option<SectionScoreBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_level: Option<MaturityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_percentages: Option<BTreeMap<SectionKind, ScoreBand>>,
}

impl RuleCondition {
    pub fn from_json(raw: serde_json::Value) -> Result<Self, ConditionError> {
        Ok(serde_json::from_value(raw)?)
    }

    /// Evaluate at assessment scope.
    pub fn matches(&self, scores: &CsoScores) -> bool {
        self.matches_scoped(scores, None)
    }

    /// Evaluate with an optional section scope. The bare `score` clause
    /// only makes sense when the evaluator is scoped to one section; a
    /// rule carrying it without a scope does not fire.
    pub fn matches_scoped(&self, scores: &CsoScores, scoped_score: Option<f64>) -> bool {
        if let Some(band) = &self.overall_score {
            if !band.contains(f64::from(scores.total_score)) {
                return false;
            }
        }

        if let Some(clause) = &self.section_score {
            if !clause
                .band
                .contains(f64::from(scores.section_score(clause.section)))
            {
                return false;
            }
        }

        if let Some(band) = &self.score {
            match scoped_score {
                Some(value) => {
                    if !band.contains(value) {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(level) = self.overall_level {
            if scores.overall_level != level {
                return false;
            }
        }

        if let Some(bands) = &self.section_percentages {
            for (section, band) in bands {
                if !band.contains(scores.section_percentage(*section)) {
                    return false;
                }
            }
        }

        true
    }
}

/// Comparison applied by question-level rules to one response value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

/// Question-level predicate: a response value matched against a literal
/// with one of four operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseCondition {
    pub operator: ConditionOperator,
    pub value: serde_json::Value,
}

impl ResponseCondition {
    pub fn from_json(raw: serde_json::Value) -> Result<Self, ConditionError> {
        Ok(serde_json::from_value(raw)?)
    }

    pub fn matches(&self, answer: &AnswerValue) -> bool {
        match self.operator {
            ConditionOperator::Equals => match (answer, &self.value) {
                (AnswerValue::Flag(flag), serde_json::Value::Bool(expected)) => flag == expected,
                _ => match (answer.as_number(), self.value.as_f64()) {
                    (Some(actual), Some(expected)) => actual == expected,
                    _ => answer.display() == self.expected_text(),
                },
            },
            ConditionOperator::Contains => match answer {
                AnswerValue::List(items) => {
                    let expected = self.expected_text();
                    items.iter().any(|item| item == &expected)
                }
                _ => answer.display().contains(&self.expected_text()),
            },
            ConditionOperator::GreaterThan => match (answer.as_number(), self.value.as_f64()) {
                (Some(actual), Some(expected)) => actual > expected,
                _ => false,
            },
            ConditionOperator::LessThan => match (answer.as_number(), self.value.as_f64()) {
                (Some(actual), Some(expected)) => actual < expected,
                _ => false,
            },
        }
    }

    fn expected_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
