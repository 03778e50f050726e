use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a self-assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier wrapper for questionnaire questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for the report record suggestions attach to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// The four fixed accountability sections of the questionnaire.
///
/// Question counts and point maxima are domain constants, not derived
/// from stored data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Governance,
    Financial,
    Programme,
    #[serde(rename = "hr")]
    HumanResources,
}

impl SectionKind {
    pub const TOTAL_MAX_POINTS: u32 = 215;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::Governance,
            Self::Financial,
            Self::Programme,
            Self::HumanResources,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Governance => "Governance",
            Self::Financial => "Financial Management",
            Self::Programme => "Programme Delivery",
            Self::HumanResources => "Human Resources",
        }
    }

    /// Stable machine name matching the serde representation.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::Financial => "financial",
            Self::Programme => "programme",
            Self::HumanResources => "hr",
        }
    }

    pub const fn max_questions(self) -> u32 {
        match self {
            Self::Governance => 23,
            Self::Financial => 10,
            Self::Programme => 6,
            Self::HumanResources => 4,
        }
    }

    /// Point ceiling for the section: every question at the top of the
    /// five-point scale.
    pub const fn max_points(self) -> u32 {
        self.max_questions() * 5
    }
}

/// The five supported answer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Text,
    LikertScale,
    Boolean,
}

impl QuestionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "Single Choice",
            Self::MultipleChoice => "Multiple Choice",
            Self::Text => "Free Text",
            Self::LikertScale => "Likert Scale",
            Self::Boolean => "Yes / No",
        }
    }
}

/// A questionnaire question as stored by the admin surface.
///
/// `option_scores` optionally assigns a normalized score per option for
/// choice questions; when empty the engine falls back to the flat
/// defaults (0.5 single choice, 0.7 non-empty multiple choice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub section: SectionKind,
    pub prompt: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub option_scores: Vec<f64>,
    pub weight: f64,
    pub mandatory: bool,
}

/// Raw answer payload: a bool, a number, free text, or a selection list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Unanswered means absent or an empty string. An empty selection
    /// list still counts as answered; it just scores nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, AnswerValue::Text(text) if text.trim().is_empty())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            AnswerValue::Flag(flag) => flag.to_string(),
            AnswerValue::Number(value) => {
                if value.fract() == 0.0 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::List(items) => items.join(", "),
        }
    }
}

/// One stored answer; upserted per question while the assessment is in
/// progress, frozen once it completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub assessment_id: AssessmentId,
    pub question_id: QuestionId,
    pub value: Option<AnswerValue>,
    pub created_at: DateTime<Utc>,
}

impl Response {
    /// An answer that should be excluded from scoring denominators.
    pub fn is_answered(&self) -> bool {
        self.value.as_ref().is_some_and(|value| !value.is_empty())
    }
}

/// Lifecycle of an assessment run; completion triggers scoring and
/// suggestion generation exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub organization: String,
    pub status: AssessmentStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// The join consumed by the pure scoring functions: a response together
/// with the question it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseWithQuestion {
    pub response: Response,
    pub question: Question,
}

/// Three-tier classification derived from the total percentage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Emerging,
    StrongFoundation,
    Leading,
}

impl MaturityLevel {
    /// Classification bands: below 41 percent is Emerging, 41 to 79
    /// inclusive is Strong Foundation, 80 and above is Leading.
    pub fn from_percentage(total_percentage: f64) -> Self {
        if total_percentage >= 80.0 {
            Self::Leading
        } else if total_percentage >= 41.0 {
            Self::StrongFoundation
        } else {
            Self::Emerging
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerging => "Emerging",
            Self::StrongFoundation => "Strong Foundation",
            Self::Leading => "Leading",
        }
    }
}
