use super::super::domain::{AnswerValue, Question, QuestionType};

const SINGLE_CHOICE_DEFAULT: f64 = 0.5;
const MULTIPLE_CHOICE_DEFAULT: f64 = 0.7;
const TEXT_NEUTRAL: f64 = 0.5;

/// Normalize a raw answer onto the common 0–1 scale.
///
/// Unanswered values never reach this function; callers exclude them from
/// aggregation entirely rather than scoring them as zero. Out-of-range
/// Likert input is clamped so one malformed response cannot push a score
/// outside its documented bounds.
pub fn normalize_answer(value: &AnswerValue, question: &Question) -> f64 {
    match question.question_type {
        QuestionType::Boolean => match value {
            AnswerValue::Flag(true) => 1.0,
            _ => 0.0,
        },
        QuestionType::LikertScale => value
            .as_number()
            .map(|raw| ((raw - 1.0) / 4.0).clamp(0.0, 1.0))
            .unwrap_or(0.0),
        QuestionType::SingleChoice => single_choice_score(value, question),
        QuestionType::MultipleChoice => multiple_choice_score(value, question),
        QuestionType::Text => TEXT_NEUTRAL,
    }
}

/// The same normalization projected onto the 1–5 display scale used in
/// rendered reports.
pub fn display_scale(value: &AnswerValue, question: &Question) -> f64 {
    1.0 + normalize_answer(value, question) * 4.0
}

fn single_choice_score(value: &AnswerValue, question: &Question) -> f64 {
    match value {
        AnswerValue::Text(chosen) => option_score(question, chosen).unwrap_or(SINGLE_CHOICE_DEFAULT),
        _ => SINGLE_CHOICE_DEFAULT,
    }
}

fn multiple_choice_score(value: &AnswerValue, question: &Question) -> f64 {
    let AnswerValue::List(selected) = value else {
        return 0.0;
    };
    if selected.is_empty() {
        return 0.0;
    }

    let scored: Vec<f64> = selected
        .iter()
        .filter_map(|item| option_score(question, item))
        .collect();
    if scored.is_empty() {
        return MULTIPLE_CHOICE_DEFAULT;
    }
    scored.iter().sum::<f64>() / scored.len() as f64
}

/// Per-option override lookup: `option_scores[i]` scores `options[i]`.
fn option_score(question: &Question, chosen: &str) -> Option<f64> {
    let index = question
        .options
        .iter()
        .position(|option| option == chosen)?;
    question
        .option_scores
        .get(index)
        .map(|score| score.clamp(0.0, 1.0))
}
