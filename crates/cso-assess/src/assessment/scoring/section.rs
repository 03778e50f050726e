use super::super::domain::{AnswerValue, QuestionType};

/// Raw point total for one section.
///
/// Likert answers contribute their raw 1–5 value (clamped), Boolean
/// answers 5 for yes and 1 for no. Choice and free-text questions carry
/// no points on this scale; the sections of the standard questionnaire
/// are built from Likert and Boolean questions only.
///
/// When a section is partially answered the accumulated total is scaled
/// by `max_questions / answered`: the organization's average performance
/// on the answered portion is extrapolated across the unanswered rest.
/// A fully unanswered section scores zero without dividing.
pub(crate) fn section_raw_score(
    answers: &[(&AnswerValue, QuestionType)],
    max_questions: u32,
) -> u32 {
    let mut total = 0.0_f64;
    let mut answered = 0_u32;

    for (value, question_type) in answers {
        if value.is_empty() {
            continue;
        }
        answered += 1;
        total += match question_type {
            QuestionType::LikertScale => value
                .as_number()
                .map(|raw| raw.clamp(1.0, 5.0))
                .unwrap_or(0.0),
            QuestionType::Boolean => {
                if matches!(value, AnswerValue::Flag(true)) {
                    5.0
                } else {
                    1.0
                }
            }
            _ => 0.0,
        };
    }

    if answered == 0 {
        return 0;
    }
    if answered < max_questions {
        total *= f64::from(max_questions) / f64::from(answered);
    }

    total.round() as u32
}
