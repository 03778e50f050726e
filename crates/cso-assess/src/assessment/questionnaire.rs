use super::domain::{Question, QuestionId, QuestionType, SectionKind};

/// The fixed accountability questionnaire shipped with the platform.
///
/// Admin tooling can evolve individual questions, but the section shape
/// (23 governance, 10 financial, 6 programme, 4 hr) is a domain constant
/// the scoring maxima are anchored to.
#[derive(Debug)]
pub struct AssessmentBlueprint {
    questions: Vec<Question>,
}

impl AssessmentBlueprint {
    pub fn standard() -> Self {
        Self {
            questions: standard_question_templates()
                .into_iter()
                .map(QuestionTemplate::into_question)
                .collect(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_for_section(&self, section: SectionKind) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.section == section)
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct QuestionTemplate {
    id: &'static str,
    section: SectionKind,
    prompt: &'static str,
    question_type: QuestionType,
}

impl QuestionTemplate {
    fn into_question(self) -> Question {
        Question {
            id: QuestionId(self.id.to_string()),
            section: self.section,
            prompt: self.prompt.to_string(),
            question_type: self.question_type,
            options: Vec::new(),
            option_scores: Vec::new(),
            weight: 1.0,
            mandatory: true,
        }
    }
}

fn standard_question_templates() -> Vec<QuestionTemplate> {
    use QuestionType::{Boolean, LikertScale};
    use SectionKind::{Financial, Governance, HumanResources, Programme};

    vec![
        // Governance: 23 questions, 115 points.
        QuestionTemplate {
            id: "gov-01",
            section: Governance,
            prompt: "The board meets at least quarterly with documented minutes.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-02",
            section: Governance,
            prompt: "Board members are selected through a documented, merit-based process.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-03",
            section: Governance,
            prompt: "Roles of the board and executive management are clearly separated.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-04",
            section: Governance,
            prompt: "The organization has a current, board-approved strategic plan.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-05",
            section: Governance,
            prompt: "A conflict-of-interest policy is in place and signed annually.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-06",
            section: Governance,
            prompt: "The governing documents are registered and up to date.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-07",
            section: Governance,
            prompt: "Board performance is reviewed on a regular cycle.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-08",
            section: Governance,
            prompt: "Leadership succession arrangements are documented.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-09",
            section: Governance,
            prompt: "Constituents have a formal channel to raise complaints and receive responses.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-10",
            section: Governance,
            prompt: "Annual reports are published and accessible to stakeholders.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-11",
            section: Governance,
            prompt: "Decision-making authority is delegated through written policy.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-12",
            section: Governance,
            prompt: "The organization maintains a risk register reviewed by the board.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-13",
            section: Governance,
            prompt: "A code of conduct applies to board, staff, and volunteers.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-14",
            section: Governance,
            prompt: "Safeguarding policies are approved and staff are trained on them.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-15",
            section: Governance,
            prompt: "Statutory filings and registrations are submitted on time.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-16",
            section: Governance,
            prompt: "Stakeholders are consulted when strategy is revised.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-17",
            section: Governance,
            prompt: "Board composition reflects the communities served.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-18",
            section: Governance,
            prompt: "Internal policies are reviewed on a published schedule.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-19",
            section: Governance,
            prompt: "A whistleblowing mechanism protects those who report concerns.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "gov-20",
            section: Governance,
            prompt: "Decisions affecting constituents are communicated back to them.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-21",
            section: Governance,
            prompt: "Partnership agreements define mutual accountability obligations.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-22",
            section: Governance,
            prompt: "The organization discloses its funding sources publicly.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "gov-23",
            section: Governance,
            prompt: "Data protection responsibilities are assigned and documented.",
            question_type: LikertScale,
        },
        // Financial management: 10 questions, 50 points.
        QuestionTemplate {
            id: "fin-01",
            section: Financial,
            prompt: "An annual budget is approved by the board before the year begins.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-02",
            section: Financial,
            prompt: "Financial reports are produced at least quarterly.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-03",
            section: Financial,
            prompt: "An independent external audit is completed annually.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "fin-04",
            section: Financial,
            prompt: "Bank accounts require dual signatories.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "fin-05",
            section: Financial,
            prompt: "Procurement follows a documented competitive process.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-06",
            section: Financial,
            prompt: "Budget-versus-actual variances are reviewed and explained.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-07",
            section: Financial,
            prompt: "Fixed assets are registered and physically verified.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-08",
            section: Financial,
            prompt: "Donor funds are tracked separately per grant agreement.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "fin-09",
            section: Financial,
            prompt: "A reserves policy defines minimum operating reserves.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "fin-10",
            section: Financial,
            prompt: "Audit findings are tracked to resolution by management.",
            question_type: LikertScale,
        },
        // Programme delivery: 6 questions, 30 points.
        QuestionTemplate {
            id: "prog-01",
            section: Programme,
            prompt: "Programmes are designed with measurable outcome indicators.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "prog-02",
            section: Programme,
            prompt: "Monitoring data is collected against the indicator framework.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "prog-03",
            section: Programme,
            prompt: "Beneficiary feedback informs programme adjustments.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "prog-04",
            section: Programme,
            prompt: "Evaluations are conducted and findings shared with stakeholders.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "prog-05",
            section: Programme,
            prompt: "Programme reports are delivered to donors on schedule.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "prog-06",
            section: Programme,
            prompt: "Lessons learned are documented and reused in new designs.",
            question_type: LikertScale,
        },
        // Human resources: 4 questions, 20 points.
        QuestionTemplate {
            id: "hr-01",
            section: HumanResources,
            prompt: "Staff are recruited through open, documented processes.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "hr-02",
            section: HumanResources,
            prompt: "Every staff member has a written contract and job description.",
            question_type: Boolean,
        },
        QuestionTemplate {
            id: "hr-03",
            section: HumanResources,
            prompt: "Performance appraisals are conducted at least annually.",
            question_type: LikertScale,
        },
        QuestionTemplate {
            id: "hr-04",
            section: HumanResources,
            prompt: "A staff development budget supports training needs.",
            question_type: LikertScale,
        },
    ]
}
