use super::super::domain::{MaturityLevel, SectionKind};
use super::condition::{RuleCondition, ScoreBand};

/// Built-in section rule: fires when the section's raw score lands in
/// the band. Three bands per section, four sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionBandRule {
    pub key: &'static str,
    pub section: SectionKind,
    pub band: ScoreBand,
    pub category: &'static str,
    pub priority: i32,
    pub weight: f64,
    pub suggestion: &'static str,
}

/// Built-in strategic rule: keyed on the overall maturity tier or a
/// section percentage falling below a threshold. Strategic matches are
/// emitted at assessment level with elevated priority.
#[derive(Debug, Clone)]
pub struct StrategicRule {
    pub key: &'static str,
    pub condition: RuleCondition,
    pub category: &'static str,
    pub priority: i32,
    pub weight: f64,
    pub suggestion: &'static str,
}

/// Band cutoffs sit at 40% and 80% of each section's point ceiling,
/// aligned with the tier thresholds of the overall classification.
pub fn section_band_rules() -> Vec<SectionBandRule> {
    vec![
        SectionBandRule {
            key: "governance_critical",
            section: SectionKind::Governance,
            band: ScoreBand::between(0.0, 45.0),
            category: "critical",
            priority: 9,
            weight: 1.0,
            suggestion: "Establish basic governance structures: a functioning board with \
                         documented meetings, registered governing documents, and a \
                         conflict-of-interest policy.",
        },
        SectionBandRule {
            key: "governance_improvement",
            section: SectionKind::Governance,
            band: ScoreBand::between(46.0, 91.0),
            category: "improvement",
            priority: 5,
            weight: 1.0,
            suggestion: "Strengthen governance practice: introduce board performance reviews, \
                         succession planning, and regular stakeholder consultation on strategy.",
        },
        SectionBandRule {
            key: "governance_excellence",
            section: SectionKind::Governance,
            band: ScoreBand::between(92.0, 115.0),
            category: "excellence",
            priority: 2,
            weight: 1.0,
            suggestion: "Governance is strong. Consider mentoring peer organizations and \
                         publishing your governance framework as a sector reference.",
        },
        SectionBandRule {
            key: "financial_critical",
            section: SectionKind::Financial,
            band: ScoreBand::between(0.0, 19.0),
            category: "critical",
            priority: 9,
            weight: 1.0,
            suggestion: "Put core financial controls in place: board-approved budgets, dual \
                         signatories, and separate tracking of donor funds.",
        },
        SectionBandRule {
            key: "financial_improvement",
            section: SectionKind::Financial,
            band: ScoreBand::between(20.0, 39.0),
            category: "improvement",
            priority: 5,
            weight: 1.0,
            suggestion: "Deepen financial management: move to quarterly reporting with variance \
                         analysis and commission an independent annual audit.",
        },
        SectionBandRule {
            key: "financial_excellence",
            section: SectionKind::Financial,
            band: ScoreBand::between(40.0, 50.0),
            category: "excellence",
            priority: 2,
            weight: 1.0,
            suggestion: "Financial management is strong. Formalize a reserves policy review \
                         cycle and share audit outcomes with stakeholders proactively.",
        },
        SectionBandRule {
            key: "programme_critical",
            section: SectionKind::Programme,
            band: ScoreBand::between(0.0, 11.0),
            category: "critical",
            priority: 8,
            weight: 1.0,
            suggestion: "Introduce a basic results framework: define measurable indicators for \
                         every programme and collect monitoring data against them.",
        },
        SectionBandRule {
            key: "programme_improvement",
            section: SectionKind::Programme,
            band: ScoreBand::between(12.0, 23.0),
            category: "improvement",
            priority: 5,
            weight: 1.0,
            suggestion: "Close the learning loop: route beneficiary feedback into programme \
                         adjustments and document lessons for future designs.",
        },
        SectionBandRule {
            key: "programme_excellence",
            section: SectionKind::Programme,
            band: ScoreBand::between(24.0, 30.0),
            category: "excellence",
            priority: 2,
            weight: 1.0,
            suggestion: "Programme practice is strong. Invest in independent evaluations and \
                         publish findings to strengthen sector learning.",
        },
        SectionBandRule {
            key: "hr_critical",
            section: SectionKind::HumanResources,
            band: ScoreBand::between(0.0, 7.0),
            category: "critical",
            priority: 8,
            weight: 1.0,
            suggestion: "Formalize the employment basics: written contracts, job descriptions, \
                         and open recruitment for every role.",
        },
        SectionBandRule {
            key: "hr_improvement",
            section: SectionKind::HumanResources,
            band: ScoreBand::between(8.0, 15.0),
            category: "improvement",
            priority: 5,
            weight: 1.0,
            suggestion: "Build staff development: annual appraisals tied to a funded training \
                         plan for every team member.",
        },
        SectionBandRule {
            key: "hr_excellence",
            section: SectionKind::HumanResources,
            band: ScoreBand::between(16.0, 20.0),
            category: "excellence",
            priority: 2,
            weight: 1.0,
            suggestion: "HR practice is strong. Consider structured career pathways and \
                         well-being support to retain institutional knowledge.",
        },
    ]
}

pub fn strategic_rules() -> Vec<StrategicRule> {
    vec![
        StrategicRule {
            key: "strategic_emerging",
            condition: RuleCondition {
                overall_level: Some(MaturityLevel::Emerging),
                ..RuleCondition::default()
            },
            category: "strategic",
            priority: 10,
            weight: 2.0,
            suggestion: "Overall accountability maturity is Emerging. Prioritize a twelve-month \
                         institutional strengthening plan focused on the weakest sections before \
                         expanding programme scope.",
        },
        StrategicRule {
            key: "strategic_strong_foundation",
            condition: RuleCondition {
                overall_level: Some(MaturityLevel::StrongFoundation),
                ..RuleCondition::default()
            },
            category: "strategic",
            priority: 7,
            weight: 1.5,
            suggestion: "A strong foundation is in place. Target the remaining gaps section by \
                         section to reach Leading-tier practice within two assessment cycles.",
        },
        StrategicRule {
            key: "strategic_leading",
            condition: RuleCondition {
                overall_level: Some(MaturityLevel::Leading),
                ..RuleCondition::default()
            },
            category: "strategic",
            priority: 4,
            weight: 1.0,
            suggestion: "The organization operates at Leading tier. Sustain practice through \
                         periodic reassessment and share your accountability model with peers.",
        },
        StrategicRule {
            key: "strategic_governance_gap",
            condition: section_percentage_below(SectionKind::Governance, 40.0),
            category: "strategic",
            priority: 9,
            weight: 2.0,
            suggestion: "Governance scores below 40% put every other gain at risk. Convene the \
                         board around a governance improvement roadmap this quarter.",
        },
        StrategicRule {
            key: "strategic_financial_gap",
            condition: section_percentage_below(SectionKind::Financial, 40.0),
            category: "strategic",
            priority: 9,
            weight: 2.0,
            suggestion: "Financial management below 40% threatens donor confidence. Commission \
                         an external controls review and act on its findings first.",
        },
        StrategicRule {
            key: "strategic_programme_gap",
            condition: section_percentage_below(SectionKind::Programme, 40.0),
            category: "strategic",
            priority: 8,
            weight: 1.5,
            suggestion: "Programme delivery below 40% weakens the case for impact. Stand up a \
                         minimal monitoring framework before the next reporting cycle.",
        },
        StrategicRule {
            key: "strategic_hr_gap",
            condition: section_percentage_below(SectionKind::HumanResources, 40.0),
            category: "strategic",
            priority: 8,
            weight: 1.5,
            suggestion: "Human resources below 40% risks losing the people who deliver the \
                         mission. Close contract and appraisal gaps within the next quarter.",
        },
    ]
}

fn section_percentage_below(section: SectionKind, threshold: f64) -> RuleCondition {
    let mut bands = std::collections::BTreeMap::new();
    bands.insert(section, ScoreBand::at_most(threshold));
    RuleCondition {
        section_percentages: Some(bands),
        ..RuleCondition::default()
    }
}
