use std::sync::Arc;

use clap::Args;

use crate::infra::{default_rule_set, seed_demo_assessment, DemoProfile, InMemoryAssessmentStore};
use cso_assess::assessment::{
    AssessmentService, CsoScores, GeneratedSuggestion, SectionKind, SuggestionKind,
};
use cso_assess::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Organization name shown in the rendered report
    #[arg(long, default_value = "Harbor Education Collective")]
    pub(crate) organization: String,
    /// Canned answer profile to score
    #[arg(long, value_enum, default_value_t = DemoProfile::Typical)]
    pub(crate) profile: DemoProfile,
    /// Print every generated suggestion, not just the top five
    #[arg(long)]
    pub(crate) all_suggestions: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        organization,
        profile,
        all_suggestions,
    } = args;

    let store = Arc::new(InMemoryAssessmentStore::default());
    store.set_rules(default_rule_set());
    let assessment_id = seed_demo_assessment(&store, "demo", &organization, profile);

    let service = AssessmentService::new(store);
    let scores = service
        .scores(&assessment_id)
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::Assessment(cso_assess::assessment::StoreError::NotFound.into())
        })?;
    let suggestions = service
        .generate_suggestions(&assessment_id)
        .map_err(AppError::from)?;

    render_score_report(&organization, profile, &scores);
    render_suggestions(&suggestions, all_suggestions);

    Ok(())
}

fn render_score_report(organization: &str, profile: DemoProfile, scores: &CsoScores) {
    println!("CSO self-assessment demo");
    println!("Organization: {organization} (profile {profile:?})");

    println!("\nSection scores");
    for section in SectionKind::ordered() {
        println!(
            "- {}: {}/{} ({:.1}%)",
            section.label(),
            scores.section_score(section),
            section.max_points(),
            scores.section_percentage(section)
        );
    }

    println!(
        "\nTotal: {}/{} ({:.1}%) -> {}",
        scores.total_score,
        SectionKind::TOTAL_MAX_POINTS,
        scores.total_percentage,
        scores.overall_level.label()
    );
}

fn render_suggestions(suggestions: &[GeneratedSuggestion], all: bool) {
    if suggestions.is_empty() {
        println!("\nSuggestions: none generated");
        return;
    }

    let shown = if all {
        suggestions.len()
    } else {
        suggestions.len().min(5)
    };
    println!("\nSuggestions (top {shown} of {})", suggestions.len());
    for suggestion in &suggestions[..shown] {
        let scope = match suggestion.kind {
            SuggestionKind::Assessment => "overall".to_string(),
            _ => suggestion
                .source_id
                .clone()
                .unwrap_or_else(|| suggestion.kind.label().to_lowercase()),
        };
        println!(
            "- [p{} {}] {}",
            suggestion.priority, scope, suggestion.suggestion
        );
    }
}
