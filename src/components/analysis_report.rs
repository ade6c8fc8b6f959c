//! Analysis result display.
//!
//! Split in two so the evaluation panel can sit between the interview
//! questions and the improvement tips.

use leptos::prelude::*;

use crate::components::verdict_badge::{Verdict, VerdictBadge};
use crate::models::{format_score, AnalysisResult};

/// Display strings derived from an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportText {
    pub verdict: Verdict,
    pub score: String,
    pub skills_found: String,
    pub missing_skills: String,
    pub questions: Vec<String>,
}

impl ReportText {
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            verdict: Verdict::from_selected(result.selected),
            score: format!("{}%", format_score(result.score)),
            skills_found: result.skills_found.join(", "),
            missing_skills: result.missing_skills.join(", "),
            questions: result.interview_questions.clone(),
        }
    }
}

/// Verdict, score, skills and interview questions.
#[component]
pub fn AnalysisSummary(result: AnalysisResult) -> impl IntoView {
    let text = ReportText::new(&result);

    view! {
        <div class="analysis-summary">
            <style>{include_str!("analysis_report.css")}</style>

            <VerdictBadge verdict=text.verdict />

            <p class="score-line">"Matching Score: " <b>{text.score}</b></p>

            <p><b>"Skills Found:"</b> " " {text.skills_found}</p>
            <p><b>"Missing Skills:"</b> " " {text.missing_skills}</p>

            <div class="report-section">
                <p class="section-title">"Interview Questions"</p>
                <BulletList items=text.questions />
            </div>
        </div>
    }
}

/// Resume improvement suggestions.
#[component]
pub fn ResumeTips(tips: Vec<String>) -> impl IntoView {
    view! {
        <div class="report-section">
            <p class="section-title">"Resume Improvement Tips"</p>
            <BulletList items=tips />
        </div>
    }
}

#[component]
pub fn BulletList(items: Vec<String>) -> impl IntoView {
    view! {
        <ul class="bullet-list">
            {items.into_iter().map(|item| view! { <li>{item}</li> }).collect::<Vec<_>>()}
        </ul>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> AnalysisResult {
        AnalysisResult {
            selected: true,
            score: 82.0,
            skills_found: vec!["Python".into()],
            missing_skills: vec!["Go".into()],
            interview_questions: vec!["Q1".into(), "Q2".into()],
            resume_suggestions: vec!["Add metrics".into()],
        }
    }

    #[test]
    fn test_report_text_for_shortlisted_result() {
        let text = ReportText::new(&result());
        assert_eq!(text.verdict.text(), "✅ Shortlisted");
        assert_eq!(text.score, "82%");
        assert_eq!(text.skills_found, "Python");
        assert_eq!(text.missing_skills, "Go");
        assert_eq!(text.questions, vec!["Q1", "Q2"]);
    }

    #[test]
    fn test_skills_are_comma_joined() {
        let mut r = result();
        r.selected = false;
        r.skills_found = vec!["python".into(), "sql".into(), "docker".into()];
        r.missing_skills.clear();
        let text = ReportText::new(&r);
        assert_eq!(text.verdict, Verdict::Rejected);
        assert_eq!(text.skills_found, "python, sql, docker");
        assert_eq!(text.missing_skills, "");
    }

    #[test]
    fn test_fractional_score() {
        let mut r = result();
        r.score = 67.35;
        assert_eq!(ReportText::new(&r).score, "67.35%");
    }
}
