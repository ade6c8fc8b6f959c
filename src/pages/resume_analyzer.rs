//! Resume analyzer page.
//!
//! Users pick a resume and a role, get a matching report, and can practice
//! an answer to the first generated interview question.

use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;

use crate::api::{ApiClient, PredictRequest, ResumeUpload};
use crate::components::analysis_report::{AnalysisSummary, ResumeTips};
use crate::components::evaluation_panel::EvaluationPanel;
use crate::components::history_chart::HistoryChart;
use crate::components::resume_drop_zone::ResumeDropZone;
use crate::config::AppConfig;
use crate::dom;
use crate::error::ClientError;
use crate::models::{AnalysisResult, EvaluateRequest, Evaluation, Role};
use crate::request::{begin_in, reset_in, settle_in, RequestId, Tracked};

/// Build the evaluation for the question currently on screen. Refused while
/// a re-analysis is in flight, since the question may be about to change.
pub fn evaluation_request(
    analysis: &Tracked<AnalysisResult>,
    answer: &str,
) -> Result<EvaluateRequest, ClientError> {
    if analysis.is_pending() {
        return Err(ClientError::AnalysisPending);
    }
    match analysis.value() {
        Some(result) => EvaluateRequest::for_result(result, answer),
        None => Err(ClientError::NoQuestion),
    }
}

/// Settle an analysis response. Once it is applied the questions on screen
/// may differ, so any grade (or grading in flight) is dropped with it.
pub fn settle_analysis(
    analysis: RwSignal<Tracked<AnalysisResult>>,
    evaluation: RwSignal<Tracked<Evaluation>>,
    id: RequestId,
    outcome: Result<AnalysisResult, String>,
) {
    if settle_in(analysis, id, outcome) {
        reset_in(evaluation);
    }
}

#[component]
pub fn ResumeAnalyzerPage() -> impl IntoView {
    let config = StoredValue::new(expect_context::<AppConfig>());

    let (upload, set_upload) = signal::<Option<ResumeUpload>>(None);
    let (role, set_role) = signal(Role::default());
    let analysis = RwSignal::new(Tracked::<AnalysisResult>::new());
    let answer = RwSignal::new(String::new());
    let evaluation = RwSignal::new(Tracked::<Evaluation>::new());

    let on_analyze = move |_| {
        let request = match upload.with(|u| PredictRequest::prepare(u.as_ref(), role.get())) {
            Ok(request) => request,
            Err(e) => {
                dom::alert(&e.to_string());
                return;
            }
        };
        let Some(id) = begin_in(analysis) else {
            return;
        };
        // Questions are about to change; an older grade no longer applies.
        reset_in(evaluation);

        let client = ApiClient::new(config.get_value());
        spawn_local(async move {
            let outcome = client.predict(&request).await.map_err(|e| {
                warn!("Resume analysis failed: {}", e);
                e.to_string()
            });
            settle_analysis(analysis, evaluation, id, outcome);
        });
    };

    let on_evaluate = Callback::new(move |_: ()| {
        let request = analysis.with_untracked(|state| {
            answer.with_untracked(|text| evaluation_request(state, text))
        });
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                warn!("Evaluation not sent: {}", e);
                return;
            }
        };
        let Some(id) = begin_in(evaluation) else {
            return;
        };

        let client = ApiClient::new(config.get_value());
        spawn_local(async move {
            let outcome = client.evaluate(&request).await.map_err(|e| {
                warn!("Answer evaluation failed: {}", e);
                e.to_string()
            });
            settle_in(evaluation, id, outcome);
        });
    });

    let has_result = move || analysis.with(|s| s.value().is_some());
    let analyzing = Signal::derive(move || analysis.with(|s| s.is_pending()));
    let first_question = Signal::derive(move || {
        analysis.with(|s| s.value().and_then(|r| r.first_question().map(str::to_string)))
    });

    view! {
        <div class="page resume-analyzer-page">
            <style>{include_str!("resume_analyzer.css")}</style>

            <div class="analyzer-card">
                <h2>"AI Resume Intelligence"</h2>

                <label class="field-label" for="role-select">"Job Role"</label>
                <select
                    id="role-select"
                    class="input"
                    on:change=move |ev| set_role.set(Role::from_value(&event_target_value(&ev)))
                >
                    {Role::ALL.into_iter().map(|r| view! {
                        <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option>
                    }).collect::<Vec<_>>()}
                </select>

                <ResumeDropZone
                    selected=Signal::derive(move || upload.with(|u| u.as_ref().map(|u| u.file_name.clone())))
                    on_file=Callback::new(move |file: ResumeUpload| set_upload.set(Some(file)))
                />

                <button
                    class="btn btn-primary btn-block"
                    on:click=on_analyze
                    disabled=analyzing
                >
                    {move || if analyzing.get() { "Analyzing..." } else { "Analyze Resume" }}
                </button>

                {move || analysis.with(|s| s.error().map(|err| view! {
                    <div class="error-message">
                        <p>{format!("Analysis failed: {}", err)}</p>
                    </div>
                }))}

                <Show when=has_result>
                    <div class="analysis-results">
                        {move || analysis.with(|s| s.value().cloned()).map(|result| {
                            let tips = result.resume_suggestions.clone();
                            view! {
                                <AnalysisSummary result=result />
                                <EvaluationPanel
                                    question=first_question
                                    answer=answer
                                    evaluation=evaluation
                                    locked=analyzing
                                    on_submit=on_evaluate
                                />
                                <ResumeTips tips=tips />
                            }
                        })}
                        <HistoryChart />
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Feedback;
    use crate::request::Settled;

    fn result(question: &str) -> AnalysisResult {
        AnalysisResult {
            selected: true,
            score: 80.0,
            skills_found: vec![],
            missing_skills: vec![],
            interview_questions: vec![question.to_string()],
            resume_suggestions: vec![],
        }
    }

    fn grade(score: f64) -> Evaluation {
        Evaluation {
            score,
            feedback: Feedback::Single("ok".into()),
        }
    }

    #[test]
    fn test_evaluation_is_refused_while_reanalysing() {
        let (state, id) = Tracked::new().begin();
        let state = match state.settle(id, Ok(result("OLD Q"))) {
            Settled::Applied(next) => next,
            Settled::Stale => panic!("first analysis should apply"),
        };
        let request = evaluation_request(&state, "my answer").unwrap();
        assert_eq!(request.question, "OLD Q");

        let (state, _) = state.begin();
        assert_eq!(
            evaluation_request(&state, "my answer"),
            Err(ClientError::AnalysisPending),
            "old question is still shown but must not be graded"
        );
    }

    #[test]
    fn test_evaluation_needs_a_result() {
        assert_eq!(
            evaluation_request(&Tracked::new(), "answer"),
            Err(ClientError::NoQuestion)
        );
    }

    #[test]
    fn test_new_analysis_drops_grade_for_old_question() {
        let analysis = RwSignal::new(Tracked::<AnalysisResult>::new());
        let evaluation = RwSignal::new(Tracked::<Evaluation>::new());

        let first = begin_in(analysis).unwrap();
        settle_analysis(analysis, evaluation, first, Ok(result("OLD Q")));

        // Re-analyse, and grade the old question while that is in flight.
        let second = begin_in(analysis).unwrap();
        let grading = begin_in(evaluation).unwrap();

        settle_analysis(analysis, evaluation, second, Ok(result("NEW Q")));
        assert!(
            !evaluation.with_untracked(|s| s.is_pending()),
            "applying the new analysis cancels grading"
        );

        assert!(
            !settle_in(evaluation, grading, Ok(grade(70.0))),
            "grade for OLD Q arrives late and is dropped"
        );
        assert_eq!(evaluation.with_untracked(|s| s.value().cloned()), None);
        assert_eq!(
            analysis.with_untracked(|s| s.value().and_then(|r| r.first_question().map(str::to_string))),
            Some("NEW Q".to_string())
        );
    }

    #[test]
    fn test_stale_analysis_keeps_current_grade() {
        let analysis = RwSignal::new(Tracked::<AnalysisResult>::new());
        let evaluation = RwSignal::new(Tracked::<Evaluation>::new());

        let first = begin_in(analysis).unwrap();
        let second = begin_in(analysis).unwrap();
        settle_analysis(analysis, evaluation, second, Ok(result("Q")));

        let grading = begin_in(evaluation).unwrap();
        assert!(settle_in(evaluation, grading, Ok(grade(55.0))));

        settle_analysis(analysis, evaluation, first, Ok(result("OLDER Q")));
        assert_eq!(
            evaluation.with_untracked(|s| s.value().map(|e| e.score)),
            Some(55.0),
            "a dropped analysis response leaves the grade alone"
        );
    }
}
