//! Interview answer practice.
//!
//! The panel only renders and edits state; the owning view decides what is
//! submitted and where the response goes.

use leptos::prelude::*;

use crate::components::analysis_report::BulletList;
use crate::models::{format_score, Evaluation};
use crate::request::Tracked;

#[component]
pub fn EvaluationPanel(
    /// The question being answered (the first interview question).
    #[prop(into)]
    question: Signal<Option<String>>,
    /// Answer draft.
    answer: RwSignal<String>,
    /// Evaluation request state.
    evaluation: RwSignal<Tracked<Evaluation>>,
    /// Set while the question itself is being replaced by a new analysis.
    #[prop(into)]
    locked: Signal<bool>,
    /// Invoked when the user asks for the answer to be graded.
    on_submit: Callback<()>,
) -> impl IntoView {
    let pending = move || evaluation.with(|s| s.is_pending());
    let can_submit = move || question.with(|q| q.is_some()) && !pending() && !locked.get();

    view! {
        <div class="evaluation-panel">
            <p class="section-title">"Practice Your Answer"</p>

            {move || match question.get() {
                Some(q) => view! { <p class="evaluation-question">{q}</p> }.into_any(),
                None => view! {
                    <p class="evaluation-question evaluation-empty">"No interview questions to practice."</p>
                }.into_any(),
            }}

            <textarea
                class="input answer-input"
                rows="4"
                placeholder="Type your answer here..."
                prop:value=move || answer.get()
                on:input=move |ev| answer.set(event_target_value(&ev))
            ></textarea>

            <button
                class="btn btn-primary"
                on:click=move |_| on_submit.run(())
                disabled=move || !can_submit()
            >
                {move || if pending() { "Evaluating..." } else { "Evaluate Answer" }}
            </button>

            {move || evaluation.with(|s| s.error().map(|err| view! {
                <p class="status-text status-error">{err.to_string()}</p>
            }))}

            {move || evaluation.with(|s| s.value().cloned()).map(|eval| view! {
                <EvaluationResult evaluation=eval />
            })}
        </div>
    }
}

#[component]
fn EvaluationResult(evaluation: Evaluation) -> impl IntoView {
    view! {
        <div class="evaluation-result">
            <p>"Answer Score: " <b>{format_score(evaluation.score)}</b></p>
            <p class="section-title">"Feedback"</p>
            <BulletList items=evaluation.feedback.items() />
        </div>
    }
}
