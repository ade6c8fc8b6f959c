use leptos::prelude::*;

/// Shortlisting decision returned with an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Shortlisted,
    Rejected,
}

impl Verdict {
    pub fn from_selected(selected: bool) -> Self {
        if selected {
            Verdict::Shortlisted
        } else {
            Verdict::Rejected
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Verdict::Shortlisted => "\u{2705} Shortlisted",
            Verdict::Rejected => "\u{274C} Rejected",
        }
    }
}

#[component]
pub fn VerdictBadge(verdict: Verdict) -> impl IntoView {
    let class = match verdict {
        Verdict::Shortlisted => "verdict-badge verdict-shortlisted",
        Verdict::Rejected => "verdict-badge verdict-rejected",
    };

    view! {
        <p class=class>{verdict.text()}</p>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_text() {
        assert_eq!(Verdict::from_selected(true).text(), "✅ Shortlisted");
        assert_eq!(Verdict::from_selected(false).text(), "❌ Rejected");
    }
}
