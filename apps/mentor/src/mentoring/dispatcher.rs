//! Response Dispatcher: routes a classified query to the right mentoring template.
//!
//! Routing is an ordered table checked top to bottom. A route matches when the category
//! *contains* one of its triggers, and the first match wins. A label carrying two
//! triggers, like `"Test case failures and IDE issue"`, therefore resolves to the earlier row.

use tracing::info;

use crate::llm_client::{ChatModel, LlmError};
use crate::mentoring::prompts::{
    CONCEPTUAL_DOUBT_SYSTEM, IDE_ISSUE_SYSTEM, IMPLEMENTATION_GUIDANCE_SYSTEM,
    PUBLISHING_ISSUE_SYSTEM, SPECIFIC_ERROR_FIX_SYSTEM, TEST_CASE_ANALYSIS_SYSTEM,
};

/// Returned verbatim when no route matches. Signals that a human mentor should take over.
pub const MENTOR_REQUIRED: &str = "<mentor_required>";

/// How much of the request is sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMode {
    /// Summary, question record and the student's code.
    IssueContext,
    /// Only the classifier's summary of the query.
    SummaryOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    TestCaseAnalysis,
    SpecificErrorFix,
    PublishingIssue,
    IdeIssue,
    ConceptualDoubt,
    ImplementationGuidance,
}

impl Template {
    pub fn system_prompt(self) -> &'static str {
        match self {
            Template::TestCaseAnalysis => TEST_CASE_ANALYSIS_SYSTEM,
            Template::SpecificErrorFix => SPECIFIC_ERROR_FIX_SYSTEM,
            Template::PublishingIssue => PUBLISHING_ISSUE_SYSTEM,
            Template::IdeIssue => IDE_ISSUE_SYSTEM,
            Template::ConceptualDoubt => CONCEPTUAL_DOUBT_SYSTEM,
            Template::ImplementationGuidance => IMPLEMENTATION_GUIDANCE_SYSTEM,
        }
    }
}

#[derive(Debug)]
pub struct Route {
    pub triggers: &'static [&'static str],
    pub context: ContextMode,
    pub template: Template,
}

impl Route {
    fn matches(&self, category: &str) -> bool {
        self.triggers.iter().any(|t| category.contains(t))
    }
}

// Order is significant.
pub static ROUTES: &[Route] = &[
    Route {
        triggers: &["Test case failures", "Unexpected output", "Mistakes Explanation"],
        context: ContextMode::IssueContext,
        template: Template::TestCaseAnalysis,
    },
    // The classifier taxonomy never emits this label; kept until the taxonomy is settled.
    Route {
        triggers: &["Fix specific errors"],
        context: ContextMode::IssueContext,
        template: Template::SpecificErrorFix,
    },
    Route {
        triggers: &["Code publishing issue"],
        context: ContextMode::SummaryOnly,
        template: Template::PublishingIssue,
    },
    Route {
        triggers: &["IDE issue"],
        context: ContextMode::SummaryOnly,
        template: Template::IdeIssue,
    },
    Route {
        triggers: &["Conceptual doubts"],
        context: ContextMode::SummaryOnly,
        template: Template::ConceptualDoubt,
    },
    Route {
        triggers: &["Problem solving approach", "Implementation guidance"],
        context: ContextMode::IssueContext,
        template: Template::ImplementationGuidance,
    },
];

/// First route whose triggers appear in `category`, if any.
pub fn route_for(category: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.matches(category))
}

/// Produces the mentoring reply for a classified query.
///
/// Makes at most one model call. Unrouted categories return [`MENTOR_REQUIRED`] without
/// touching the model.
pub async fn dispatch(
    model: &dyn ChatModel,
    category: &str,
    issue_context: &str,
    query_summary: &str,
) -> Result<String, LlmError> {
    let Some(route) = route_for(category) else {
        info!(category, "No mentoring route matched; handing off to a mentor");
        return Ok(MENTOR_REQUIRED.to_string());
    };

    info!(category, template = ?route.template, context = ?route.context, "Dispatching query");

    let user_content = match route.context {
        ContextMode::IssueContext => issue_context,
        ContextMode::SummaryOnly => query_summary,
    };

    model
        .complete(route.template.system_prompt(), user_content)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::mentoring::QueryCategory;

    #[test]
    fn test_every_taxonomy_label_routes_as_expected() {
        let expected = [
            (QueryCategory::TestCaseFailures, Some(Template::TestCaseAnalysis)),
            (QueryCategory::MistakesExplanation, Some(Template::TestCaseAnalysis)),
            (QueryCategory::UnexpectedOutput, Some(Template::TestCaseAnalysis)),
            (QueryCategory::FixSpecificErrors, Some(Template::SpecificErrorFix)),
            (QueryCategory::CodePublishingIssue, Some(Template::PublishingIssue)),
            (QueryCategory::IdeIssue, Some(Template::IdeIssue)),
            (QueryCategory::ConceptualDoubts, Some(Template::ConceptualDoubt)),
            (QueryCategory::ProblemSolvingApproach, Some(Template::ImplementationGuidance)),
            (QueryCategory::ImplementationGuidance, Some(Template::ImplementationGuidance)),
            (QueryCategory::Other, None),
        ];
        for (category, template) in expected {
            assert_eq!(
                route_for(category.label()).map(|r| r.template),
                template,
                "{}",
                category.label()
            );
        }
    }

    #[test]
    fn test_first_match_wins_for_combined_labels() {
        let route = route_for("Test case failures and IDE issue").unwrap();
        assert_eq!(route.template, Template::TestCaseAnalysis);

        let route = route_for("IDE issue / Conceptual doubts").unwrap();
        assert_eq!(route.template, Template::IdeIssue);
    }

    #[test]
    fn test_embellished_label_still_matches() {
        let route = route_for("Category: Conceptual doubts (recursion)").unwrap();
        assert_eq!(route.template, Template::ConceptualDoubt);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(route_for("ide issue").is_none());
    }

    #[test]
    fn test_context_modes() {
        assert_eq!(route_for("IDE issue").unwrap().context, ContextMode::SummaryOnly);
        assert_eq!(
            route_for("Code publishing issue").unwrap().context,
            ContextMode::SummaryOnly
        );
        assert_eq!(
            route_for("Fix specific errors").unwrap().context,
            ContextMode::IssueContext
        );
        assert_eq!(
            route_for("Problem solving approach").unwrap().context,
            ContextMode::IssueContext
        );
    }

    #[tokio::test]
    async fn test_unrouted_category_returns_sentinel_without_calling_model() {
        let model = ScriptedModel::new();

        let reply = dispatch(&model, "Other", "full context", "summary")
            .await
            .unwrap();

        assert_eq!(reply, MENTOR_REQUIRED);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_issue_context_route_sends_full_context() {
        let model = ScriptedModel::with_replies(["Check your loop bounds."]);

        let reply = dispatch(&model, "Test case failures", "FULL CONTEXT", "SUMMARY")
            .await
            .unwrap();

        assert_eq!(reply, "Check your loop bounds.");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, TEST_CASE_ANALYSIS_SYSTEM);
        assert_eq!(calls[0].1, "FULL CONTEXT");
    }

    #[tokio::test]
    async fn test_summary_route_omits_code() {
        let model = ScriptedModel::with_replies(["Restart the workspace."]);

        dispatch(&model, "IDE issue", "FULL CONTEXT with code", "Editor will not load")
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls[0].0, IDE_ISSUE_SYSTEM);
        assert_eq!(calls[0].1, "Editor will not load");
    }

    #[tokio::test]
    async fn test_reply_is_returned_verbatim() {
        let raw = "  <think>hmm</think>\n\n**Step 1**: ...  \n";
        let model = ScriptedModel::with_replies([raw]);

        let reply = dispatch(&model, "Conceptual doubts", "", "What is a closure?")
            .await
            .unwrap();

        assert_eq!(reply, raw);
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = ScriptedModel::new();
        model.push_api_error(429);

        let err = dispatch(&model, "Implementation guidance", "ctx", "sum")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 429, .. }));
    }
}
