// Mentoring pipeline: classify the student's query, then route it to a mentoring template.
// All model calls go through llm_client::ChatModel.

pub mod classifier;
pub mod context;
pub mod dispatcher;
pub mod handlers;
pub mod prompts;

/// The support taxonomy the classifier is asked to choose from.
///
/// Classification results carry the raw label string; this enum names the labels the
/// classifier prompt advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCategory {
    TestCaseFailures,
    MistakesExplanation,
    UnexpectedOutput,
    FixSpecificErrors,
    CodePublishingIssue,
    IdeIssue,
    ConceptualDoubts,
    ProblemSolvingApproach,
    ImplementationGuidance,
    Other,
}

impl QueryCategory {
    pub const ALL: [QueryCategory; 10] = [
        QueryCategory::TestCaseFailures,
        QueryCategory::MistakesExplanation,
        QueryCategory::UnexpectedOutput,
        QueryCategory::FixSpecificErrors,
        QueryCategory::CodePublishingIssue,
        QueryCategory::IdeIssue,
        QueryCategory::ConceptualDoubts,
        QueryCategory::ProblemSolvingApproach,
        QueryCategory::ImplementationGuidance,
        QueryCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QueryCategory::TestCaseFailures => "Test case failures",
            QueryCategory::MistakesExplanation => "Mistakes Explanation",
            QueryCategory::UnexpectedOutput => "Unexpected output",
            QueryCategory::FixSpecificErrors => "Fix specific errors",
            QueryCategory::CodePublishingIssue => "Code publishing issue",
            QueryCategory::IdeIssue => "IDE issue",
            QueryCategory::ConceptualDoubts => "Conceptual doubts",
            QueryCategory::ProblemSolvingApproach => "Problem solving approach",
            QueryCategory::ImplementationGuidance => "Implementation guidance",
            QueryCategory::Other => "Other",
        }
    }

    /// One-line meaning shown to the classifier.
    pub fn description(self) -> &'static str {
        match self {
            QueryCategory::TestCaseFailures => "the student's code fails one or more test cases.",
            QueryCategory::MistakesExplanation => {
                "the student wants to know what is wrong with their code or why it errors."
            }
            QueryCategory::UnexpectedOutput => {
                "the code runs but prints or returns something other than expected."
            }
            QueryCategory::FixSpecificErrors => "the student needs a specific error message fixed.",
            QueryCategory::CodePublishingIssue => {
                "trouble publishing, deploying, or submitting a project."
            }
            QueryCategory::IdeIssue => {
                "trouble with the online editor, workspace, terminal, or environment setup."
            }
            QueryCategory::ConceptualDoubts => {
                "a question about a programming concept, not about their specific code."
            }
            QueryCategory::ProblemSolvingApproach => {
                "the student is stuck on how to approach the problem."
            }
            QueryCategory::ImplementationGuidance => {
                "the student knows the approach but needs help implementing it."
            }
            QueryCategory::Other => "anything that does not fit the categories above.",
        }
    }

    /// Whether the classification prompt offers this label.
    ///
    /// `Fix specific errors` is routable but not offered; error questions are classified
    /// as `Mistakes Explanation` instead.
    pub fn offered_to_classifier(self) -> bool {
        self != QueryCategory::FixSpecificErrors
    }
}
