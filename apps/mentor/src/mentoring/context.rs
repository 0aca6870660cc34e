use crate::questions::QuestionRecord;

/// Stand-in for the user code when the archive could not be extracted.
pub const NO_CODE_PROVIDED: &str = "No code provided";

/// Composes the full issue context sent to routes that need the student's code.
///
/// Built fresh per request; order is summary, question, then code.
pub fn build_issue_context(
    query_summary: &str,
    question: &QuestionRecord,
    user_code: &str,
) -> String {
    format!("User Query: {query_summary}, Question details: {question}, User code: {user_code}")
}
