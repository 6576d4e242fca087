//! User message templates wrapping the query and session context

/// Classifier user message
pub(crate) const CLASSIFY: &str = r"Query: {{ query }}

Reply with the single label token only.";

/// Company analyzer user message
pub(crate) const ANALYZE_COMPANY: &str = r"Research request: {{ query }}";

/// PDF analyzer user message
///
/// `text` is the extracted document text, already truncated to the
/// configured character limit by the caller.
pub(crate) const ANALYZE_DOCUMENT: &str = r"Document: {{ name }}

--- BEGIN DOCUMENT TEXT ---
{{ text }}
--- END DOCUMENT TEXT ---

Question about this document: {{ query }}";

/// Research recommender user message
pub(crate) const PLAN_RESEARCH: &str = r"Build a research plan for: {{ query }}";
