//! Prompt templates for the research assistant
//!
//! Templates are organized into:
//! - `system`: system prompts for the classifier and each agent
//! - `user`: user message templates wrapping the query and context
//!
//! Every template is a minijinja source rendered through [`PromptCatalog`].
//! Agents never format prompt text inline; they render a named template so
//! the wording lives in one place.

mod system;
mod user;

use finsight_core::{Error, Result};
use minijinja::Environment;
use std::collections::HashMap;

/// Template names paired with their sources
const TEMPLATES: [(&str, &str); 9] = [
    ("classifier.system", system::CLASSIFIER),
    ("classifier.user", user::CLASSIFY),
    ("company.system", system::COMPANY_ANALYZER),
    ("company.user", user::ANALYZE_COMPANY),
    ("pdf.system", system::PDF_ANALYZER),
    ("pdf.user", user::ANALYZE_DOCUMENT),
    ("research.system", system::RESEARCH_RECOMMENDER),
    ("research.user", user::PLAN_RESEARCH),
    ("chat.system", system::GENERAL_CHAT),
];

/// Named prompt templates rendered on demand
///
/// Rendering is stateless: each call builds a fresh environment and renders
/// the named source against the supplied variables. Unknown names and
/// rendering failures surface as [`Error::Prompt`].
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    templates: HashMap<&'static str, &'static str>,
}

impl PromptCatalog {
    /// Create a catalog holding every registered template
    pub fn new() -> Self {
        Self {
            templates: TEMPLATES.iter().copied().collect(),
        }
    }

    /// Names of all registered templates, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.templates.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Whether a template with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render a template against the supplied variables
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] if no template has this name or the
    /// source fails to render.
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        let source = self
            .templates
            .get(name)
            .ok_or_else(|| Error::Prompt(format!("unknown template '{name}'")))?;

        // A fresh environment per render avoids lifetime issues
        let env = Environment::new();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(source, value)
            .map_err(|e| Error::Prompt(format!("template '{name}': {e}")))
    }

    /// Check that every template source parses and renders
    ///
    /// # Errors
    ///
    /// Returns [`Error::Prompt`] naming the first template that fails.
    pub fn validate(&self) -> Result<()> {
        let env = Environment::new();
        for (name, source) in &self.templates {
            env.render_str(source, ())
                .map_err(|e| Error::Prompt(format!("template '{name}': {e}")))?;
        }
        Ok(())
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::new()
    }
}
