use std::collections::BTreeMap;

use minijinja::{Environment, Value};

use crate::{error::Result, models::Metadata};

/// Renders block markup through the per-block template and the concatenation
/// through the main template.
///
/// Both templates see the note metadata as variables, plus `content`.
pub struct TemplateEngine {
    env: Environment<'static>,
    job_template: String,
    main_template: String,
}

impl TemplateEngine {
    pub const DEFAULT_TEMPLATE: &'static str = "{{ content }}";
    pub const CONTENT_VAR: &'static str = "content";

    const JOB_NAME: &'static str = "job.tex";
    const MAIN_NAME: &'static str = "main.tex";

    pub fn new(job_template: impl Into<String>, main_template: impl Into<String>) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self {
            env,
            job_template: job_template.into(),
            main_template: main_template.into(),
        }
    }

    fn vars(content: &str, metadata: &Metadata) -> BTreeMap<String, Value> {
        let mut vars: BTreeMap<String, Value> = metadata
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
            .collect();
        vars.insert(Self::CONTENT_VAR.to_string(), Value::from(content));
        vars
    }

    pub fn render_job(&self, markup: &str, metadata: &Metadata) -> Result<String> {
        Ok(self.env.render_named_str(
            Self::JOB_NAME,
            &self.job_template,
            Self::vars(markup, metadata),
        )?)
    }

    pub fn render_main(&self, content: &str, metadata: &Metadata) -> Result<String> {
        Ok(self.env.render_named_str(
            Self::MAIN_NAME,
            &self.main_template,
            Self::vars(content, metadata),
        )?)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPLATE, Self::DEFAULT_TEMPLATE)
    }
}
