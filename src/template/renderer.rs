// ABOUTME: Template renderer substituting built-in and custom tokens in one pass
// ABOUTME: Resolves every token value up front, then scans the template once for placeholders

use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::context::RenderContext;
use super::error::Result;
use super::tokens::{self, TokenRegistry, TokenValue};
use crate::info::{self, EnvironmentInfo};
use crate::report::{Report, SerializableException};

pub struct TemplateRenderer<'a> {
    context: RenderContext<'a>,
    environment: &'a EnvironmentInfo,
    tokens: TokenRegistry,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a renderer backed by the process-wide environment.
    pub fn new(report: &'a Report, exception: Option<&'a SerializableException>) -> Self {
        Self::with_environment(report, exception, info::environment())
    }

    pub fn with_environment(
        report: &'a Report,
        exception: Option<&'a SerializableException>,
        environment: &'a EnvironmentInfo,
    ) -> Self {
        Self {
            context: RenderContext::new(report, exception),
            environment,
            tokens: TokenRegistry::new(),
        }
    }

    pub fn context(&self) -> &RenderContext<'a> {
        &self.context
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// Add a custom token such as `{bugid}`. A later call with the same name replaces
    /// the value, and custom tokens take precedence over built-ins of the same name.
    pub fn add_token(&mut self, name: &str, value: impl Into<String>) -> Result<Option<TokenValue>> {
        self.tokens.register(name, value.into())
    }

    /// Add a custom token whose value is computed on every render.
    pub fn add_computed_token<F>(&mut self, name: &str, f: F) -> Result<Option<TokenValue>>
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.tokens.register_fn(name, f)
    }

    /// Resolve all known tokens. Tokens without a value are left out, and a custom
    /// token without a value does not hide the built-in of the same name.
    pub fn resolve_tokens(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();

        let builtins = self
            .environment_values()
            .into_iter()
            .chain(self.context.report_values())
            .chain(self.context.exception_values());
        for (token, value) in builtins {
            if let Some(value) = value {
                values.insert(token.to_string(), value);
            }
        }

        for (token, value) in self.tokens.iter() {
            if let Some(resolved) = value.resolve() {
                values.insert(token.to_string(), resolved);
            }
        }

        values
    }

    /// Replace every known token in `template` with its value.
    ///
    /// Tokens without a value stay in the output as written.
    pub fn render(&self, template: &str) -> String {
        let values = self.resolve_tokens();
        let (output, replaced) = substitute(template, &values);
        debug!(
            "Rendered template: {} tokens resolved, {} placeholders replaced",
            values.len(),
            replaced
        );
        output
    }

    fn environment_values(&self) -> Vec<(&'static str, Option<String>)> {
        let env = self.environment;

        let local_ip = match env.local_ip() {
            Ok(address) => Some(address.to_string()),
            Err(e) => {
                warn!("Leaving {} unresolved: {}", tokens::MACHINE_IP, e);
                None
            }
        };

        vec![
            (tokens::APP_COMPANY, env.app_company().map(str::to_string)),
            (tokens::APP_PATH, env.app_path().map(str::to_string)),
            (
                tokens::APP_BUILD_DATE,
                env.app_build_date().map(str::to_string),
            ),
            (
                tokens::APP_CULTURE,
                Some(env.current_culture().to_string()),
            ),
            (tokens::MACHINE_NAME, env.machine_name().map(str::to_string)),
            (tokens::MACHINE_IP, local_ip),
            (tokens::MACHINE_USER, Some(env.current_user().to_string())),
            (
                tokens::SUBMISSION_DATE,
                Some(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()),
            ),
        ]
    }
}

/// Substitute `{...}` spans found in `values`, scanning `template` once.
///
/// Inserted values are never scanned again, so a value that itself looks like a
/// token is emitted literally. Returns the output and the number of replacements.
pub fn substitute(template: &str, values: &HashMap<String, String>) -> (String, usize) {
    let mut output = String::with_capacity(template.len());
    let mut replaced = 0;
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let candidate = &rest[open..];

        // A span ends at the first closing brace unless another opening brace comes first.
        match candidate[1..].find(['{', '}']) {
            Some(offset) if candidate.as_bytes()[offset + 1] == b'}' => {
                let token = &candidate[..offset + 2];
                match values.get(token) {
                    Some(value) => {
                        output.push_str(value);
                        replaced += 1;
                    }
                    None => output.push_str(token),
                }
                rest = &candidate[offset + 2..];
            }
            _ => {
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    (output, replaced)
}
