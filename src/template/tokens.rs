// ABOUTME: Token names and the caller-extensible token registry
// ABOUTME: Maps delimited token names to literal values or value-producing functions

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{Result, TemplateError};

pub const APP_NAME: &str = "{app.name}";
pub const APP_COMPANY: &str = "{app.company}";
pub const APP_VERSION: &str = "{app.version}";
pub const APP_PATH: &str = "{app.path}";
pub const APP_BUILD_DATE: &str = "{app.builddate}";
pub const APP_CULTURE: &str = "{app.culture}";

pub const MACHINE_NAME: &str = "{machine.name}";
pub const MACHINE_IP: &str = "{machine.ip}";
pub const MACHINE_USER: &str = "{machine.user}";

pub const CLR_VERSION: &str = "{clr.version}";
pub const NBUG_VERSION: &str = "{nbug.version}";
pub const EXCEPTION_DATE: &str = "{exception.date}";
pub const SUBMISSION_USER_COMMENT: &str = "{bug.submission.usercomment}";
pub const SUBMISSION_DATE: &str = "{bug.submission.date}";

pub const EXCEPTION_SOURCE: &str = "{exception.source}";
pub const EXCEPTION_TYPE: &str = "{exception.type}";
pub const EXCEPTION_MESSAGE: &str = "{exception.message}";
pub const EXCEPTION_TARGET: &str = "{exception.target}";
pub const EXCEPTION_STACKTRACE: &str = "{exception.stacktrace}";
pub const EXCEPTION_EXTENDED_INFORMATION: &str = "{exception.extendedinformation}";

/// Tokens taken from the bound exception; untouched when no exception is bound.
pub const EXCEPTION_TOKENS: &[&str] = &[
    EXCEPTION_SOURCE,
    EXCEPTION_TYPE,
    EXCEPTION_MESSAGE,
    EXCEPTION_TARGET,
    EXCEPTION_STACKTRACE,
    EXCEPTION_EXTENDED_INFORMATION,
];

/// Every token the renderer always recognizes.
pub const BUILTIN_TOKENS: &[&str] = &[
    APP_NAME,
    APP_COMPANY,
    APP_VERSION,
    APP_PATH,
    APP_BUILD_DATE,
    APP_CULTURE,
    MACHINE_NAME,
    MACHINE_IP,
    MACHINE_USER,
    CLR_VERSION,
    NBUG_VERSION,
    EXCEPTION_DATE,
    SUBMISSION_USER_COMMENT,
    SUBMISSION_DATE,
    EXCEPTION_SOURCE,
    EXCEPTION_TYPE,
    EXCEPTION_MESSAGE,
    EXCEPTION_TARGET,
    EXCEPTION_STACKTRACE,
    EXCEPTION_EXTENDED_INFORMATION,
];

type ValueFn = dyn Fn() -> Option<String> + Send + Sync;

/// How a token gets its value.
#[derive(Clone)]
pub enum TokenValue {
    Literal(String),
    Computed(Arc<ValueFn>),
}

impl TokenValue {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        TokenValue::Computed(Arc::new(f))
    }

    pub fn resolve(&self) -> Option<String> {
        match self {
            TokenValue::Literal(value) => Some(value.clone()),
            TokenValue::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            TokenValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Literal(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Literal(value.to_string())
    }
}

/// Normalize a token name to its delimited form, so `bugid` becomes `{bugid}`.
pub fn delimit(name: &str) -> Result<String> {
    let invalid = |reason: &str| TemplateError::InvalidToken {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let inner = match name.strip_prefix('{') {
        Some(rest) => rest
            .strip_suffix('}')
            .ok_or_else(|| invalid("missing closing brace"))?,
        None => name,
    };

    if inner.is_empty() {
        return Err(invalid("name is empty"));
    }
    if inner.contains(['{', '}']) {
        return Err(invalid("name contains a brace"));
    }

    Ok(format!("{{{}}}", inner))
}

/// Caller-defined tokens. Registering a name again replaces the earlier value.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, TokenValue>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `name`, returning the value it replaced.
    pub fn register(
        &mut self,
        name: &str,
        value: impl Into<TokenValue>,
    ) -> Result<Option<TokenValue>> {
        let token = delimit(name)?;
        Ok(self.tokens.insert(token, value.into()))
    }

    pub fn register_fn<F>(&mut self, name: &str, f: F) -> Result<Option<TokenValue>>
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        self.register(name, TokenValue::computed(f))
    }

    /// Look up `name` and invoke its resolver.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let token = delimit(name).ok()?;
        self.tokens.get(&token)?.resolve()
    }

    pub fn contains(&self, name: &str) -> bool {
        delimit(name)
            .map(|token| self.tokens.contains_key(&token))
            .unwrap_or(false)
    }

    pub fn remove(&mut self, name: &str) -> Option<TokenValue> {
        let token = delimit(name).ok()?;
        self.tokens.remove(&token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.tokens.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
