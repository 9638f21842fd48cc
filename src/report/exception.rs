// ABOUTME: Serializable snapshot of a captured error
// ABOUTME: Holds type, message, call site, stack trace and ordered extended diagnostics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableException {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub target_site: Option<String>,

    #[serde(default)]
    pub stack_trace: Option<String>,

    #[serde(default)]
    pub extended_information: Option<IndexMap<String, String>>,
}

impl SerializableException {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Capture `error` together with a backtrace of the current thread.
    ///
    /// The source is the crate path of the error type and the `source()` chain
    /// is recorded as `cause.0`, `cause.1`, ... extended entries.
    pub fn from_error<E: Error + 'static>(error: &E) -> Self {
        let type_name = std::any::type_name::<E>();
        let source = type_name.split("::").next().map(str::to_string);

        let mut causes = IndexMap::new();
        let mut current = error.source();
        while let Some(cause) = current {
            causes.insert(format!("cause.{}", causes.len()), cause.to_string());
            current = cause.source();
        }

        Self {
            source,
            type_name: Some(type_name.to_string()),
            message: Some(error.to_string()),
            target_site: None,
            stack_trace: Some(Backtrace::force_capture().to_string()),
            extended_information: (!causes.is_empty()).then_some(causes),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target_site(mut self, target_site: impl Into<String>) -> Self {
        self.target_site = Some(target_site.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Append an extended diagnostic pair, keeping insertion order.
    pub fn with_extended_information(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.extended_information
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Extended pairs as `key=value` lines joined with the platform line separator,
    /// or `None` when there are no pairs.
    pub fn extended_information_text(&self) -> Option<String> {
        let pairs = self.extended_information.as_ref()?;
        if pairs.is_empty() {
            return None;
        }

        let lines: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        Some(lines.join(super::LINE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LINE_SEPARATOR;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "inner failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    impl Error for Inner {}

    #[test]
    fn test_extended_information_text() {
        let exception = SerializableException::new("app::Error", "boom")
            .with_extended_information("k1", "v1")
            .with_extended_information("k2", "v2");

        assert_eq!(
            exception.extended_information_text(),
            Some(format!("k1=v1{}k2=v2", LINE_SEPARATOR))
        );
    }

    #[test]
    fn test_missing_or_empty_extended_information() {
        let mut exception = SerializableException::new("app::Error", "boom");
        assert_eq!(exception.extended_information_text(), None);

        exception.extended_information = Some(IndexMap::new());
        assert_eq!(exception.extended_information_text(), None);
    }

    #[test]
    fn test_from_error_captures_chain() {
        let exception = SerializableException::from_error(&Outer(Inner));

        assert_eq!(exception.message.as_deref(), Some("outer failed"));
        assert!(exception.type_name.as_deref().unwrap().ends_with("Outer"));
        assert_eq!(exception.source.as_deref(), Some("crashplate"));
        assert!(exception.stack_trace.is_some());

        let extended = exception.extended_information.unwrap();
        assert_eq!(extended.get("cause.0"), Some(&"inner failed".to_string()));
        assert_eq!(extended.len(), 1);
    }

    #[test]
    fn test_from_error_without_causes() {
        let exception = SerializableException::from_error(&Inner);
        assert_eq!(exception.extended_information, None);
    }
}
