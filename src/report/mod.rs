// ABOUTME: Report data model consumed by the template renderer
// ABOUTME: Defines general report information, the captured exception and report file loading

pub mod error;
pub mod exception;

pub use error::{ReportError, Result};
pub use exception::SerializableException;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tokio::fs;

use crate::info::EnvironmentInfo;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Descriptive information recorded when a report is captured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    #[serde(default, deserialize_with = "scalar_text")]
    pub host_application: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub host_application_version: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub runtime_version: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub library_version: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub date_time: Option<String>,

    #[serde(default, deserialize_with = "scalar_text")]
    pub user_description: Option<String>,
}

/// Unquoted YAML scalars such as `1.4` arrive as numbers; keep them as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

impl GeneralInfo {
    /// Fill in everything the environment knows; the user description stays empty.
    pub fn collect(environment: &EnvironmentInfo) -> Self {
        Self {
            host_application: environment.app_product().map(str::to_string),
            host_application_version: environment.product_version().map(str::to_string),
            runtime_version: Some(environment.runtime_version().to_string()),
            library_version: Some(crate::VERSION.to_string()),
            date_time: Some(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()),
            user_description: None,
        }
    }

    pub fn with_user_description(mut self, description: impl Into<String>) -> Self {
        self.user_description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub general_info: GeneralInfo,

    #[serde(default)]
    pub exception: Option<SerializableException>,
}

impl Report {
    pub fn new(general_info: GeneralInfo) -> Self {
        Self {
            general_info,
            exception: None,
        }
    }

    pub fn with_exception(mut self, exception: SerializableException) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn general_info(&self) -> &GeneralInfo {
        &self.general_info
    }

    pub fn exception(&self) -> Option<&SerializableException> {
        self.exception.as_ref()
    }

    /// Parse a report, as JSON when `format_hint` is `json` and YAML otherwise.
    pub fn parse(content: &str, format_hint: Option<&str>) -> Result<Self> {
        match format_hint {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(serde_json::from_str(content)?),
            _ => Ok(serde_yaml::from_str(content)?),
        }
    }

    /// Load a report file, choosing the format from its extension.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).await?;
        let extension = path.extension().and_then(|ext| ext.to_str());
        Self::parse(&content, extension)
    }
}
