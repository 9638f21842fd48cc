// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides report builders, fixed environments and temporary file setup

#![allow(dead_code)]

use indexmap::IndexMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use crashplate::info::{EnvironmentInfo, InfoError, MachineFacts, MetadataSnapshot};
use crashplate::report::{GeneralInfo, Report, SerializableException};

pub struct TestReportBuilder {
    general_info: GeneralInfo,
    exception: Option<SerializableException>,
}

impl TestReportBuilder {
    pub fn new(application: &str) -> Self {
        Self {
            general_info: GeneralInfo {
                host_application: Some(application.to_string()),
                host_application_version: Some("1.4.2".to_string()),
                runtime_version: Some("Linux (x86_64)".to_string()),
                library_version: Some("0.1.0".to_string()),
                date_time: Some("2024-05-01 10:00:00".to_string()),
                user_description: None,
            },
            exception: None,
        }
    }

    pub fn with_user_description(mut self, description: &str) -> Self {
        self.general_info.user_description = Some(description.to_string());
        self
    }

    pub fn without_runtime_version(mut self) -> Self {
        self.general_info.runtime_version = None;
        self
    }

    pub fn with_exception(mut self, type_name: &str, message: &str) -> Self {
        self.exception = Some(
            SerializableException::new(type_name, message)
                .with_source("widget")
                .with_target_site("widget::storage::save")
                .with_stack_trace("at widget::storage::save\nat widget::main"),
        );
        self
    }

    pub fn with_extended_information(mut self, key: &str, value: &str) -> Self {
        let exception = self
            .exception
            .take()
            .unwrap_or_else(|| SerializableException::new("widget::Error", "failure"));
        self.exception = Some(exception.with_extended_information(key, value));
        self
    }

    pub fn build(self) -> Report {
        Report {
            general_info: self.general_info,
            exception: self.exception,
        }
    }

    pub fn to_yaml(&self) -> String {
        let report = Report {
            general_info: self.general_info.clone(),
            exception: self.exception.clone(),
        };
        serde_yaml::to_string(&report).expect("Failed to serialize report")
    }
}

pub fn sample_machine_facts() -> MachineFacts {
    MachineFacts {
        hostname: Some("build-01".to_string()),
        runtime_version: "Linux (x86_64)".to_string(),
        culture: "en-US".to_string(),
        local_ip: Ok(Ipv4Addr::new(192, 168, 1, 10)),
        user: "CORP\\alice".to_string(),
    }
}

/// Environment with known values for every fact
pub fn fixed_environment() -> EnvironmentInfo {
    let mut values = IndexMap::new();
    values.insert("company".to_string(), "Acme".to_string());
    values.insert("codebase".to_string(), "/opt/widget/bin/widget".to_string());
    values.insert("builddate".to_string(), "2011-02-03 04:05:06".to_string());

    EnvironmentInfo::fixed(MetadataSnapshot::from_values(values), sample_machine_facts())
}

/// Environment where every optional fact is missing
pub fn empty_environment() -> EnvironmentInfo {
    EnvironmentInfo::fixed(
        MetadataSnapshot::default(),
        MachineFacts {
            hostname: None,
            runtime_version: String::new(),
            culture: String::new(),
            local_ip: Err(InfoError::NoAddress {
                host: "nowhere".to_string(),
            }),
            user: String::new(),
        },
    )
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content)
            .await
            .expect("Failed to write test file");
        path
    }

    pub async fn create_report_file(&self, name: &str, builder: &TestReportBuilder) -> PathBuf {
        self.write_file(&format!("{}.yaml", name), &builder.to_yaml())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = TestReportBuilder::new("Widget")
            .with_user_description("crashed on save")
            .with_exception("widget::SaveError", "disk full")
            .with_extended_information("path", "/tmp/out.txt")
            .build();

        assert_eq!(
            report.general_info.host_application.as_deref(),
            Some("Widget")
        );
        let exception = report.exception.unwrap();
        assert_eq!(exception.message.as_deref(), Some("disk full"));
        assert_eq!(exception.extended_information.unwrap().len(), 1);
    }

    #[test]
    fn test_yaml_round_trip_keeps_exception() {
        let builder = TestReportBuilder::new("Widget").with_exception("widget::Error", "boom");
        let parsed = Report::parse(&builder.to_yaml(), Some("yaml")).unwrap();
        assert_eq!(parsed, builder.build());
    }
}
