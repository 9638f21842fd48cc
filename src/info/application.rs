// ABOUTME: Application metadata harvesting and the cached metadata snapshot
// ABOUTME: Maps descriptive package attributes and runtime facts to fixed lowercase keys

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use super::build_date::{self, Version};

pub const PRODUCT: &str = "product";
pub const COMPANY: &str = "company";
pub const COPYRIGHT: &str = "copyright";
pub const DESCRIPTION: &str = "description";
pub const TITLE: &str = "title";
pub const TRADEMARK: &str = "trademark";
pub const FILENAME: &str = "filename";
pub const CODEBASE: &str = "codebase";
pub const FULLNAME: &str = "fullname";
pub const VERSION: &str = "version";
pub const PRODUCT_VERSION: &str = "productversion";
pub const EXEC_FILENAME: &str = "execfilename";
pub const EXEC_PATH: &str = "execpath";
pub const BUILD_DATE: &str = "builddate";

/// Kinds of descriptive attribute a host application can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Product,
    Company,
    Copyright,
    Description,
    Title,
    Trademark,
}

impl AttributeKind {
    pub fn key(&self) -> &'static str {
        match self {
            AttributeKind::Product => PRODUCT,
            AttributeKind::Company => COMPANY,
            AttributeKind::Copyright => COPYRIGHT,
            AttributeKind::Description => DESCRIPTION,
            AttributeKind::Title => TITLE,
            AttributeKind::Trademark => TRADEMARK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: String,
}

/// Descriptive attributes of the host application.
///
/// Usually built with [`app_attributes!`](crate::app_attributes) so the values come
/// from the host crate's `Cargo.toml` rather than from this library's.
#[derive(Debug, Clone, Default)]
pub struct AppAttributes {
    pub name: String,
    pub version: String,
    pub attributes: Vec<Attribute>,
}

impl AppAttributes {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, kind: AttributeKind, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            kind,
            value: value.into(),
        });
        self
    }

    pub fn parsed_version(&self) -> Version {
        Version::parse(&self.version)
    }
}

/// Capture the calling crate's package metadata as [`AppAttributes`].
#[macro_export]
macro_rules! app_attributes {
    () => {
        $crate::info::AppAttributes::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            .with_attribute($crate::info::AttributeKind::Product, env!("CARGO_PKG_NAME"))
            .with_attribute($crate::info::AttributeKind::Title, env!("CARGO_PKG_NAME"))
            .with_attribute($crate::info::AttributeKind::Company, env!("CARGO_PKG_AUTHORS"))
            .with_attribute(
                $crate::info::AttributeKind::Description,
                env!("CARGO_PKG_DESCRIPTION"),
            )
            .with_attribute($crate::info::AttributeKind::Copyright, env!("CARGO_PKG_LICENSE"))
    };
}

/// Map attributes to their keys. The first non-empty value for a key wins.
pub fn harvest_attributes(attributes: &[Attribute]) -> IndexMap<String, String> {
    let mut values = IndexMap::new();

    for attribute in attributes {
        if attribute.value.is_empty() {
            continue;
        }
        values
            .entry(attribute.kind.key().to_string())
            .or_insert_with(|| attribute.value.clone());
    }

    values
}

/// Facts about the running program, computed once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataSnapshot {
    values: IndexMap<String, String>,
}

impl MetadataSnapshot {
    pub fn from_values(values: IndexMap<String, String>) -> Self {
        Self { values }
    }

    /// Harvest attributes and add the facts observable from the running process.
    pub fn collect(app: &AppAttributes) -> Self {
        let mut values = harvest_attributes(&app.attributes);
        let version = app.parsed_version();

        if let Ok(exe) = std::env::current_exe() {
            insert_path_facts(&mut values, &exe);
        } else {
            debug!("Executable path unavailable, skipping codebase and file name");
        }

        values.insert(
            BUILD_DATE.to_string(),
            build_date::format_build_date(&build_date::build_date(&version)),
        );
        values.insert(VERSION.to_string(), version.to_string());
        values.insert(
            FULLNAME.to_string(),
            format!("{}, Version={}", app.name, version),
        );
        values.insert(
            EXEC_FILENAME.to_string(),
            format!(
                "{}, Version={}",
                env!("CARGO_PKG_NAME"),
                Version::parse(env!("CARGO_PKG_VERSION"))
            ),
        );
        if !app.version.is_empty() {
            values.insert(PRODUCT_VERSION.to_string(), app.version.clone());
        }

        debug!("Collected {} application metadata values", values.len());
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn product(&self) -> Option<&str> {
        self.get(PRODUCT)
    }

    pub fn company(&self) -> Option<&str> {
        self.get(COMPANY)
    }

    pub fn copyright(&self) -> Option<&str> {
        self.get(COPYRIGHT)
    }

    pub fn description(&self) -> Option<&str> {
        self.get(DESCRIPTION)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(TITLE)
    }

    pub fn trademark(&self) -> Option<&str> {
        self.get(TRADEMARK)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.get(FILENAME)
    }

    /// Full path of the running executable.
    pub fn path(&self) -> Option<&str> {
        self.get(CODEBASE)
    }

    pub fn full_name(&self) -> Option<&str> {
        self.get(FULLNAME)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(VERSION)
    }

    pub fn product_version(&self) -> Option<&str> {
        self.get(PRODUCT_VERSION)
    }

    pub fn executing_file_name(&self) -> Option<&str> {
        self.get(EXEC_FILENAME)
    }

    pub fn executing_path(&self) -> Option<&str> {
        self.get(EXEC_PATH)
    }

    pub fn build_date(&self) -> Option<&str> {
        self.get(BUILD_DATE)
    }
}

fn insert_path_facts(values: &mut IndexMap<String, String>, exe: &Path) {
    values.insert(CODEBASE.to_string(), exe.display().to_string());

    if let Some(file_name) = exe.file_name() {
        values.insert(
            FILENAME.to_string(),
            file_name.to_string_lossy().to_string(),
        );
    }
    if let Some(parent) = exe.parent() {
        values.insert(EXEC_PATH.to_string(), parent.display().to_string());
    }
}
