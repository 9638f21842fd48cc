// ABOUTME: Metadata providers for the running application and host machine
// ABOUTME: Owns the process-wide environment context and its global read accessors

pub mod application;
pub mod build_date;
pub mod error;
pub mod identity;
pub mod machine;
pub mod network;

pub use application::{AppAttributes, Attribute, AttributeKind, MetadataSnapshot};
pub use build_date::Version;
pub use error::{InfoError, Result};
pub use machine::{MachineFacts, MachineInfo, MachineSummary};

use once_cell::sync::OnceCell;
use std::net::Ipv4Addr;
use tracing::debug;

/// Cached facts about the running program and the machine it runs on.
///
/// The application snapshot is collected on first access; machine facts are looked
/// up individually the first time each is read. Nothing is ever recomputed.
#[derive(Debug)]
pub struct EnvironmentInfo {
    attributes: AppAttributes,
    snapshot: OnceCell<MetadataSnapshot>,
    machine: MachineInfo,
}

impl EnvironmentInfo {
    pub fn new(attributes: AppAttributes) -> Self {
        Self::with_address_preference(attributes, true)
    }

    pub fn with_address_preference(attributes: AppAttributes, prefer_private: bool) -> Self {
        Self {
            attributes,
            snapshot: OnceCell::new(),
            machine: MachineInfo::new(prefer_private),
        }
    }

    /// An environment whose facts are all known up front.
    pub fn fixed(snapshot: MetadataSnapshot, machine: MachineFacts) -> Self {
        Self {
            attributes: AppAttributes::default(),
            snapshot: OnceCell::with_value(snapshot),
            machine: MachineInfo::fixed(machine),
        }
    }

    pub fn snapshot(&self) -> &MetadataSnapshot {
        self.snapshot.get_or_init(|| {
            debug!("Collecting application metadata for {}", self.attributes.name);
            MetadataSnapshot::collect(&self.attributes)
        })
    }

    pub fn machine(&self) -> &MachineInfo {
        &self.machine
    }

    pub fn app_product(&self) -> Option<&str> {
        self.snapshot().product()
    }

    pub fn app_company(&self) -> Option<&str> {
        self.snapshot().company()
    }

    pub fn app_copyright(&self) -> Option<&str> {
        self.snapshot().copyright()
    }

    pub fn app_description(&self) -> Option<&str> {
        self.snapshot().description()
    }

    pub fn app_title(&self) -> Option<&str> {
        self.snapshot().title()
    }

    pub fn app_trademark(&self) -> Option<&str> {
        self.snapshot().trademark()
    }

    pub fn app_file_name(&self) -> Option<&str> {
        self.snapshot().file_name()
    }

    pub fn app_path(&self) -> Option<&str> {
        self.snapshot().path()
    }

    pub fn app_full_name(&self) -> Option<&str> {
        self.snapshot().full_name()
    }

    pub fn app_version(&self) -> Option<&str> {
        self.snapshot().version()
    }

    pub fn app_build_date(&self) -> Option<&str> {
        self.snapshot().build_date()
    }

    pub fn product_version(&self) -> Option<&str> {
        self.snapshot().product_version()
    }

    pub fn executing_file_name(&self) -> Option<&str> {
        self.snapshot().executing_file_name()
    }

    pub fn executing_path(&self) -> Option<&str> {
        self.snapshot().executing_path()
    }

    pub fn current_culture(&self) -> &str {
        self.machine.culture()
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine.hostname()
    }

    pub fn runtime_version(&self) -> &str {
        self.machine.runtime_version()
    }

    pub fn local_ip(&self) -> Result<Ipv4Addr> {
        self.machine.local_ip()
    }

    pub fn current_user(&self) -> &str {
        self.machine.user()
    }
}

static ENVIRONMENT: OnceCell<EnvironmentInfo> = OnceCell::new();

/// Install the process-wide environment for the host application.
///
/// Only the first call (or first [`environment`] access) takes effect; later
/// calls return the environment already in place.
pub fn install(attributes: AppAttributes, prefer_private: bool) -> &'static EnvironmentInfo {
    ENVIRONMENT.get_or_init(|| EnvironmentInfo::with_address_preference(attributes, prefer_private))
}

/// The process-wide environment, created with empty attributes if none was installed.
pub fn environment() -> &'static EnvironmentInfo {
    ENVIRONMENT.get_or_init(|| EnvironmentInfo::new(AppAttributes::default()))
}

pub fn app_product() -> Option<&'static str> {
    environment().app_product()
}

pub fn app_company() -> Option<&'static str> {
    environment().app_company()
}

pub fn app_copyright() -> Option<&'static str> {
    environment().app_copyright()
}

pub fn app_description() -> Option<&'static str> {
    environment().app_description()
}

pub fn app_title() -> Option<&'static str> {
    environment().app_title()
}

pub fn app_trademark() -> Option<&'static str> {
    environment().app_trademark()
}

pub fn app_file_name() -> Option<&'static str> {
    environment().app_file_name()
}

pub fn app_path() -> Option<&'static str> {
    environment().app_path()
}

pub fn app_full_name() -> Option<&'static str> {
    environment().app_full_name()
}

pub fn app_version() -> Option<&'static str> {
    environment().app_version()
}

pub fn app_build_date() -> Option<&'static str> {
    environment().app_build_date()
}

pub fn product_version() -> Option<&'static str> {
    environment().product_version()
}

pub fn executing_file_name() -> Option<&'static str> {
    environment().executing_file_name()
}

pub fn executing_path() -> Option<&'static str> {
    environment().executing_path()
}

pub fn current_culture() -> &'static str {
    environment().current_culture()
}

pub fn machine_name() -> Option<&'static str> {
    environment().machine_name()
}

pub fn runtime_version() -> &'static str {
    environment().runtime_version()
}

pub fn local_ip() -> Result<Ipv4Addr> {
    environment().local_ip()
}

pub fn current_user() -> &'static str {
    environment().current_user()
}
