use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Keyboard layout family an answer key is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Mac,
    Windows,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Mac => "macOS",
            Platform::Windows => "Windows",
        }
    }
}

/// Tells the quiz which platform it is running on
pub trait PlatformProbe {
    fn detect(&self) -> Platform;
}

/// Probe backed by the compile target. Anything that isn't macOS is treated as Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformProbe for HostPlatform {
    fn detect(&self) -> Platform {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Windows
        }
    }
}

/// Fixed answer for tests and overrides
#[derive(Debug, Clone, Copy)]
pub struct FixedPlatform(pub Platform);

impl PlatformProbe for FixedPlatform {
    fn detect(&self) -> Platform {
        self.0
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlatformChoice {
    #[default]
    Auto,
    Mac,
    Windows,
}

impl PlatformChoice {
    pub fn resolve(&self, probe: &dyn PlatformProbe) -> Platform {
        match self {
            PlatformChoice::Auto => probe.detect(),
            PlatformChoice::Mac => Platform::Mac,
            PlatformChoice::Windows => Platform::Windows,
        }
    }

    /// Next choice in the menu's toggle order: auto, mac, windows
    pub fn cycle(&self) -> Self {
        match self {
            PlatformChoice::Auto => PlatformChoice::Mac,
            PlatformChoice::Mac => PlatformChoice::Windows,
            PlatformChoice::Windows => PlatformChoice::Auto,
        }
    }
}
