//! Host architecture classification

use super::LaunchError;
use crate::core::config::InterpreterConfig;
use std::fmt;
use std::str::FromStr;

/// Host classes the launcher distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// 64-bit pointer width
    Bits64,
    /// Any other supported pointer width
    Bits32,
    /// The ARM family, which has no interpreter build
    Arm,
}

impl Arch {
    /// Classify the host this binary was built for
    pub fn detect() -> Self {
        Self::classify(std::env::consts::ARCH, cfg!(target_pointer_width = "64"))
    }

    /// Classify a machine name (as in `uname -m` / `std::env::consts::ARCH`)
    /// plus pointer width. Only names starting with `arm` count as ARM;
    /// `aarch64` is an ordinary 64-bit host.
    pub fn classify(machine: &str, is_64bit: bool) -> Self {
        if machine.starts_with("arm") {
            Arch::Arm
        } else if is_64bit {
            Arch::Bits64
        } else {
            Arch::Bits32
        }
    }

    /// Interpreter binary for this host
    pub fn interpreter<'a>(&self, interpreters: &'a InterpreterConfig) -> Result<&'a str, LaunchError> {
        match self {
            Arch::Bits64 => Ok(interpreters.bits64.as_str()),
            Arch::Bits32 => Ok(interpreters.bits32.as_str()),
            Arch::Arm => Err(LaunchError::UnsupportedArchitecture(*self)),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arch::Bits64 => "64bit",
            Arch::Bits32 => "32bit",
            Arch::Arm => "arm",
        })
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "64bit" | "64" => Ok(Arch::Bits64),
            "32bit" | "32" => Ok(Arch::Bits32),
            other if other.starts_with("arm") => Ok(Arch::Arm),
            other => Err(format!("unknown architecture: {}", other)),
        }
    }
}
