use std::sync::{Mutex, RwLock};

use serde::Serialize;

/// Optional capabilities the core may query at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Cell-level workbook analysis via the calamine engine.
    AdvancedSpreadsheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Present,
    Absent,
}

/// External collaborator that can make an absent capability available
/// (e.g. by installing a component). The core invokes it at most once per
/// process, never concurrently.
pub trait DependencyInstaller: Send + Sync {
    fn ensure_available(&self, capability: Capability) -> bool;
}

/// Installer that never succeeds; used when auto-install is not opted in.
pub struct NoInstaller;

impl DependencyInstaller for NoInstaller {
    fn ensure_available(&self, _capability: Capability) -> bool {
        false
    }
}

/// Process-wide knowledge of optional-engine availability.
///
/// Read-mostly; the only legal write is the one-shot absent -> present
/// transition performed under the negotiation guard. Never transitions
/// back.
pub struct DependencyState {
    advanced_spreadsheet: RwLock<Availability>,
    negotiated: Mutex<bool>,
}

impl DependencyState {
    /// Probes what this build can do. The advanced engine is present iff
    /// it was compiled in.
    #[must_use]
    pub fn probe() -> Self {
        let availability = if cfg!(feature = "advanced-spreadsheet") {
            Availability::Present
        } else {
            Availability::Absent
        };
        Self::with_availability(availability)
    }

    #[must_use]
    pub fn with_availability(availability: Availability) -> Self {
        Self {
            advanced_spreadsheet: RwLock::new(availability),
            negotiated: Mutex::new(false),
        }
    }

    #[must_use]
    pub fn availability(&self, capability: Capability) -> Availability {
        match capability {
            Capability::AdvancedSpreadsheet => *self
                .advanced_spreadsheet
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        }
    }

    #[must_use]
    pub fn is_available(&self, capability: Capability) -> bool {
        self.availability(capability) == Availability::Present
    }

    /// Queries availability, invoking the installer once per process if
    /// the capability is absent.
    ///
    /// The guard serializes concurrent workers: only the first caller ever
    /// reaches the installer, later callers observe the recorded outcome.
    pub fn negotiate(
        &self,
        capability: Capability,
        installer: Option<&dyn DependencyInstaller>,
    ) -> Availability {
        if self.is_available(capability) {
            return Availability::Present;
        }

        let mut negotiated = self
            .negotiated
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if *negotiated {
            return self.availability(capability);
        }
        *negotiated = true;

        if let Some(installer) = installer {
            if installer.ensure_available(capability) {
                let mut availability = self
                    .advanced_spreadsheet
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                *availability = Availability::Present;
            }
        }

        self.availability(capability)
    }
}

#[cfg(test)]
#[path = "deps_tests.rs"]
mod tests;
