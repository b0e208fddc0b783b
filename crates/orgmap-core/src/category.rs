//! # Policy Category Registry — Single Source of Truth
//!
//! Defines the `PolicyCategory` enum covering every organization policy
//! category the scanner enumerates. This is the ONE definition used across
//! the workspace; every `match` on `PolicyCategory` must be exhaustive, so
//! adding a category forces every consumer to handle it at compile time.
//!
//! ## Registry Contract
//!
//! Each variant carries exactly one piece of data: the filter value the
//! provider's listing call expects. Enumeration, enrichment, and
//! normalization are category-agnostic; adding a category is a pure data
//! addition here and nowhere else.
//!
//! There is no "category unset" state. Listing entry points take a
//! `PolicyCategory` by value, so the missing-configuration failure mode is
//! unrepresentable rather than guarded at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All organization policy categories the scanner enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyCategory {
    /// Service control policies (permission guardrails).
    ServiceControl,
    /// Tag policies (tag key/value standardization).
    Tag,
    /// Backup policies (backup plan enforcement).
    Backup,
    /// AI services opt-out policies.
    AiServicesOptOut,
}

/// Total number of policy categories. Used for compile-time assertions.
pub const POLICY_CATEGORY_COUNT: usize = 4;

impl PolicyCategory {
    /// Returns all categories in canonical order.
    pub fn all() -> &'static [PolicyCategory] {
        &[
            Self::ServiceControl,
            Self::Tag,
            Self::Backup,
            Self::AiServicesOptOut,
        ]
    }

    /// The filter value the provider's listing call expects for this
    /// category.
    pub fn filter_value(&self) -> &'static str {
        match self {
            Self::ServiceControl => "SERVICE_CONTROL_POLICY",
            Self::Tag => "TAG_POLICY",
            Self::Backup => "BACKUP_POLICY",
            Self::AiServicesOptOut => "AISERVICES_OPT_OUT_POLICY",
        }
    }
}

impl fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filter_value())
    }
}

impl FromStr for PolicyCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.filter_value() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A string that does not name any known policy category filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy category filter: {0}")]
pub struct UnknownCategory(pub String);
