//! Entitlement - Plan or feature flag granted by the identity provider

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Entitlement {
    /// Billing plan, e.g. `pro`
    Plan(String),
    /// Feature flag attached to a plan, e.g. `3_companion_limit`
    Feature(String),
}

impl Entitlement {
    pub fn plan(name: impl Into<String>) -> Self {
        Self::Plan(name.into())
    }

    pub fn feature(name: impl Into<String>) -> Self {
        Self::Feature(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Plan(name) | Self::Feature(name) => name,
        }
    }
}
