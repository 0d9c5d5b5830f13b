//! QuotaPolicy - Entitlement-tiered limit on authored companions

use serde::{Deserialize, Serialize};

use super::Entitlement;

pub const DEFAULT_UNLIMITED_PLAN: &str = "pro";

/// Feature flag granting a numeric companion limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaTier {
    pub feature: String,
    pub limit: u64,
}

impl QuotaTier {
    pub fn new(feature: impl Into<String>, limit: u64) -> Self {
        Self {
            feature: feature.into(),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    /// Plan that bypasses the count check entirely
    pub unlimited_plan: String,
    /// Checked in order; the first granted feature wins
    pub tiers: Vec<QuotaTier>,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            unlimited_plan: DEFAULT_UNLIMITED_PLAN.to_string(),
            tiers: vec![
                QuotaTier::new("3_companion_limit", 3),
                QuotaTier::new("10_companion_limit", 10),
            ],
        }
    }
}

/// Outcome of looking up entitlements, before counting anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionQuota {
    Unlimited,
    Limited(u64),
}

impl CompanionQuota {
    /// `true` while `authored` is strictly below the limit
    pub fn allows(&self, authored: u64) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(limit) => authored < *limit,
        }
    }
}

impl QuotaPolicy {
    /// Resolve the quota for an identity described by `has`.
    /// No matching tier yields a limit of 0.
    pub fn resolve(&self, has: impl Fn(&Entitlement) -> bool) -> CompanionQuota {
        if has(&Entitlement::plan(self.unlimited_plan.as_str())) {
            return CompanionQuota::Unlimited;
        }

        let limit = self
            .tiers
            .iter()
            .find(|tier| has(&Entitlement::feature(tier.feature.as_str())))
            .map(|tier| tier.limit)
            .unwrap_or(0);

        CompanionQuota::Limited(limit)
    }
}
