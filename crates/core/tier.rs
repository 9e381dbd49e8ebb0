use serde::{Deserialize, Serialize};

use crate::TierId;

/// A named bundle of split fractions and multipliers deciding how a commission is divided
/// between the user's partner token and the platform token.
///
/// The three split fractions sum to 1.0 by convention only, nothing here checks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostTier {
    pub id: TierId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub payout_token_split_percentage: f64,
    pub platform_token_split_percentage: f64,
    pub platform_fee_split_percentage: f64,
    pub payout_token_boost_multiplier: f64,
    pub platform_token_boost_multiplier: f64,
    #[serde(default)]
    pub minimum_platform_token_staked_amount: f64,
    #[serde(default)]
    pub minimum_monthly_average_purchases_amount: f64,
}

/// A user's standing as reported by the staking and purchase volume services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub platform_token_staked_amount: f64,
    pub monthly_average_purchases_amount: f64,
}

impl BoostTier {
    /// Both thresholds have to be met for the tier to apply
    pub fn is_eligible(&self, standing: &Standing) -> bool {
        standing.platform_token_staked_amount >= self.minimum_platform_token_staked_amount
            && standing.monthly_average_purchases_amount
                >= self.minimum_monthly_average_purchases_amount
    }
}

pub trait Repository {
    /// Returns the tier with the given `id`, if configured
    fn boost_tier(&self, id: &TierId) -> Option<BoostTier>;

    /// Returns every configured tier, least generous first
    fn boost_tiers(&self) -> Vec<BoostTier>;
}

/// The most generous tier the `standing` qualifies for, relying on the repository order
pub fn eligible_tier(repository: &dyn Repository, standing: &Standing) -> Option<BoostTier> {
    repository
        .boost_tiers()
        .into_iter()
        .rev()
        .find(|tier| tier.is_eligible(standing))
}
