use std::collections::HashSet;

use ron::ser::{to_string_pretty, PrettyConfig};
use serde::{Deserialize, Serialize};

use crate::{
    tier::{BoostTier, Repository},
    TierId,
};

const SEED_TIERS: &str = include_str!("tiers.ron");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Render(#[from] ron::Error),

    #[error("no boost tiers configured")]
    Empty,

    #[error("duplicate boost tier: {0}")]
    DuplicateTier(TierId),
}

/// Boost tier configuration, least generous tier first.
///
/// Split fractions and multipliers are taken as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub tiers: Vec<BoostTier>,
}

impl TierConfig {
    pub fn from_ron(ron: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(ron)?;

        config.validate()?;

        Ok(config)
    }

    /// The tiers shipped with the crate
    pub fn seed() -> Self {
        Self::from_ron(SEED_TIERS).expect("always: seed tiers are valid")
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let ron = to_string_pretty(self, PrettyConfig::new().indentor("  ".to_owned()))?;

        Ok(ron)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();

        for tier in &self.tiers {
            if !seen.insert(&tier.id) {
                return Err(ConfigError::DuplicateTier(tier.id.clone()));
            }
        }

        Ok(())
    }
}

/// In-memory tier repository built from configuration
#[derive(Debug, Clone)]
pub struct StaticTiers(Vec<BoostTier>);

impl From<TierConfig> for StaticTiers {
    fn from(value: TierConfig) -> Self {
        Self(value.tiers)
    }
}

impl Default for StaticTiers {
    fn default() -> Self {
        TierConfig::seed().into()
    }
}

impl Repository for StaticTiers {
    fn boost_tier(&self, id: &TierId) -> Option<BoostTier> {
        self.0.iter().find(|tier| &tier.id == id).cloned()
    }

    fn boost_tiers(&self) -> Vec<BoostTier> {
        self.0.clone()
    }
}

#[cfg(test)]
mod test {
    use test_utils::prelude::*;

    use crate::tier::{eligible_tier, Standing};

    use super::*;

    #[test]
    fn seed_tiers() {
        let tiers = StaticTiers::default();

        let ids: Vec<String> = tiers
            .boost_tiers()
            .into_iter()
            .map(|tier| tier.id.into_string())
            .collect();

        check(
            ids,
            expect![[r#"
                [
                  "default",
                  "boosted",
                ]"#]],
        );

        let boosted = tiers.boost_tier(&"boosted".into()).unwrap();

        assert_eq!(boosted.payout_token_boost_multiplier, 2.0);
        assert_eq!(boosted.platform_token_boost_multiplier, 2.0);
        assert!(tiers.boost_tier(&"platinum".into()).is_none());
    }

    #[test]
    fn seed_eligibility() {
        let tiers = StaticTiers::default();

        let newcomer = Standing::default();
        let staker = Standing {
            platform_token_staked_amount: 1000.0,
            monthly_average_purchases_amount: 100.0,
        };

        assert_eq!(eligible_tier(&tiers, &newcomer).unwrap().id, TierId::from("default"));
        assert_eq!(eligible_tier(&tiers, &staker).unwrap().id, TierId::from("boosted"));
    }

    #[test]
    fn render_round_trips() {
        let seed = TierConfig::seed();

        assert_eq!(TierConfig::from_ron(&seed.to_ron().unwrap()).unwrap(), seed);
    }

    #[test]
    fn empty_config_errs() {
        check_err(
            TierConfig::from_ron("(tiers: [])").unwrap_err(),
            expect!["no boost tiers configured"],
        );
    }

    #[test]
    fn duplicate_tier_errs() {
        let tier = r#"(
            id: "default",
            name: "Default",
            payout_token_split_percentage: 0.45,
            platform_token_split_percentage: 0.45,
            platform_fee_split_percentage: 0.1,
            payout_token_boost_multiplier: 1.0,
            platform_token_boost_multiplier: 1.0,
        )"#;

        check_err(
            TierConfig::from_ron(&format!("(tiers: [{tier}, {tier}])")).unwrap_err(),
            expect!["duplicate boost tier: default"],
        );
    }

    #[test]
    fn unchecked_fractions_are_accepted() {
        let config = TierConfig::from_ron(
            r#"(tiers: [(
                id: "odd",
                name: "Odd",
                payout_token_split_percentage: 1.5,
                platform_token_split_percentage: -0.2,
                platform_fee_split_percentage: 0.0,
                payout_token_boost_multiplier: 0.0,
                platform_token_boost_multiplier: 3.0,
            )])"#,
        )
        .unwrap();

        assert_eq!(config.tiers[0].platform_token_split_percentage, -0.2);
    }

    #[test]
    fn malformed_config_errs() {
        assert!(matches!(
            TierConfig::from_ron("(tiers: [(id: \"x\")])"),
            Err(ConfigError::Parse(_))
        ));
    }
}
