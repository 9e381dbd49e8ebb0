pub mod config;
pub mod fmt;
pub mod offer;
pub mod rates;
pub mod split;
pub mod tier;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::Deref,
    serde::Serialize,
    serde::Deserialize,
)]
#[deref(forward)]
#[serde(transparent)]
pub struct Identifier(std::sync::Arc<String>);

pub type TierId = Identifier;

impl Identifier {
    pub fn into_string(self) -> String {
        std::sync::Arc::unwrap_or_clone(self.0)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        value.to_owned().into()
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.into_string()
    }
}

pub use self::{
    config::{ConfigError, StaticTiers, TierConfig},
    offer::{Offer, Rate, RateKind},
    rates::{rates, Error, RateType, Rates, TierSelector, UserRateDetails},
    split::{calculate_rate_split, format_breakdown_message, RateSplit},
    tier::{BoostTier, Repository, Standing},
};
