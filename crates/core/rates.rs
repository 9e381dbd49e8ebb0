
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::{
    fmt::{to_fixed, trim_fixed},
    offer::{Offer, RateKind},
    tier::{eligible_tier, BoostTier, Repository, Standing},
    TierId,
};

/// Share of the advertised rate that reaches the user once the platform fee is taken
pub const USER_SHARE: f64 = 0.9;

const CENTS: f64 = 100.0;
const MILLS: f64 = 1000.0;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("boost tier not found: {0}")]
    TierNotFound(TierId),

    #[error("no eligible boost tier")]
    NoEligibleTier,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    Percentage,
    Flat,
}

impl From<RateType> for RateKind {
    fn from(value: RateType) -> Self {
        match value {
            RateType::Percentage => RateKind::Percentage,
            RateType::Flat => RateKind::Flat,
        }
    }
}

/// The user facing decomposition of an advertised rate.
///
/// Only the field group matching `rate_type` carries meaning, the other group is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRateDetails {
    pub rate_type: RateType,

    pub user_percentage: f64,
    pub partner_token_percentage: f64,
    pub platform_token_percentage: f64,
    pub partner_token_boosted_percentage: f64,
    pub platform_token_boosted_percentage: f64,

    pub user_amount: f64,
    pub partner_token_amount: f64,
    pub platform_token_amount: f64,
    pub partner_token_boosted_amount: f64,
    pub platform_token_boosted_amount: f64,

    pub breakdown_message: String,
}

fn floor_to(x: f64, scale: f64) -> f64 {
    (x * scale).floor() / scale
}

/// Decompose an advertised percentage (`2.9` meaning 2.9%).
///
/// The user percentage is truncated to two decimals after the platform fee, while the token
/// shares are truncated to three decimals and taken from the advertised rate. The shares are
/// therefore not guaranteed to add up to the user percentage.
pub fn percentage_rate_details(
    advertised_rate: f64,
    tier: &BoostTier,
    partner_token_label: &str,
) -> UserRateDetails {
    let user_percentage = floor_to(advertised_rate * USER_SHARE, CENTS);

    let partner_token_percentage =
        floor_to(advertised_rate * tier.payout_token_split_percentage, MILLS);

    let platform_token_percentage =
        floor_to(advertised_rate * tier.platform_token_split_percentage, MILLS);

    let partner_token_boosted_percentage = floor_to(
        advertised_rate * tier.payout_token_split_percentage * tier.payout_token_boost_multiplier,
        MILLS,
    );

    let platform_token_boosted_percentage = floor_to(
        advertised_rate * tier.platform_token_split_percentage * tier.platform_token_boost_multiplier,
        MILLS,
    );

    let breakdown_message = format!(
        "{partner_token_label} {}% and FP {}%",
        trim_fixed(partner_token_percentage),
        trim_fixed(platform_token_percentage)
    );

    UserRateDetails {
        rate_type: RateType::Percentage,
        user_percentage,
        partner_token_percentage,
        platform_token_percentage,
        partner_token_boosted_percentage,
        platform_token_boosted_percentage,
        user_amount: 0.0,
        partner_token_amount: 0.0,
        platform_token_amount: 0.0,
        partner_token_boosted_amount: 0.0,
        platform_token_boosted_amount: 0.0,
        breakdown_message,
    }
}

/// Decompose an advertised flat dollar amount, truncating every share to whole cents.
pub fn flat_rate_details(
    advertised_amount: f64,
    tier: &BoostTier,
    partner_token_label: &str,
) -> UserRateDetails {
    let user_amount = floor_to(advertised_amount * USER_SHARE, CENTS);

    let partner_token_amount =
        floor_to(advertised_amount * tier.payout_token_split_percentage, CENTS);

    let platform_token_amount =
        floor_to(advertised_amount * tier.platform_token_split_percentage, CENTS);

    let partner_token_boosted_amount = floor_to(
        advertised_amount * tier.payout_token_split_percentage * tier.payout_token_boost_multiplier,
        CENTS,
    );

    let platform_token_boosted_amount = floor_to(
        advertised_amount
            * tier.platform_token_split_percentage
            * tier.platform_token_boost_multiplier,
        CENTS,
    );

    let breakdown_message = format!(
        "{partner_token_label} ${} and FP ${}",
        to_fixed(partner_token_amount, 2),
        to_fixed(platform_token_amount, 2)
    );

    UserRateDetails {
        rate_type: RateType::Flat,
        user_percentage: 0.0,
        partner_token_percentage: 0.0,
        platform_token_percentage: 0.0,
        partner_token_boosted_percentage: 0.0,
        platform_token_boosted_percentage: 0.0,
        user_amount,
        partner_token_amount,
        platform_token_amount,
        partner_token_boosted_amount,
        platform_token_boosted_amount,
        breakdown_message,
    }
}

/// Split the offer's first percentage rate, `None` if the offer cannot be split that way
pub fn user_percentage_details(
    offer: &Offer,
    tier: &BoostTier,
    partner_token_label: &str,
) -> Option<UserRateDetails> {
    offer_rate_details(offer, RateType::Percentage, tier, partner_token_label)
}

/// Split the offer's first flat rate, `None` if the offer cannot be split that way
pub fn user_flat_details(
    offer: &Offer,
    tier: &BoostTier,
    partner_token_label: &str,
) -> Option<UserRateDetails> {
    offer_rate_details(offer, RateType::Flat, tier, partner_token_label)
}

fn offer_rate_details(
    offer: &Offer,
    rate_type: RateType,
    tier: &BoostTier,
    partner_token_label: &str,
) -> Option<UserRateDetails> {
    let Some(advertised) = offer.advertised(rate_type.into()) else {
        tracing::debug!(%rate_type, "no advertised rate to split");
        return None;
    };

    let details = match rate_type {
        RateType::Percentage => percentage_rate_details(advertised, tier, partner_token_label),
        RateType::Flat => flat_rate_details(advertised, tier, partner_token_label),
    };

    Some(details)
}

pub enum TierSelector {
    Id(TierId),
    Standing(Standing),
}

impl From<TierId> for TierSelector {
    fn from(value: TierId) -> Self {
        Self::Id(value)
    }
}

impl From<Standing> for TierSelector {
    fn from(value: Standing) -> Self {
        Self::Standing(value)
    }
}

pub trait Rates {
    /// Resolve the boost tier to apply, either by id or by the user's standing
    fn boost_tier(&self, selector: TierSelector) -> Result<BoostTier, Error>;

    /// Split the offer's percentage rate under the selected tier
    fn percentage_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error>;

    /// Split the offer's flat rate under the selected tier
    fn flat_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error>;

    /// Split the offer's percentage rate, falling back to its flat rate
    fn user_rate_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error>;
}

pub struct RatesImpl<'a>(&'a dyn Repository);

pub fn rates(repository: &dyn Repository) -> RatesImpl<'_> {
    RatesImpl(repository)
}

impl<'a> Rates for RatesImpl<'a> {
    fn boost_tier(&self, selector: TierSelector) -> Result<BoostTier, Error> {
        match selector {
            TierSelector::Id(id) => self.0.boost_tier(&id).ok_or(Error::TierNotFound(id)),

            TierSelector::Standing(standing) => {
                let tier = eligible_tier(self.0, &standing).ok_or(Error::NoEligibleTier)?;

                tracing::debug!(tier = %tier.id, ?standing, "boost tier resolved by standing");

                Ok(tier)
            }
        }
    }

    fn percentage_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error> {
        let tier = self.boost_tier(selector)?;

        Ok(user_percentage_details(offer, &tier, partner_token_label))
    }

    fn flat_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error> {
        let tier = self.boost_tier(selector)?;

        Ok(user_flat_details(offer, &tier, partner_token_label))
    }

    fn user_rate_details(
        &self,
        offer: &Offer,
        selector: TierSelector,
        partner_token_label: &str,
    ) -> Result<Option<UserRateDetails>, Error> {
        let tier = self.boost_tier(selector)?;

        let details = user_percentage_details(offer, &tier, partner_token_label)
            .or_else(|| user_flat_details(offer, &tier, partner_token_label));

        Ok(details)
    }
}
