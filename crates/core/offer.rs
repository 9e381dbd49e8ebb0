use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RateKind {
    Percentage,
    Flat,
}

/// One entry of an offer's rate table, as produced by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub kind: RateKind,
    #[serde(default)]
    pub name: String,
    /// User facing value, already fee adjusted upstream
    #[serde(default)]
    pub amount: f64,
    /// Headline (pre-fee) value, required for splitting
    #[serde(default)]
    pub advertised_amount: Option<f64>,
    #[serde(default)]
    pub numeric_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub all_rates: Option<Vec<Rate>>,
}

impl Rate {
    pub fn percentage(name: impl Into<String>, advertised_amount: Option<f64>) -> Self {
        Self::new(RateKind::Percentage, name, advertised_amount)
    }

    pub fn flat(name: impl Into<String>, advertised_amount: Option<f64>) -> Self {
        Self::new(RateKind::Flat, name, advertised_amount)
    }

    fn new(kind: RateKind, name: impl Into<String>, advertised_amount: Option<f64>) -> Self {
        Self {
            kind,
            name: name.into(),
            amount: advertised_amount.unwrap_or_default(),
            advertised_amount,
            numeric_amount: advertised_amount,
        }
    }
}

impl Offer {
    pub fn new(rates: impl IntoIterator<Item = Rate>) -> Self {
        Self {
            all_rates: Some(rates.into_iter().collect()),
        }
    }

    /// The first rate of the given `kind`, if any
    pub fn rate(&self, kind: RateKind) -> Option<&Rate> {
        self.all_rates
            .as_deref()?
            .iter()
            .find(|rate| rate.kind == kind)
    }

    /// The advertised value of the first rate of the given `kind`.
    ///
    /// `None` when the offer has no rate table, no rate of that kind, or the first
    /// such rate carries no advertised value.
    pub fn advertised(&self, kind: RateKind) -> Option<f64> {
        self.rate(kind)?.advertised_amount
    }
}
