use std::{fs, path::Path};

use anyhow::{Context, Result};

use fiber_core::{Offer, TierConfig};

pub fn read_tiers(path: &Path) -> Result<TierConfig> {
    let ron = fs::read_to_string(path)
        .with_context(|| format!("reading tier config {}", path.display()))?;

    let config = TierConfig::from_ron(&ron)
        .with_context(|| format!("parsing tier config {}", path.display()))?;

    tracing::debug!(path = %path.display(), tiers = config.tiers.len(), "loaded boost tiers");

    Ok(config)
}

pub fn read_offers(path: &Path) -> Result<Vec<Offer>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading offers {}", path.display()))?;

    parse_offers(&contents, is_json(path))
        .with_context(|| format!("parsing offers {}", path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}

fn parse_offers(contents: &str, json: bool) -> Result<Vec<Offer>> {
    let offers = if json {
        serde_json::from_str(contents)?
    } else {
        ron::from_str(contents)?
    };

    Ok(offers)
}

#[cfg(test)]
mod test {
    use fiber_core::RateKind;
    use test_utils::prelude::*;

    use super::*;

    #[rstest]
    #[case::json("offers.json", true)]
    #[case::upper_case_json("OFFERS.JSON", true)]
    #[case::ron("offers.ron", false)]
    #[case::no_extension("offers", false)]
    fn detects_json(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_json(Path::new(path)), expected);
    }

    #[test]
    fn parses_catalog_json() {
        let offers = parse_offers(
            r#"[
                {
                    "objectID": "1",
                    "allRates": [
                        {"kind": "PERCENTAGE", "name": "Sales", "amount": 2.61, "advertised_amount": 2.9, "numeric_amount": 2.61}
                    ]
                },
                {"objectID": "2", "allRates": [{"kind": "FLAT", "name": "Signup", "amount": 292.5, "advertised_amount": null}]},
                {"objectID": "3"}
            ]"#,
            true,
        )
        .unwrap();

        assert_eq!(offers.len(), 3);
        assert_eq!(offers[0].advertised(RateKind::Percentage), Some(2.9));
        assert_eq!(offers[1].advertised(RateKind::Flat), None);
        assert!(offers[2].all_rates.is_none());
    }

    #[test]
    fn parses_ron() {
        let offers = parse_offers(
            r#"[(allRates: Some([(kind: FLAT, name: "Signup", advertised_amount: Some(325.0))]))]"#,
            false,
        )
        .unwrap();

        assert_eq!(offers[0].advertised(RateKind::Flat), Some(325.0));
    }

    #[test]
    fn unknown_rate_kind_errs() {
        let err = parse_offers(r#"[{"allRates": [{"kind": "TIERED"}]}]"#, true).unwrap_err();

        assert!(err.to_string().contains("unknown variant `TIERED`"), "{err}");
    }
}
