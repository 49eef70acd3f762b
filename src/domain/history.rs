//! Listed IPOs with their published allotment results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::odds::{single_lot_percent, BallotModel};

/// One past listing in source format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalListing {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub listing_date: String,
    #[serde(default)]
    pub offer_price: String,
    #[serde(default)]
    pub listing_price: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub oversubscription: Option<Decimal>,
    /// Published one-lot success rate, in percent.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub win_rate_pct: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub first_day_change_pct: Option<Decimal>,
}

impl HistoricalListing {
    /// One-lot win rate the ballot curve predicts at the recorded multiple.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidParameter` for a negative multiple or an
    /// invalid model.
    pub fn modelled_win_rate(&self, model: &BallotModel) -> Result<Option<Decimal>, DomainError> {
        self.oversubscription
            .map(|multiple| single_lot_percent(multiple, model))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_scraper_record() {
        let record: HistoricalListing = serde_json::from_str(
            r#"{
                "code": "02590",
                "name": "Past Listing",
                "listing_date": "2026-09-12",
                "offer_price": "12.00",
                "listing_price": "15.60",
                "oversubscription": 3201.5,
                "win_rate_pct": 3.0,
                "first_day_change_pct": -4.5
            }"#,
        )
        .unwrap();

        assert_eq!(record.oversubscription, Some(dec!(3201.5)));
        assert_eq!(record.win_rate_pct, Some(dec!(3)));
        assert_eq!(record.first_day_change_pct, Some(dec!(-4.5)));
    }

    #[test]
    fn missing_results_stay_empty() {
        let record: HistoricalListing = serde_json::from_str(r#"{"code": "00001"}"#).unwrap();
        assert_eq!(record.win_rate_pct, None);
        assert_eq!(record.modelled_win_rate(&BallotModel::default()).unwrap(), None);
    }

    #[test]
    fn modelled_rate_follows_the_curve() {
        let record = HistoricalListing {
            code: "02715".into(),
            oversubscription: Some(dec!(38)),
            ..HistoricalListing::default()
        };

        let rate = record.modelled_win_rate(&BallotModel::default()).unwrap().unwrap();
        assert_eq!(rate, dec!(0.1343));
    }

    #[test]
    fn undersubscribed_listing_models_certain_allotment() {
        let record = HistoricalListing {
            code: "00002".into(),
            oversubscription: Some(dec!(0.6)),
            ..HistoricalListing::default()
        };

        let rate = record.modelled_win_rate(&BallotModel::default()).unwrap();
        assert_eq!(rate, Some(dec!(100)));
    }
}
