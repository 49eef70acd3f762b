//! Handler for the `ah` command.

use rust_decimal::Decimal;
use tracing::debug;

use super::command::AhArgs;
use super::discount::format_discount;
use super::{open_source, output};
use crate::domain::discount::{compute_discount, AhComparison};
use crate::domain::listing::{normalize_code, ListingRecord};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `ah`.
pub async fn execute(args: &AhArgs, config: &Config) -> Result<()> {
    let source = open_source(args.source.as_deref(), config)?;
    let listing = source.listing(&args.code).await?;
    let fx_rate = args.fx_rate.unwrap_or(config.discount.cny_hkd_rate);

    let comparison = compare(&listing, args, fx_rate)?;
    debug!(code = %comparison.code, is_ah = comparison.is_ah_stock, "Built A/H comparison");

    if output::is_json() {
        return output::document(&comparison);
    }

    render(&comparison);
    Ok(())
}

fn compare(listing: &ListingRecord, args: &AhArgs, fx_rate: Decimal) -> Result<AhComparison> {
    let code = normalize_code(&listing.code);
    if !listing.is_ah_stock {
        return Ok(AhComparison::not_ah(code, listing.name.clone()));
    }

    let h_price = listing.offer_price_upper();
    let (discount_pct, message) = match (h_price, args.a_price) {
        (Some(h), Some(a)) => (Some(compute_discount(h, a, fx_rate)?), None),
        (None, _) => (
            None,
            Some("H-share offer price not fixed yet".to_string()),
        ),
        (Some(_), None) => (
            None,
            Some("A-share quote not supplied; pass --a-price".to_string()),
        ),
    };

    Ok(AhComparison {
        is_ah_stock: true,
        code,
        name: listing.name.clone(),
        a_share_code: listing.a_share_code.clone(),
        h_price,
        a_price: args.a_price,
        fx_rate: args.a_price.map(|_| fx_rate),
        discount_pct,
        message,
    })
}

fn render(comparison: &AhComparison) {
    output::section(&format!("{} {}", comparison.code, comparison.name));
    if !comparison.is_ah_stock {
        output::note("Not an A+H stock.");
        return;
    }

    if let Some(a_code) = &comparison.a_share_code {
        output::field("A-share code", a_code);
    }
    if let Some(h) = comparison.h_price {
        output::field("H price", format!("HK${h}"));
    }
    if let Some(a) = comparison.a_price {
        output::field("A price", format!("¥{a}"));
    }
    if let Some(fx) = comparison.fx_rate {
        output::field("CNY/HKD", fx);
    }
    match comparison.discount_pct {
        Some(discount) => output::field("Discount", format_discount(discount)),
        None => output::field("Discount", output::muted("n/a")),
    }
    if let Some(message) = &comparison.message {
        output::note(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(a_price: Option<Decimal>) -> AhArgs {
        AhArgs {
            code: "1".into(),
            a_price,
            fx_rate: None,
            source: None,
        }
    }

    fn ah_listing() -> ListingRecord {
        ListingRecord {
            code: "2715".into(),
            name: "Dual Listed".into(),
            offer_price: "8.40".into(),
            is_ah_stock: true,
            a_share_code: Some("600000".into()),
            ..ListingRecord::default()
        }
    }

    #[test]
    fn non_ah_listing_has_no_discount() {
        let listing = ListingRecord {
            code: "1".into(),
            name: "Plain".into(),
            ..ListingRecord::default()
        };

        let comparison = compare(&listing, &args(Some(dec!(10))), dec!(1.12)).unwrap();
        assert!(!comparison.is_ah_stock);
        assert_eq!(comparison.code, "00001");
        assert_eq!(comparison.discount_pct, None);
    }

    #[test]
    fn quoted_ah_listing_gets_discount() {
        let comparison = compare(&ah_listing(), &args(Some(dec!(10))), dec!(1.12)).unwrap();

        assert_eq!(comparison.h_price, Some(dec!(8.40)));
        assert_eq!(comparison.discount_pct, Some(dec!(25.00)));
        assert_eq!(comparison.fx_rate, Some(dec!(1.12)));
        assert_eq!(comparison.message, None);
    }

    #[test]
    fn unpriced_h_share_reports_message() {
        let mut listing = ah_listing();
        listing.offer_price = "N/A".into();

        let comparison = compare(&listing, &args(Some(dec!(10))), dec!(1.12)).unwrap();
        assert_eq!(comparison.discount_pct, None);
        assert!(comparison.message.unwrap().contains("not fixed"));
    }

    #[test]
    fn missing_a_quote_reports_message() {
        let comparison = compare(&ah_listing(), &args(None), dec!(1.12)).unwrap();
        assert_eq!(comparison.discount_pct, None);
        assert_eq!(comparison.fx_rate, None);
        assert!(comparison.message.unwrap().contains("--a-price"));
    }
}
