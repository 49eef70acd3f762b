//! Handler for the `discount` command.

use rust_decimal::Decimal;
use serde::Serialize;

use super::command::DiscountArgs;
use super::output;
use crate::domain::discount::compute_discount;
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Serialize)]
struct DiscountReport {
    #[serde(with = "rust_decimal::serde::float")]
    h_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    a_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    fx_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    discount_pct: Decimal,
}

/// Execute `discount`.
pub fn execute(args: &DiscountArgs, config: &Config) -> Result<()> {
    let fx_rate = args.fx_rate.unwrap_or(config.discount.cny_hkd_rate);
    let discount_pct = compute_discount(args.h_price, args.a_price, fx_rate)?;

    if output::is_json() {
        return output::document(&DiscountReport {
            h_price: args.h_price,
            a_price: args.a_price,
            fx_rate,
            discount_pct,
        });
    }

    output::section("A/H discount");
    output::field("H price", format!("HK${}", args.h_price));
    output::field(
        "A price",
        format!(
            "¥{} (HK${})",
            args.a_price,
            (args.a_price * fx_rate).round_dp(4)
        ),
    );
    output::field("CNY/HKD", fx_rate);
    output::field("Discount", format_discount(discount_pct));
    Ok(())
}

/// Discount colored by sign: green when the H share is cheaper.
pub(crate) fn format_discount(discount_pct: Decimal) -> String {
    let text = format!("{discount_pct}%");
    if discount_pct.is_sign_negative() {
        output::negative(text)
    } else {
        output::positive(text)
    }
}
