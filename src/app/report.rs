use crate::core::request::PTAX_DATE_FORMAT;
use crate::domain::model::Quote;

/// Which side of the quote to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PriceSelection {
    #[cfg_attr(feature = "cli", value(alias = "compra"))]
    Buy,
    #[default]
    #[cfg_attr(feature = "cli", value(alias = "venda"))]
    Sell,
    Both,
}

pub fn render_quote(currency: &str, quote: &Quote, price: PriceSelection) -> String {
    let currency = currency.trim().to_uppercase();
    let day = quote.quote_date.format(PTAX_DATE_FORMAT);

    match price {
        PriceSelection::Buy => format!("{} buy rate for {} = {:.4}", currency, day, quote.buy_rate),
        PriceSelection::Sell => format!("{} sell rate for {} = {:.4}", currency, day, quote.sell_rate),
        PriceSelection::Both => format!(
            "{} for {} - buy={:.4} sell={:.4}",
            currency, day, quote.buy_rate, quote.sell_rate
        ),
    }
}
