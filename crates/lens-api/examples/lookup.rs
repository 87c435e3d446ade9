//! Enrich a single company name with Finnhub data
//!
//! ```bash
//! export FINNHUB_API_KEY=your_key_here
//! cargo run -p lens-api --example lookup Corsair
//! ```

use lens_api::{FinnhubClient, LensConfig};
use lens_core::{Enricher, OrganizationMention};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lens_utils::init_tracing_with("info");

    let name = env::args().nth(1).unwrap_or_else(|| "Microsoft".to_string());

    // Only the Finnhub half of the configuration matters here
    let config = LensConfig::builder()
        .text_analytics_key("unused")
        .with_env_keys()
        .build()?;
    let client = FinnhubClient::from_config(&config)?;
    let enricher = Enricher::new(Arc::new(client));

    let org = enricher.enrich(&OrganizationMention::new(&name, 0)).await?;
    if !org.is_resolved() {
        println!("No tradable symbol found for {name}");
        return Ok(());
    }

    println!("{name} -> {}", org.symbol);
    if let Some(quote) = &org.quote {
        println!("  Current price: {}", quote.current);
    }
    if let Some(fundamentals) = &org.fundamentals {
        println!("  P/E: {}", fundamentals.pe_ratio);
        println!("  Free annual cash flow: {}", fundamentals.free_cash_flow_annual);
    }
    if let Some(rec) = &org.recommendation {
        println!("  Wall street rating: {} with {} recommendations", rec.label, rec.count);
    }
    match &org.social {
        Some(social) => println!("  Reddit: {} mentions at {}", social.mention, social.at_time),
        None => println!("  No social sentiment available"),
    }

    Ok(())
}
