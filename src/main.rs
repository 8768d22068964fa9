use anyhow::Result;
use nft_amm_pricing::{
    CurveType, config::QuoteConfig, current_price, derive_base_price, quote_orders, utils,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let cfg = QuoteConfig::load()?;
    tracing::info!(
        curve = %cfg.snapshot.curve,
        base_price = cfg.snapshot.base_price,
        delta = cfg.snapshot.step,
        counter = cfg.snapshot.counter,
        direction = %cfg.direction,
        orders = cfg.orders,
        slippage_bps = cfg.slippage_bps,
        "[INIT] nft-amm-quote"
    );

    let mut snapshot = cfg.snapshot;
    if cfg.derive_from_current {
        if snapshot.curve != CurveType::ConstantProduct {
            anyhow::bail!("DERIVE_FROM_CURRENT only applies to the xyk curve");
        }
        let base = derive_base_price(snapshot.base_price, snapshot.step, snapshot.counter)?;
        tracing::info!(
            observed = snapshot.base_price,
            base,
            "[MODIFY] derived base spot price"
        );
        snapshot = snapshot.with_base_price(base);
    }

    match current_price(&snapshot) {
        Ok(price) => tracing::info!(price, "[SPOT] current price"),
        Err(e) => tracing::warn!(error = %e, "[SPOT] current price undefined"),
    }

    let quote = quote_orders(cfg.direction, &snapshot, cfg.orders, cfg.slippage_bps)?;
    tracing::info!(
        total = quote.prices.total,
        bound = quote.bound.amount(),
        "[QUOTE] ready"
    );
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
