// demos/strategy_tour.rs
use option_payoffs::analytics::{
    check_parity, check_quote_parity, option_greeks, par_sweep, price_option, time_decay, GreeksConfig,
    MarketParameters, SweepVariable,
};
use option_payoffs::contracts::{moneyness, payoff, value_breakdown, OptionKind};
use option_payoffs::output::{write_curves_to_csv, write_summary_to_csv};
use option_payoffs::strategy::{break_even, NamedStrategy};
use option_payoffs::{EngineConfig, OptionResult};
use tracing_subscriber::EnvFilter;

fn main() -> OptionResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Option Payoff & Strategy Tour");
    println!("=============================\n");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| option_payoffs::OptionError::ConfigParse(format!("{}: {}", path, e)))?;
            EngineConfig::from_json_str(&text)?
        }
        None => EngineConfig::default(),
    };
    tracing::info!(?config, "engine configuration loaded");
    let prices = config.grid.prices()?;

    // Single-option payoffs
    println!("1. Single-option payoffs at K = 100");
    let call = payoff(OptionKind::Call, 100.0, &prices);
    let put = payoff(OptionKind::Put, 100.0, &prices);
    let binary = payoff(OptionKind::BinaryCall, 100.0, &prices);
    for s in [80.0, 100.0, 120.0] {
        println!(
            "   S = {:>6.1}: call {:>6.2}  put {:>6.2}  binary call {:>4.1}",
            s,
            OptionKind::Call.payoff_at(100.0, s),
            OptionKind::Put.payoff_at(100.0, s),
            OptionKind::BinaryCall.payoff_at(100.0, s)
        );
    }

    // Black-Scholes quote and parity
    println!("\n2. Black-Scholes at S = 100, K = 100, r = 5%, σ = 20%, T = 1y");
    let params = MarketParameters::new(100.0, 0.05, 0.2, 1.0)?;
    let quote = price_option(&params, 100.0)?;
    let parity = check_quote_parity(&quote, &params, 100.0)?;
    println!("   Call {:.4} (Δ {:.4})", quote.call_price, quote.call_delta);
    println!("   Put  {:.4} (Δ {:.4})", quote.put_price, quote.put_delta);
    println!(
        "   Parity: C - P = {:.6}, S - PV(K) = {:.6}, holds = {}",
        parity.left_side,
        parity.right_side,
        parity.holds(config.parity_tolerance)
    );

    let greeks = option_greeks(
        &params,
        100.0,
        OptionKind::Call,
        GreeksConfig::GAMMA | GreeksConfig::VEGA | GreeksConfig::THETA,
    )?;
    println!("   Greeks: {:?}", greeks);

    let breakdown = value_breakdown(OptionKind::Call, 105.0, 100.0, price_option(&params.with_spot(105.0), 100.0)?.call_price)?;
    println!(
        "   Call at S = 105 is {:?}: intrinsic {:.2} + time value {:.2}",
        moneyness(OptionKind::Call, 105.0, 100.0),
        breakdown.intrinsic,
        breakdown.time_value
    );

    let stale = check_parity(12.0, 5.0, 100.0, 100.0, 0.05, 1.0)?;
    println!(
        "   Quoted C = 12, P = 5: difference {:.4}, signal {:?}",
        stale.difference,
        stale.arbitrage(config.parity_tolerance)
    );

    // Sensitivity sweeps
    println!("\n3. Sweeps around the reference scenario");
    let vols = [0.1, 0.2, 0.3, 0.4];
    for (vol, q) in vols.iter().zip(par_sweep(&params, 100.0, SweepVariable::Volatility, &vols)?) {
        println!("   σ = {:.2}: call {:.4}  put {:.4}", vol, q.call_price, q.put_price);
    }
    let days = [365.0, 90.0, 30.0, 7.0, 1.0, 0.0];
    for (d, q) in days.iter().zip(time_decay(&params, 100.0, &days)?) {
        println!("   {:>5.0} days left: call {:.4}", d, q.call_price);
    }

    // Named strategies
    println!("\n4. Named strategies");
    let book = [
        (NamedStrategy::bull_call_spread(90.0, 110.0)?, Some(7.5)),
        (NamedStrategy::bear_put_spread(90.0, 110.0)?, Some(6.25)),
        (NamedStrategy::straddle(100.0)?, None),
        (NamedStrategy::strangle(90.0, 110.0)?, Some(5.5)),
        (NamedStrategy::butterfly(80.0, 100.0, 120.0)?, Some(4.0)),
        (NamedStrategy::risk_reversal(90.0, 110.0)?, Some(-1.5)),
    ];
    let mut summary: Vec<(String, String)> = Vec::new();
    for (named, premium) in &book {
        let strategy = named.strategy()?;
        let premium = match premium {
            Some(p) => *p,
            None => strategy.theoretical_value(&params)?,
        };
        let metrics = named.metrics(Some(premium))?;
        println!(
            "   {:<18} premium {:>7.3}  max profit {:?}  max loss {:?}  break-even {:?}",
            named.name(),
            premium,
            metrics.max_profit,
            metrics.max_loss,
            break_even(named, Some(premium))?
        );
        summary.push((named.name().to_string(), format!("{:?}", metrics.break_evens)));
    }

    // Write curves for plotting
    let bull = book[0].0.strategy()?;
    let bull_profit = bull.profit(&prices, 7.5);
    let headers = ["price", "call", "put", "binary_call", "bull_call_spread_profit"];
    let columns: [&[f64]; 5] = [&prices, &call, &put, &binary, &bull_profit];
    match write_curves_to_csv("strategy_curves.csv", &headers, &columns) {
        Ok(()) => println!("\nCurves written to strategy_curves.csv"),
        Err(e) => tracing::error!(error = %e, "failed to write curves"),
    }

    let rows: Vec<(&str, &str)> = summary.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    if let Err(e) = write_summary_to_csv("strategy_summary.csv", &rows) {
        tracing::error!(error = %e, "failed to write summary");
    }

    println!("\n✓ Tour complete!");
    Ok(())
}
