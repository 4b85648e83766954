//! Options Analytics CLI
//!
//! Command-line front end for the pricing engine. Volatility, rate and
//! dividend are entered in percent and maturity in days, the way the
//! calculator takes them; everything else uses the engine's units.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use options_analytics::analysis::{self, GreekKind, PayoffSummary, Strategy};
use options_analytics::config::{EngineConfig, MarketDefaults};
use options_analytics::format::{format_bound, format_currency, format_percent};
use options_analytics::models::{black_scholes, smile};
use options_analytics::prelude::*;

/// Maturities (days) shown on the surface when none are given
const DEFAULT_MATURITIES: [f64; 6] = [7.0, 14.0, 30.0, 60.0, 90.0, 180.0];

#[derive(Parser, Debug)]
#[command(name = "options-cli", version, about = "Black-Scholes pricing and payoff analytics")]
struct Cli {
    /// JSON engine config; defaults are used for anything it omits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price an option and show its Greeks
    Price {
        #[command(flatten)]
        market: MarketArgs,
    },
    /// Solve for the volatility implied by a market price
    Iv {
        /// Observed option price
        #[arg(long)]
        market_price: f64,
        #[command(flatten)]
        market: MarketArgs,
    },
    /// Payoff at expiry across the price axis
    Payoff {
        #[command(flatten)]
        market: MarketArgs,
        /// Premium per contract; defaults to the theoretical price
        #[arg(long)]
        premium: Option<f64>,
        #[arg(long, value_enum, default_value_t = SideArg::Long)]
        side: SideArg,
        #[arg(long, value_enum, default_value_t = StrategyArg::Single)]
        strategy: StrategyArg,
    },
    /// Synthetic volatility smile around spot
    Smile {
        #[command(flatten)]
        market: MarketArgs,
        /// Base volatility in percent; defaults to the config's base_vol
        #[arg(long)]
        base_vol: Option<f64>,
    },
    /// Synthetic volatility surface and ATM term structure
    Surface {
        #[command(flatten)]
        market: MarketArgs,
        /// Base volatility in percent; defaults to the config's base_vol
        #[arg(long)]
        base_vol: Option<f64>,
        /// Maturities in days, comma separated
        #[arg(long, value_delimiter = ',')]
        maturities: Vec<f64>,
    },
    /// Greeks of a call and a put swept across the price axis
    Greeks {
        #[command(flatten)]
        market: MarketArgs,
        /// Single Greek to show; all of them if omitted
        #[arg(long, value_enum)]
        greek: Option<GreekArg>,
    },
}

/// Market inputs; anything omitted comes from the config's market defaults
#[derive(Args, Debug)]
struct MarketArgs {
    #[arg(long, value_enum, default_value_t = KindArg::Call)]
    kind: KindArg,
    #[arg(long)]
    spot: Option<f64>,
    #[arg(long)]
    strike: Option<f64>,
    /// Calendar days to maturity
    #[arg(long)]
    days: Option<f64>,
    /// Volatility in percent
    #[arg(long)]
    vol: Option<f64>,
    /// Risk-free rate in percent
    #[arg(long)]
    rate: Option<f64>,
    /// Dividend yield in percent
    #[arg(long)]
    dividend: Option<f64>,
}

impl MarketArgs {
    fn to_spec(&self, defaults: &MarketDefaults) -> EngineResult<OptionSpec> {
        let inputs = MarketDefaults {
            spot: self.spot.unwrap_or(defaults.spot),
            strike: self.strike.unwrap_or(defaults.strike),
            days: self.days.unwrap_or(defaults.days),
            volatility_pct: self.vol.unwrap_or(defaults.volatility_pct),
            rate_pct: self.rate.unwrap_or(defaults.rate_pct),
            dividend_pct: self.dividend.unwrap_or(defaults.dividend_pct),
        };
        let spec = inputs.to_spec(self.kind.into());
        spec.validate()?;
        Ok(spec)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Call,
    Put,
}

impl From<KindArg> for OptionType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Call => OptionType::Call,
            KindArg::Put => OptionType::Put,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    Long,
    Short,
}

impl From<SideArg> for PositionSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Long => PositionSide::Long,
            SideArg::Short => PositionSide::Short,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Single,
    Spread,
    Straddle,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GreekArg {
    Delta,
    Gamma,
    Theta,
    Vega,
    Rho,
}

impl From<GreekArg> for GreekKind {
    fn from(greek: GreekArg) -> Self {
        match greek {
            GreekArg::Delta => GreekKind::Delta,
            GreekArg::Gamma => GreekKind::Gamma,
            GreekArg::Theta => GreekKind::Theta,
            GreekArg::Vega => GreekKind::Vega,
            GreekArg::Rho => GreekKind::Rho,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> EngineResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match &cli.command {
        Command::Price { market } => cmd_price(&config, market, cli.json),
        Command::Iv {
            market_price,
            market,
        } => cmd_iv(&config, market, *market_price, cli.json),
        Command::Payoff {
            market,
            premium,
            side,
            strategy,
        } => cmd_payoff(&config, market, *premium, (*side).into(), *strategy, cli.json),
        Command::Smile { market, base_vol } => cmd_smile(&config, market, *base_vol, cli.json),
        Command::Surface {
            market,
            base_vol,
            maturities,
        } => cmd_surface(&config, market, *base_vol, maturities, cli.json),
        Command::Greeks { market, greek } => cmd_greeks(&config, market, (*greek).map(GreekKind::from), cli.json),
    }
}

fn print_json<T: Serialize>(value: &T) -> EngineResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_spec(spec: &OptionSpec) {
    println!("  Type:     {}", spec.option_type.label());
    println!("  Spot:     {}", format_currency(spec.spot, 2));
    println!("  Strike:   {}", format_currency(spec.strike, 2));
    println!("  Time:     {:.0} days", spec.days_to_maturity());
    println!("  Vol:      {:.1}%", spec.volatility * 100.0);
    println!("  Rate:     {:.2}%", spec.risk_free_rate * 100.0);
    println!("  Div:      {:.2}%\n", spec.dividend_yield * 100.0);
}

fn cmd_price(config: &EngineConfig, market: &MarketArgs, json: bool) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let result = black_scholes::price(&spec);
    let premium = result.price;
    let be = break_even(spec.strike, premium, spec.option_type);
    let pl = max_profit_loss(spec.strike, premium, spec.option_type, PositionSide::Long);

    if json {
        #[derive(Serialize)]
        struct Output {
            spec: OptionSpec,
            result: PricingResult,
            break_even: f64,
            long: ProfitLoss,
        }
        return print_json(&Output {
            spec,
            result,
            break_even: be,
            long: pl,
        });
    }

    println!("Black-Scholes Pricing");
    println!("=====================\n");
    print_spec(&spec);

    println!("Price:          {}", format_currency(result.price, 4));
    println!("Intrinsic:      {}", format_currency(result.intrinsic_value, 4));
    println!("Time value:     {}", format_currency(result.time_value, 4));
    println!("Break-even:     {}", format_currency(be, 2));
    println!("Max profit:     {}", format_bound(&pl.max_profit, 2));
    println!("Max loss:       {}", format_bound(&pl.max_loss, 2));

    let g = result.greeks;
    println!("\nGreeks:");
    println!("  Delta: {:.4}", g.delta);
    println!("  Gamma: {:.4}", g.gamma);
    println!("  Theta: {:.4} (per day)", g.theta);
    println!("  Vega:  {:.4} (per 1 vol point)", g.vega);
    println!("  Rho:   {:.4} (per 1% rate)", g.rho);
    Ok(())
}

fn cmd_iv(config: &EngineConfig, market: &MarketArgs, market_price: f64, json: bool) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let solution = implied_volatility_with_config(market_price, &spec, &config.solver);

    if json {
        return print_json(&solution);
    }

    println!("Implied Volatility");
    println!("==================\n");
    print_spec(&spec);
    println!("Market price:   {}", format_currency(market_price, 4));
    println!("Implied vol:    {:.2}%", solution.volatility * 100.0);
    println!("Iterations:     {}", solution.iterations);
    println!("Residual:       {:.6}", solution.residual);
    if !solution.converged {
        println!("(did not converge; estimate may be unreliable)");
    }
    Ok(())
}

fn cmd_payoff(
    config: &EngineConfig,
    market: &MarketArgs,
    premium: Option<f64>,
    side: PositionSide,
    strategy: StrategyArg,
    json: bool,
) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let premium = premium.unwrap_or_else(|| black_scholes::price(&spec).price);
    if !premium.is_finite() || premium < 0.0 {
        return Err(EngineError::invalid_input(format!("premium must be non-negative, got {}", premium)));
    }

    let strategy = match strategy {
        StrategyArg::Single => Strategy::single(spec.option_type, side, spec.strike, premium),
        StrategyArg::Spread => Strategy::bull_call_spread(spec.strike, premium),
        StrategyArg::Straddle => Strategy::long_straddle(spec.strike, premium),
    };
    let strategy = match (side, strategy.legs.len()) {
        // Single legs already carry the side
        (PositionSide::Short, n) if n > 1 => strategy.inverted(),
        _ => strategy,
    };

    let prices = analysis::price_range_with_config(spec.strike, &config.payoff);
    let curve = strategy.payoff_curve(&prices);
    let summary = PayoffSummary::from_curve(&curve);

    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            strategy: &'a Strategy,
            net_premium: f64,
            curve: &'a [PayoffPoint],
            summary: Option<PayoffSummary>,
        }
        return print_json(&Output {
            strategy: &strategy,
            net_premium: strategy.net_premium(),
            curve: &curve,
            summary,
        });
    }

    println!("Payoff: {}", strategy.name);
    println!("========{}\n", "=".repeat(strategy.name.len()));
    for leg in &strategy.legs {
        println!(
            "  {} {} x{} @ {} (premium {})",
            leg.side.label(),
            leg.option_type.label(),
            leg.quantity,
            format_currency(leg.strike, 2),
            format_currency(leg.premium, 2)
        );
    }
    println!("  Net premium: {}\n", format_currency(strategy.net_premium(), 2));

    println!("{:>14} {:>14} {:>14}", "Underlying", "Payoff", "Intrinsic");
    for p in &curve {
        println!(
            "{:>14} {:>14} {:>14}",
            format_currency(p.underlying_price, 2),
            format_currency(p.payoff, 2),
            format_currency(p.intrinsic_value, 2)
        );
    }

    if let Some(summary) = summary {
        println!("\nMax payoff:  {}", format_currency(summary.max_payoff, 2));
        println!("Min payoff:  {}", format_currency(summary.min_payoff, 2));
        let be: Vec<String> = summary.break_evens.iter().map(|&p| format_currency(p, 2)).collect();
        println!("Break-evens: {}", if be.is_empty() { "-".to_string() } else { be.join(", ") });
        if let Some(rr) = summary.reward_risk {
            println!("Reward/risk: {:.2}", rr);
        }
    }

    if strategy.legs.len() == 1 {
        let leg = strategy.legs[0];
        let pl = max_profit_loss(leg.strike, leg.premium, leg.option_type, leg.side);
        println!("Max profit (to expiry): {}", format_bound(&pl.max_profit, 2));
        println!("Max loss (to expiry):   {}", format_bound(&pl.max_loss, 2));
    }
    Ok(())
}

fn base_vol(config: &EngineConfig, base_vol_pct: Option<f64>) -> f64 {
    base_vol_pct.map(|v| v / 100.0).unwrap_or(config.base_vol)
}

fn cmd_smile(config: &EngineConfig, market: &MarketArgs, base_vol_pct: Option<f64>, json: bool) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let base = base_vol(config, base_vol_pct);
    let strikes = price_range(spec.spot, config.payoff.range, config.payoff.steps);
    let points = smile::volatility_smile_with_model(
        spec.spot,
        &strikes,
        spec.time_to_maturity,
        spec.risk_free_rate,
        base,
        &config.smile,
    );

    if json {
        return print_json(&points);
    }

    println!("Volatility Smile ({:.0} days, base {:.1}%)", spec.days_to_maturity(), base * 100.0);
    println!("=========================================\n");
    println!("{:>14} {:>10} {:>10} {:>8}", "Strike", "Moneyness", "IV", "Delta");
    for p in &points {
        println!(
            "{:>14} {:>10.3} {:>9.2}% {:>8.4}",
            format_currency(p.strike, 2),
            p.strike / spec.spot,
            p.implied_vol * 100.0,
            p.delta
        );
    }
    Ok(())
}

fn cmd_surface(
    config: &EngineConfig,
    market: &MarketArgs,
    base_vol_pct: Option<f64>,
    maturities: &[f64],
    json: bool,
) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let base = base_vol(config, base_vol_pct);
    let maturities: Vec<f64> = if maturities.is_empty() {
        DEFAULT_MATURITIES.to_vec()
    } else {
        maturities.to_vec()
    };
    if let Some(bad) = maturities.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
        return Err(EngineError::invalid_input(format!("maturities must be positive days, got {}", bad)));
    }

    let strikes = price_range(spec.spot, config.payoff.range, config.payoff.steps);
    let surface = smile::volatility_surface(spec.spot, &strikes, &maturities, base, &config.smile);
    let term = smile::term_structure(base, &maturities, &config.smile);

    if json {
        #[derive(Serialize)]
        struct Output {
            surface: Vec<SurfacePoint>,
            term_structure: Vec<TermStructurePoint>,
        }
        return print_json(&Output {
            surface: surface.points(),
            term_structure: term,
        });
    }

    println!("Volatility Surface (base {:.1}%)", base * 100.0);
    println!("===============================\n");
    print!("{:>14}", "Strike");
    for d in &maturities {
        print!(" {:>8}", format!("{}d", d));
    }
    println!();
    for (si, strike) in surface.strikes.iter().enumerate() {
        print!("{:>14}", format_currency(*strike, 2));
        for ti in 0..maturities.len() {
            print!(" {:>7.2}%", surface.vols[[si, ti]] * 100.0);
        }
        println!();
    }

    println!("\nTerm Structure");
    println!("{:>8} {:>10} {:>10} {:>10}", "Days", "ATM", "90%", "110%");
    for p in &term {
        println!(
            "{:>8} {:>9.2}% {:>9.2}% {:>9.2}%",
            p.days,
            p.atm_vol * 100.0,
            p.low_strike_vol * 100.0,
            p.high_strike_vol * 100.0
        );
    }
    Ok(())
}

fn cmd_greeks(config: &EngineConfig, market: &MarketArgs, greek: Option<GreekKind>, json: bool) -> EngineResult<()> {
    let spec = market.to_spec(&config.market)?;
    let prices = analysis::price_range_with_config(spec.strike, &config.payoff);

    match greek {
        Some(greek) => {
            let sweep = greek_sensitivity(&spec, &prices, greek);
            if json {
                return print_json(&sweep);
            }
            println!("{} vs Spot", greek.label());
            println!("==========\n");
            println!("{:>14} {:>12} {:>12}", "Spot", "Call", "Put");
            for p in &sweep {
                println!(
                    "{:>14} {:>12.4} {:>12.4}",
                    format_currency(p.underlying_price, 2),
                    p.call,
                    p.put
                );
            }
        }
        None => {
            let profile = greek_profile(&spec, &prices);
            if json {
                return print_json(&profile);
            }
            println!("Greeks vs Spot (call / put)");
            println!("===========================\n");
            print!("{:>14}", "Spot");
            for kind in GreekKind::ALL {
                print!(" {:>17}", kind.label());
            }
            println!();
            for p in &profile {
                print!("{:>14}", format_currency(p.underlying_price, 2));
                for kind in GreekKind::ALL {
                    print!(" {:>8.4}/{:<8.4}", kind.of(&p.call), kind.of(&p.put));
                }
                println!();
            }
        }
    }

    // Spot move over the axis as a percent change, for context
    if let (Some(first), Some(last)) = (prices.first(), prices.last()) {
        tracing::debug!(
            "swept spot from {} to {}",
            format_percent((first / spec.spot - 1.0) * 100.0, 1),
            format_percent((last / spec.spot - 1.0) * 100.0, 1)
        );
    }
    Ok(())
}
