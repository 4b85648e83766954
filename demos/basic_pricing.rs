//! Example: Basic options pricing with Black-Scholes
//!
//! Run with: cargo run --example basic_pricing

use options_analytics::prelude::*;

fn main() {
    // Calculator inputs: percent vol and rate, maturity in days
    let spot = 100.0;
    let strike = 105.0;
    let days = 90.0;
    let vol_pct = 20.0;
    let rate_pct = 5.0;
    let div = 0.01; // 1% dividend yield

    let call = OptionSpec::from_market_inputs(OptionType::Call, spot, strike, days, vol_pct, rate_pct)
        .with_dividend_yield(div);
    let put = call.with_option_type(OptionType::Put);
    let time = call.time_to_maturity;
    let rate = call.risk_free_rate;

    println!("=== Black-Scholes Pricing ===\n");
    println!("Spot:     {}", format_currency(spot, 2));
    println!("Strike:   {}", format_currency(strike, 2));
    println!("Time:     {:.4} years ({:.0} days)", time, days);
    println!("Rate:     {:.1}%", rate_pct);
    println!("Div:      {:.1}%", div * 100.0);
    println!("Vol:      {:.1}%\n", vol_pct);

    let call_result = bs_price(&call);
    let put_result = bs_price(&put);
    println!("Call Price: {}", format_currency(call_result.price, 4));
    println!("Put Price:  {}", format_currency(put_result.price, 4));

    // Put-call parity: C - P = S*e^(-qT) - K*e^(-rT)
    let parity_lhs = call_result.price - put_result.price;
    let parity_rhs = spot * (-div * time).exp() - strike * (-rate * time).exp();
    println!("\nPut-Call Parity Check:");
    println!("  C - P = {:.4}", parity_lhs);
    println!("  S*e^(-qT) - K*e^(-rT) = {:.4}", parity_rhs);
    println!("  Difference: {:.6}", (parity_lhs - parity_rhs).abs());

    println!("\n=== Greeks (Call) ===\n");
    let greeks = call_result.greeks;
    println!("Delta:  {:.4}", greeks.delta);
    println!("Gamma:  {:.4}", greeks.gamma);
    println!("Theta:  {:.4} (per day)", greeks.theta);
    println!("Vega:   {:.4} (per 1 vol point)", greeks.vega);
    println!("Rho:    {:.4} (per 1% rate)", greeks.rho);

    println!("\n=== Implied Volatility ===\n");
    let market_price = call_result.price + 0.50; // Simulated market price
    let solution = implied_volatility_with_config(market_price, &call, &SolverConfig::default());
    println!(
        "Market price {} implies vol: {:.2}% ({} iterations{})",
        format_currency(market_price, 4),
        solution.volatility * 100.0,
        solution.iterations,
        if solution.converged { "" } else { ", not converged" }
    );

    println!("\n=== Position at Expiry (long call) ===\n");
    let premium = call_result.price;
    let pl = max_profit_loss(strike, premium, OptionType::Call, PositionSide::Long);
    println!("Break-even: {}", format_currency(break_even(strike, premium, OptionType::Call), 2));
    println!("Max profit: {}", format_bound(&pl.max_profit, 2));
    println!("Max loss:   {}", format_bound(&pl.max_loss, 2));

    let prices = price_range(strike, 0.2, 8);
    let curve = payoff(&prices, strike, premium, OptionType::Call, PositionSide::Long);
    for p in &curve {
        println!(
            "  {:>12} -> {:>12}",
            format_currency(p.underlying_price, 2),
            format_currency(p.payoff, 2)
        );
    }
}
