// tests/pricer_test.rs
use option_payoffs::analytics::{
    check_quote_parity, option_greeks, par_sweep, price_option, sweep, GreeksConfig, MarketParameters,
    SweepVariable,
};
use option_payoffs::contracts::OptionKind;
use option_payoffs::OptionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_params(rng: &mut StdRng) -> (MarketParameters, f64) {
    let params = MarketParameters::new(
        rng.gen_range(10.0..300.0),
        rng.gen_range(0.0..0.15),
        rng.gen_range(0.01..1.5),
        rng.gen_range(0.001..5.0),
    )
    .expect("sampled parameters are valid");
    (params, rng.gen_range(10.0..300.0))
}

#[test]
fn test_reference_scenario() {
    let params = MarketParameters::new(100.0, 0.05, 0.2, 1.0).unwrap();
    let quote = price_option(&params, 100.0).unwrap();
    let parity = check_quote_parity(&quote, &params, 100.0).unwrap();

    println!("\nCall price: {}", quote.call_price);
    println!("Put price: {}", quote.put_price);
    println!("Call delta: {}", quote.call_delta);
    println!("Parity difference: {}", parity.difference);

    assert!((quote.call_price - 10.45).abs() < 5e-3);
    assert!((quote.put_price - 5.57).abs() < 5e-3);
    assert!((quote.call_delta - 0.6368).abs() < 1e-4);
    assert!(parity.difference.abs() < 1e-6);
}

#[test]
fn test_parity_holds_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut worst: f64 = 0.0;
    for _ in 0..5_000 {
        let (params, strike) = random_params(&mut rng);
        let quote = price_option(&params, strike).unwrap();
        let parity = check_quote_parity(&quote, &params, strike).unwrap();
        worst = worst.max(parity.difference.abs());
        assert!(
            parity.difference.abs() < 1e-6,
            "parity violated by {} for {:?}, K={}",
            parity.difference,
            params,
            strike
        );
    }
    println!("\nWorst parity difference over 5000 samples: {:e}", worst);
}

#[test]
fn test_delta_bounds_and_offset() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..5_000 {
        let (params, strike) = random_params(&mut rng);
        let quote = price_option(&params, strike).unwrap();
        assert!((0.0..=1.0).contains(&quote.call_delta), "call delta {}", quote.call_delta);
        assert!((-1.0..=0.0).contains(&quote.put_delta), "put delta {}", quote.put_delta);
        assert!((quote.call_delta - quote.put_delta - 1.0).abs() < 1e-15);
        assert!(quote.call_price > -1e-12 && quote.put_price > -1e-12);
    }
}

#[test]
fn test_convergence_to_intrinsic_as_time_vanishes() {
    let base = MarketParameters::new(100.0, 0.05, 0.2, 1.0).unwrap();
    for strike in [80.0, 95.0, 100.0, 105.0, 120.0] {
        let mut previous_error = f64::INFINITY;
        for t in [1e-2, 1e-4, 1e-6, 1e-8] {
            let quote = price_option(&base.with_time_to_expiry(t), strike).unwrap();
            let call_error = (quote.call_price - (100.0 - strike).max(0.0)).abs();
            let put_error = (quote.put_price - (strike - 100.0).max(0.0)).abs();
            let error = call_error.max(put_error);
            assert!(error <= previous_error + 1e-12, "K={strike}, T={t}: error grew to {error}");
            previous_error = error;
        }
        assert!(previous_error < 1e-3, "K={strike}: residual {previous_error}");
    }
}

#[test]
fn test_expiry_boundary_is_pinned() {
    let expired = MarketParameters::new(100.0, 0.05, 0.2, 0.0).unwrap();
    let atm = price_option(&expired, 100.0).unwrap();
    assert_eq!((atm.call_delta, atm.put_delta), (0.5, -0.5));
    assert_eq!((atm.call_price, atm.put_price), (0.0, 0.0));
}

#[test]
fn test_sweeps_over_every_input() {
    let params = MarketParameters::default();
    let cases = [
        (SweepVariable::Spot, vec![70.0, 85.0, 100.0, 115.0, 130.0]),
        (SweepVariable::Strike, vec![70.0, 85.0, 100.0, 115.0, 130.0]),
        (SweepVariable::Volatility, vec![0.05, 0.1, 0.2, 0.4, 0.8]),
        (SweepVariable::Time, vec![0.0, 0.25, 0.5, 1.0, 2.0]),
        (SweepVariable::Rate, vec![0.0, 0.02, 0.05, 0.08, 0.1]),
    ];

    for (variable, values) in cases {
        let quotes = sweep(&params, 100.0, variable, &values).unwrap();
        assert_eq!(quotes.len(), values.len());
        let calls: Vec<f64> = quotes.iter().map(|q| q.call_price).collect();
        let increasing = calls.windows(2).all(|w| w[1] > w[0]);
        let decreasing = calls.windows(2).all(|w| w[1] < w[0]);
        match variable {
            SweepVariable::Strike => assert!(decreasing, "{:?}: {:?}", variable, calls),
            _ => assert!(increasing, "{:?}: {:?}", variable, calls),
        }
        assert_eq!(par_sweep(&params, 100.0, variable, &values).unwrap(), quotes);
    }
}

#[test]
fn test_put_falls_with_rate() {
    let params = MarketParameters::default();
    let rates = [0.0, 0.03, 0.06, 0.09];
    let puts: Vec<f64> = sweep(&params, 100.0, SweepVariable::Rate, &rates)
        .unwrap()
        .iter()
        .map(|q| q.put_price)
        .collect();
    assert!(puts.windows(2).all(|w| w[1] < w[0]), "{:?}", puts);
}

#[test]
fn test_invalid_inputs_fail_fast() {
    let params = MarketParameters::default();
    match sweep(&params, 100.0, SweepVariable::Spot, &[100.0, -5.0]) {
        Err(OptionError::InvalidParameter { parameter, value, .. }) => {
            assert_eq!(parameter, "spot");
            assert_eq!(value, -5.0);
        }
        other => panic!("expected InvalidParameter, got {:?}", other),
    }
    assert!(MarketParameters::new(100.0, 0.05, 0.0, 1.0).is_err());
    assert!(MarketParameters::new(100.0, 0.05, 0.2, -1.0).is_err());
}

#[test]
fn test_greeks_reference_values() {
    let params = MarketParameters::default();
    let all = GreeksConfig::DELTA | GreeksConfig::GAMMA | GreeksConfig::VEGA | GreeksConfig::THETA | GreeksConfig::RHO;
    let call = option_greeks(&params, 100.0, OptionKind::Call, all).unwrap();
    let put = option_greeks(&params, 100.0, OptionKind::Put, all).unwrap();

    let expected_gamma = 0.018762017345847;
    let expected_vega = 37.524034691693792;
    let expected_theta = -6.414027546438197;

    assert!((call.gamma.unwrap() - expected_gamma).abs() < 1e-9);
    assert_eq!(call.gamma, put.gamma);
    assert!((call.vega.unwrap() - expected_vega).abs() < 1e-8);
    assert!((call.theta.unwrap() - expected_theta).abs() < 1e-8);
    assert!((call.delta.unwrap() - put.delta.unwrap() - 1.0).abs() < 1e-15);
    assert!(call.rho.unwrap() > 0.0 && put.rho.unwrap() < 0.0);
}
