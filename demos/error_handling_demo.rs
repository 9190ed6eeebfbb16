// demos/error_handling_demo.rs
use option_payoffs::analytics::{option_greeks, sweep, GreeksConfig, MarketParameters, SweepVariable};
use option_payoffs::contracts::OptionKind;
use option_payoffs::error::OptionError;
use option_payoffs::strategy::NamedStrategy;
use option_payoffs::{EngineConfig, OptionLeg, Strategy};

fn main() {
    println!("Error Handling Demo for option-payoffs");
    println!("======================================\n");

    // Test 1: Negative spot
    println!("1. Testing negative spot price...");
    match MarketParameters::new(-100.0, 0.05, 0.2, 1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Zero volatility before expiry
    println!("\n2. Testing zero volatility with time remaining...");
    match MarketParameters::new(100.0, 0.05, 0.0, 1.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Misordered spread strikes
    println!("\n3. Testing bull call spread with lower >= upper...");
    match NamedStrategy::bull_call_spread(110.0, 90.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Empty strategy and zero-quantity leg
    println!("\n4. Testing empty strategy and zero-quantity leg...");
    match Strategy::new(Vec::new()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
    match OptionLeg::new(OptionKind::Call, 100.0, 0.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: A sweep stops at the first bad value
    println!("\n5. Testing sweep with an invalid volatility...");
    let params = MarketParameters::default();
    match sweep(&params, 100.0, SweepVariable::Volatility, &[0.1, 0.2, -0.3, 0.4]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Unsupported closed forms
    println!("\n6. Testing unsupported operations...");
    match option_greeks(&params, 100.0, OptionKind::BinaryCall, GreeksConfig::DELTA) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
    let lopsided = NamedStrategy::butterfly(80.0, 100.0, 130.0).expect("ordered strikes");
    match lopsided.metrics(Some(2.0)) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Bad configuration documents
    println!("\n7. Testing configuration loading...");
    for json in [
        r#"{ "grid": { "lower": 150.0, "upper": 50.0 } }"#,
        r#"{ "grid": { "points": "many" } }"#,
    ] {
        match EngineConfig::from_json_str(json) {
            Ok(_) => println!("   Unexpected: Should have failed!"),
            Err(e) => println!("   ✓ Caught error: {}", e),
        }
    }

    // Test 8: Valid inputs should work
    println!("\n8. Testing valid inputs...");
    match NamedStrategy::straddle(100.0).and_then(|s| s.metrics(Some(12.0))) {
        Ok(metrics) => println!("   ✓ Success: straddle break-evens = {:?}", metrics.break_evens),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 9: Error type matching
    println!("\n9. Testing error type matching...");
    match MarketParameters::new(100.0, 0.05, 0.2, f64::NAN) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(OptionError::InvalidParameter { parameter, value, constraint }) => {
            println!("   ✓ Caught InvalidParameter: {} = {} ({})", parameter, value, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
