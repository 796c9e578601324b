// ============================================================================
// Basic Usage Example
// ============================================================================

use bounded_real::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Bounded Real Example ===\n");

    // Measurements with their uncertainty
    let width: BoundedReal = "(12.35 ± 0.02)".parse()?;
    let height: BoundedReal = "(4.10 ± 0.01)".parse()?;
    println!("width  = {}", width);
    println!("height = {}", height);

    let area = &width * &height;
    println!("area   = {}", area);
    println!("  range: [{}, {}]", area.minimum(), area.maximum());
    println!("  precision: {} digits, accuracy: {} decimals", area.precision(), area.accuracy());

    // Exact arithmetic stays exact until a division does not terminate
    println!("\n=== Exactness ===");
    let a = BoundedReal::from_i64(9000);
    for divisor in [3i64, 7] {
        let back = a.divide_int(divisor).times_int(divisor);
        println!(
            "9000 / {} * {} = {} (exact: {})",
            divisor,
            divisor,
            back,
            back.is_exact()
        );
    }

    // Scoped precision settings
    println!("\n=== Square Roots ===");
    for exactness in [10u32, 30, 60] {
        let ctx = RealContext::default().with_exactness(exactness)?;
        let root = RealContext::scope(ctx, || BoundedReal::from_i64(2).sqrt())?;
        println!("sqrt(2) @ {:>2} digits = {}", exactness, root);
    }

    // Undefined results propagate as NaN
    println!("\n=== NaN Propagation ===");
    let around_zero = BoundedReal::from_bounds(0, 0, 5)?;
    let result = BoundedReal::one().divide(&around_zero).plus(&area);
    println!("1 / {} + area = {}", around_zero, result);
    match result.round() {
        Ok(n) => println!("rounded: {}", n),
        Err(e) => println!("rounding failed: {}", e),
    }

    Ok(())
}
