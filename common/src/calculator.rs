use crate::models::CalculationResult;

/// Simulate investing `investment` USD in a coin priced `buy_price`
/// and valuing the acquired units at `sell_price`.
///
/// A zero `buy_price` is not special-cased: the resulting quantity is
/// infinite (or NaN) and propagates into every derived field.
pub fn compute(investment: f64, buy_price: f64, sell_price: f64) -> CalculationResult {
    let quantity = investment / buy_price;
    let final_value = quantity * sell_price;
    let profit = final_value - investment;
    let roi_percent = (profit / investment) * 100.0;

    CalculationResult {
        quantity,
        final_value,
        profit,
        roi_percent,
    }
}
