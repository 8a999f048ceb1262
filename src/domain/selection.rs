use crate::domain::price::Price;

/// Reduce a candidate list to the single applicable rate.
///
/// The winner is the maximum under the composite order (priority, then
/// price_list). An empty slice yields `None`; that is the normal "no price
/// found" outcome, not a failure. When two candidates are fully tied on both
/// keys the first-encountered one is kept, because a candidate only replaces
/// the incumbent when it is strictly greater on at least one key.
pub fn select_best_price(prices: &[Price]) -> Option<&Price> {
    prices.iter().fold(None, |best, candidate| {
        if candidate.has_higher_priority_than(best) {
            Some(candidate)
        } else {
            best
        }
    })
}
