use super::SchemeEligibility;

/// Order by benefit amount, highest first. `sort_by` is stable, so schemes with
/// equal benefits keep their catalog order.
pub(crate) fn rank_by_benefit(results: &mut [SchemeEligibility]) {
    results.sort_by(|left, right| right.benefit_amount.cmp(&left.benefit_amount));
}
