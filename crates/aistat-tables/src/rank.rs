//! Competition ranking of adoption values within a year.

/// Minimum rank per value: 1 plus the count of strictly greater values.
///
/// Ties share the lowest rank of the group. Non-finite values receive no
/// rank and do not displace the rank of any other value.
pub fn min_ranks(values: &[f64]) -> Vec<Option<u32>> {
    values
        .iter()
        .map(|value| {
            if !value.is_finite() {
                return None;
            }
            let greater = values
                .iter()
                .filter(|other| other.is_finite() && **other > *value)
                .count();
            Some(greater as u32 + 1)
        })
        .collect()
}
