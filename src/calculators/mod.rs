pub mod budget;
pub mod business;
pub mod conversion;
pub mod debt_payoff;
pub mod interest;
pub mod investing;
pub mod loan;
pub mod personal;
pub mod property;

/// Longest horizon any month-by-month calculator will walk (100 years)
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// `count` units of `months_per_unit` months, or None past [`MAX_HORIZON_MONTHS`].
pub fn horizon_months(count: u32, months_per_unit: u32) -> Option<u32> {
    count
        .checked_mul(months_per_unit)
        .filter(|months| *months <= MAX_HORIZON_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_stops_at_one_hundred_years() {
        assert_eq!(horizon_months(100, 12), Some(1200));
        assert_eq!(horizon_months(101, 12), None);
        assert_eq!(horizon_months(1200, 1), Some(1200));
        assert_eq!(horizon_months(400_000_000, 12), None);
        assert_eq!(horizon_months(0, 12), Some(0));
    }
}
