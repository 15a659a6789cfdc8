use crate::models::conversion::{CurrencyConversion, InflationAdjustment};

/// Units of each currency per US dollar
pub const EXCHANGE_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("BRL", 5.45),
    ("EUR", 0.92),
    ("JPY", 157.25),
    ("GBP", 0.78),
    ("AUD", 1.50),
    ("CAD", 1.37),
    ("CHF", 0.90),
    ("CNY", 7.25),
];

/// Accumulated consumer price index, base 2000 = 100
pub const CPI_INDEX: &[(i32, f64)] = &[
    (2000, 100.0),
    (2001, 107.7),
    (2002, 120.3),
    (2003, 131.6),
    (2004, 141.6),
    (2005, 150.0),
    (2006, 154.7),
    (2007, 161.6),
    (2008, 171.2),
    (2009, 178.6),
    (2010, 189.1),
    (2011, 201.3),
    (2012, 212.9),
    (2013, 225.4),
    (2014, 239.9),
    (2015, 265.6),
    (2016, 282.2),
    (2017, 290.6),
    (2018, 301.5),
    (2019, 314.5),
    (2020, 328.7),
    (2021, 361.7),
    (2022, 382.6),
    (2023, 400.2),
];

pub fn supported_currencies() -> Vec<&'static str> {
    EXCHANGE_RATES.iter().map(|(code, _)| *code).collect()
}

pub fn exchange_rate(code: &str) -> Option<f64> {
    EXCHANGE_RATES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(code))
        .map(|(_, rate)| *rate)
}

pub fn convert_currency(amount: f64, from: &str, to: &str) -> Result<CurrencyConversion, String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err("INVALID_INPUT: amount must be a non-negative number".to_string());
    }
    let rate_from = exchange_rate(from).ok_or(format!("UNKNOWN_CURRENCY: {from}"))?;
    let rate_to = exchange_rate(to).ok_or(format!("UNKNOWN_CURRENCY: {to}"))?;
    let rate = rate_to / rate_from;

    Ok(CurrencyConversion {
        amount,
        from: from.to_ascii_uppercase(),
        to: to.to_ascii_uppercase(),
        rate,
        converted_amount: amount / rate_from * rate_to,
    })
}

pub fn cpi_for_year(year: i32) -> Option<f64> {
    CPI_INDEX
        .iter()
        .find(|(candidate, _)| *candidate == year)
        .map(|(_, index)| *index)
}

pub fn latest_cpi_year() -> i32 {
    CPI_INDEX.iter().map(|(year, _)| *year).max().unwrap_or(2000)
}

/// Restate `amount` from `start_year` prices in `end_year` prices.
pub fn adjust_for_inflation(amount: f64, start_year: i32, end_year: i32) -> InflationAdjustment {
    let mut adjustment = InflationAdjustment {
        amount,
        start_year,
        end_year,
        adjusted_value: 0.0,
        inflation_rate: 0.0,
    };
    if amount <= 0.0 {
        return adjustment;
    }

    if let (Some(start), Some(end)) = (cpi_for_year(start_year), cpi_for_year(end_year)) {
        adjustment.adjusted_value = amount * (end / start);
        adjustment.inflation_rate = (end - start) / start * 100.0;
    }
    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_through_dollar_base() {
        let conversion = convert_currency(100.0, "USD", "BRL").expect("convert");
        assert!((conversion.converted_amount - 545.0).abs() < 1e-9);

        let back = convert_currency(545.0, "brl", "usd").expect("convert back");
        assert!((back.converted_amount - 100.0).abs() < 1e-9);
        assert_eq!(back.from, "BRL");
    }

    #[test]
    fn rejects_unknown_currency_and_negative_amounts() {
        assert!(convert_currency(10.0, "USD", "XYZ").unwrap_err().contains("XYZ"));
        assert!(convert_currency(-1.0, "USD", "EUR").is_err());
    }

    #[test]
    fn inflation_uses_index_ratio() {
        let adjustment = adjust_for_inflation(100.0, 2010, 2023);
        assert!((adjustment.adjusted_value - 100.0 * 400.2 / 189.1).abs() < 1e-9);
        assert!((adjustment.inflation_rate - (400.2 - 189.1) / 189.1 * 100.0).abs() < 1e-9);
        assert_eq!(latest_cpi_year(), 2023);
    }

    #[test]
    fn inflation_outside_table_is_zero() {
        let adjustment = adjust_for_inflation(100.0, 1990, 2023);
        assert_eq!(adjustment.adjusted_value, 0.0);
        assert_eq!(adjust_for_inflation(0.0, 2010, 2023).adjusted_value, 0.0);
    }
}
