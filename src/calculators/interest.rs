use crate::calculators::horizon_months;
use crate::models::projection::{InterestDataPoint, InterestInput, PeriodUnit, TvmInput, TvmSolution, TvmTarget};

/// Simple vs compound growth of `principal`, one point per requested period.
/// Empty past the maximum horizon.
pub fn compare_interest(input: &InterestInput) -> Vec<InterestDataPoint> {
    let (monthly_rate, months_per_period) = match input.period {
        PeriodUnit::Years => (input.rate / 100.0 / 12.0, 12),
        PeriodUnit::Months => (input.rate / 100.0, 1),
    };
    let Some(total_months) = horizon_months(input.time, months_per_period) else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(input.time as usize);
    let mut total_simple = input.principal;
    let mut total_compound = input.principal;

    for month in 1..=total_months {
        total_simple += input.principal * monthly_rate;
        total_compound += total_compound * monthly_rate;

        if month % months_per_period == 0 {
            points.push(InterestDataPoint {
                period: month / months_per_period,
                simple_interest: total_simple - input.principal,
                compound_interest: total_compound - input.principal,
                total_simple,
                total_compound,
            });
        }
    }

    points
}

/// Today's value of `future_value` discounted yearly at `annual_rate` percent.
pub fn present_value(future_value: f64, annual_rate: f64, years: f64) -> f64 {
    if future_value <= 0.0 || annual_rate <= 0.0 || years <= 0.0 {
        return 0.0;
    }
    future_value / growth(annual_rate / 100.0, years)
}

/// Solve the time-value-of-money equation for `target`.
///
/// Cash-flow convention: `pv*(1+r)^n + pmt*((1+r)^n - 1)/r + fv = 0`, with
/// `r` the monthly rate. Outflows are negative.
pub fn solve_tvm(target: TvmTarget, input: &TvmInput) -> Result<TvmSolution, String> {
    let rate = require(input.i, "I")? / 100.0 / 12.0;

    let value = match target {
        TvmTarget::Fv => {
            let n = require(input.n, "N")?;
            let pv = require(input.pv, "PV")?;
            let pmt = require(input.pmt, "PMT")?;
            -(pv * growth(rate, n) + pmt * annuity_factor(rate, n))
        }
        TvmTarget::Pmt => {
            let n = require(input.n, "N")?;
            let pv = require(input.pv, "PV")?;
            let fv = require(input.fv, "FV")?;
            let factor = annuity_factor(rate, n);
            if factor == 0.0 {
                return Err("INVALID_INPUT: N must be non-zero to solve PMT".to_string());
            }
            -(fv + pv * growth(rate, n)) / factor
        }
        TvmTarget::Pv => {
            let n = require(input.n, "N")?;
            let pmt = require(input.pmt, "PMT")?;
            let fv = require(input.fv, "FV")?;
            -(fv + pmt * annuity_factor(rate, n)) / growth(rate, n)
        }
        TvmTarget::N => {
            let pv = require(input.pv, "PV")?;
            let pmt = require(input.pmt, "PMT")?;
            let fv = require(input.fv, "FV")?;
            solve_periods(rate, pv, pmt, fv)?
        }
    };

    if !value.is_finite() {
        return Err(format!("INVALID_INPUT: no finite solution for {target:?}"));
    }

    let mut inputs = input.clone();
    let rounded = round_cents(value);
    match target {
        TvmTarget::Fv => inputs.fv = Some(rounded),
        TvmTarget::Pmt => inputs.pmt = Some(rounded),
        TvmTarget::Pv => inputs.pv = Some(rounded),
        TvmTarget::N => inputs.n = Some(rounded),
    }

    Ok(TvmSolution {
        target,
        value: rounded,
        inputs,
    })
}

fn solve_periods(rate: f64, pv: f64, pmt: f64, fv: f64) -> Result<f64, String> {
    if rate == 0.0 {
        if pmt == 0.0 {
            return Err("INVALID_INPUT: PMT must be non-zero when I is zero".to_string());
        }
        return Ok(-(fv + pv) / pmt);
    }

    let ratio = (pmt - fv * rate) / (pmt + pv * rate);
    if !(ratio > 0.0) {
        return Err("INVALID_INPUT: cash flows never reach the future value".to_string());
    }
    Ok(ratio.ln() / (1.0 + rate).ln())
}

fn require(value: Option<f64>, name: &str) -> Result<f64, String> {
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("INVALID_INPUT: {name} is required"))
}

fn growth(rate: f64, periods: f64) -> f64 {
    (1.0 + rate).powf(periods)
}

fn annuity_factor(rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        periods
    } else {
        (growth(rate, periods) - 1.0) / rate
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
