use crate::calculators::debt_payoff;
use crate::commands::calculate::non_negative;
use crate::commands::settings::EffectiveSettings;
use crate::models::debt::*;
use crate::models::history::{HistoryEntry, DEBT_PAYOFF_KEY};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Payoff inputs as sent by the caller; missing values fall back to settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayoffArgs {
    pub debts: Vec<Debt>,
    pub extra_payment: Option<f64>,
    pub strategy: Option<SimulationStrategy>,
}

pub async fn plan_debt_payoff(
    data_dir: String,
    args: PayoffArgs,
    cache: &Arc<Mutex<PlannerCache>>,
) -> Result<SimulationResult, String> {
    plan_debt_payoff_internal(&data_dir, args, cache)
}

pub fn plan_debt_payoff_internal(
    data_dir: &str,
    args: PayoffArgs,
    cache: &Arc<Mutex<PlannerCache>>,
) -> Result<SimulationResult, String> {
    let settings = crate::commands::settings::load_effective_settings(data_dir)?;
    let request = resolve_request(args, &settings);
    let result = debt_payoff::simulate(&request.debts, request.extra_payment, request.strategy);

    log::info!(
        "planned {} debts with {}: {} months, interest {:.2}",
        request.debts.len(),
        request.strategy.as_str(),
        result.total_months,
        result.total_interest
    );
    if !result.converged() {
        log::warn!(
            "payoff plan hit the {}-month cap with {:.2} remaining",
            debt_payoff::MAX_MONTHS,
            result.final_balance()
        );
    }

    update_cache(cache, request.clone(), result.clone());

    if settings.auto_save_history && !result.schedule.is_empty() {
        if let Err(e) = persist_plan(data_dir, &request, &result, settings.history_limit) {
            log::warn!("auto-save of payoff plan failed: {e}");
        }
    }

    Ok(result)
}

pub async fn save_debt_payoff(data_dir: String, args: PayoffArgs) -> Result<HistoryEntry, String> {
    let settings = crate::commands::settings::load_effective_settings(&data_dir)?;
    let request = resolve_request(args, &settings);
    let result = debt_payoff::simulate(&request.debts, request.extra_payment, request.strategy);
    persist_plan(&data_dir, &request, &result, settings.history_limit)
}

pub async fn compare_payoff_strategies(
    data_dir: String,
    args: PayoffArgs,
) -> Result<StrategyComparison, String> {
    let settings = crate::commands::settings::load_effective_settings(&data_dir)?;
    let request = resolve_request(args, &settings);
    Ok(debt_payoff::compare_strategies(&request.debts, request.extra_payment))
}

pub async fn get_payoff_breakdown(cache: &Arc<Mutex<PlannerCache>>) -> Result<PayoffBreakdown, String> {
    let cache_lock = cache.lock().map_err(|_| "Cache lock error".to_string())?;
    let request = cache_lock
        .request
        .as_ref()
        .ok_or("No payoff plan available. Plan a payoff first.")?;
    let result = cache_lock.result.as_ref().ok_or("No payoff plan available")?;

    Ok(debt_payoff::breakdown(request, result))
}

fn resolve_request(args: PayoffArgs, settings: &EffectiveSettings) -> PayoffRequest {
    PayoffRequest {
        debts: args.debts.into_iter().map(sanitize_debt).collect(),
        extra_payment: non_negative(args.extra_payment.unwrap_or(settings.default_extra_payment)),
        strategy: args.strategy.unwrap_or(settings.default_strategy),
    }
}

fn sanitize_debt(debt: Debt) -> Debt {
    Debt {
        balance: non_negative(debt.balance),
        rate: non_negative(debt.rate),
        min_payment: non_negative(debt.min_payment),
        ..debt
    }
}

fn persist_plan(
    data_dir: &str,
    request: &PayoffRequest,
    result: &SimulationResult,
    limit: usize,
) -> Result<HistoryEntry, String> {
    let data = serde_json::json!({
        "inputs": request,
        "results": {
            "total_months": result.total_months,
            "total_interest": result.total_interest,
        }
    });

    let conn = crate::commands::db::get_db_connection(data_dir).map_err(|e| format!("DB error: {e}"))?;
    crate::commands::db::save_history_entry(&conn, DEBT_PAYOFF_KEY, &data, limit)
        .map_err(|e| format!("DB insert error: {e}"))
}

fn update_cache(cache: &Arc<Mutex<PlannerCache>>, request: PayoffRequest, result: SimulationResult) {
    if let Ok(mut lock) = cache.lock() {
        lock.request = Some(request);
        lock.result = Some(result);
    }
}
