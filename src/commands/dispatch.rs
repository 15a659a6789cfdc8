use crate::commands::{calculate, db, payoff, settings};
use crate::models::debt::PlannerCache;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// State shared by every command: where files live and the last payoff plan.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub data_dir: String,
    pub cache: Arc<Mutex<PlannerCache>>,
}

impl AppContext {
    pub fn new(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: Arc::new(Mutex::new(PlannerCache::default())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    cmd: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Deserialize)]
struct HistoryArgs {
    operation: String,
    calculator: String,
    data: Option<Value>,
    id: Option<String>,
}

/// Route one command by name.
pub async fn invoke(ctx: &AppContext, cmd: &str, args: Value) -> Result<Value, String> {
    log::debug!("invoke {cmd}");
    let data_dir = ctx.data_dir.clone();

    match cmd {
        "plan_debt_payoff" => to_json(payoff::plan_debt_payoff(data_dir, parse(args)?, &ctx.cache).await),
        "compare_payoff_strategies" => to_json(payoff::compare_payoff_strategies(data_dir, parse(args)?).await),
        "get_payoff_breakdown" => to_json(payoff::get_payoff_breakdown(&ctx.cache).await),
        "save_debt_payoff" => to_json(payoff::save_debt_payoff(data_dir, parse(args)?).await),

        "amortize_loan" => to_json(calculate::amortize_loan(parse(args)?).await),
        "compare_loans" => to_json(calculate::compare_loans(parse(args)?).await),
        "refinance_mortgage" => to_json(calculate::refinance_mortgage(parse(args)?).await),
        "compare_interest" => to_json(calculate::compare_interest(parse(args)?).await),
        "solve_tvm" => to_json(calculate::solve_tvm(parse(args)?).await),
        "project_investment" => to_json(calculate::project_investment(parse(args)?).await),
        "project_retirement" => to_json(calculate::project_retirement(parse(args)?).await),
        "plan_withdrawal" => to_json(calculate::plan_withdrawal(parse(args)?).await),
        "savings_goal" => to_json(calculate::savings_goal(parse(args)?).await),
        "growth_rate" => to_json(calculate::growth_rate(parse(args)?).await),
        "rule_of_72" => to_json(calculate::rule_of_72(field(&args, "rate")?).await),
        "stock_average" => to_json(calculate::stock_average(field(&args, "purchases")?).await),
        "summarize_budget" => to_json(calculate::summarize_budget(field(&args, "categories")?).await),
        "summarize_ledger" => to_json(calculate::summarize_ledger(field(&args, "transactions")?).await),
        "emergency_fund" => to_json(calculate::emergency_fund(field(&args, "monthly_expenses")?).await),
        "convert_currency" => to_json(calculate::convert_currency(data_dir, parse(args)?).await),
        "adjust_for_inflation" => to_json(calculate::adjust_for_inflation(parse(args)?).await),
        "present_value" => to_json(calculate::present_value(parse(args)?).await),
        "return_on_investment" => to_json(calculate::return_on_investment(parse(args)?).await),
        "break_even" => to_json(calculate::break_even(parse(args)?).await),
        "profit_margin" => to_json(calculate::profit_margin(parse(args)?).await),
        "customer_lifetime_value" => to_json(calculate::customer_lifetime_value(parse(args)?).await),
        "ad_return" => to_json(calculate::ad_return(parse(args)?).await),
        "net_salary" => to_json(calculate::net_salary(parse(args)?).await),
        "split_tip" => to_json(calculate::split_tip(parse(args)?).await),
        "compare_cost_of_living" => to_json(calculate::compare_cost_of_living(parse(args)?).await),
        "rank_credit_cards" => to_json(calculate::rank_credit_cards(parse(args)?).await),
        "lease_vs_buy" => to_json(calculate::lease_vs_buy(parse(args)?).await),
        "rental_property" => to_json(calculate::rental_property(parse(args)?).await),

        "history_crud" => {
            let history: HistoryArgs = parse(args)?;
            db::history_crud(data_dir, history.operation, history.calculator, history.data, history.id).await
        }
        "get_settings" => settings::get_settings(data_dir).await,
        "save_settings" => settings::save_settings(data_dir, args).await,

        _ => Err(format!("Unknown command: {cmd}")),
    }
}

/// Handle one envelope line, always producing a response object.
pub async fn handle_line(ctx: &AppContext, line: &str) -> Value {
    let envelope: Envelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => return json!({ "error": format!("Invalid request: {e}") }),
    };

    match invoke(ctx, &envelope.cmd, envelope.args).await {
        Ok(value) => json!({ "ok": value }),
        Err(e) => {
            log::warn!("{} failed: {e}", envelope.cmd);
            json!({ "error": e })
        }
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {e}"))
}

fn field<T: DeserializeOwned>(args: &Value, key: &str) -> Result<T, String> {
    let value = args.get(key).cloned().ok_or(format!("Missing argument: {key}"))?;
    parse(value)
}

fn to_json<T: Serialize>(result: Result<T, String>) -> Result<Value, String> {
    result.and_then(|value| serde_json::to_value(value).map_err(|e| format!("Serialize error: {e}")))
}
