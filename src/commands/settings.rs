use crate::calculators::conversion::supported_currencies;
use crate::models::debt::SimulationStrategy;
use crate::models::history::DEFAULT_HISTORY_LIMIT;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub history_limit: usize,
    pub default_strategy: SimulationStrategy,
    pub default_extra_payment: f64,
    pub display_currency: String,
    pub auto_save_history: bool,
}

pub async fn get_settings(data_dir: String) -> Result<Value, String> {
    load_settings_from_disk(&data_dir)
}

pub async fn save_settings(data_dir: String, settings: Value) -> Result<Value, String> {
    save_settings_to_disk(&data_dir, settings)
}

pub fn load_effective_settings(data_dir: &str) -> Result<EffectiveSettings, String> {
    let settings = load_settings_from_disk(data_dir)?;

    let history_limit = settings
        .get("historyLimit")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_HISTORY_LIMIT as u64) as usize;
    let default_strategy = settings
        .get("defaultStrategy")
        .and_then(Value::as_str)
        .and_then(SimulationStrategy::parse)
        .unwrap_or_default();
    let default_extra_payment = settings
        .get("defaultExtraPayment")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let display_currency = settings
        .get("displayCurrency")
        .and_then(Value::as_str)
        .unwrap_or("BRL")
        .to_string();
    let auto_save_history = settings
        .get("autoSaveHistory")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(EffectiveSettings {
        history_limit,
        default_strategy,
        default_extra_payment,
        display_currency,
        auto_save_history,
    })
}

pub fn load_settings_from_disk(data_dir: &str) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let original = if path.exists() {
        let raw = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings.json: {e}"))?;
        serde_json::from_str::<Value>(&raw).unwrap_or_else(|e| {
            log::warn!("settings.json is not valid JSON, using defaults: {e}");
            json!({})
        })
    } else {
        json!({})
    };

    let migrated = migrate_settings(original.clone());
    if migrated != original || !path.exists() {
        write_settings_file(&path, &migrated)?;
    }

    Ok(migrated)
}

pub fn save_settings_to_disk(data_dir: &str, settings: Value) -> Result<Value, String> {
    let path = settings_path(data_dir);
    ensure_data_dir(data_dir)?;

    let mut merged = load_settings_from_disk(data_dir).unwrap_or_else(|_| default_settings());
    merge_settings(&mut merged, &settings);

    let migrated = migrate_settings(merged);
    write_settings_file(&path, &migrated)?;
    log::info!("saved settings to {}", path.display());
    Ok(migrated)
}

fn settings_path(data_dir: &str) -> PathBuf {
    Path::new(data_dir).join("settings.json")
}

pub fn ensure_data_dir(data_dir: &str) -> Result<(), String> {
    fs::create_dir_all(data_dir).map_err(|e| format!("Failed to create data directory {data_dir}: {e}"))
}

fn write_settings_file(path: &Path, settings: &Value) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write settings.json: {e}"))
}

fn migrate_settings(input: Value) -> Value {
    let defaults = default_settings();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    deep_merge_defaults(&mut out, &defaults);
    sanitize_settings(&mut out);

    if let Some(obj) = out.as_object_mut() {
        obj.insert("schema_version".to_string(), json!(SETTINGS_SCHEMA_VERSION));
    }

    out
}

fn default_settings() -> Value {
    json!({
        "schema_version": SETTINGS_SCHEMA_VERSION,
        "theme": "dark",
        "historyLimit": DEFAULT_HISTORY_LIMIT,
        "defaultStrategy": "avalanche",
        "defaultExtraPayment": 200.0,
        "displayCurrency": "BRL",
        "autoSaveHistory": false
    })
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn merge_settings(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_obj), Value::Object(incoming_obj)) => {
            for (key, value) in incoming_obj {
                if let Some(existing) = target_obj.get_mut(key) {
                    merge_settings(existing, value);
                } else {
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target_slot, incoming_value) => {
            *target_slot = incoming_value.clone();
        }
    }
}

fn sanitize_settings(settings: &mut Value) {
    let Some(obj) = settings.as_object_mut() else {
        return;
    };

    clamp_u64(obj, "historyLimit", 1, 500, DEFAULT_HISTORY_LIMIT as u64);
    clamp_non_negative(obj, "defaultExtraPayment", 200.0);

    sanitize_enum(obj, "theme", &["dark", "light"], "dark");
    sanitize_enum(obj, "defaultStrategy", &["avalanche", "snowball"], "avalanche");
    sanitize_enum(obj, "displayCurrency", &supported_currencies(), "BRL");

    ensure_bool(obj, "autoSaveHistory", false);
}

fn clamp_u64(map: &mut Map<String, Value>, key: &str, min: u64, max: u64, default: u64) {
    let raw = map.get(key).and_then(Value::as_u64).unwrap_or(default);
    map.insert(key.to_string(), json!(raw.clamp(min, max)));
}

fn clamp_non_negative(map: &mut Map<String, Value>, key: &str, default: f64) {
    let raw = map
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default);
    map.insert(key.to_string(), json!(raw.max(0.0)));
}

fn sanitize_enum(map: &mut Map<String, Value>, key: &str, allowed: &[&str], default: &str) {
    let valid = map
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| allowed.contains(value))
        .unwrap_or(default);
    map.insert(key.to_string(), json!(valid));
}

fn ensure_bool(map: &mut Map<String, Value>, key: &str, default: bool) {
    let value = map.get(key).and_then(Value::as_bool).unwrap_or(default);
    map.insert(key.to_string(), json!(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults_and_stamps_schema_version() {
        let migrated = migrate_settings(json!({ "theme": "light" }));

        assert_eq!(migrated["theme"], json!("light"));
        assert_eq!(migrated["historyLimit"], json!(50));
        assert_eq!(migrated["defaultStrategy"], json!("avalanche"));
        assert_eq!(migrated["schema_version"], json!(SETTINGS_SCHEMA_VERSION));
    }

    #[test]
    fn sanitizes_out_of_range_and_unknown_values() {
        let migrated = migrate_settings(json!({
            "theme": "neon",
            "historyLimit": 10_000,
            "defaultStrategy": "random",
            "defaultExtraPayment": -50.0,
            "displayCurrency": "XYZ",
            "autoSaveHistory": "yes"
        }));

        assert_eq!(migrated["theme"], json!("dark"));
        assert_eq!(migrated["historyLimit"], json!(500));
        assert_eq!(migrated["defaultStrategy"], json!("avalanche"));
        assert_eq!(migrated["defaultExtraPayment"], json!(0.0));
        assert_eq!(migrated["displayCurrency"], json!("BRL"));
        assert_eq!(migrated["autoSaveHistory"], json!(false));
    }

    #[test]
    fn non_object_input_falls_back_to_defaults() {
        let migrated = migrate_settings(json!([1, 2, 3]));
        assert_eq!(migrated, migrate_settings(default_settings()));
    }

    #[test]
    fn merges_partial_settings_without_losing_existing_values() {
        let mut existing = default_settings();
        merge_settings(&mut existing, &json!({ "defaultStrategy": "snowball" }));
        let migrated = migrate_settings(existing);

        assert_eq!(migrated["defaultStrategy"], json!("snowball"));
        assert_eq!(migrated["theme"], json!("dark"));
        assert_eq!(migrated["historyLimit"], json!(50));
    }
}
