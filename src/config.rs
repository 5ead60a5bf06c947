use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::layout::LayoutConfig;
use crate::domain::order::OrderStatus;
use crate::errors::AppError;

/// Longest accepted arrival or rotation period: one day.
pub const MAX_INTERVAL_SECS: u64 = 86_400;
/// Longest accepted delay between two card entrances.
pub const MAX_CARD_STAGGER_MS: u64 = 10_000;

pub const DEFAULT_STORES: [&str; 5] = [
    "Магазин №1",
    "Магазин №2",
    "Магазин №3",
    "Магазин №4",
    "Магазин №5",
];

/// Everything the board reads at startup.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub capacity: usize,
    pub seed_count: usize,
    pub statuses: Vec<OrderStatus>,
    pub numbers: RangeInclusive<u32>,
    pub return_probability: f64,
    pub rng_seed: Option<u64>,
    pub clock_interval: Duration,
    pub arrival_interval: Duration,
    pub rotation_interval: Duration,
    pub settle_delay: Duration,
    pub card_stagger: Duration,
    pub stores: Vec<String>,
    pub store: usize,
    pub layout: LayoutConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            capacity: 50,
            seed_count: 50,
            statuses: OrderStatus::ALL.to_vec(),
            numbers: 1000..=9999,
            return_probability: 0.15,
            rng_seed: None,
            clock_interval: Duration::from_secs(1),
            arrival_interval: Duration::from_secs(8),
            rotation_interval: Duration::from_secs(10),
            settle_delay: Duration::from_millis(100),
            card_stagger: Duration::from_millis(10),
            stores: DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
            store: 0,
            layout: LayoutConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Reads `BOARD_*` variables from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = BoardConfig::default();

        if let Some(capacity) = parse_var::<usize>(&lookup, "BOARD_CAPACITY")? {
            if capacity == 0 {
                return Err(AppError::Config("BOARD_CAPACITY must be positive".to_string()));
            }
            config.capacity = capacity;
        }
        if let Some(count) = parse_var(&lookup, "BOARD_SEED_COUNT")? {
            config.seed_count = count;
        }
        if let Some(raw) = lookup("BOARD_STATUSES") {
            config.statuses = parse_statuses(&raw)?;
        }

        let min = parse_var(&lookup, "BOARD_NUMBER_MIN")?.unwrap_or(*config.numbers.start());
        let max = parse_var(&lookup, "BOARD_NUMBER_MAX")?.unwrap_or(*config.numbers.end());
        if min > max {
            return Err(AppError::Config(format!(
                "BOARD_NUMBER_MIN ({}) is above BOARD_NUMBER_MAX ({})",
                min, max
            )));
        }
        config.numbers = min..=max;

        if let Some(p) = parse_var::<f64>(&lookup, "BOARD_RETURN_PROBABILITY")? {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppError::Config(
                    "BOARD_RETURN_PROBABILITY must be within 0..=1".to_string(),
                ));
            }
            config.return_probability = p;
        }
        config.rng_seed = parse_var(&lookup, "BOARD_SEED")?;

        if let Some(secs) = parse_var(&lookup, "BOARD_ARRIVAL_SECS")? {
            config.arrival_interval = positive_secs("BOARD_ARRIVAL_SECS", secs)?;
        }
        if let Some(secs) = parse_var(&lookup, "BOARD_ROTATION_SECS")? {
            config.rotation_interval = positive_secs("BOARD_ROTATION_SECS", secs)?;
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "BOARD_CARD_STAGGER_MS")? {
            if ms > MAX_CARD_STAGGER_MS {
                return Err(AppError::Config(format!(
                    "BOARD_CARD_STAGGER_MS must be at most {}",
                    MAX_CARD_STAGGER_MS
                )));
            }
            config.card_stagger = Duration::from_millis(ms);
        }

        if let Some(store) = parse_var::<usize>(&lookup, "BOARD_STORE")? {
            if store == 0 || store > config.stores.len() {
                return Err(AppError::Config(format!(
                    "BOARD_STORE must be between 1 and {}",
                    config.stores.len()
                )));
            }
            config.store = store - 1;
        }

        if let Some(path) = lookup("BOARD_LAYOUT_FILE") {
            let raw = fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("Cannot read layout file '{}': {}", path, e)))?;
            config.layout = serde_json::from_str(&raw)
                .map_err(|e| AppError::Config(format!("Invalid layout file '{}': {}", path, e)))?;
        }

        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| AppError::Config(format!("{} ('{}'): {}", key, raw, e)))
        })
        .transpose()
}

fn positive_secs(key: &str, secs: u64) -> Result<Duration, AppError> {
    if secs == 0 {
        return Err(AppError::Config(format!("{} must be positive", key)));
    }
    if secs > MAX_INTERVAL_SECS {
        return Err(AppError::Config(format!(
            "{} must be at most {}",
            key, MAX_INTERVAL_SECS
        )));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_statuses(raw: &str) -> Result<Vec<OrderStatus>, AppError> {
    let mut statuses = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let status: OrderStatus = part
            .parse()
            .map_err(|e| AppError::Config(format!("BOARD_STATUSES: {}", e)))?;
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }
    if statuses.is_empty() {
        return Err(AppError::Config("BOARD_STATUSES lists no statuses".to_string()));
    }
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = BoardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.capacity, 50);
        assert_eq!(config.arrival_interval, Duration::from_secs(8));
        assert_eq!(config.rotation_interval, Duration::from_secs(10));
        assert_eq!(config.statuses.len(), 6);
        assert_eq!(config.stores.len(), 5);
    }

    #[test]
    fn reads_overrides() {
        let config = BoardConfig::from_lookup(lookup(&[
            ("BOARD_CAPACITY", "500"),
            ("BOARD_STATUSES", "ready, problem,new"),
            ("BOARD_STORE", "3"),
            ("BOARD_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.capacity, 500);
        assert_eq!(
            config.statuses,
            vec![OrderStatus::Ready, OrderStatus::Problem, OrderStatus::Waiting]
        );
        assert_eq!(config.store, 2);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn rejects_garbage_number() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_CAPACITY", "lots")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("BOARD_CAPACITY")));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(BoardConfig::from_lookup(lookup(&[("BOARD_CAPACITY", "0")])).is_err());
    }

    #[test]
    fn rejects_unknown_status() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_STATUSES", "ready,lost")])).unwrap_err();
        assert!(
            matches!(err, AppError::Config(ref msg) if msg.starts_with("BOARD_STATUSES") && msg.contains("'lost'")),
            "{:?}",
            err
        );
    }

    #[test]
    fn rejects_intervals_longer_than_a_day() {
        for key in ["BOARD_ARRIVAL_SECS", "BOARD_ROTATION_SECS"] {
            let err = BoardConfig::from_lookup(lookup(&[(key, "18446744073709551615")])).unwrap_err();
            assert!(matches!(err, AppError::Config(ref msg) if msg.starts_with(key)), "{:?}", err);
            assert!(BoardConfig::from_lookup(lookup(&[(key, "86401")])).is_err());
        }
        let config = BoardConfig::from_lookup(lookup(&[("BOARD_ROTATION_SECS", "86400")])).unwrap();
        assert_eq!(config.rotation_interval, Duration::from_secs(86_400));
    }

    #[test]
    fn rejects_long_card_stagger() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_CARD_STAGGER_MS", "18446744073709551615")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.starts_with("BOARD_CARD_STAGGER_MS")));
        let config = BoardConfig::from_lookup(lookup(&[("BOARD_CARD_STAGGER_MS", "250")])).unwrap();
        assert_eq!(config.card_stagger, Duration::from_millis(250));
    }

    #[test]
    fn rejects_inverted_number_range() {
        let vars = [("BOARD_NUMBER_MIN", "500"), ("BOARD_NUMBER_MAX", "100")];
        assert!(BoardConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn rejects_store_out_of_range() {
        assert!(BoardConfig::from_lookup(lookup(&[("BOARD_STORE", "9")])).is_err());
        assert!(BoardConfig::from_lookup(lookup(&[("BOARD_STORE", "0")])).is_err());
    }

    #[test]
    fn missing_layout_file_is_config_error() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_LAYOUT_FILE", "/nonexistent/layout.json")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
