// src/services/predictor.rs
use std::{collections::HashMap, fmt::Debug, sync::Mutex};

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde_json::Value;

use crate::message::PredictionRequest;

pub const VALIDATION_MESSAGE: &str =
    "All fields are required. Numeric inputs must be valid and non-negative.";

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync + Debug {
    fn next_unit(&self) -> f64;
}

/// Per-call draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Replays a fixed sequence of draws, repeating the last one when exhausted.
#[derive(Debug)]
pub struct FixedRandom {
    draws: Mutex<Vec<f64>>,
}

impl FixedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let mut draws: Vec<f64> = draws.into_iter().collect();
        draws.reverse();
        Self { draws: Mutex::new(draws) }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new([draw])
    }
}

impl RandomSource for FixedRandom {
    fn next_unit(&self) -> f64 {
        let mut draws = match self.draws.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match draws.len() {
            0 => 0.0,
            1 => draws[0],
            _ => draws.pop().unwrap_or(0.0),
        }
    }
}

/// Name-to-multiplier lookup. Unknown names fall back to `default`.
#[derive(Debug, Clone)]
pub struct FactorTable {
    factors: HashMap<String, f64>,
    default: f64,
}

impl FactorTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            factors: entries
                .into_iter()
                .map(|(name, factor)| (name.to_string(), factor))
                .collect(),
            default: 1.0,
        }
    }

    /// Looks up `name` after capitalizing it ("WHEAT" and "wheat" both hit "Wheat").
    pub fn factor_for(&self, name: &str) -> f64 {
        self.factors
            .get(&capitalize(name))
            .copied()
            .unwrap_or(self.default)
    }

    pub fn crops() -> Self {
        Self::new([("Wheat", 1.1), ("Corn", 1.3), ("Rice", 1.2), ("Soybean", 1.0)])
    }

    pub fn soils() -> Self {
        Self::new([("Loam", 1.1), ("Clay", 0.9), ("Sandy", 0.8), ("Silt", 1.0)])
    }
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Loose numeric coercion in the manner of a dynamic `Number(value)`:
/// `null` is 0, booleans are 0/1, strings are trimmed (blank means 0) and may
/// carry a `0x`/`0o`/`0b` prefix, arrays coerce through their joined text.
/// Objects, unparsable text and non-finite results are `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_text(s)?,
        Value::Array(_) => parse_numeric_text(&joined_text(value))?,
        Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Text form of a value as it appears when an array is joined with commas.
fn joined_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(joined_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Some(0.0);
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return text.parse::<f64>().ok(),
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn non_empty_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInputs {
    pub crop: String,
    pub area: f64,
    pub soil: String,
    pub rain: f64,
    pub fertilizer: f64,
}

/// Checks every precondition before any computation. `None` means invalid.
pub fn validate(req: &PredictionRequest) -> Option<FieldInputs> {
    let crop = non_empty_str(&req.crop)?;
    let soil = non_empty_str(&req.soil)?;
    let area = coerce_number(req.area.as_ref()?)?;
    let rain = coerce_number(req.rain.as_ref()?)?;
    let fertilizer = coerce_number(req.fertilizer.as_ref()?)?;

    if area <= 0.0 || rain < 0.0 || fertilizer < 0.0 {
        return None;
    }

    Some(FieldInputs {
        crop: crop.to_string(),
        area,
        soil: soil.to_string(),
        rain,
        fertilizer,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldEstimate {
    /// Tons per hectare, rounded to hundredths.
    pub estimated_yield: Decimal,
    /// Simulated regional average, rounded to hundredths.
    pub avg_region: Decimal,
}

#[derive(Debug, Clone)]
pub struct YieldModel {
    pub crops: FactorTable,
    pub soils: FactorTable,
}

impl Default for YieldModel {
    fn default() -> Self {
        Self {
            crops: FactorTable::crops(),
            soils: FactorTable::soils(),
        }
    }
}

impl YieldModel {
    /// Mock estimate: no real model, only the fixed formula plus two jitter draws.
    /// `None` when the figure is too large to represent as a decimal.
    pub fn estimate(&self, inputs: &FieldInputs, random: &dyn RandomSource) -> Option<YieldEstimate> {
        let crop_factor = self.crops.factor_for(&inputs.crop);
        let soil_factor = self.soils.factor_for(&inputs.soil);

        let base_yield = inputs.area * crop_factor * soil_factor;
        let rain_effect = inputs.rain / 500.0;
        let fertilizer_effect = inputs.fertilizer * 0.05;
        let jitter = random.next_unit() * 0.5;

        let estimated_yield =
            round_hundredths(clamp_yield(base_yield + rain_effect + fertilizer_effect + jitter))?;
        let avg_region =
            round_hundredths(estimated_yield.to_f64()? * 0.85 + random.next_unit() * 0.1)?;

        Some(YieldEstimate { estimated_yield, avg_region })
    }
}

/// Yields never go below zero.
pub fn clamp_yield(raw: f64) -> f64 {
    raw.max(0.0)
}

/// Rounds the stored binary value to the nearest hundredth; exact halves go
/// away from zero.
pub fn round_hundredths(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Two fraction digits, as shown to clients.
pub fn format_hundredths(value: Decimal) -> String {
    format!("{:.2}", value)
}
