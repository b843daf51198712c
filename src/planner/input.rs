use crate::{Error, Result};
use serde_json::{Map, Value};

pub const NOT_SPECIFIED: &str = "Not specified";

/// Trip preferences normalized from a free-form mapping.
///
/// Keys are matched after trimming, lower-casing and treating `_` and `-`
/// as spaces, so `"Meal Preferences"`, `"meal_preferences"` and
/// `"MEAL-PREFERENCES"` all land in [`TripInput::meal_preferences`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripInput {
    pub dates: Option<String>,
    pub location: Option<String>,
    pub budget: Option<String>,
    pub travelers: Option<String>,
    pub activities: Option<String>,
    pub meal_preferences: Option<String>,
}

impl TripInput {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut input = Self::default();

        for (key, value) in map {
            let Some(text) = render_value(value) else {
                continue;
            };
            let slot = match normalize_key(key).as_str() {
                "dates" => &mut input.dates,
                "location" => &mut input.location,
                "budget" => &mut input.budget,
                "travelers" => &mut input.travelers,
                "activities" => &mut input.activities,
                "meal preferences" => &mut input.meal_preferences,
                _ => continue,
            };
            *slot = Some(text);
        }

        input
    }

    /// Fields the itinerary cannot reasonably be planned without.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [("location", &self.location), ("dates", &self.dates)]
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Missing required trip details: {}",
                missing.join(", ")
            )))
        }
    }

    pub fn dates_or_default(&self) -> &str {
        or_placeholder(&self.dates)
    }

    pub fn location_or_default(&self) -> &str {
        or_placeholder(&self.location)
    }

    pub fn budget_or_default(&self) -> &str {
        or_placeholder(&self.budget)
    }

    pub fn travelers_or_default(&self) -> &str {
        or_placeholder(&self.travelers)
    }

    pub fn activities_or_default(&self) -> &str {
        or_placeholder(&self.activities)
    }

    pub fn meal_preferences_or_default(&self) -> &str {
        or_placeholder(&self.meal_preferences)
    }
}

fn or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_SPECIFIED)
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
