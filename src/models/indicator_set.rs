use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single named indicator output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IndicatorValue {
    /// Latest value; NaN when the window was never filled.
    /// JSON writes NaN as `null`, so `null` reads back as NaN.
    Scalar(#[serde(deserialize_with = "nan_from_null")] f64),
    /// Full series aligned index-for-index with the price series.
    Series(#[serde(deserialize_with = "nan_series_from_nulls")] Vec<f64>),
    /// Qualitative reading such as "overbought".
    Label(String),
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nan_series_from_nulls<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Named indicator snapshot attached to every analysis result.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct IndicatorSet {
    values: BTreeMap<String, IndicatorValue>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, name: &str, value: f64) {
        self.values
            .insert(name.to_string(), IndicatorValue::Scalar(value));
    }

    /// Inserts `value`, recording a missing value as NaN.
    pub fn insert_optional(&mut self, name: &str, value: Option<f64>) {
        self.insert_scalar(name, value.unwrap_or(f64::NAN));
    }

    pub fn insert_series(&mut self, name: &str, series: Vec<f64>) {
        self.values
            .insert(name.to_string(), IndicatorValue::Series(series));
    }

    pub fn insert_label(&mut self, name: &str, label: &str) {
        self.values
            .insert(name.to_string(), IndicatorValue::Label(label.to_string()));
    }

    /// Scalar reading, or `None` if absent or undefined.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(IndicatorValue::Scalar(v)) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn series(&self, name: &str) -> Option<&[f64]> {
        match self.values.get(name) {
            Some(IndicatorValue::Series(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(IndicatorValue::Label(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndicatorValue)> {
        self.values.iter()
    }

    /// Renders a scalar for display, `N/A` when undefined.
    pub fn display(&self, name: &str) -> String {
        self.scalar(name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}
