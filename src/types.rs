// src/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the import endpoint
///
/// The canonical shape is `{"programs": [...]}`; a bare array of programs is
/// accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportPayload {
    Wrapped {
        #[serde(deserialize_with = "lenient_programs")]
        programs: Vec<Program>,
    },
    Bare(#[serde(deserialize_with = "lenient_programs")] Vec<Program>),
}

impl ImportPayload {
    pub fn into_programs(self) -> Vec<Program> {
        match self {
            ImportPayload::Wrapped { programs } => programs,
            ImportPayload::Bare(programs) => programs,
        }
    }
}

/// A bug bounty program as returned by the import endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub handle: String,

    /// Bounty ceiling; `None` when not advertised
    #[serde(default, deserialize_with = "lenient_bounty")]
    pub max_bounty: Option<f64>,

    /// In-scope targets; `None` when the record has none
    #[serde(default, deserialize_with = "lenient_targets")]
    pub targets: Option<Vec<Target>>,
}

/// A single in-scope item of a program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub asset_identifier: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub asset_type: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_bool")]
    pub eligible_for_bounty: Option<bool>,
}

impl Target {
    pub fn new(asset_identifier: impl Into<String>) -> Self {
        Self {
            asset_identifier: Some(asset_identifier.into()),
            ..Default::default()
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// Accept numbers and numeric strings; anything else means "not advertised"
fn lenient_bounty<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Keep object entries of a program list; anything else is dropped
fn lenient_programs<'de, D>(deserializer: D) -> Result<Vec<Program>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<Program>(item).ok())
        .collect())
}

/// Accept a target list or a `{"in_scope": [...]}` object
fn lenient_targets<'de, D>(deserializer: D) -> Result<Option<Vec<Target>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut map)) => match map.remove("in_scope") {
            Some(Value::Array(items)) => items,
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };

    let targets = items
        .into_iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value::<Target>(item).ok())
        .collect();

    Ok(Some(targets))
}
