use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single cell of a portfolio record.
///
/// Exports mix numbers and strings freely in the same column, so every field
/// keeps whatever scalar shape it arrived in and is interpreted on use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
    Nested(serde_json::Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Falsy values are skipped when assembling the classifier search text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Flag(flag) => !flag,
            Self::Integer(value) => *value == 0,
            Self::Decimal(value) => *value == 0.0,
            Self::Text(text) => text.trim().is_empty(),
            Self::Nested(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
                _ => false,
            },
        }
    }

    /// Lower-cased rendering used for keyword matching.
    pub fn search_text(&self) -> String {
        match self {
            Self::Text(text) => text.to_lowercase(),
            other => other.to_string().to_lowercase(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Nested(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One pledged-asset entry of the source portfolio. Only `reference` is
/// expected to be stable; everything may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollateralRecord {
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub borrower: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub pledger: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub owner: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub collateral_type: Option<FieldValue>,
    #[serde(
        rename = "type",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub collateral_category: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub collateral_info: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub collateral_value: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_revaluation_date: Option<FieldValue>,
    #[serde(
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_revaluation_date: Option<FieldValue>,
}

impl CollateralRecord {
    /// Fields describing what the collateral is, in classifier order.
    pub fn descriptive_fields(&self) -> [Option<&FieldValue>; 4] {
        [
            self.collateral_type.as_ref(),
            self.kind.as_ref(),
            self.collateral_category.as_ref(),
            self.collateral_info.as_ref(),
        ]
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<FieldValue>::deserialize(deserializer)?;
    Ok(opt.filter(|value| match value {
        FieldValue::Text(text) => !text.trim().is_empty(),
        FieldValue::Nested(serde_json::Value::Null) => false,
        _ => true,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    #[serde(rename = "Недвижимость")]
    RealEstate,
    #[serde(rename = "Транспорт")]
    Transport,
    #[serde(rename = "Оборудование")]
    Equipment,
    #[serde(rename = "Ценные бумаги")]
    Securities,
    #[serde(rename = "Доли")]
    Shares,
    #[serde(rename = "Имущественные права")]
    PropertyRights,
    #[serde(rename = "Товары и сырье")]
    Goods,
    #[serde(rename = "Прочее")]
    Other,
}

impl BaseType {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::RealEstate,
            Self::Transport,
            Self::Equipment,
            Self::Securities,
            Self::Shares,
            Self::PropertyRights,
            Self::Goods,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RealEstate => "Недвижимость",
            Self::Transport => "Транспорт",
            Self::Equipment => "Оборудование",
            Self::Securities => "Ценные бумаги",
            Self::Shares => "Доли",
            Self::PropertyRights => "Имущественные права",
            Self::Goods => "Товары и сырье",
            Self::Other => "Прочее",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency of a planned revaluation relative to the evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Overdue,
    Week,
    Month,
    Quarter,
    Later,
}

impl Timeframe {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Overdue,
            Self::Week,
            Self::Month,
            Self::Quarter,
            Self::Later,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Просрочено",
            Self::Week => "7 дней",
            Self::Month => "30 дней",
            Self::Quarter => "90 дней",
            Self::Later => "Позже",
        }
    }
}

/// One row of the generated plan, aligned with the input record it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevaluationPlanEntry {
    pub reference: Option<FieldValue>,
    pub borrower: Option<FieldValue>,
    pub pledger: Option<FieldValue>,
    pub segment: Option<FieldValue>,
    pub group: Option<FieldValue>,
    pub collateral_type: FieldValue,
    pub base_type: BaseType,
    pub frequency_months: u32,
    pub last_revaluation_date: NaiveDate,
    pub planned_date: NaiveDate,
    pub timeframe: Timeframe,
    pub owner: FieldValue,
    pub priority: Option<FieldValue>,
    pub collateral_value: Option<f64>,
    pub market_value: Option<f64>,
    pub revaluation_method: String,
}
