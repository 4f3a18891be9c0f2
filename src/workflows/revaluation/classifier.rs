use super::domain::{BaseType, CollateralRecord};

/// Keyword rule mapping a fragment of the description to a base type and its
/// revaluation cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub pattern: &'static str,
    pub base_type: BaseType,
    pub frequency_months: u32,
}

/// Result of classifying a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub base_type: BaseType,
    pub frequency_months: u32,
}

pub const DEFAULT_CLASSIFICATION: Classification = Classification {
    base_type: BaseType::Other,
    frequency_months: 6,
};

// Evaluated top to bottom; the first matching fragment wins.
const BASE_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        pattern: "недвиж",
        base_type: BaseType::RealEstate,
        frequency_months: 12,
    },
    ClassificationRule {
        pattern: "транспорт",
        base_type: BaseType::Transport,
        frequency_months: 6,
    },
    ClassificationRule {
        pattern: "оборуд",
        base_type: BaseType::Equipment,
        frequency_months: 6,
    },
    ClassificationRule {
        pattern: "ценн",
        base_type: BaseType::Securities,
        frequency_months: 12,
    },
    ClassificationRule {
        pattern: "дол",
        base_type: BaseType::Shares,
        frequency_months: 12,
    },
    ClassificationRule {
        pattern: "имуществен",
        base_type: BaseType::PropertyRights,
        frequency_months: 6,
    },
    ClassificationRule {
        pattern: "товар",
        base_type: BaseType::Goods,
        frequency_months: 3,
    },
    ClassificationRule {
        pattern: "сырь",
        base_type: BaseType::Goods,
        frequency_months: 3,
    },
];

pub fn classification_rules() -> &'static [ClassificationRule] {
    BASE_RULES
}

/// Joins the non-blank descriptive fields into one lower-cased search string.
pub fn search_text(record: &CollateralRecord) -> String {
    record
        .descriptive_fields()
        .into_iter()
        .flatten()
        .filter(|value| !value.is_blank())
        .map(|value| value.search_text())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn classify(record: &CollateralRecord) -> Classification {
    classify_text(&search_text(record))
}

pub fn classify_text(search_text: &str) -> Classification {
    BASE_RULES
        .iter()
        .find(|rule| search_text.contains(rule.pattern))
        .map(|rule| Classification {
            base_type: rule.base_type,
            frequency_months: rule.frequency_months,
        })
        .unwrap_or(DEFAULT_CLASSIFICATION)
}
