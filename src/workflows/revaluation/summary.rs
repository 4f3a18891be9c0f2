use super::domain::{BaseType, RevaluationPlanEntry, Timeframe};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct TimeframeCount {
    pub timeframe: Timeframe,
    pub timeframe_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BaseTypeCount {
    pub base_type: BaseType,
    pub count: usize,
}

/// Bucket counts shown on the monitoring screen, plus value totals.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub total: usize,
    pub by_timeframe: Vec<TimeframeCount>,
    pub by_base_type: Vec<BaseTypeCount>,
    pub total_collateral_value: f64,
    pub total_market_value: f64,
}

impl PlanSummary {
    pub fn from_entries(entries: &[RevaluationPlanEntry]) -> Self {
        let mut timeframes: HashMap<Timeframe, usize> = HashMap::new();
        let mut base_types: HashMap<BaseType, usize> = HashMap::new();

        for entry in entries {
            *timeframes.entry(entry.timeframe).or_default() += 1;
            *base_types.entry(entry.base_type).or_default() += 1;
        }

        // Every bucket is listed, even when empty, so consumers can index by position.
        let by_timeframe = Timeframe::ordered()
            .into_iter()
            .map(|timeframe| TimeframeCount {
                timeframe,
                timeframe_label: timeframe.label(),
                count: timeframes.get(&timeframe).copied().unwrap_or(0),
            })
            .collect();

        let by_base_type = BaseType::ordered()
            .into_iter()
            .filter_map(|base_type| {
                base_types
                    .get(&base_type)
                    .map(|&count| BaseTypeCount { base_type, count })
            })
            .collect();

        Self {
            total: entries.len(),
            by_timeframe,
            by_base_type,
            total_collateral_value: entries.iter().filter_map(|e| e.collateral_value).sum(),
            total_market_value: entries.iter().filter_map(|e| e.market_value).sum(),
        }
    }

    pub fn count(&self, timeframe: Timeframe) -> usize {
        self.by_timeframe
            .iter()
            .find(|entry| entry.timeframe == timeframe)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}
