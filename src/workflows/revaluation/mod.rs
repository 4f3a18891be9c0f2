//! Revaluation plan derivation for a collateral portfolio.
//!
//! Each record is classified into a base type, given a cadence, a valuation
//! method, last and planned revaluation dates, and an urgency bucket. The
//! output is aligned 1:1 with the input order.

pub mod classifier;
pub mod dates;
pub mod domain;
pub mod market_value;
pub mod methods;
mod parser;
pub mod summary;
pub mod timeframe;
mod writer;

pub use classifier::{classify, Classification, ClassificationRule};
pub use dates::{add_calendar_months, FallbackDateRange, FixedFallbackDate, MissingDatePolicy};
pub use domain::{BaseType, CollateralRecord, FieldValue, RevaluationPlanEntry, Timeframe};
pub use market_value::{parse_number, ValueJitter};
pub use methods::select_method;
pub use parser::{PortfolioFormat, PortfolioLoadError, PortfolioLoader};
pub use summary::PlanSummary;
pub use timeframe::bucket;
pub use writer::{render_plan, write_plan, PlanWriteError};

use crate::config::PlanConfig;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

/// Owner recorded when the portfolio names nobody.
pub const UNASSIGNED_OWNER: &str = "ЗП - не назначен";

/// Derives plan entries for a batch of records.
///
/// `today`, the random source and the missing-date policy are all supplied by
/// the caller, so identical inputs give identical plans.
pub struct RevaluationPlanner<R = StdRng, P = FallbackDateRange> {
    today: NaiveDate,
    rng: R,
    missing_dates: P,
    jitter: ValueJitter,
}

impl RevaluationPlanner<StdRng, FallbackDateRange> {
    pub fn from_config(config: &PlanConfig, today: NaiveDate) -> Self {
        Self::new(
            today,
            StdRng::seed_from_u64(config.seed),
            FallbackDateRange::new(config.fallback_start, config.fallback_end),
            ValueJitter::new(config.jitter_min, config.jitter_max),
        )
    }
}

impl<R: RngCore, P: MissingDatePolicy> RevaluationPlanner<R, P> {
    pub fn new(today: NaiveDate, rng: R, missing_dates: P, jitter: ValueJitter) -> Self {
        Self {
            today,
            rng,
            missing_dates,
            jitter,
        }
    }

    pub fn generate(&mut self, records: &[CollateralRecord]) -> Vec<RevaluationPlanEntry> {
        let mut entries = Vec::with_capacity(records.len());
        let mut fallback_dates = 0usize;
        let mut unclassified = 0usize;

        for (index, record) in records.iter().enumerate() {
            let (entry, used_fallback) = self.plan_entry(index, record);
            if used_fallback {
                fallback_dates += 1;
            }
            if entry.base_type == BaseType::Other {
                unclassified += 1;
            }
            entries.push(entry);
        }

        info!(
            records = entries.len(),
            fallback_dates,
            unclassified,
            today = %self.today,
            "revaluation plan derived"
        );

        entries
    }

    fn plan_entry(&mut self, index: usize, record: &CollateralRecord) -> (RevaluationPlanEntry, bool) {
        let Classification {
            base_type,
            frequency_months,
        } = classify(record);

        // The fallback date is drawn before the value factor.
        let derived = dates::derive_dates(
            record,
            frequency_months,
            &self.missing_dates,
            &mut self.rng,
        );
        let method = select_method(base_type, index);
        let timeframe = bucket(derived.planned, self.today);

        let collateral_value = record.collateral_value.as_ref().and_then(parse_number);
        let market_value = self.jitter.synthesize(collateral_value, &mut self.rng);

        debug!(
            index,
            base_type = base_type.label(),
            planned = %derived.planned,
            ?timeframe,
            fallback = derived.used_fallback,
            "planned record"
        );

        let entry = RevaluationPlanEntry {
            reference: record.reference.clone(),
            borrower: record.borrower.clone(),
            pledger: record.pledger.clone(),
            segment: record.segment.clone(),
            group: record.group.clone(),
            collateral_type: record
                .collateral_type
                .clone()
                .filter(|value| !value.is_blank())
                .unwrap_or_else(|| FieldValue::text(base_type.label())),
            base_type,
            frequency_months,
            last_revaluation_date: derived.last,
            planned_date: derived.planned,
            timeframe,
            owner: record
                .owner
                .clone()
                .filter(|value| !value.is_blank())
                .unwrap_or_else(|| FieldValue::text(UNASSIGNED_OWNER)),
            priority: record.priority.clone(),
            collateral_value,
            market_value,
            revaluation_method: method.to_string(),
        };

        (entry, derived.used_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn fixed_planner(today: NaiveDate) -> RevaluationPlanner<StdRng, FixedFallbackDate> {
        RevaluationPlanner::new(
            today,
            StdRng::seed_from_u64(130),
            FixedFallbackDate(date(2024, 1, 31)),
            ValueJitter::new(1.0, 1.0),
        )
    }

    #[test]
    fn entry_carries_identity_and_defaults() {
        let record = CollateralRecord {
            reference: Some(FieldValue::text("R-7")),
            borrower: Some(FieldValue::text("АО Север")),
            collateral_info: Some(FieldValue::text("Складское оборудование")),
            collateral_value: Some(FieldValue::text("2 000 000")),
            ..CollateralRecord::default()
        };

        let entries = fixed_planner(date(2024, 6, 1)).generate(&[record]);
        let entry = &entries[0];

        assert_eq!(entry.reference, Some(FieldValue::text("R-7")));
        assert_eq!(entry.borrower, Some(FieldValue::text("АО Север")));
        assert_eq!(entry.base_type, BaseType::Equipment);
        assert_eq!(entry.collateral_type, FieldValue::text("Оборудование"));
        assert_eq!(entry.frequency_months, 6);
        assert_eq!(entry.last_revaluation_date, date(2024, 1, 31));
        assert_eq!(entry.planned_date, date(2024, 7, 31));
        assert_eq!(entry.timeframe, Timeframe::Quarter);
        assert_eq!(entry.owner, FieldValue::text(UNASSIGNED_OWNER));
        assert_eq!(entry.collateral_value, Some(2_000_000.0));
        assert_eq!(entry.market_value, Some(2_000_000.0));
        assert_eq!(entry.revaluation_method, "Независимая оценка");
    }

    #[test]
    fn record_collateral_type_is_kept_when_present() {
        let record = CollateralRecord {
            collateral_type: Some(FieldValue::text("Жилой дом")),
            owner: Some(FieldValue::text("Петров П.П.")),
            ..CollateralRecord::default()
        };

        let entries = fixed_planner(date(2024, 6, 1)).generate(&[record]);
        assert_eq!(entries[0].collateral_type, FieldValue::text("Жилой дом"));
        assert_eq!(entries[0].base_type, BaseType::Other);
        assert_eq!(entries[0].owner, FieldValue::text("Петров П.П."));
        assert_eq!(entries[0].market_value, None);
    }

    #[test]
    fn falsy_owner_and_type_take_defaults() {
        let record = CollateralRecord {
            kind: Some(FieldValue::text("Транспорт")),
            collateral_type: Some(FieldValue::Flag(false)),
            owner: Some(FieldValue::Integer(0)),
            ..CollateralRecord::default()
        };

        let entries = fixed_planner(date(2024, 6, 1)).generate(&[record]);
        assert_eq!(entries[0].base_type, BaseType::Transport);
        assert_eq!(entries[0].collateral_type, FieldValue::text("Транспорт"));
        assert_eq!(entries[0].owner, FieldValue::text(UNASSIGNED_OWNER));
    }

    #[test]
    fn methods_rotate_by_position_across_types() {
        let records: Vec<_> = (0..5)
            .map(|_| CollateralRecord {
                kind: Some(FieldValue::text("Недвижимость")),
                ..CollateralRecord::default()
            })
            .collect();

        let methods: Vec<_> = fixed_planner(date(2024, 6, 1))
            .generate(&records)
            .into_iter()
            .map(|entry| entry.revaluation_method)
            .collect();

        let expected = methods::methods_for(BaseType::RealEstate);
        assert_eq!(
            methods,
            vec![expected[0], expected[1], expected[2], expected[3], expected[0]]
        );
    }

    #[test]
    fn empty_portfolio_yields_empty_plan() {
        assert!(fixed_planner(date(2024, 6, 1)).generate(&[]).is_empty());
    }

    #[test]
    fn from_config_uses_configured_range() {
        let config = PlanConfig::default();
        let mut planner = RevaluationPlanner::from_config(&config, date(2024, 6, 1));
        let entries = planner.generate(&vec![CollateralRecord::default(); 20]);

        assert!(entries.iter().all(|entry| {
            entry.last_revaluation_date >= config.fallback_start
                && entry.last_revaluation_date <= config.fallback_end
        }));
    }
}
