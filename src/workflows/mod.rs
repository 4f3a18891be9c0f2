pub mod revaluation;
