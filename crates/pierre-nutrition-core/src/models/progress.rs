// ABOUTME: Weekly progress records and adaptation analysis results
// ABOUTME: WeeklyProgressRecord, AdaptationAnalysis, MetabolicAdaptation and recommended diet phases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::macros::MacroVector;
use super::profile::GoalMultiplier;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of one analysed week
///
/// Records are append-only: they are created once per completed week and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgressRecord {
    /// First day of the analysed window
    pub period_start: NaiveDate,
    /// Last day of the analysed window
    pub period_end: NaiveDate,
    /// Days with any logged intake
    pub populated_days: u32,
    /// Average daily intake over populated days (kcal)
    pub avg_calories: f64,
    /// Last minus first weight sample, when at least two exist (kg)
    pub weight_delta_kg: Option<f64>,
    /// Weight change predicted from energy balance (kg)
    pub expected_weight_delta_kg: f64,
    /// Average intake divided by the calorie goal
    pub adherence_ratio: f64,
    /// Average intake was below TDEE
    pub in_deficit: bool,
    /// Multiplier matching the measured deficit
    pub observed_phase: GoalMultiplier,
}

impl WeeklyProgressRecord {
    /// Whether both records describe the same window
    #[must_use]
    pub fn same_period(&self, other: &Self) -> bool {
        self.period_start == other.period_start && self.period_end == other.period_end
    }

    /// A deficit week in which weight stayed within `band_kg`
    #[must_use]
    pub fn is_stalled_deficit(&self, band_kg: f64) -> bool {
        self.in_deficit
            && self
                .weight_delta_kg
                .is_some_and(|delta| delta.abs() <= band_kg)
    }
}

/// Severity of a suspected metabolic adaptation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationLevel {
    /// No sustained stall
    #[default]
    None,
    /// Two stalled deficit weeks
    Mild,
    /// Three stalled deficit weeks
    Moderate,
    /// Four or more stalled deficit weeks
    Severe,
}

/// Diet phase recommended in response to adaptation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietPhase {
    /// Keep the current plan
    #[default]
    Continue,
    /// Return to maintenance calories for a while
    DietBreak,
    /// Raise calories slowly, one notch at a time
    ReverseDiet,
}

/// Verdict of the metabolic adaptation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MetabolicAdaptation {
    /// Severity
    pub level: AdaptationLevel,
    /// Consecutive stalled deficit weeks, most recent included
    pub stalled_weeks: u32,
    /// Recommended next phase
    pub recommended_phase: DietPhase,
}

/// Result of a weekly analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationAnalysis {
    /// Goals should be replaced by `new_goals`
    pub needs_adjustment: bool,
    /// Human-readable explanation of the decision
    pub reason: String,
    /// Advisory messages for the user
    pub warnings: Vec<String>,
    /// Revised daily goals when an adjustment is needed
    pub new_goals: Option<MacroVector>,
    /// Multiplier that produced `new_goals`
    pub new_multiplier: Option<GoalMultiplier>,
    /// Metabolic adaptation verdict
    pub metabolic_adaptation: MetabolicAdaptation,
    /// Record to append to the profile history
    pub progress_record: WeeklyProgressRecord,
    /// Average daily intake over populated days (kcal)
    pub avg_intake_calories: f64,
    /// TDEE at the current body weight (kcal)
    pub tdee: f64,
    /// Weight change predicted from energy balance (kg)
    pub expected_weight_delta_kg: f64,
    /// Measured weight change (kg)
    pub observed_weight_delta_kg: Option<f64>,
}
