// ABOUTME: User profile model with anthropometrics, goal selection and meal distribution
// ABOUTME: Sex, GoalType, six-point GoalMultiplier scale, MacroSplitProfile, MealSlot, MealDistribution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::macros::MacroVector;
use super::progress::WeeklyProgressRecord;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex for BMR calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (+5 kcal Mifflin-St Jeor constant)
    Male,
    /// Female (-161 kcal Mifflin-St Jeor constant)
    Female,
}

/// User-facing body composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Lose weight quickly
    RapidLoss,
    /// Lose weight steadily
    ModerateLoss,
    /// Hold current weight
    #[default]
    Maintenance,
    /// Gain weight steadily
    ModerateGain,
    /// Gain weight quickly
    RapidGain,
}

impl GoalType {
    /// Default position on the multiplier scale for this goal
    #[must_use]
    pub const fn default_multiplier(&self) -> GoalMultiplier {
        match self {
            Self::RapidLoss => GoalMultiplier::AggressiveCut,
            Self::ModerateLoss => GoalMultiplier::ModerateCut,
            Self::Maintenance => GoalMultiplier::Maintenance,
            Self::ModerateGain => GoalMultiplier::MildBulk,
            Self::RapidGain => GoalMultiplier::ModerateBulk,
        }
    }
}

/// Six-point TDEE multiplier scale
///
/// Variants are ordered from largest deficit to largest surplus, so `Ord` follows
/// the energy balance direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMultiplier {
    /// TDEE x 0.80
    AggressiveCut,
    /// TDEE x 0.85
    ModerateCut,
    /// TDEE x 0.90
    MildCut,
    /// TDEE x 1.00
    Maintenance,
    /// TDEE x 1.10
    MildBulk,
    /// TDEE x 1.15
    ModerateBulk,
}

impl GoalMultiplier {
    /// The scale from deficit to surplus
    pub const SCALE: [Self; 6] = [
        Self::AggressiveCut,
        Self::ModerateCut,
        Self::MildCut,
        Self::Maintenance,
        Self::MildBulk,
        Self::ModerateBulk,
    ];

    /// Multiplier applied to TDEE
    #[must_use]
    pub const fn factor(&self) -> f64 {
        match self {
            Self::AggressiveCut => 0.80,
            Self::ModerateCut => 0.85,
            Self::MildCut => 0.90,
            Self::Maintenance => 1.00,
            Self::MildBulk => 1.10,
            Self::ModerateBulk => 1.15,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// One notch toward a larger deficit, `None` at the bottom of the scale
    #[must_use]
    pub fn step_toward_deficit(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::SCALE.get(i).copied())
    }

    /// One notch toward a larger surplus, `None` at the top of the scale
    #[must_use]
    pub fn step_toward_surplus(self) -> Option<Self> {
        Self::SCALE.get(self.index() + 1).copied()
    }

    /// Below maintenance
    #[must_use]
    pub const fn is_deficit(&self) -> bool {
        matches!(
            self,
            Self::AggressiveCut | Self::ModerateCut | Self::MildCut
        )
    }

    /// Classify a measured deficit (percent of TDEE, negative for a surplus)
    ///
    /// Thresholds: >=18% aggressive cut, >=13% moderate cut, >=5% mild cut,
    /// above -5% maintenance, above -12.5% mild bulk, otherwise moderate bulk.
    #[must_use]
    pub fn from_deficit_percent(deficit_percent: f64) -> Self {
        if deficit_percent >= 18.0 {
            Self::AggressiveCut
        } else if deficit_percent >= 13.0 {
            Self::ModerateCut
        } else if deficit_percent >= 5.0 {
            Self::MildCut
        } else if deficit_percent > -5.0 {
            Self::Maintenance
        } else if deficit_percent > -12.5 {
            Self::MildBulk
        } else {
            Self::ModerateBulk
        }
    }
}

impl fmt::Display for GoalMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AggressiveCut => "aggressive cut",
            Self::ModerateCut => "moderate cut",
            Self::MildCut => "mild cut",
            Self::Maintenance => "maintenance",
            Self::MildBulk => "mild bulk",
            Self::ModerateBulk => "moderate bulk",
        };
        write!(f, "{name} (x{:.2})", self.factor())
    }
}

/// Named protein/carbs/fat calorie split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MacroSplitProfile {
    /// 30% protein, 40% carbs, 30% fat
    #[default]
    Balanced,
    /// 40% protein, 35% carbs, 25% fat
    HighProtein,
    /// 35% protein, 25% carbs, 40% fat
    LowCarb,
}

impl MacroSplitProfile {
    /// (`protein_pct`, `carbs_pct`, `fat_pct`) of total calories, sums to 100
    #[must_use]
    pub const fn percentages(&self) -> (u8, u8, u8) {
        match self {
            Self::Balanced => (30, 40, 30),
            Self::HighProtein => (40, 35, 25),
            Self::LowCarb => (35, 25, 40),
        }
    }
}

/// One of the four meal positions of a day
///
/// Display labels follow the usual breakfast/lunch/snack/dinner naming; the
/// engines never depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// First meal of the day
    First,
    /// Second meal of the day
    Second,
    /// Third meal of the day
    Third,
    /// Fourth meal of the day
    Fourth,
}

impl MealSlot {
    /// All slots in day order
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    /// Conventional display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::First => "breakfast",
            Self::Second => "lunch",
            Self::Third => "snack",
            Self::Fourth => "dinner",
        }
    }

    /// Parse either the slot name or its conventional label
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "first" | "breakfast" => Some(Self::First),
            "second" | "lunch" => Some(Self::Second),
            "third" | "snack" => Some(Self::Third),
            "fourth" | "dinner" => Some(Self::Fourth),
            _ => None,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Share of the daily goal assigned to each slot, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealDistribution {
    /// First slot percentage
    pub first: f64,
    /// Second slot percentage
    pub second: f64,
    /// Third slot percentage
    pub third: f64,
    /// Fourth slot percentage
    pub fourth: f64,
}

impl Default for MealDistribution {
    fn default() -> Self {
        Self {
            first: 25.0,
            second: 35.0,
            third: 10.0,
            fourth: 30.0,
        }
    }
}

impl MealDistribution {
    /// Create a distribution from four percentages
    #[must_use]
    pub const fn new(first: f64, second: f64, third: f64, fourth: f64) -> Self {
        Self {
            first,
            second,
            third,
            fourth,
        }
    }

    /// Percentage for one slot
    #[must_use]
    pub const fn percent(&self, slot: MealSlot) -> f64 {
        match slot {
            MealSlot::First => self.first,
            MealSlot::Second => self.second,
            MealSlot::Third => self.third,
            MealSlot::Fourth => self.fourth,
        }
    }

    /// Sum of all four percentages
    #[must_use]
    pub fn total(&self) -> f64 {
        MealSlot::ALL.iter().map(|&s| self.percent(s)).sum()
    }

    /// Check that percentages are non-negative and sum to 100 within `epsilon`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDistribution` otherwise
    pub fn validate(&self, epsilon: f64) -> AppResult<()> {
        for slot in MealSlot::ALL {
            let pct = self.percent(slot);
            if !pct.is_finite() || pct < 0.0 {
                return Err(AppError::invalid_distribution(format!(
                    "{slot} percentage must be a non-negative number, got {pct}"
                )));
            }
        }
        let total = self.total();
        if (total - 100.0).abs() > epsilon {
            return Err(AppError::invalid_distribution(format!(
                "Meal percentages must sum to 100, got {total}"
            ))
            .with_details(serde_json::json!({ "sum": total })));
        }
        Ok(())
    }
}

/// Immutable snapshot of a user's nutrition profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Biological sex
    pub sex: Sex,
    /// Age in years
    pub age: u32,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Training days per week (values above 8 count as 8+)
    pub training_days_per_week: u8,
    /// Body composition goal
    pub goal_type: GoalType,
    /// Preferred calorie split
    #[serde(default)]
    pub macro_split: MacroSplitProfile,
    /// Explicit protein rule overriding the configured g/kg table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g_per_kg: Option<f64>,
    /// Multiplier written back by the weekly analysis; overrides the goal-type mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_multiplier: Option<GoalMultiplier>,
    /// Per-slot share of the daily goal
    #[serde(default)]
    pub meal_distribution: MealDistribution,
    /// Current daily goals
    #[serde(default)]
    pub goals: MacroVector,
    /// Completed weekly analyses, oldest first
    #[serde(default)]
    pub progress_history: Vec<WeeklyProgressRecord>,
}

impl UserProfile {
    /// Create a profile with default split, distribution and no history
    #[must_use]
    pub fn new(
        sex: Sex,
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        training_days_per_week: u8,
        goal_type: GoalType,
    ) -> Self {
        Self {
            sex,
            age,
            weight_kg,
            height_cm,
            training_days_per_week,
            goal_type,
            macro_split: MacroSplitProfile::default(),
            protein_g_per_kg: None,
            goal_multiplier: None,
            meal_distribution: MealDistribution::default(),
            goals: MacroVector::ZERO,
            progress_history: Vec::new(),
        }
    }

    /// Check anthropometrics
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` when weight, height or age is non-positive or not finite
    pub fn validate(&self) -> AppResult<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(AppError::invalid_profile(format!(
                "Weight must be positive, got {} kg",
                self.weight_kg
            )));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(AppError::invalid_profile(format!(
                "Height must be positive, got {} cm",
                self.height_cm
            )));
        }
        if self.age == 0 {
            return Err(AppError::invalid_profile("Age must be positive"));
        }
        if let Some(g_per_kg) = self.protein_g_per_kg {
            if !g_per_kg.is_finite() || g_per_kg <= 0.0 {
                return Err(AppError::invalid_profile(format!(
                    "Protein rule must be positive, got {g_per_kg} g/kg"
                )));
            }
        }
        Ok(())
    }

    /// The authoritative multiplier: the stored one if any, else the goal-type default
    #[must_use]
    pub fn effective_multiplier(&self) -> GoalMultiplier {
        self.goal_multiplier
            .unwrap_or_else(|| self.goal_type.default_multiplier())
    }

    /// Set a macro split
    #[must_use]
    pub const fn with_macro_split(mut self, split: MacroSplitProfile) -> Self {
        self.macro_split = split;
        self
    }

    /// Set an explicit protein rule
    #[must_use]
    pub const fn with_protein_g_per_kg(mut self, g_per_kg: f64) -> Self {
        self.protein_g_per_kg = Some(g_per_kg);
        self
    }

    /// Set the meal distribution
    #[must_use]
    pub const fn with_meal_distribution(mut self, distribution: MealDistribution) -> Self {
        self.meal_distribution = distribution;
        self
    }

    /// Replace goals, optionally pinning the multiplier that produced them
    #[must_use]
    pub fn with_goals(mut self, goals: MacroVector, multiplier: Option<GoalMultiplier>) -> Self {
        self.goals = goals;
        if multiplier.is_some() {
            self.goal_multiplier = multiplier;
        }
        self
    }

    /// Append a weekly record
    ///
    /// A record whose period is already present is ignored, so replaying the same
    /// week leaves the history unchanged.
    #[must_use]
    pub fn with_progress_record(mut self, record: WeeklyProgressRecord) -> Self {
        let duplicate = self
            .progress_history
            .iter()
            .any(|existing| existing.same_period(&record));
        if !duplicate {
            self.progress_history.push(record);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_steps_are_bounded() {
        assert_eq!(GoalMultiplier::AggressiveCut.step_toward_deficit(), None);
        assert_eq!(GoalMultiplier::ModerateBulk.step_toward_surplus(), None);
        assert_eq!(
            GoalMultiplier::MildCut.step_toward_surplus(),
            Some(GoalMultiplier::Maintenance)
        );
        assert_eq!(
            GoalMultiplier::MildCut.step_toward_deficit(),
            Some(GoalMultiplier::ModerateCut)
        );
    }

    #[test]
    fn test_scale_is_ordered_by_factor() {
        let factors: Vec<f64> = GoalMultiplier::SCALE.iter().map(|m| m.factor()).collect();
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deficit_classification_thresholds() {
        assert_eq!(
            GoalMultiplier::from_deficit_percent(20.0),
            GoalMultiplier::AggressiveCut
        );
        assert_eq!(
            GoalMultiplier::from_deficit_percent(13.0),
            GoalMultiplier::ModerateCut
        );
        assert_eq!(
            GoalMultiplier::from_deficit_percent(7.0),
            GoalMultiplier::MildCut
        );
        assert_eq!(
            GoalMultiplier::from_deficit_percent(0.0),
            GoalMultiplier::Maintenance
        );
        assert_eq!(
            GoalMultiplier::from_deficit_percent(-10.0),
            GoalMultiplier::MildBulk
        );
        assert_eq!(
            GoalMultiplier::from_deficit_percent(-15.0),
            GoalMultiplier::ModerateBulk
        );
    }

    #[test]
    fn test_distribution_validation() {
        assert!(MealDistribution::default().validate(0.01).is_ok());
        let err = MealDistribution::new(25.0, 25.0, 25.0, 20.0)
            .validate(0.01)
            .unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidDistribution);
        assert!(MealDistribution::new(110.0, -10.0, 0.0, 0.0)
            .validate(0.01)
            .is_err());
    }

    #[test]
    fn test_split_profiles_sum_to_100() {
        for split in [
            MacroSplitProfile::Balanced,
            MacroSplitProfile::HighProtein,
            MacroSplitProfile::LowCarb,
        ] {
            let (p, c, f) = split.percentages();
            assert_eq!(u16::from(p) + u16::from(c) + u16::from(f), 100);
        }
    }

    #[test]
    fn test_slot_parse_accepts_labels() {
        assert_eq!(MealSlot::parse("Dinner"), Some(MealSlot::Fourth));
        assert_eq!(MealSlot::parse("second"), Some(MealSlot::Second));
        assert_eq!(MealSlot::parse("brunch"), None);
    }

    #[test]
    fn test_effective_multiplier_prefers_stored_value() {
        let profile = UserProfile::new(Sex::Female, 28, 62.0, 168.0, 3, GoalType::ModerateLoss);
        assert_eq!(profile.effective_multiplier(), GoalMultiplier::ModerateCut);

        let pinned = profile.with_goals(MacroVector::ZERO, Some(GoalMultiplier::MildCut));
        assert_eq!(pinned.effective_multiplier(), GoalMultiplier::MildCut);
    }

    #[test]
    fn test_validate_rejects_zero_weight() {
        let profile = UserProfile::new(Sex::Male, 30, 0.0, 180.0, 4, GoalType::Maintenance);
        let err = profile.validate().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidProfile);
    }
}
