// ABOUTME: Nutrition configuration for goal derivation, meal targeting, scaling and weekly feedback
// ABOUTME: Configures BMR coefficients, activity factors, protein rules, scaling bounds and adaptation thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Planning Configuration
//!
//! Provides the tunable parameters of the four nutrition engines.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - Protein in a deficit: Helms et al. (2014) DOI: 10.1186/1550-2783-11-20
//! - Energy content of body mass change: Wishnofsky (1958), ~7700 kcal/kg
//! - Diet breaks: Byrne et al. (2018) DOI: 10.1038/ijo.2017.206

use super::error::ConfigError;
use pierre_nutrition_core::models::GoalType;
use serde::{Deserialize, Serialize};

/// Nutrition Planning Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Protein rules and split mode
    pub macro_split: MacroSplitConfig,
    /// Per-meal target distribution settings
    pub meal_distribution: MealDistributionConfig,
    /// Meal template scaling bounds
    pub meal_scaling: MealScalingConfig,
    /// Weekly feedback loop thresholds
    pub adaptive_feedback: AdaptiveFeedbackConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation, keyed by training days per week
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// 0 days/week: 1.2
    pub sedentary: f64,
    /// 1-2 days/week: 1.375
    pub lightly_active: f64,
    /// 3-5 days/week: 1.55
    pub moderately_active: f64,
    /// 6-7 days/week: 1.725
    pub very_active: f64,
    /// 8+ sessions/week: 1.9
    pub extra_active: f64,
}

/// Protein rules and split mode
///
/// When `use_grams_per_kg` is set, protein is derived from bodyweight first and
/// the remaining calories are split between carbs and fat. Otherwise all three
/// macros come from the profile's calorie percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Derive protein from bodyweight (g/kg) instead of calorie percentage
    pub use_grams_per_kg: bool,
    /// Rapid loss protein (g/kg): 2.4, highest to preserve lean mass
    pub protein_rapid_loss_g_per_kg: f64,
    /// Moderate loss protein (g/kg): 2.2
    pub protein_moderate_loss_g_per_kg: f64,
    /// Maintenance protein (g/kg): 2.0
    pub protein_maintenance_g_per_kg: f64,
    /// Moderate gain protein (g/kg): 2.0
    pub protein_moderate_gain_g_per_kg: f64,
    /// Rapid gain protein (g/kg): 2.2
    pub protein_rapid_gain_g_per_kg: f64,
}

impl MacroSplitConfig {
    /// Protein rule for a goal type
    #[must_use]
    pub const fn protein_g_per_kg(&self, goal_type: GoalType) -> f64 {
        match goal_type {
            GoalType::RapidLoss => self.protein_rapid_loss_g_per_kg,
            GoalType::ModerateLoss => self.protein_moderate_loss_g_per_kg,
            GoalType::Maintenance => self.protein_maintenance_g_per_kg,
            GoalType::ModerateGain => self.protein_moderate_gain_g_per_kg,
            GoalType::RapidGain => self.protein_rapid_gain_g_per_kg,
        }
    }
}

/// Per-meal target distribution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDistributionConfig {
    /// Allowed deviation of the slot percentage sum from 100
    pub sum_epsilon: f64,
    /// Lower bound of a corrected target as a fraction of the base target
    pub min_correction_factor: f64,
    /// Upper bound of a corrected target as a fraction of the base target
    pub max_correction_factor: f64,
}

/// Meal template scaling bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealScalingConfig {
    /// Smallest allowed uniform scale factor
    pub min_scale_factor: f64,
    /// Largest allowed uniform scale factor
    pub max_scale_factor: f64,
    /// Ingredient quantities are rounded to multiples of this step (g)
    pub rounding_step_g: f64,
}

/// Weekly feedback loop thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveFeedbackConfig {
    /// Nominal analysis window (days)
    pub window_days: u32,
    /// Minimum days with logged intake before analysing
    pub min_populated_days: u32,
    /// Energy content of one kilogram of body mass (kcal)
    pub kcal_per_kg: f64,
    /// Allowed deviation between observed and expected weight change (kg/week)
    pub deviation_tolerance_kg_per_week: f64,
    /// Weight change band regarded as a stall (kg/week)
    pub stall_band_kg: f64,
    /// Weekly loss above this percentage of bodyweight triggers a refeed warning
    pub rapid_loss_percent_per_week: f64,
    /// Adherence ratio below which intake is flagged as under target
    pub adherence_min: f64,
    /// Adherence ratio above which intake is flagged as over target
    pub adherence_max: f64,
    /// Consecutive stalled weeks for mild adaptation
    pub mild_stall_weeks: u32,
    /// Consecutive stalled weeks for moderate adaptation
    pub moderate_stall_weeks: u32,
    /// Consecutive stalled weeks for severe adaptation
    pub severe_stall_weeks: u32,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            use_grams_per_kg: true,
            protein_rapid_loss_g_per_kg: 2.4,
            protein_moderate_loss_g_per_kg: 2.2,
            protein_maintenance_g_per_kg: 2.0,
            protein_moderate_gain_g_per_kg: 2.0,
            protein_rapid_gain_g_per_kg: 2.2,
        }
    }
}

impl Default for MealDistributionConfig {
    fn default() -> Self {
        Self {
            sum_epsilon: 0.01,
            min_correction_factor: 0.5,
            max_correction_factor: 2.0,
        }
    }
}

impl Default for MealScalingConfig {
    fn default() -> Self {
        Self {
            min_scale_factor: 0.5,
            max_scale_factor: 2.0,
            rounding_step_g: 5.0,
        }
    }
}

impl Default for AdaptiveFeedbackConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            min_populated_days: 5,
            kcal_per_kg: 7700.0,
            deviation_tolerance_kg_per_week: 0.3,
            stall_band_kg: 0.2,
            rapid_loss_percent_per_week: 1.0,
            adherence_min: 0.85,
            adherence_max: 1.15,
            mild_stall_weeks: 2,
            moderate_stall_weeks: 3,
            severe_stall_weeks: 4,
        }
    }
}

impl NutritionConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_goal_engine()?;
        self.validate_meal_engines()?;
        self.adaptive_feedback.validate()
    }

    fn validate_goal_engine(&self) -> Result<(), ConfigError> {
        let bmr = &self.bmr;
        if !all_finite(&[
            bmr.msj_weight_coef,
            bmr.msj_height_coef,
            bmr.msj_age_coef,
            bmr.msj_male_constant,
            bmr.msj_female_constant,
        ]) {
            return Err(ConfigError::ValueOutOfRange(
                "BMR coefficients must be finite numbers",
            ));
        }
        if bmr.msj_weight_coef <= 0.0 || bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }

        let factors = &self.activity_factors;
        if !all_finite(&[
            factors.sedentary,
            factors.lightly_active,
            factors.moderately_active,
            factors.very_active,
            factors.extra_active,
        ]) || factors.sedentary < 1.0
            || factors.extra_active > 2.5
        {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.lightly_active
            || factors.lightly_active >= factors.moderately_active
            || factors.moderately_active >= factors.very_active
            || factors.very_active >= factors.extra_active
        {
            return Err(ConfigError::InvalidWeights(
                "Activity factors must be in ascending order",
            ));
        }

        let split = &self.macro_split;
        let protein_rules = [
            split.protein_rapid_loss_g_per_kg,
            split.protein_moderate_loss_g_per_kg,
            split.protein_maintenance_g_per_kg,
            split.protein_moderate_gain_g_per_kg,
            split.protein_rapid_gain_g_per_kg,
        ];
        if protein_rules.iter().any(|g| !(0.5..=3.5).contains(g)) {
            return Err(ConfigError::ValueOutOfRange(
                "Protein rules must be between 0.5 and 3.5 g/kg",
            ));
        }
        Ok(())
    }

    fn validate_meal_engines(&self) -> Result<(), ConfigError> {
        let dist = &self.meal_distribution;
        if !(0.0..=1.0).contains(&dist.sum_epsilon) {
            return Err(ConfigError::ValueOutOfRange(
                "Distribution epsilon must be between 0 and 1 percent",
            ));
        }
        if !all_finite(&[dist.min_correction_factor, dist.max_correction_factor])
            || dist.min_correction_factor <= 0.0
            || dist.min_correction_factor > 1.0
            || dist.max_correction_factor < 1.0
        {
            return Err(ConfigError::InvalidRange(
                "Correction bounds must satisfy 0 < min <= 1 <= max",
            ));
        }

        let scaling = &self.meal_scaling;
        if !all_finite(&[scaling.min_scale_factor, scaling.max_scale_factor])
            || scaling.min_scale_factor <= 0.0
            || scaling.min_scale_factor > scaling.max_scale_factor
        {
            return Err(ConfigError::InvalidRange(
                "Scale factors must satisfy 0 < min <= max",
            ));
        }
        if !scaling.rounding_step_g.is_finite() || scaling.rounding_step_g <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Rounding step must be positive",
            ));
        }
        Ok(())
    }
}

impl AdaptiveFeedbackConfig {
    /// Validate thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the window, tolerances or stall ladder are inconsistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days == 0 || self.min_populated_days > self.window_days {
            return Err(ConfigError::InvalidRange(
                "min_populated_days must be between 0 and window_days",
            ));
        }
        if !self.kcal_per_kg.is_finite() || self.kcal_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("kcal_per_kg must be positive"));
        }
        if !all_finite(&[
            self.deviation_tolerance_kg_per_week,
            self.stall_band_kg,
            self.rapid_loss_percent_per_week,
        ]) || self.deviation_tolerance_kg_per_week <= 0.0
            || self.stall_band_kg < 0.0
            || self.rapid_loss_percent_per_week <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Weight tolerances must be positive",
            ));
        }
        if !all_finite(&[self.adherence_min, self.adherence_max])
            || self.adherence_min >= self.adherence_max
        {
            return Err(ConfigError::InvalidRange(
                "adherence_min must be < adherence_max",
            ));
        }
        if self.mild_stall_weeks == 0
            || self.mild_stall_weeks >= self.moderate_stall_weeks
            || self.moderate_stall_weeks >= self.severe_stall_weeks
        {
            return Err(ConfigError::InvalidRange(
                "Stall thresholds must be ascending and start at 1 or more",
            ));
        }
        Ok(())
    }
}

/// True when no value is NaN or infinite
fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|value| value.is_finite())
}
