// ABOUTME: Daily macro goal derivation using peer-reviewed energy expenditure formulas
// ABOUTME: BMR, TDEE by training frequency, goal multiplier scale and protein-first macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Engine
//!
//! Pure formulas turning a [`UserProfile`] into daily macro goals:
//!
//! 1. BMR with the Mifflin-St Jeor equation
//! 2. TDEE as BMR times an activity factor chosen by training days per week
//! 3. Calorie target as TDEE times a point on the six-step goal multiplier scale
//! 4. Protein first (g/kg or calorie percentage), the rest split between carbs and fat
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Helms, E.R., et al. (2014). Evidence-based recommendations for natural bodybuilding
//!   contest preparation: nutrition and supplementation.
//!   *Journal of the International Society of Sports Nutrition*, 11, 20.
//!   <https://doi.org/10.1186/1550-2783-11-20>

use crate::config::intelligence::{
    ActivityFactorsConfig, BmrConfig, MacroSplitConfig, NutritionConfig,
};
use pierre_nutrition_core::errors::{AppError, AppResult};
use pierre_nutrition_core::models::{
    GoalMultiplier, MacroSplitProfile, MacroVector, Sex, UserProfile, KCAL_PER_G_CARBS,
    KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Activity level bucket derived from training frequency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Sedentary (no training)
    Sedentary,
    /// Lightly active (1-2 days/week)
    LightlyActive,
    /// Moderately active (3-5 days/week)
    ModeratelyActive,
    /// Very active (6-7 days/week)
    VeryActive,
    /// Extra active (8+ sessions/week)
    ExtraActive,
}

impl ActivityLevel {
    /// Bucket a training frequency; anything above the top bucket is the top bucket
    #[must_use]
    pub const fn from_training_days(days_per_week: u8) -> Self {
        match days_per_week {
            0 => Self::Sedentary,
            1..=2 => Self::LightlyActive,
            3..=5 => Self::ModeratelyActive,
            6..=7 => Self::VeryActive,
            _ => Self::ExtraActive,
        }
    }

    /// Multiplier applied to BMR
    #[must_use]
    pub const fn factor(&self, config: &ActivityFactorsConfig) -> f64 {
        match self {
            Self::Sedentary => config.sedentary,
            Self::LightlyActive => config.lightly_active,
            Self::ModeratelyActive => config.moderately_active,
            Self::VeryActive => config.very_active,
            Self::ExtraActive => config.extra_active,
        }
    }
}

/// How protein was derived for a goal calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MacroMode {
    /// Protein = bodyweight x g/kg, remaining calories split carbs:fat
    GramsPerKg {
        /// Protein rule applied (g/kg)
        g_per_kg: f64,
    },
    /// Protein, carbs and fat all taken as percentages of calories
    CaloriePercentage {
        /// Protein share of calories (%)
        protein_pct: u8,
        /// Carbohydrate share of calories (%)
        carbs_pct: u8,
        /// Fat share of calories (%)
        fat_pct: u8,
    },
}

/// Every intermediate value of a goal calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalBreakdown {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: f64,
    /// Activity bucket used
    pub activity_level: ActivityLevel,
    /// Activity factor applied to BMR
    pub activity_factor: f64,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: f64,
    /// Goal multiplier applied to TDEE
    pub multiplier: GoalMultiplier,
    /// Macro split mode that was active for this call
    pub macro_mode: MacroMode,
    /// Resulting daily goals, rounded to whole kcal and grams
    pub goals: MacroVector,
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_constant`
/// - Men: +5
/// - Women: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns `InvalidProfile` if weight, height or age is non-positive, or the
/// formula yields a non-positive rate
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    config: &BmrConfig,
) -> AppResult<f64> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_profile("Weight must be positive"));
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::invalid_profile("Height must be positive"));
    }
    if age == 0 {
        return Err(AppError::invalid_profile("Age must be positive"));
    }

    let sex_constant = match sex {
        Sex::Male => config.msj_male_constant,
        Sex::Female => config.msj_female_constant,
    };

    let bmr = config.msj_weight_coef.mul_add(
        weight_kg,
        config
            .msj_height_coef
            .mul_add(height_cm, config.msj_age_coef * f64::from(age)),
    ) + sex_constant;

    if bmr <= 0.0 {
        return Err(AppError::invalid_profile(format!(
            "Anthropometrics yield a non-positive BMR ({bmr:.0} kcal)"
        )));
    }
    Ok(bmr)
}

/// Activity factor for a training frequency
///
/// Buckets: 0 -> 1.20, 1-2 -> 1.375, 3-5 -> 1.55, 6-7 -> 1.725, 8+ -> 1.90
#[must_use]
pub const fn activity_factor_for_frequency(
    days_per_week: u8,
    config: &ActivityFactorsConfig,
) -> f64 {
    ActivityLevel::from_training_days(days_per_week).factor(config)
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor
///
/// # Errors
///
/// Returns an error if BMR is not positive
pub fn calculate_tdee(
    bmr: f64,
    days_per_week: u8,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if !bmr.is_finite() || bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }
    Ok(bmr * activity_factor_for_frequency(days_per_week, config))
}

/// Multiplier applied to TDEE for this profile
///
/// A multiplier stored on the profile by the weekly loop wins over the fixed
/// goal-type mapping.
#[must_use]
pub fn resolve_multiplier(profile: &UserProfile) -> GoalMultiplier {
    profile.effective_multiplier()
}

/// Decide which protein rule applies to this profile
///
/// An explicit g/kg on the profile always wins; otherwise the configured
/// per-goal table is used when `use_grams_per_kg` is set, and the split profile's
/// calorie percentages when it is not.
#[must_use]
pub fn resolve_macro_mode(profile: &UserProfile, config: &MacroSplitConfig) -> MacroMode {
    if let Some(g_per_kg) = profile.protein_g_per_kg {
        return MacroMode::GramsPerKg { g_per_kg };
    }
    if config.use_grams_per_kg {
        return MacroMode::GramsPerKg {
            g_per_kg: config.protein_g_per_kg(profile.goal_type),
        };
    }
    let (protein_pct, carbs_pct, fat_pct) = profile.macro_split.percentages();
    MacroMode::CaloriePercentage {
        protein_pct,
        carbs_pct,
        fat_pct,
    }
}

/// Split a calorie target into protein, carbs and fat grams
///
/// In g/kg mode protein is capped at the calorie target so the remainder never
/// goes negative. Values are rounded to whole kcal and grams.
#[must_use]
pub fn split_macros(
    calories: f64,
    weight_kg: f64,
    split: MacroSplitProfile,
    mode: MacroMode,
) -> MacroVector {
    let calories = calories.max(0.0);
    let (protein_g, carbs_g, fat_g) = match mode {
        MacroMode::GramsPerKg { g_per_kg } => {
            let mut protein_g = weight_kg * g_per_kg;
            if protein_g * KCAL_PER_G_PROTEIN > calories {
                warn!(
                    protein_g,
                    calories, "Protein rule exceeds calorie target, capping protein"
                );
                protein_g = calories / KCAL_PER_G_PROTEIN;
            }
            let remaining_kcal = protein_g.mul_add(-KCAL_PER_G_PROTEIN, calories).max(0.0);

            let (_, carbs_pct, fat_pct) = split.percentages();
            let carb_share = f64::from(carbs_pct) / f64::from(carbs_pct + fat_pct);
            (
                protein_g,
                remaining_kcal * carb_share / KCAL_PER_G_CARBS,
                remaining_kcal * (1.0 - carb_share) / KCAL_PER_G_FAT,
            )
        }
        MacroMode::CaloriePercentage {
            protein_pct,
            carbs_pct,
            fat_pct,
        } => (
            calories * f64::from(protein_pct) / 100.0 / KCAL_PER_G_PROTEIN,
            calories * f64::from(carbs_pct) / 100.0 / KCAL_PER_G_CARBS,
            calories * f64::from(fat_pct) / 100.0 / KCAL_PER_G_FAT,
        ),
    };

    MacroVector {
        calories: calories.round(),
        protein_g: protein_g.round(),
        carbs_g: carbs_g.round(),
        fat_g: fat_g.round(),
    }
}

/// Full goal calculation using the profile's authoritative multiplier
///
/// # Errors
///
/// Returns `InvalidProfile` for malformed anthropometrics
pub fn compute_goal_breakdown(
    profile: &UserProfile,
    config: &NutritionConfig,
) -> AppResult<GoalBreakdown> {
    compute_goal_breakdown_with_multiplier(profile, resolve_multiplier(profile), config)
}

/// Full goal calculation with an explicit multiplier
///
/// # Errors
///
/// Returns `InvalidProfile` for malformed anthropometrics
pub fn compute_goal_breakdown_with_multiplier(
    profile: &UserProfile,
    multiplier: GoalMultiplier,
    config: &NutritionConfig,
) -> AppResult<GoalBreakdown> {
    profile.validate()?;

    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.sex,
        &config.bmr,
    )?;
    let activity_level = ActivityLevel::from_training_days(profile.training_days_per_week);
    let activity_factor = activity_level.factor(&config.activity_factors);
    let tdee = bmr * activity_factor;

    let macro_mode = resolve_macro_mode(profile, &config.macro_split);
    let calorie_target = tdee * multiplier.factor();
    let goals = split_macros(
        calorie_target,
        profile.weight_kg,
        profile.macro_split,
        macro_mode,
    );

    debug!(
        bmr,
        tdee,
        multiplier = %multiplier,
        mode = ?macro_mode,
        goals = %goals,
        "Computed daily goals"
    );

    Ok(GoalBreakdown {
        bmr,
        activity_level,
        activity_factor,
        tdee,
        multiplier,
        macro_mode,
        goals,
    })
}

/// Daily macro goals for a profile
///
/// # Errors
///
/// Returns `InvalidProfile` for malformed anthropometrics
pub fn compute_goals(profile: &UserProfile, config: &NutritionConfig) -> AppResult<MacroVector> {
    compute_goal_breakdown(profile, config).map(|breakdown| breakdown.goals)
}

/// Daily macro goals for a profile at a specific multiplier
///
/// # Errors
///
/// Returns `InvalidProfile` for malformed anthropometrics
pub fn compute_goals_with_multiplier(
    profile: &UserProfile,
    multiplier: GoalMultiplier,
    config: &NutritionConfig,
) -> AppResult<MacroVector> {
    compute_goal_breakdown_with_multiplier(profile, multiplier, config)
        .map(|breakdown| breakdown.goals)
}

/// TDEE at the profile's current weight
///
/// # Errors
///
/// Returns `InvalidProfile` for malformed anthropometrics
pub fn tdee_for_profile(profile: &UserProfile, config: &NutritionConfig) -> AppResult<f64> {
    profile.validate()?;
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.sex,
        &config.bmr,
    )?;
    calculate_tdee(
        bmr,
        profile.training_days_per_week,
        &config.activity_factors,
    )
}
