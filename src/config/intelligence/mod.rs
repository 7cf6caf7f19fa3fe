// ABOUTME: Intelligence configuration for the nutrition engines
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides type-safe configuration for the nutrition engines: goal derivation,
//! meal target distribution, meal scaling and the weekly feedback loop.
//!
//! Defaults can be overridden through `PIERRE_NUTRITION_*` environment variables.
//! The configuration is validated once and then shared read-only.

pub mod error;
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, AdaptiveFeedbackConfig, BmrConfig, MacroSplitConfig,
    MealDistributionConfig, MealScalingConfig, NutritionConfig,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Configuration for nutrition goal, meal and feedback engines
    pub nutrition: NutritionConfig,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        debug!("Intelligence configuration loaded");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nutrition.validate()
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let nutrition = &mut self.nutrition;

        // Activity factors
        Self::apply_env_var(
            "PIERRE_NUTRITION_ACTIVITY_SEDENTARY",
            &mut nutrition.activity_factors.sedentary,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_ACTIVITY_EXTRA_ACTIVE",
            &mut nutrition.activity_factors.extra_active,
        )?;

        // Macro split
        Self::apply_env_var(
            "PIERRE_NUTRITION_USE_GRAMS_PER_KG",
            &mut nutrition.macro_split.use_grams_per_kg,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_PROTEIN_MAINTENANCE_G_PER_KG",
            &mut nutrition.macro_split.protein_maintenance_g_per_kg,
        )?;

        // Meal scaling
        Self::apply_env_var(
            "PIERRE_NUTRITION_MIN_SCALE_FACTOR",
            &mut nutrition.meal_scaling.min_scale_factor,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_MAX_SCALE_FACTOR",
            &mut nutrition.meal_scaling.max_scale_factor,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_ROUNDING_STEP_G",
            &mut nutrition.meal_scaling.rounding_step_g,
        )?;

        // Weekly feedback
        Self::apply_env_var(
            "PIERRE_NUTRITION_MIN_POPULATED_DAYS",
            &mut nutrition.adaptive_feedback.min_populated_days,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_KCAL_PER_KG",
            &mut nutrition.adaptive_feedback.kcal_per_kg,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_DEVIATION_TOLERANCE_KG",
            &mut nutrition.adaptive_feedback.deviation_tolerance_kg_per_week,
        )?;
        Self::apply_env_var(
            "PIERRE_NUTRITION_STALL_BAND_KG",
            &mut nutrition.adaptive_feedback.stall_band_kg,
        )?;

        Ok(self)
    }
}
