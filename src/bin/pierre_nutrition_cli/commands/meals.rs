// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Meal target and meal scaling commands for pierre-nutrition-cli
// ABOUTME: Reads profile, day log, template and catalog files and prints targets or scaled meals

use crate::helpers::io::{print_json, read_json};
use pierre_nutrition::config::intelligence::NutritionConfig;
use pierre_nutrition::errors::{AppError, AppResult};
use pierre_nutrition::intelligence::{
    compute_meal_target, plan_remaining_day, scale_meal, InMemoryCatalog,
};
use pierre_nutrition::models::{
    DailyLog, IngredientProfile, MacroVector, MealDistribution, MealSlot, MealTemplate,
    UserProfile,
};
use std::path::Path;
use tracing::warn;

/// Print the target for one slot, or for every open slot when `slot` is `None`
pub fn target(
    profile_path: &Path,
    log_path: &Path,
    slot: Option<&str>,
    distribution_path: Option<&Path>,
    config: &NutritionConfig,
) -> AppResult<()> {
    let profile: UserProfile = read_json(profile_path)?;
    let log: DailyLog = read_json(log_path)?;
    let distribution: MealDistribution = match distribution_path {
        Some(path) => read_json(path)?,
        None => profile.meal_distribution,
    };

    match slot {
        Some(name) => {
            let slot = MealSlot::parse(name).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "Unknown meal slot '{name}', expected first/second/third/fourth or breakfast/lunch/snack/dinner"
                ))
            })?;
            let target =
                compute_meal_target(&profile, &distribution, &log, slot, &config.meal_distribution)?;
            print_json(&target)
        }
        None => {
            let plan =
                plan_remaining_day(&profile, &distribution, &log, &config.meal_distribution)?;
            print_json(&plan)
        }
    }
}

/// Scale a template toward a target and print the result
pub fn scale(
    template_path: &Path,
    catalog_path: &Path,
    target_path: &Path,
    last_meal: bool,
    config: &NutritionConfig,
) -> AppResult<()> {
    let template: MealTemplate = read_json(template_path)?;
    template.validate()?;
    let ingredients: Vec<IngredientProfile> = read_json(catalog_path)?;
    ingredients.iter().try_for_each(IngredientProfile::validate)?;
    let target: MacroVector = read_json(target_path)?;
    target.validate()?;

    let catalog: InMemoryCatalog = ingredients.into_iter().collect();
    let scaled = scale_meal(&template, &target, last_meal, &catalog, &config.meal_scaling);
    if scaled.degraded {
        warn!(
            template = %scaled.template_name,
            warnings = scaled.warnings.len(),
            "Scaled meal is missing ingredients"
        );
    }
    print_json(&scaled)
}
