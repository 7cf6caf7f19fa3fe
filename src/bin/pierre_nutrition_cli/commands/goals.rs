// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Goal computation command for pierre-nutrition-cli
// ABOUTME: Prints the full BMR/TDEE/macro breakdown for a profile file

use crate::helpers::io::{print_json, read_json};
use pierre_nutrition::config::intelligence::NutritionConfig;
use pierre_nutrition::errors::AppResult;
use pierre_nutrition::intelligence::compute_goal_breakdown;
use pierre_nutrition::models::UserProfile;
use std::path::Path;
use tracing::info;

/// Compute and print daily goals
pub fn run(profile_path: &Path, config: &NutritionConfig) -> AppResult<()> {
    let profile: UserProfile = read_json(profile_path)?;
    let breakdown = compute_goal_breakdown(&profile, config)?;
    info!(goals = %breakdown.goals, "Goals computed");
    print_json(&breakdown)
}
