// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Weekly analysis command for pierre-nutrition-cli
// ABOUTME: Runs the feedback loop over a week of logs and optionally writes the updated profile

use crate::helpers::io::{print_json, read_json, write_json};
use pierre_nutrition::config::intelligence::NutritionConfig;
use pierre_nutrition::errors::AppResult;
use pierre_nutrition::intelligence::{apply_analysis, run_weekly_analysis, WeeklyOutcome};
use pierre_nutrition::models::{DailyLog, UserProfile};
use std::path::Path;
use tracing::info;

/// Analyse a week of logs; with `write_profile`, store the updated profile there
pub fn run(
    profile_path: &Path,
    logs_path: &Path,
    write_profile: Option<&Path>,
    config: &NutritionConfig,
) -> AppResult<()> {
    let profile: UserProfile = read_json(profile_path)?;
    let logs: Vec<DailyLog> = read_json(logs_path)?;

    let outcome = run_weekly_analysis(&profile, &logs, config)?;

    if let (Some(path), WeeklyOutcome::Analyzed(analysis)) = (write_profile, &outcome) {
        let updated = apply_analysis(&profile, analysis);
        write_json(path, &updated)?;
        info!(path = %path.display(), "Updated profile written");
    }

    print_json(&outcome)
}
