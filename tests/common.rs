// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, reference profiles, ingredient catalogs and weekly logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_nutrition`
//!
//! Fixtures are built around one reference athlete: male, 30 years, 80 kg,
//! 180 cm, training four days a week. Mifflin-St Jeor gives a BMR of 1780 kcal
//! and a TDEE of 2759 kcal.

use chrono::Days;
use pierre_nutrition::config::intelligence::NutritionConfig;
use pierre_nutrition::intelligence::{compute_goals, InMemoryCatalog, IngredientCatalog};
use pierre_nutrition::models::{
    DailyLog, GoalMultiplier, GoalType, IngredientProfile, IngredientRef, LoggedMeal,
    MacroVector, MealSlot, MealTemplate, NaiveDate, Sex, UserProfile, WeeklyProgressRecord,
};
use std::env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Reference BMR of the test athlete (kcal)
pub const REFERENCE_BMR: f64 = 1780.0;
/// Reference TDEE of the test athlete (kcal)
pub const REFERENCE_TDEE: f64 = 2759.0;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default nutrition configuration
pub fn config() -> NutritionConfig {
    NutritionConfig::default()
}

/// Validated macro vector
pub fn macros(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> MacroVector {
    MacroVector::new(calories, protein_g, carbs_g, fat_g).unwrap()
}

/// Calendar date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The reference athlete on a moderate loss goal, without stored goals
pub fn reference_profile() -> UserProfile {
    UserProfile::new(Sex::Male, 30, 80.0, 180.0, 4, GoalType::ModerateLoss)
}

/// The reference athlete with goals computed from the default configuration
pub fn reference_profile_with_goals() -> UserProfile {
    let profile = reference_profile();
    let goals = compute_goals(&profile, &config()).unwrap();
    profile.with_goals(goals, None)
}

/// Profile whose only relevant field is a fixed daily goal
pub fn profile_with_goal(goal: MacroVector) -> UserProfile {
    reference_profile().with_goals(goal, None)
}

/// Log a meal into a day
pub fn log_meal(log: DailyLog, slot: MealSlot, meal: MacroVector) -> DailyLog {
    log.with_meal(slot, LoggedMeal::new(slot.label(), meal))
}

/// Ingredient with macros per 100 g
pub fn ingredient(
    id: &str,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
) -> IngredientProfile {
    let per_100g = macros(calories, protein_g, carbs_g, fat_g);
    IngredientProfile::new(id, id.replace('_', " "), per_100g).unwrap()
}

/// Breakfast ingredients used by the scaling fixtures
pub fn breakfast_catalog() -> InMemoryCatalog {
    [
        ingredient("oats", 380.0, 13.0, 67.0, 7.0),
        ingredient("milk", 50.0, 3.4, 5.0, 2.0),
        ingredient("banana", 90.0, 1.1, 23.0, 0.3),
        ingredient("whey", 400.0, 80.0, 8.0, 6.0),
        ingredient("blueberries", 60.0, 0.7, 14.0, 0.3),
        ingredient("strawberries", 50.0, 0.7, 12.0, 0.3),
        ingredient("sugar", 400.0, 0.0, 100.0, 0.0),
        ingredient("water", 0.0, 0.0, 0.0, 0.0),
    ]
    .into_iter()
    .collect()
}

/// Template whose cached macros are the sum of its ingredients at base quantities
pub fn template_from(
    name: &str,
    slots: Vec<MealSlot>,
    ingredients: &[(&str, f64)],
    catalog: &InMemoryCatalog,
) -> MealTemplate {
    let refs: Vec<IngredientRef> = ingredients
        .iter()
        .map(|(id, grams)| IngredientRef::new(*id, *grams))
        .collect();
    let total: MacroVector = refs
        .iter()
        .filter_map(|r| catalog.lookup(&r.ingredient_id).map(|p| p.macros_for(r.grams)))
        .sum();
    MealTemplate::new(name, slots, refs, total).unwrap()
}

/// Six-ingredient oat bowl worth exactly 300 kcal at base quantities
pub fn oat_bowl(catalog: &InMemoryCatalog) -> MealTemplate {
    template_from(
        "Oat bowl",
        vec![MealSlot::First],
        &[
            ("oats", 40.0),
            ("milk", 100.0),
            ("banana", 40.0),
            ("whey", 10.0),
            ("blueberries", 20.0),
            ("strawberries", 20.0),
        ],
        catalog,
    )
}

/// A week of logs starting at `start`, one meal per day at `daily_calories`
///
/// Weight is recorded on the first and last day only.
pub fn week_of_logs(
    start: NaiveDate,
    daily_calories: f64,
    start_weight: Option<f64>,
    end_weight: Option<f64>,
) -> Vec<DailyLog> {
    (0..7)
        .map(|offset| {
            let day = start + Days::new(offset);
            let mut log = log_meal(
                DailyLog::new(day),
                MealSlot::Second,
                macros(daily_calories, 150.0, 220.0, 70.0),
            );
            if offset == 0 {
                if let Some(weight) = start_weight {
                    log = log.with_weight(weight);
                }
            }
            if offset == 6 {
                if let Some(weight) = end_weight {
                    log = log.with_weight(weight);
                }
            }
            log
        })
        .collect()
}

/// A past weekly record for history fixtures
pub fn past_record(
    period_start: NaiveDate,
    weight_delta_kg: Option<f64>,
    in_deficit: bool,
) -> WeeklyProgressRecord {
    WeeklyProgressRecord {
        period_start,
        period_end: period_start + Days::new(6),
        populated_days: 7,
        avg_calories: 2345.0,
        weight_delta_kg,
        expected_weight_delta_kg: -0.38,
        adherence_ratio: 1.0,
        in_deficit,
        observed_phase: GoalMultiplier::ModerateCut,
    }
}
