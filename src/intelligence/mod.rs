// ABOUTME: Nutrition intelligence engines: goals, meal targets, meal scaling and weekly feedback
// ABOUTME: Pure synchronous calculations over core models, configured by NutritionConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The four calculation engines of the planner. Data flows from the goal
//! engine to the meal target distributor to the meal scaler for the per-meal
//! path, and from the adaptive feedback loop back into the goal engine once a
//! week.

/// Weekly weight/intake analysis and goal revision
pub mod adaptive_feedback;
/// BMR, TDEE and daily macro goals
pub mod goal_engine;
/// Template scaling toward a per-meal target
pub mod meal_scaler;
/// Per-slot targets from the daily goal and the day's log
pub mod meal_targets;

pub use adaptive_feedback::{
    apply_analysis, detect_metabolic_adaptation, run_weekly_analysis, WeeklyOutcome,
};
pub use goal_engine::{
    activity_factor_for_frequency, calculate_bmr, calculate_tdee, compute_goal_breakdown,
    compute_goal_breakdown_with_multiplier, compute_goals, compute_goals_with_multiplier,
    resolve_macro_mode, resolve_multiplier, split_macros, tdee_for_profile, ActivityLevel,
    GoalBreakdown, MacroMode,
};
pub use meal_scaler::{
    best_template_for_slot, ingredient_macros, round_to_step, scale_meal, scale_meals,
    CorrectionRatios, InMemoryCatalog, IngredientCatalog, ScaleRequest, ScaledIngredient,
    ScaledMeal, ScalingWarning,
};
pub use meal_targets::{compute_meal_target, plan_remaining_day, MealTarget};
