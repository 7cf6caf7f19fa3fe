// ABOUTME: Core data models for the nutrition planning engine
// ABOUTME: Re-exports macro, profile, meal and weekly progress types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data values exchanged between the host application and the engines.
//! Every model is serializable so the host can persist or transmit it as JSON;
//! the engines only ever borrow these values and return new ones.
//!
//! ## Core Models
//!
//! - `MacroVector`: calories, protein, carbs and fat
//! - `UserProfile`: anthropometrics, goal selection, current goals and history
//! - `DailyLog`: meals and extra foods eaten on one day
//! - `MealTemplate` / `IngredientProfile`: recipes and their per-100g ingredient data
//! - `WeeklyProgressRecord` / `AdaptationAnalysis`: weekly feedback loop output

mod macros;
mod meals;
mod profile;
mod progress;

pub use macros::{
    round_to, Macro, MacroVector, KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};
pub use meals::{DailyLog, FoodEntry, IngredientProfile, IngredientRef, LoggedMeal, MealTemplate};
pub use profile::{
    GoalMultiplier, GoalType, MacroSplitProfile, MealDistribution, MealSlot, Sex, UserProfile,
};
pub use progress::{
    AdaptationAnalysis, AdaptationLevel, DietPhase, MetabolicAdaptation, WeeklyProgressRecord,
};
