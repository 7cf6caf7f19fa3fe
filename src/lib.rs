// ABOUTME: Main library entry point for the Pierre nutrition planner
// ABOUTME: Goal derivation, meal targets, meal scaling and the weekly feedback loop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Nutrition Planner
//!
//! The calculation core of a nutrition planning application. A host supplies
//! user profiles and logged meals; this crate computes daily macro goals,
//! per-meal targets and scaled meals, and revises goals from weekly weight
//! and intake data.
//!
//! ## Architecture
//!
//! - **Models** (`pierre-nutrition-core`): macro vectors, profiles, logs, templates
//! - **Intelligence**: the four engines, pure and synchronous
//! - **Config**: research-backed defaults with environment overrides
//! - **Logging**: `tracing` subscriber setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_nutrition::config::IntelligenceConfig;
//! use pierre_nutrition::intelligence::compute_goals;
//! use pierre_nutrition::models::{GoalType, Sex, UserProfile};
//! use pierre_nutrition::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let profile = UserProfile::new(Sex::Male, 30, 80.0, 180.0, 4, GoalType::ModerateLoss);
//!     let goals = compute_goals(&profile, &IntelligenceConfig::global().nutrition)?;
//!     println!("Daily goals: {goals}");
//!     Ok(())
//! }
//! ```

/// Configuration for the nutrition engines
pub mod config;

/// Goal, meal target, meal scaling and weekly feedback engines
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Unified error handling, re-exported from `pierre-nutrition-core`
pub mod errors {
    pub use pierre_nutrition_core::errors::*;
}

/// Data models, re-exported from `pierre-nutrition-core`
pub mod models {
    pub use chrono::NaiveDate;
    pub use pierre_nutrition_core::models::*;
}
