// ABOUTME: Per-meal macro targets derived from the daily goal and what was already eaten
// ABOUTME: Percentage-based slot split with compensation for earlier deviations and exact last-meal completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Target Distributor
//!
//! Each slot starts from its share of the daily goal. Whatever the user
//! over- or under-ate in earlier slots is spread across the slots still open,
//! weighted by their percentages, and the last open slot simply receives the
//! remaining budget so the day closes on target.

use crate::config::intelligence::MealDistributionConfig;
use pierre_nutrition_core::errors::AppResult;
use pierre_nutrition_core::models::{
    round_to, DailyLog, MacroVector, MealDistribution, MealSlot, UserProfile,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Macro target for one meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTarget {
    /// Slot this target is for
    pub slot: MealSlot,
    /// Corrected target to feed the meal scaler
    pub target: MacroVector,
    /// Uncorrected share of the daily goal
    pub base_target: MacroVector,
    /// Intake already logged in other slots plus extra foods
    pub consumed: MacroVector,
    /// Daily goal minus consumed, floored at zero
    pub remaining: MacroVector,
    /// Open slots including this one
    pub slots_left: usize,
    /// This slot closes the day and receives exactly `remaining`
    pub is_last_meal: bool,
    /// Percent of each goal macro already consumed (0 when the goal is 0)
    pub day_progress: MacroVector,
}

/// Compute the macro target for `slot`
///
/// The goal comes from `profile.goals`; `distribution` gives each slot's share.
/// A meal already logged in `slot` is ignored, so the call also answers
/// "what should this slot have been".
///
/// # Errors
///
/// Returns `InvalidDistribution` if the percentages are negative or do not sum to 100,
/// and `InvalidInput` if a goal macro is negative or not finite
pub fn compute_meal_target(
    profile: &UserProfile,
    distribution: &MealDistribution,
    daily_log: &DailyLog,
    slot: MealSlot,
    config: &MealDistributionConfig,
) -> AppResult<MealTarget> {
    distribution.validate(config.sum_epsilon)?;
    profile.goals.validate()?;

    let goal = profile.goals;
    let slot_pct = distribution.percent(slot);
    let base_target = goal.scale(slot_pct / 100.0);

    let others = || MealSlot::ALL.into_iter().filter(move |&s| s != slot);
    let eaten: Vec<MealSlot> = others().filter(|&s| daily_log.is_logged(s)).collect();
    let open: Vec<MealSlot> = others().filter(|&s| !daily_log.is_logged(s)).collect();

    let consumed = eaten
        .iter()
        .filter_map(|s| daily_log.meals.get(s))
        .map(|meal| meal.macros)
        .sum::<MacroVector>()
        + daily_log.extra_intake();
    let remaining = goal.saturating_sub(&consumed);
    let slots_left = open.len() + 1;
    let is_last_meal = slots_left == 1;

    let target = if is_last_meal {
        remaining
    } else {
        let eaten_pct: f64 = eaten.iter().map(|&s| distribution.percent(s)).sum();
        let open_pct: f64 = slot_pct + open.iter().map(|&s| distribution.percent(s)).sum::<f64>();
        let share = if open_pct > 0.0 {
            slot_pct / open_pct
        } else {
            0.0
        };
        let expected = goal.scale(eaten_pct / 100.0);

        base_target.map(|m, base| {
            let deviation = expected.get(m) - consumed.get(m);
            let corrected = deviation.mul_add(share, base);
            corrected
                .clamp(
                    base * config.min_correction_factor,
                    base * config.max_correction_factor,
                )
                .max(0.0)
        })
    };

    let day_progress = goal.map(|m, goal_value| {
        if goal_value > 0.0 {
            round_to(consumed.get(m) / goal_value * 100.0, 1)
        } else {
            0.0
        }
    });

    debug!(
        slot = %slot,
        slots_left,
        is_last_meal,
        target = %target,
        consumed = %consumed,
        "Computed meal target"
    );

    Ok(MealTarget {
        slot,
        target: target.rounded(1),
        base_target: base_target.rounded(1),
        consumed,
        remaining,
        slots_left,
        is_last_meal,
        day_progress,
    })
}

/// Targets for every slot that has not been logged yet, in slot order
///
/// # Errors
///
/// Returns `InvalidDistribution` if the percentages are invalid
pub fn plan_remaining_day(
    profile: &UserProfile,
    distribution: &MealDistribution,
    daily_log: &DailyLog,
    config: &MealDistributionConfig,
) -> AppResult<Vec<MealTarget>> {
    MealSlot::ALL
        .into_iter()
        .filter(|&slot| !daily_log.is_logged(slot))
        .map(|slot| compute_meal_target(profile, distribution, daily_log, slot, config))
        .collect()
}
