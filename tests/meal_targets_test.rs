// ABOUTME: Tests for per-meal target distribution
// ABOUTME: Covers base shares, deviation compensation, clamping, last-meal completion and invalid distributions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_nutrition::errors::ErrorCode;
use pierre_nutrition::intelligence::{compute_meal_target, plan_remaining_day};
use pierre_nutrition::models::{
    DailyLog, FoodEntry, MacroVector, MealDistribution, MealSlot,
};

mod common;

fn reference_goal() -> MacroVector {
    common::macros(2000.0, 150.0, 200.0, 65.0)
}

fn today() -> DailyLog {
    DailyLog::new(common::date(2025, 3, 10))
}

// ============================================================================
// BASE TARGET TESTS
// ============================================================================

#[test]
fn test_empty_day_gives_base_share() {
    common::init_test_logging();
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &today(),
        MealSlot::First,
        &config.meal_distribution,
    )
    .unwrap();

    assert_eq!(target.slots_left, 4);
    assert!(!target.is_last_meal);
    assert!(target.consumed.is_zero());
    assert!(
        target.target.approx_eq(&common::macros(500.0, 37.5, 50.0, 16.25), 0.1),
        "{}",
        target.target
    );
    assert!(target.target.approx_eq(&target.base_target, 1e-9));
}

#[test]
fn test_on_plan_day_keeps_base_targets() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(500.0, 37.5, 50.0, 16.25));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Second,
        &config.meal_distribution,
    )
    .unwrap();

    assert!(
        target.target.approx_eq(&common::macros(700.0, 52.5, 70.0, 22.75), 0.1),
        "{}",
        target.target
    );
    assert_eq!(target.slots_left, 3);
}

// ============================================================================
// COMPENSATION TESTS
// ============================================================================

#[test]
fn test_overeating_reduces_following_slot() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(800.0, 37.5, 50.0, 16.25));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Second,
        &config.meal_distribution,
    )
    .unwrap();

    // 300 kcal excess spread over 35 + 10 + 30 open percent: lunch carries 35/75 of it
    let expected = 300.0f64.mul_add(-35.0 / 75.0, 700.0);
    assert!(
        (target.target.calories - expected).abs() < 0.1,
        "expected {expected}, got {}",
        target.target.calories
    );
    // Protein was on plan and keeps its base share
    assert!((target.target.protein_g - 52.5).abs() < 0.1);
}

#[test]
fn test_undereating_raises_following_slot() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(200.0, 37.5, 50.0, 16.25));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Fourth,
        &config.meal_distribution,
    )
    .unwrap();

    // 300 kcal shortfall, dinner carries 30/75 of it
    assert!((target.target.calories - 720.0).abs() < 0.1, "{}", target.target);
}

#[test]
fn test_correction_is_clamped_to_half_of_base() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(1900.0, 37.5, 50.0, 16.25));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Second,
        &config.meal_distribution,
    )
    .unwrap();

    assert!((target.target.calories - 350.0).abs() < 1e-9, "{}", target.target);
}

#[test]
fn test_correction_is_clamped_to_twice_base() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    // Breakfast and lunch skipped as zero-calorie entries: 1200 kcal behind plan
    let log = common::log_meal(
        common::log_meal(today(), MealSlot::First, MacroVector::ZERO),
        MealSlot::Second,
        MacroVector::ZERO,
    );

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Third,
        &config.meal_distribution,
    )
    .unwrap();

    // Snack base is 200 kcal; 1200 * 10/40 = 300 extra would exceed 2x base
    assert!((target.target.calories - 400.0).abs() < 1e-9, "{}", target.target);
}

#[test]
fn test_extra_foods_count_as_consumed() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = today().with_extra_food(FoodEntry::new(
        "protein bar",
        common::macros(250.0, 20.0, 25.0, 8.0),
    ));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::First,
        &config.meal_distribution,
    )
    .unwrap();

    assert!((target.consumed.calories - 250.0).abs() < 1e-9);
    assert!(target.target.calories < target.base_target.calories);
    assert!((target.day_progress.calories - 12.5).abs() < 1e-9);
}

// ============================================================================
// LAST MEAL TESTS
// ============================================================================

#[test]
fn test_last_open_slot_receives_remaining() {
    common::init_test_logging();
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();

    let log = common::log_meal(
        common::log_meal(
            common::log_meal(today(), MealSlot::Second, common::macros(700.0, 50.0, 70.0, 25.0)),
            MealSlot::Third,
            common::macros(200.0, 10.0, 25.0, 6.0),
        ),
        MealSlot::Fourth,
        common::macros(600.0, 50.0, 55.0, 20.0),
    );

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::First,
        &config.meal_distribution,
    )
    .unwrap();

    assert!(target.is_last_meal);
    assert_eq!(target.slots_left, 1);
    assert!(
        target.target.approx_eq(&common::macros(500.0, 40.0, 50.0, 14.0), 1e-6),
        "{}",
        target.target
    );
    assert!(target.remaining.approx_eq(&target.target, 1e-6));
}

#[test]
fn test_last_meal_remaining_floors_at_zero() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();

    let log = common::log_meal(
        common::log_meal(
            common::log_meal(today(), MealSlot::First, common::macros(900.0, 80.0, 90.0, 30.0)),
            MealSlot::Second,
            common::macros(900.0, 80.0, 90.0, 30.0),
        ),
        MealSlot::Third,
        common::macros(400.0, 10.0, 40.0, 20.0),
    );

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Fourth,
        &config.meal_distribution,
    )
    .unwrap();

    assert!(target.is_last_meal);
    assert!(target.target.validate().is_ok());
    assert!(target.target.calories.abs() < 1e-9);
    assert!(target.target.protein_g.abs() < 1e-9);
    assert!((target.target.carbs_g - 0.0).abs() < 1e-9);
}

#[test]
fn test_sequential_logging_reproduces_daily_goal() {
    let goal = reference_goal();
    let profile = common::profile_with_goal(goal);
    let config = common::config();
    let distribution = MealDistribution::default();

    let mut log = today();
    for slot in MealSlot::ALL {
        let target =
            compute_meal_target(&profile, &distribution, &log, slot, &config.meal_distribution)
                .unwrap();
        assert_eq!(target.is_last_meal, slot == MealSlot::Fourth);
        log = common::log_meal(log, slot, target.target);
    }

    assert!(
        log.total_intake().approx_eq(&goal, 0.05),
        "day closed at {} instead of {goal}",
        log.total_intake()
    );
}

#[test]
fn test_sequential_logging_with_custom_distribution() {
    let goal = common::macros(2600.0, 190.0, 280.0, 75.0);
    let profile = common::profile_with_goal(goal);
    let config = common::config();
    let distribution = MealDistribution::new(20.0, 30.0, 15.0, 35.0);

    let mut log = today();
    for slot in [MealSlot::Third, MealSlot::First, MealSlot::Fourth, MealSlot::Second] {
        let target =
            compute_meal_target(&profile, &distribution, &log, slot, &config.meal_distribution)
                .unwrap();
        log = common::log_meal(log, slot, target.target);
    }

    assert!(log.total_intake().approx_eq(&goal, 0.05), "{}", log.total_intake());
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn test_invalid_distribution_rejected() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();

    for distribution in [
        MealDistribution::new(30.0, 30.0, 30.0, 30.0),
        MealDistribution::new(50.0, 60.0, 0.0, -10.0),
    ] {
        let err = compute_meal_target(
            &profile,
            &distribution,
            &today(),
            MealSlot::First,
            &config.meal_distribution,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDistribution);
    }
}

#[test]
fn test_negative_goal_from_json_rejected() {
    // Deserialisation skips the checks in MacroVector::new
    let goal: MacroVector = serde_json::from_str(
        r#"{"calories": 2000.0, "protein_g": -10.0, "carbs_g": 200.0, "fat_g": 65.0}"#,
    )
    .unwrap();
    let profile = common::profile_with_goal(goal);
    let config = common::config();

    for slot in MealSlot::ALL {
        let err = compute_meal_target(
            &profile,
            &MealDistribution::default(),
            &today(),
            slot,
            &config.meal_distribution,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    let err = plan_remaining_day(
        &profile,
        &MealDistribution::default(),
        &today(),
        &config.meal_distribution,
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_zero_goal_never_divides() {
    let profile = common::profile_with_goal(MacroVector::ZERO);
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(300.0, 20.0, 30.0, 10.0));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::Second,
        &config.meal_distribution,
    )
    .unwrap();

    assert!(target.target.is_zero());
    assert!(target.day_progress.is_zero());
    assert!(target.remaining.is_zero());
}

#[test]
fn test_slot_already_logged_is_recomputed() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::First, common::macros(900.0, 60.0, 90.0, 30.0));

    let target = compute_meal_target(
        &profile,
        &MealDistribution::default(),
        &log,
        MealSlot::First,
        &config.meal_distribution,
    )
    .unwrap();

    assert!(target.consumed.is_zero());
    assert_eq!(target.slots_left, 4);
}

#[test]
fn test_plan_remaining_day_lists_open_slots() {
    let profile = common::profile_with_goal(reference_goal());
    let config = common::config();
    let log = common::log_meal(today(), MealSlot::Second, common::macros(700.0, 52.5, 70.0, 22.75));

    let plan = plan_remaining_day(
        &profile,
        &MealDistribution::default(),
        &log,
        &config.meal_distribution,
    )
    .unwrap();

    let slots: Vec<MealSlot> = plan.iter().map(|t| t.slot).collect();
    assert_eq!(slots, vec![MealSlot::First, MealSlot::Third, MealSlot::Fourth]);
    assert!(plan.iter().all(|t| t.slots_left == 3));

    let planned: MacroVector = plan.iter().map(|t| t.target).sum();
    assert!((planned.calories - 1300.0).abs() < 0.5, "{planned}");
}
