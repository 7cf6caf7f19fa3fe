// ABOUTME: Criterion benchmarks for the nutrition engines
// ABOUTME: Measures goal derivation, meal targeting, template scaling and weekly analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the nutrition engines.
//!
//! The per-call engines are cheap; the interesting numbers are batch scaling
//! across rayon workers and weekly analysis over long progress histories.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::expect_used)]

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pierre_nutrition::config::intelligence::NutritionConfig;
use pierre_nutrition::intelligence::{
    compute_goals, compute_meal_target, run_weekly_analysis, scale_meal, scale_meals,
    InMemoryCatalog, ScaleRequest,
};
use pierre_nutrition::models::{
    DailyLog, GoalMultiplier, GoalType, IngredientProfile, IngredientRef, LoggedMeal,
    MacroVector, MealDistribution, MealSlot, MealTemplate, Sex, UserProfile,
    WeeklyProgressRecord,
};

fn macros(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> MacroVector {
    MacroVector::new(calories, protein_g, carbs_g, fat_g).expect("benchmark macros are valid")
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
}

fn athlete() -> UserProfile {
    UserProfile::new(Sex::Female, 34, 64.0, 168.0, 5, GoalType::ModerateLoss)
}

fn catalog() -> InMemoryCatalog {
    [
        ("rice", macros(130.0, 2.7, 28.0, 0.3)),
        ("chicken", macros(165.0, 31.0, 0.0, 3.6)),
        ("broccoli", macros(34.0, 2.8, 7.0, 0.4)),
        ("olive_oil", macros(884.0, 0.0, 0.0, 100.0)),
        ("salmon", macros(208.0, 20.0, 0.0, 13.0)),
        ("potato", macros(77.0, 2.0, 17.0, 0.1)),
    ]
    .into_iter()
    .map(|(id, per_100g)| IngredientProfile::new(id, id, per_100g).expect("valid ingredient"))
    .collect()
}

#[allow(clippy::cast_precision_loss)]
fn templates(count: usize) -> Vec<MealTemplate> {
    (0..count)
        .map(|index| {
            let rice = 120.0 + (index % 7) as f64 * 10.0;
            let protein = 100.0 + (index % 5) as f64 * 15.0;
            let ingredients = vec![
                IngredientRef::new("rice", rice),
                IngredientRef::new(if index % 2 == 0 { "chicken" } else { "salmon" }, protein),
                IngredientRef::new("broccoli", 80.0),
                IngredientRef::new("olive_oil", 5.0),
            ];
            MealTemplate::new(
                format!("Bowl {index}"),
                Vec::new(),
                ingredients,
                macros(520.0 + index as f64, 35.0, 55.0, 14.0),
            )
            .expect("valid template")
        })
        .collect()
}

fn week_of_logs(start: NaiveDate, calories: f64, weights: (f64, f64)) -> Vec<DailyLog> {
    (0..7)
        .map(|offset| {
            let mut log = DailyLog::new(start + Days::new(offset)).with_meal(
                MealSlot::Second,
                LoggedMeal::new("lunch", macros(calories, 120.0, 190.0, 60.0)),
            );
            if offset == 0 {
                log = log.with_weight(weights.0);
            }
            if offset == 6 {
                log = log.with_weight(weights.1);
            }
            log
        })
        .collect()
}

fn with_history(profile: UserProfile, weeks: u64) -> UserProfile {
    (1..=weeks).rev().fold(profile, |profile, back| {
        let period_start = start_date() - Days::new(7 * back);
        profile.with_progress_record(WeeklyProgressRecord {
            period_start,
            period_end: period_start + Days::new(6),
            populated_days: 7,
            avg_calories: 1800.0,
            weight_delta_kg: Some(if back % 3 == 0 { -0.5 } else { -0.1 }),
            expected_weight_delta_kg: -0.4,
            adherence_ratio: 1.0,
            in_deficit: true,
            observed_phase: GoalMultiplier::ModerateCut,
        })
    })
}

/// Benchmark goal derivation
fn bench_goal_engine(c: &mut Criterion) {
    let config = NutritionConfig::default();
    let profile = athlete();

    c.bench_function("compute_goals", |b| {
        b.iter(|| compute_goals(black_box(&profile), black_box(&config)));
    });
}

/// Benchmark meal target distribution at each point of the day
fn bench_meal_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("meal_targets");
    let config = NutritionConfig::default();
    let goal = macros(2000.0, 150.0, 200.0, 65.0);
    let profile = athlete().with_goals(goal, None);
    let distribution = MealDistribution::default();

    let mut log = DailyLog::new(start_date());
    for (logged, slot) in MealSlot::ALL.into_iter().enumerate() {
        group.bench_with_input(
            BenchmarkId::new("compute_meal_target", logged),
            &log,
            |b, log| {
                b.iter(|| {
                    compute_meal_target(
                        black_box(&profile),
                        black_box(&distribution),
                        black_box(log),
                        slot,
                        &config.meal_distribution,
                    )
                });
            },
        );
        log = log.with_meal(slot, LoggedMeal::new(slot.label(), goal.scale(0.3)));
    }

    group.finish();
}

/// Benchmark template scaling, single and batched
#[allow(clippy::cast_possible_truncation)]
fn bench_meal_scaler(c: &mut Criterion) {
    let mut group = c.benchmark_group("meal_scaler");
    let config = NutritionConfig::default();
    let catalog = catalog();
    let target = macros(640.0, 45.0, 70.0, 18.0);

    let single = templates(1).remove(0);
    for last_meal in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("scale_meal", if last_meal { "exact" } else { "normal" }),
            &single,
            |b, template| {
                b.iter(|| {
                    scale_meal(
                        black_box(template),
                        black_box(&target),
                        last_meal,
                        &catalog,
                        &config.meal_scaling,
                    )
                });
            },
        );
    }

    for count in [10_usize, 100, 1000] {
        let requests: Vec<ScaleRequest> = templates(count)
            .into_iter()
            .enumerate()
            .map(|(index, template)| ScaleRequest {
                template,
                target,
                is_last_meal: index % 4 == 3,
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("scale_meals", count),
            &requests,
            |b, requests| {
                b.iter(|| scale_meals(black_box(requests), &catalog, &config.meal_scaling));
            },
        );
    }

    group.finish();
}

/// Benchmark weekly analysis against growing progress histories
fn bench_weekly_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("weekly_analysis");
    let config = NutritionConfig::default();
    let base = athlete();
    let goals = compute_goals(&base, &config).expect("valid profile");
    let logs = week_of_logs(start_date(), goals.calories, (64.0, 63.9));

    for weeks in [0_u64, 12, 52, 260] {
        let profile = with_history(base.clone().with_goals(goals, None), weeks);
        group.bench_with_input(
            BenchmarkId::new("run_weekly_analysis", weeks),
            &profile,
            |b, profile| {
                b.iter(|| run_weekly_analysis(black_box(profile), black_box(&logs), &config));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_goal_engine,
    bench_meal_targets,
    bench_meal_scaler,
    bench_weekly_analysis,
);

criterion_main!(benches);
