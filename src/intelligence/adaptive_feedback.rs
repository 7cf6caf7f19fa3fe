// ABOUTME: Weekly feedback loop comparing observed weight change to energy-balance predictions
// ABOUTME: Steps the goal multiplier, detects metabolic adaptation and emits progress records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptive Feedback Loop
//!
//! Once a week the logged intake is averaged and turned into an expected weight
//! change with the 7700 kcal/kg rule. When the scale disagrees with that
//! prediction by more than the tolerance, the goal multiplier moves one notch
//! along the scale and the goals are recomputed.
//!
//! Consecutive deficit weeks without weight movement are treated as metabolic
//! adaptation: a diet break at three weeks, a reverse diet from four.
//!
//! # Scientific References
//!
//! - Hall, K.D. (2008). What is the required energy deficit per unit weight loss?
//!   *International Journal of Obesity*, 32(3), 573-576.
//!   <https://doi.org/10.1038/sj.ijo.0803720>
//!
//! - Byrne, N.M., et al. (2018). Intermittent energy restriction improves weight loss
//!   efficiency in obese men: the MATADOR study.
//!   *International Journal of Obesity*, 42(2), 129-138.
//!   <https://doi.org/10.1038/ijo.2017.206>

use crate::config::intelligence::{AdaptiveFeedbackConfig, NutritionConfig};
use crate::intelligence::goal_engine::{compute_goals_with_multiplier, tdee_for_profile};
use pierre_nutrition_core::errors::AppResult;
use pierre_nutrition_core::models::{
    round_to, AdaptationAnalysis, AdaptationLevel, DailyLog, DietPhase, GoalMultiplier,
    MetabolicAdaptation, UserProfile, WeeklyProgressRecord,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of a weekly run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeeklyOutcome {
    /// The week was analysed
    Analyzed(Box<AdaptationAnalysis>),
    /// Too few days with logged intake to say anything
    InsufficientData {
        /// Days with any intake
        populated_days: u32,
        /// Minimum required
        required: u32,
    },
}

impl WeeklyOutcome {
    /// The analysis, if the week had enough data
    #[must_use]
    pub fn analysis(&self) -> Option<&AdaptationAnalysis> {
        match self {
            Self::Analyzed(analysis) => Some(analysis),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Analyse one window of daily logs and propose revised goals
///
/// Pure and deterministic: the same profile and logs always give the same
/// analysis. Logs may arrive in any order. Only the trailing `window_days`
/// ending at the latest logged date are analysed; older logs are ignored.
///
/// # Errors
///
/// Returns `InvalidProfile` if the profile's anthropometrics are malformed
pub fn run_weekly_analysis(
    profile: &UserProfile,
    logs: &[DailyLog],
    config: &NutritionConfig,
) -> AppResult<WeeklyOutcome> {
    let feedback = &config.adaptive_feedback;

    let days = trailing_window(logs, feedback.window_days);

    let populated: Vec<&DailyLog> = days.iter().copied().filter(|log| log.is_populated()).collect();
    let populated_days = u32::try_from(populated.len()).unwrap_or(u32::MAX);

    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Ok(insufficient(populated_days, feedback));
    };
    if populated_days < feedback.min_populated_days {
        return Ok(insufficient(populated_days, feedback));
    }

    let avg_intake = populated
        .iter()
        .map(|log| log.total_intake().calories)
        .sum::<f64>()
        / f64::from(populated_days);

    let period_start = first.date;
    let period_end = last.date;
    let span_days = (period_end - period_start).num_days() as f64 + 1.0;
    let weeks = span_days / 7.0;

    let weights: Vec<f64> = days.iter().filter_map(|log| log.weight_kg).collect();
    let observed = match (weights.first(), weights.last()) {
        (Some(start), Some(end)) if weights.len() >= 2 => Some(end - start),
        _ => None,
    };

    let tdee = tdee_for_profile(profile, config)?;
    let expected = (avg_intake - tdee) * span_days / feedback.kcal_per_kg;

    let current = profile.effective_multiplier();
    let goal_calories = if profile.goals.calories > 0.0 {
        profile.goals.calories
    } else {
        compute_goals_with_multiplier(profile, current, config)?.calories
    };
    let adherence = if goal_calories > 0.0 {
        avg_intake / goal_calories
    } else {
        1.0
    };
    let deficit_percent = (tdee - avg_intake) / tdee * 100.0;

    let progress_record = WeeklyProgressRecord {
        period_start,
        period_end,
        populated_days,
        avg_calories: round_to(avg_intake, 1),
        weight_delta_kg: observed.map(|delta| round_to(delta, 2)),
        expected_weight_delta_kg: round_to(expected, 2),
        adherence_ratio: round_to(adherence, 3),
        in_deficit: avg_intake < tdee,
        observed_phase: GoalMultiplier::from_deficit_percent(deficit_percent),
    };

    let metabolic_adaptation = detect_metabolic_adaptation(profile, &progress_record, feedback);

    let mut warnings = intake_warnings(profile, avg_intake, tdee, adherence, current, feedback);
    if let Some(delta) = observed {
        let weekly_loss = -delta / weeks;
        if weekly_loss > profile.weight_kg * feedback.rapid_loss_percent_per_week / 100.0 {
            warnings.push(format!(
                "Losing {weekly_loss:.2} kg per week, more than {:.0}% of body weight; consider a refeed",
                feedback.rapid_loss_percent_per_week
            ));
        }
    }

    let (new_multiplier, reason) = decide_multiplier(
        current,
        observed,
        expected,
        weeks,
        &metabolic_adaptation,
        feedback,
        &mut warnings,
    );

    let needs_adjustment = new_multiplier != current;
    let new_goals = if needs_adjustment {
        Some(compute_goals_with_multiplier(profile, new_multiplier, config)?)
    } else {
        None
    };

    info!(
        period_start = %period_start,
        period_end = %period_end,
        avg_intake,
        tdee,
        expected_delta_kg = expected,
        observed_delta_kg = ?observed,
        current = %current,
        proposed = %new_multiplier,
        adaptation = ?metabolic_adaptation.level,
        needs_adjustment,
        "Weekly analysis complete"
    );

    Ok(WeeklyOutcome::Analyzed(Box::new(AdaptationAnalysis {
        needs_adjustment,
        reason,
        warnings,
        new_goals,
        new_multiplier: needs_adjustment.then_some(new_multiplier),
        metabolic_adaptation,
        progress_record,
        avg_intake_calories: round_to(avg_intake, 1),
        tdee: round_to(tdee, 1),
        expected_weight_delta_kg: round_to(expected, 2),
        observed_weight_delta_kg: observed.map(|delta| round_to(delta, 2)),
    })))
}

/// Write an analysis back onto a profile
///
/// Appends the progress record and, when an adjustment was proposed, replaces
/// the goals and pins the new multiplier. Applying the same analysis twice
/// gives the same profile.
#[must_use]
pub fn apply_analysis(profile: &UserProfile, analysis: &AdaptationAnalysis) -> UserProfile {
    let updated = profile
        .clone()
        .with_progress_record(analysis.progress_record.clone());
    match analysis.new_goals {
        Some(goals) if analysis.needs_adjustment => {
            updated.with_goals(goals, analysis.new_multiplier)
        }
        _ => updated,
    }
}

/// Classify consecutive stalled deficit weeks ending with the current one
#[must_use]
pub fn detect_metabolic_adaptation(
    profile: &UserProfile,
    current: &WeeklyProgressRecord,
    config: &AdaptiveFeedbackConfig,
) -> MetabolicAdaptation {
    if !current.is_stalled_deficit(config.stall_band_kg) {
        return MetabolicAdaptation::default();
    }

    let previous = profile
        .progress_history
        .iter()
        .rev()
        .filter(|record| !record.same_period(current))
        .take_while(|record| record.is_stalled_deficit(config.stall_band_kg))
        .count();
    let stalled_weeks = u32::try_from(previous).unwrap_or(u32::MAX).saturating_add(1);

    let (level, recommended_phase) = if stalled_weeks >= config.severe_stall_weeks {
        (AdaptationLevel::Severe, DietPhase::ReverseDiet)
    } else if stalled_weeks >= config.moderate_stall_weeks {
        (AdaptationLevel::Moderate, DietPhase::DietBreak)
    } else if stalled_weeks >= config.mild_stall_weeks {
        (AdaptationLevel::Mild, DietPhase::Continue)
    } else {
        (AdaptationLevel::None, DietPhase::Continue)
    };

    debug!(stalled_weeks, ?level, "Metabolic adaptation check");

    MetabolicAdaptation {
        level,
        stalled_weeks,
        recommended_phase,
    }
}

/// Logs sorted by date, limited to the `window_days` ending at the latest date
fn trailing_window(logs: &[DailyLog], window_days: u32) -> Vec<&DailyLog> {
    let mut days: Vec<&DailyLog> = logs.iter().collect();
    days.sort_by_key(|log| log.date);

    let Some(latest) = days.last().map(|log| log.date) else {
        return days;
    };
    let window_start = latest
        .checked_sub_days(Days::new(u64::from(window_days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    let total = days.len();
    days.retain(|log| log.date >= window_start);

    if days.len() < total {
        debug!(
            dropped = total - days.len(),
            window_start = %window_start,
            "Ignoring logs older than the analysis window"
        );
    }
    days
}

const fn insufficient(populated_days: u32, config: &AdaptiveFeedbackConfig) -> WeeklyOutcome {
    WeeklyOutcome::InsufficientData {
        populated_days,
        required: config.min_populated_days,
    }
}

fn intake_warnings(
    profile: &UserProfile,
    avg_intake: f64,
    tdee: f64,
    adherence: f64,
    current: GoalMultiplier,
    config: &AdaptiveFeedbackConfig,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if adherence < config.adherence_min || adherence > config.adherence_max {
        warnings.push(format!(
            "Average intake is {:.0}% of the calorie goal",
            adherence * 100.0
        ));
    }
    if current.is_deficit() && avg_intake > tdee {
        warnings.push(format!(
            "Average intake of {avg_intake:.0} kcal is above maintenance ({tdee:.0} kcal) during a {:?} goal",
            profile.goal_type
        ));
    }
    warnings
}

fn decide_multiplier(
    current: GoalMultiplier,
    observed: Option<f64>,
    expected: f64,
    weeks: f64,
    adaptation: &MetabolicAdaptation,
    config: &AdaptiveFeedbackConfig,
    warnings: &mut Vec<String>,
) -> (GoalMultiplier, String) {
    if let Some(decision) = adaptation_response(current, adaptation) {
        return decision;
    }

    let Some(observed) = observed else {
        return (
            current,
            "Fewer than two weight samples; intake checks only".to_owned(),
        );
    };

    let tolerance = config.deviation_tolerance_kg_per_week * weeks;
    let deviation = observed - expected;
    let summary = format!("Weight changed {observed:+.2} kg against {expected:+.2} kg expected");

    if deviation < -tolerance {
        current.step_toward_surplus().map_or_else(
            || {
                warnings.push(format!(
                    "Goal multiplier already at the top of the scale ({current})"
                ));
                (current, format!("{summary}; no room to add calories"))
            },
            |next| (next, format!("{summary}; moving to {next}")),
        )
    } else if deviation > tolerance {
        if adaptation.level >= AdaptationLevel::Moderate {
            return (
                current,
                format!("{summary}; metabolic adaptation blocks a larger deficit"),
            );
        }
        current.step_toward_deficit().map_or_else(
            || {
                warnings.push(format!(
                    "Goal multiplier already at the bottom of the scale ({current})"
                ));
                (current, format!("{summary}; no room to cut calories"))
            },
            |next| (next, format!("{summary}; moving to {next}")),
        )
    } else {
        (current, format!("{summary}; within tolerance"))
    }
}

/// Diet break or reverse diet when a dieting user has stalled long enough
fn adaptation_response(
    current: GoalMultiplier,
    adaptation: &MetabolicAdaptation,
) -> Option<(GoalMultiplier, String)> {
    if !current.is_deficit() {
        return None;
    }
    match adaptation.recommended_phase {
        DietPhase::ReverseDiet => current.step_toward_surplus().map(|next| {
            (
                next,
                format!(
                    "{} stalled deficit weeks: reverse diet, raising calories to {next}",
                    adaptation.stalled_weeks
                ),
            )
        }),
        DietPhase::DietBreak => Some((
            GoalMultiplier::Maintenance,
            format!(
                "{} stalled deficit weeks: diet break at maintenance",
                adaptation.stalled_weeks
            ),
        )),
        DietPhase::Continue => None,
    }
}
