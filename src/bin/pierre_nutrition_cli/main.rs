// ABOUTME: Pierre nutrition CLI - runs the nutrition engines over JSON files
// ABOUTME: Computes goals, meal targets, scaled meals and weekly analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily goals for a profile
//! pierre-nutrition-cli goals --profile profile.json
//!
//! # Target for lunch given what was logged today
//! pierre-nutrition-cli meal-target --profile profile.json --log today.json --slot lunch
//!
//! # Targets for every open slot
//! pierre-nutrition-cli meal-target --profile profile.json --log today.json
//!
//! # Scale a template, closing the day exactly
//! pierre-nutrition-cli scale --template bowl.json --catalog ingredients.json --target target.json --last-meal
//!
//! # Weekly analysis, writing the revised profile back
//! pierre-nutrition-cli weekly --profile profile.json --logs week.json --write-profile profile.json
//! ```
//!
//! Results are printed as JSON on stdout, logs go to stderr.

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use pierre_nutrition::config::IntelligenceConfig;
use pierre_nutrition::errors::{AppError, AppResult};
use pierre_nutrition::logging::LoggingConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pierre-nutrition-cli",
    about = "Pierre nutrition planner CLI",
    long_about = "Runs the goal, meal target, meal scaling and weekly feedback engines over JSON files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute daily macro goals
    Goals {
        /// User profile JSON
        #[arg(long)]
        profile: PathBuf,
    },

    /// Compute the macro target of a meal slot
    MealTarget {
        /// User profile JSON (goals and default distribution)
        #[arg(long)]
        profile: PathBuf,

        /// Daily log JSON
        #[arg(long)]
        log: PathBuf,

        /// Slot name (first..fourth or breakfast/lunch/snack/dinner); omit for every open slot
        #[arg(long)]
        slot: Option<String>,

        /// Meal distribution JSON overriding the profile's
        #[arg(long)]
        distribution: Option<PathBuf>,
    },

    /// Scale a meal template toward a target
    Scale {
        /// Meal template JSON
        #[arg(long)]
        template: PathBuf,

        /// Ingredient catalog JSON (array of ingredient profiles)
        #[arg(long)]
        catalog: PathBuf,

        /// Target macro vector JSON
        #[arg(long)]
        target: PathBuf,

        /// Correct totals to match the target exactly
        #[arg(long)]
        last_meal: bool,
    },

    /// Run the weekly feedback analysis
    Weekly {
        /// User profile JSON
        #[arg(long)]
        profile: PathBuf,

        /// Daily logs JSON (array)
        #[arg(long)]
        logs: PathBuf,

        /// Write the profile with the new record and goals to this file
        #[arg(long)]
        write_profile: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let config = &IntelligenceConfig::global().nutrition;

    match cli.command {
        Command::Goals { profile } => commands::goals::run(&profile, config),
        Command::MealTarget {
            profile,
            log,
            slot,
            distribution,
        } => commands::meals::target(
            &profile,
            &log,
            slot.as_deref(),
            distribution.as_deref(),
            config,
        ),
        Command::Scale {
            template,
            catalog,
            target,
            last_meal,
        } => commands::meals::scale(&template, &catalog, &target, last_meal, config),
        Command::Weekly {
            profile,
            logs,
            write_profile,
        } => commands::weekly::run(&profile, &logs, write_profile.as_deref(), config),
    }
}
