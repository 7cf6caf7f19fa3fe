// ABOUTME: Configuration management module for the nutrition engines
// ABOUTME: Exposes intelligence settings with environment overrides and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Pierre nutrition planner
//!
//! - **Intelligence**: tunable parameters of the goal, meal and feedback engines

/// Intelligence module configuration
pub mod intelligence;

pub use intelligence::{ConfigError, IntelligenceConfig};
