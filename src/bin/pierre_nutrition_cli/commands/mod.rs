// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for pierre-nutrition-cli
// ABOUTME: Provides goal, meal and weekly analysis commands

pub mod goals;
pub mod meals;
pub mod weekly;
