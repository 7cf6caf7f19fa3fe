// ABOUTME: Core types for the Pierre nutrition planning engine
// ABOUTME: Foundation crate with error handling and nutrition data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Nutrition Core
//!
//! Foundation crate providing the shared types of the nutrition planner. It
//! changes rarely, which keeps incremental builds of the engine crate fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Macro vectors, profiles, daily logs, meal templates and weekly records

/// Unified error handling system with standard error codes
pub mod errors;

/// Nutrition data models shared by every engine
pub mod models;
