// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for pierre-nutrition-cli
// ABOUTME: Provides JSON file input and stdout output utilities

pub mod io;
