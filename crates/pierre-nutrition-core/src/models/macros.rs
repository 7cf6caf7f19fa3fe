// ABOUTME: MacroVector, the calories/protein/carbs/fat unit exchanged between all engines
// ABOUTME: Validated construction, saturating arithmetic and per-macro access helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Energy density of protein (kcal/g)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate (kcal/g)
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// One of the four tracked quantities of a [`MacroVector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    /// Energy in kcal
    Calories,
    /// Protein in grams
    Protein,
    /// Carbohydrates in grams
    Carbs,
    /// Fat in grams
    Fat,
}

impl Macro {
    /// All macros in canonical order
    pub const ALL: [Self; 4] = [Self::Calories, Self::Protein, Self::Carbs, Self::Fat];

    /// Display unit
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein | Self::Carbs | Self::Fat => "g",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
        };
        f.write_str(name)
    }
}

/// Calories plus the three macronutrients in grams
///
/// All four fields are non-negative. Calories are tracked independently of the
/// 4/4/9 derivation because recipes round each field separately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroVector {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrates (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
}

impl MacroVector {
    /// The zero vector
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
    };

    /// Create a validated macro vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any field is negative or not finite
    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> AppResult<Self> {
        let vector = Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        };
        vector.validate()?;
        Ok(vector)
    }

    /// Build a vector from grams, deriving calories with 4/4/9
    #[must_use]
    pub fn from_grams(protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        let mut vector = Self {
            calories: 0.0,
            protein_g: protein_g.max(0.0),
            carbs_g: carbs_g.max(0.0),
            fat_g: fat_g.max(0.0),
        };
        vector.calories = vector.derived_calories();
        vector
    }

    /// Check the non-negativity invariant
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending macro
    pub fn validate(&self) -> AppResult<()> {
        for m in Macro::ALL {
            let value = self.get(m);
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "{m} must be a non-negative number, got {value} {}",
                    m.unit()
                )));
            }
        }
        Ok(())
    }

    /// Calories implied by the gram fields (4 kcal/g protein and carbs, 9 kcal/g fat)
    #[must_use]
    pub fn derived_calories(&self) -> f64 {
        self.fat_g.mul_add(
            KCAL_PER_G_FAT,
            self.protein_g
                .mul_add(KCAL_PER_G_PROTEIN, self.carbs_g * KCAL_PER_G_CARBS),
        )
    }

    /// Read one field
    #[must_use]
    pub const fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein_g,
            Macro::Carbs => self.carbs_g,
            Macro::Fat => self.fat_g,
        }
    }

    /// Copy with one field replaced
    #[must_use]
    pub const fn with(mut self, m: Macro, value: f64) -> Self {
        match m {
            Macro::Calories => self.calories = value,
            Macro::Protein => self.protein_g = value,
            Macro::Carbs => self.carbs_g = value,
            Macro::Fat => self.fat_g = value,
        }
        self
    }

    /// Apply `f` to every field
    #[must_use]
    pub fn map(self, f: impl Fn(Macro, f64) -> f64) -> Self {
        Macro::ALL
            .iter()
            .fold(self, |acc, &m| acc.with(m, f(m, self.get(m))))
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        self.map(|_, v| v * factor)
    }

    /// Field-wise `max(0, self - other)`
    #[must_use]
    pub fn saturating_sub(self, other: &Self) -> Self {
        self.map(|m, v| (v - other.get(m)).max(0.0))
    }

    /// Round every field to `decimals` places
    #[must_use]
    pub fn rounded(self, decimals: i32) -> Self {
        self.map(|_, v| round_to(v, decimals))
    }

    /// True when every field is within `tolerance` of `other`
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        Macro::ALL
            .iter()
            .all(|&m| (self.get(m) - other.get(m)).abs() <= tolerance)
    }

    /// True when every field is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        Macro::ALL.iter().all(|&m| self.get(m) == 0.0)
    }
}

impl Add for MacroVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.map(|m, v| v + rhs.get(m))
    }
}

impl<'a> Sum<&'a Self> for MacroVector {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, v| acc + *v)
    }
}

impl Sum for MacroVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for MacroVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
            self.calories, self.protein_g, self.carbs_g, self.fat_g
        )
    }
}

/// Round `value` to `decimals` decimal places
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
