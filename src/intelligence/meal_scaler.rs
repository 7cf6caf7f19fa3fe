// ABOUTME: Scales meal templates so their macros hit a per-meal target
// ABOUTME: Bounded scale factor, 5 g rounding, exact-completion correction and missing-ingredient reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Scaler
//!
//! A template is scaled by a single calorie-driven factor, clamped so portions
//! stay realistic, and every ingredient quantity is rounded to a kitchen-friendly
//! step. Reported totals are always the sum of the per-ingredient macros.
//!
//! For the meal that closes the day, per-macro correction ratios are applied on
//! top so the day lands exactly on its goal. Corrected ingredient macros no
//! longer match the ingredient's own density; the ratios are kept on the result
//! so the same numbers can be re-derived later.

use pierre_nutrition_core::models::{
    IngredientProfile, Macro, MacroVector, MealSlot, MealTemplate,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use tracing::{debug, warn};

use crate::config::intelligence::MealScalingConfig;

/// Read-only source of ingredient macro profiles
pub trait IngredientCatalog: Sync {
    /// Find an ingredient by catalog id
    fn lookup(&self, ingredient_id: &str) -> Option<&IngredientProfile>;
}

impl<S: BuildHasher + Sync> IngredientCatalog for HashMap<String, IngredientProfile, S> {
    fn lookup(&self, ingredient_id: &str) -> Option<&IngredientProfile> {
        self.get(ingredient_id)
    }
}

/// Catalog backed by a map keyed on ingredient id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    ingredients: HashMap<String, IngredientProfile>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an ingredient
    pub fn insert(&mut self, profile: IngredientProfile) {
        self.ingredients.insert(profile.id.clone(), profile);
    }

    /// Number of ingredients
    #[must_use]
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    /// Whether the catalog holds no ingredient
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl FromIterator<IngredientProfile> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = IngredientProfile>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for profile in iter {
            catalog.insert(profile);
        }
        catalog
    }
}

impl IngredientCatalog for InMemoryCatalog {
    fn lookup(&self, ingredient_id: &str) -> Option<&IngredientProfile> {
        self.ingredients.get(ingredient_id)
    }
}

/// Non-fatal issue encountered while scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalingWarning {
    /// Ingredient id not found in the catalog; it was left out of the result
    MissingIngredient {
        /// Unresolved catalog id
        ingredient_id: String,
    },
    /// The calorie-driven factor fell outside the allowed band
    ScaleClamped {
        /// Factor needed to hit the calorie target
        requested: f64,
        /// Factor actually used
        applied: f64,
    },
    /// Template has no calories, so it was served at its base quantities
    ZeroCalorieTemplate,
    /// Exact completion could not correct this macro because the meal contains none of it
    UncorrectableMacro {
        /// Affected macro
        nutrient: Macro,
    },
}

impl fmt::Display for ScalingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIngredient { ingredient_id } => {
                write!(f, "Ingredient '{ingredient_id}' not found in catalog")
            }
            Self::ScaleClamped { requested, applied } => {
                write!(f, "Scale factor {requested:.2} clamped to {applied:.2}")
            }
            Self::ZeroCalorieTemplate => f.write_str("Template has zero calories"),
            Self::UncorrectableMacro { nutrient } => {
                write!(f, "Meal contains no {nutrient} to correct")
            }
        }
    }
}

/// Per-macro multipliers used by exact-completion mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRatios {
    /// Calorie ratio
    pub calories: f64,
    /// Protein ratio
    pub protein: f64,
    /// Carbohydrate ratio
    pub carbs: f64,
    /// Fat ratio
    pub fat: f64,
}

impl Default for CorrectionRatios {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CorrectionRatios {
    /// Ratios that change nothing
    pub const IDENTITY: Self = Self {
        calories: 1.0,
        protein: 1.0,
        carbs: 1.0,
        fat: 1.0,
    };

    /// `target / realized` per macro; a macro with nothing realized keeps 1.0
    #[must_use]
    pub fn between(target: &MacroVector, realized: &MacroVector) -> Self {
        let mut ratios = Self::IDENTITY;
        for m in Macro::ALL {
            let realized_value = realized.get(m);
            if realized_value > 0.0 {
                ratios = ratios.with(m, target.get(m) / realized_value);
            }
        }
        ratios
    }

    /// Ratio for one macro
    #[must_use]
    pub const fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    const fn with(mut self, m: Macro, ratio: f64) -> Self {
        match m {
            Macro::Calories => self.calories = ratio,
            Macro::Protein => self.protein = ratio,
            Macro::Carbs => self.carbs = ratio,
            Macro::Fat => self.fat = ratio,
        }
        self
    }

    /// Multiply each macro by its ratio
    #[must_use]
    pub fn apply(&self, macros: MacroVector) -> MacroVector {
        macros.map(|m, v| v * self.get(m))
    }
}

/// One ingredient of a scaled meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    /// Catalog id
    pub ingredient_id: String,
    /// Display name from the catalog
    pub name: String,
    /// Quantity in the template (g)
    pub base_grams: f64,
    /// Scaled and rounded quantity (g)
    pub grams: f64,
    /// Macro contribution, corrected in exact-completion mode
    pub macros: MacroVector,
}

/// Result of scaling a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledMeal {
    /// Source template name
    pub template_name: String,
    /// Factor applied to every base quantity
    pub scale_factor: f64,
    /// Resolved ingredients at scaled quantities
    pub ingredients: Vec<ScaledIngredient>,
    /// Sum of ingredient macros
    pub totals: MacroVector,
    /// Target the meal was scaled toward
    pub target: MacroVector,
    /// Exact-completion mode was applied
    pub perfect_match: bool,
    /// Ratios applied in exact-completion mode
    pub correction: Option<CorrectionRatios>,
    /// Non-fatal issues
    pub warnings: Vec<ScalingWarning>,
    /// Some ingredients could not be resolved and totals cover the rest only
    pub degraded: bool,
}

/// One entry of a batch scaling call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleRequest {
    /// Template to scale
    pub template: MealTemplate,
    /// Per-meal target
    pub target: MacroVector,
    /// Apply exact-completion mode
    #[serde(default)]
    pub is_last_meal: bool,
}

/// Round `grams` to the nearest multiple of `step`
#[must_use]
pub fn round_to_step(grams: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return grams;
    }
    ((grams / step).round() * step).max(0.0)
}

/// Macros of `grams` of an ingredient, with optional exact-completion ratios
///
/// Re-derives the numbers stored on a perfect-match meal from its quantities.
#[must_use]
pub fn ingredient_macros(
    profile: &IngredientProfile,
    grams: f64,
    correction: Option<&CorrectionRatios>,
) -> MacroVector {
    let macros = profile.macros_for(grams);
    correction.map_or(macros, |ratios| ratios.apply(macros))
}

/// Scale `template` toward `target`
///
/// With `is_last_meal` set, the realized totals are corrected macro by macro to
/// equal `target`.
pub fn scale_meal(
    template: &MealTemplate,
    target: &MacroVector,
    is_last_meal: bool,
    catalog: &impl IngredientCatalog,
    config: &MealScalingConfig,
) -> ScaledMeal {
    let mut warnings = Vec::new();

    let requested = if template.macros.calories > 0.0 {
        target.calories / template.macros.calories
    } else {
        warnings.push(ScalingWarning::ZeroCalorieTemplate);
        1.0
    };
    let scale_factor = requested.clamp(config.min_scale_factor, config.max_scale_factor);
    if (scale_factor - requested).abs() > f64::EPSILON {
        debug!(
            template = %template.name,
            requested,
            applied = scale_factor,
            "Scale factor clamped"
        );
        warnings.push(ScalingWarning::ScaleClamped {
            requested,
            applied: scale_factor,
        });
    }

    let mut degraded = false;
    let mut ingredients = Vec::with_capacity(template.ingredients.len());
    for item in &template.ingredients {
        let Some(profile) = catalog.lookup(&item.ingredient_id) else {
            warn!(
                template = %template.name,
                ingredient_id = %item.ingredient_id,
                "Ingredient missing from catalog, dropping it"
            );
            warnings.push(ScalingWarning::MissingIngredient {
                ingredient_id: item.ingredient_id.clone(),
            });
            degraded = true;
            continue;
        };

        let grams = round_to_step(item.grams * scale_factor, config.rounding_step_g);
        ingredients.push(ScaledIngredient {
            ingredient_id: item.ingredient_id.clone(),
            name: profile.name.clone(),
            base_grams: item.grams,
            grams,
            macros: profile.macros_for(grams),
        });
    }

    let mut totals: MacroVector = ingredients.iter().map(|i| &i.macros).sum();
    let mut correction = None;

    if is_last_meal {
        for m in Macro::ALL {
            if totals.get(m) <= 0.0 && target.get(m) > 0.0 {
                warnings.push(ScalingWarning::UncorrectableMacro { nutrient: m });
            }
        }
        let ratios = CorrectionRatios::between(target, &totals);
        for ingredient in &mut ingredients {
            ingredient.macros = ratios.apply(ingredient.macros);
        }
        totals = ingredients.iter().map(|i| &i.macros).sum();
        correction = Some(ratios);
    }

    debug!(
        template = %template.name,
        scale_factor,
        totals = %totals,
        perfect_match = is_last_meal,
        "Scaled meal"
    );

    ScaledMeal {
        template_name: template.name.clone(),
        scale_factor,
        ingredients,
        totals,
        target: *target,
        perfect_match: is_last_meal,
        correction,
        warnings,
        degraded,
    }
}

/// Scale many templates in parallel, preserving input order
pub fn scale_meals(
    requests: &[ScaleRequest],
    catalog: &impl IngredientCatalog,
    config: &MealScalingConfig,
) -> Vec<ScaledMeal> {
    requests
        .par_iter()
        .map(|request| {
            scale_meal(
                &request.template,
                &request.target,
                request.is_last_meal,
                catalog,
                config,
            )
        })
        .collect()
}

/// Pick the template whose scaled calories land closest to `target`
///
/// Only templates applicable to `slot` are considered. Ties go to the meal
/// with fewer warnings, then to the earlier template.
pub fn best_template_for_slot(
    templates: &[MealTemplate],
    slot: MealSlot,
    target: &MacroVector,
    catalog: &impl IngredientCatalog,
    config: &MealScalingConfig,
) -> Option<ScaledMeal> {
    templates
        .iter()
        .filter(|template| template.applies_to(slot))
        .map(|template| scale_meal(template, target, false, catalog, config))
        .fold(None, |best: Option<ScaledMeal>, candidate| match best {
            Some(current) if !ranks_before(&candidate, &current, target) => Some(current),
            _ => Some(candidate),
        })
}

fn ranks_before(candidate: &ScaledMeal, current: &ScaledMeal, target: &MacroVector) -> bool {
    let candidate_error = (candidate.totals.calories - target.calories).abs();
    let current_error = (current.totals.calories - target.calories).abs();
    match candidate_error.total_cmp(&current_error) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => candidate.warnings.len() < current.warnings.len(),
    }
}
