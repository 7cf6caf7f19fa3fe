// ABOUTME: Meal, daily log and ingredient models consumed by the meal engines
// ABOUTME: DailyLog, LoggedMeal, FoodEntry, IngredientProfile, IngredientRef and MealTemplate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::macros::MacroVector;
use super::profile::MealSlot;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A meal the user has already eaten, with its realized totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedMeal {
    /// Meal name
    pub name: String,
    /// Realized macro totals
    pub macros: MacroVector,
    /// Whether the meal was scaled in exact-completion mode
    #[serde(default)]
    pub perfect_match: bool,
}

impl LoggedMeal {
    /// Create a logged meal
    #[must_use]
    pub fn new(name: impl Into<String>, macros: MacroVector) -> Self {
        Self {
            name: name.into(),
            macros,
            perfect_match: false,
        }
    }
}

/// Ad-hoc food eaten outside the four meal slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Food name
    pub name: String,
    /// Macro totals
    pub macros: MacroVector,
}

impl FoodEntry {
    /// Create an ad-hoc food entry
    #[must_use]
    pub fn new(name: impl Into<String>, macros: MacroVector) -> Self {
        Self {
            name: name.into(),
            macros,
        }
    }
}

/// Everything logged for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Calendar date
    pub date: NaiveDate,
    /// Logged meals keyed by slot; absent slots are still open
    #[serde(default)]
    pub meals: BTreeMap<MealSlot, LoggedMeal>,
    /// Extra foods eaten outside the slots
    #[serde(default)]
    pub extra_foods: Vec<FoodEntry>,
    /// Body weight measured that day (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

impl DailyLog {
    /// Create an empty log for `date`
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: BTreeMap::new(),
            extra_foods: Vec::new(),
            weight_kg: None,
        }
    }

    /// Log a meal into `slot`, replacing any previous entry
    #[must_use]
    pub fn with_meal(mut self, slot: MealSlot, meal: LoggedMeal) -> Self {
        self.meals.insert(slot, meal);
        self
    }

    /// Add an extra food entry
    #[must_use]
    pub fn with_extra_food(mut self, food: FoodEntry) -> Self {
        self.extra_foods.push(food);
        self
    }

    /// Record the day's weight
    #[must_use]
    pub const fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Whether `slot` has a logged meal
    #[must_use]
    pub fn is_logged(&self, slot: MealSlot) -> bool {
        self.meals.contains_key(&slot)
    }

    /// Sum of extra foods
    #[must_use]
    pub fn extra_intake(&self) -> MacroVector {
        self.extra_foods.iter().map(|f| &f.macros).sum()
    }

    /// Sum of every logged meal and extra food
    #[must_use]
    pub fn total_intake(&self) -> MacroVector {
        let meals: MacroVector = self.meals.values().map(|m| &m.macros).sum();
        meals + self.extra_intake()
    }

    /// A day counts toward weekly analysis once anything has been eaten
    #[must_use]
    pub fn is_populated(&self) -> bool {
        !self.meals.is_empty() || !self.extra_foods.is_empty()
    }
}

/// Macro profile of an ingredient, per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientProfile {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Macros contained in 100 g
    pub per_100g: MacroVector,
}

impl IngredientProfile {
    /// Create a validated ingredient profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is blank or any macro is negative
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        per_100g: MacroVector,
    ) -> AppResult<Self> {
        let profile = Self {
            id: id.into(),
            name: name.into(),
            per_100g,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check a profile built without [`IngredientProfile::new`], such as one read from JSON
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is blank or any macro is negative
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::invalid_input("Ingredient id must not be empty"));
        }
        self.per_100g.validate()
    }

    /// Macros contained in `grams` of this ingredient
    #[must_use]
    pub fn macros_for(&self, grams: f64) -> MacroVector {
        self.per_100g.scale(grams / 100.0)
    }
}

/// Reference to a catalog ingredient with a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    /// Catalog identifier
    pub ingredient_id: String,
    /// Quantity (g)
    pub grams: f64,
}

impl IngredientRef {
    /// Create an ingredient reference
    #[must_use]
    pub fn new(ingredient_id: impl Into<String>, grams: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            grams,
        }
    }
}

/// Reusable recipe scaled by the meal scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTemplate {
    /// Template name
    pub name: String,
    /// Slots this template may be served in; empty means any slot
    #[serde(default)]
    pub slots: Vec<MealSlot>,
    /// Ingredients at base quantities
    pub ingredients: Vec<IngredientRef>,
    /// Cached macro sum of the ingredients at base quantities
    pub macros: MacroVector,
}

impl MealTemplate {
    /// Create a validated template
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, negative quantities or negative macros
    pub fn new(
        name: impl Into<String>,
        slots: Vec<MealSlot>,
        ingredients: Vec<IngredientRef>,
        macros: MacroVector,
    ) -> AppResult<Self> {
        let template = Self {
            name: name.into(),
            slots,
            ingredients,
            macros,
        };
        template.validate()?;
        Ok(template)
    }

    /// Check a template built without [`MealTemplate::new`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, negative quantities or negative macros
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Template name must not be empty"));
        }
        if let Some(bad) = self
            .ingredients
            .iter()
            .find(|i| !i.grams.is_finite() || i.grams < 0.0)
        {
            return Err(AppError::invalid_input(format!(
                "Ingredient {} has invalid quantity {}",
                bad.ingredient_id, bad.grams
            )));
        }
        self.macros.validate()
    }

    /// Whether the template may be served in `slot`
    #[must_use]
    pub fn applies_to(&self, slot: MealSlot) -> bool {
        self.slots.is_empty() || self.slots.contains(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_total_intake_includes_extra_foods() {
        let log = DailyLog::new(day())
            .with_meal(
                MealSlot::Second,
                LoggedMeal::new("lunch", MacroVector::new(700.0, 40.0, 80.0, 20.0).unwrap()),
            )
            .with_extra_food(FoodEntry::new(
                "apple",
                MacroVector::new(80.0, 0.5, 20.0, 0.2).unwrap(),
            ));

        let total = log.total_intake();
        assert!((total.calories - 780.0).abs() < 1e-9);
        assert!(log.is_populated());
        assert!(log.is_logged(MealSlot::Second));
        assert!(!log.is_logged(MealSlot::First));
    }

    #[test]
    fn test_empty_log_is_not_populated() {
        let log = DailyLog::new(day()).with_weight(80.0);
        assert!(!log.is_populated());
    }

    #[test]
    fn test_ingredient_macros_for_grams() {
        let oats = IngredientProfile::new(
            "oats",
            "Rolled oats",
            MacroVector::new(389.0, 16.9, 66.3, 6.9).unwrap(),
        )
        .unwrap();
        let portion = oats.macros_for(50.0);
        assert!((portion.calories - 194.5).abs() < 1e-9);
    }

    #[test]
    fn test_template_applicability() {
        let template = MealTemplate::new(
            "Oat bowl",
            vec![MealSlot::First],
            vec![IngredientRef::new("oats", 60.0)],
            MacroVector::new(233.4, 10.1, 39.8, 4.1).unwrap(),
        )
        .unwrap();
        assert!(template.applies_to(MealSlot::First));
        assert!(!template.applies_to(MealSlot::Fourth));
    }

    #[test]
    fn test_template_rejects_negative_quantity() {
        let result = MealTemplate::new(
            "Broken",
            Vec::new(),
            vec![IngredientRef::new("oats", -5.0)],
            MacroVector::ZERO,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialized_ingredient_is_validated() {
        let blank: IngredientProfile = serde_json::from_str(
            r#"{"id": " ", "name": "Mystery", "per_100g": {"calories": 100.0, "protein_g": 1.0, "carbs_g": 20.0, "fat_g": 1.0}}"#,
        )
        .unwrap();
        assert!(blank.validate().is_err());

        let negative: IngredientProfile = serde_json::from_str(
            r#"{"id": "oil", "name": "Oil", "per_100g": {"calories": 884.0, "protein_g": 0.0, "carbs_g": 0.0, "fat_g": -100.0}}"#,
        )
        .unwrap();
        assert!(negative.validate().is_err());
    }
}
