// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon accounting: activity quantities to CO2 and reward credit.
//!
//! Everything here is a total function. Missing or non-finite inputs fall
//! back to zero instead of producing errors.

use crate::models::Activity;

/// Credits awarded per kg of CO2 saved.
pub const CREDIT_PER_KG_SAVED: f64 = 50.0;

/// Round to three decimals (grams), halves rounding toward positive infinity.
pub fn round_to_grams(value: f64) -> f64 {
    let rounded = (value * 1000.0 + 0.5).floor() / 1000.0;
    // Avoid handing out -0.0 to JSON consumers
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Converts logged quantities into CO2 and credit deltas.
#[derive(Debug, Clone, Copy)]
pub struct CarbonLedger {
    credit_per_kg: f64,
}

impl Default for CarbonLedger {
    fn default() -> Self {
        Self::new(CREDIT_PER_KG_SAVED)
    }
}

impl CarbonLedger {
    /// A negative or non-finite multiplier is treated as zero.
    pub fn new(credit_per_kg: f64) -> Self {
        Self {
            credit_per_kg: finite_or_zero(credit_per_kg).max(0.0),
        }
    }

    pub fn credit_per_kg(&self) -> f64 {
        self.credit_per_kg
    }

    /// CO2 impact of `quantity` units of `activity`, in kg, rounded to grams.
    ///
    /// Activities that save emissions carry a negative factor, so a positive
    /// quantity yields a negative result.
    pub fn calculate_co2(&self, activity: &Activity, quantity: f64) -> f64 {
        let factor = finite_or_zero(activity.emission_factor.unwrap_or(0.0));
        round_to_grams(finite_or_zero(quantity) * factor)
    }

    /// Credit earned for a CO2 delta. Emissions earn nothing; credit is never
    /// taken away.
    pub fn credit_delta_for(&self, co2: f64) -> u64 {
        let co2 = finite_or_zero(co2);
        if co2 >= 0.0 {
            return 0;
        }
        let raw = (-co2 * self.credit_per_kg + 0.5).floor();
        if raw.is_finite() && raw > 0.0 {
            raw as u64
        } else {
            0
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
