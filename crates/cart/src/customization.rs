//! Per-line customizations.
//!
//! A customization is included in a line by being present in the mapping;
//! there is no "unchecked" state. Add-ons carry a per-unit surcharge,
//! removals ("no onion") are free, and free-text notes are free entries
//! carrying the note text.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::LineInputError;

/// One modifier attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    /// Display label, e.g. "Extra cheese".
    pub label: String,
    /// Amount added to the unit price for every unit of the line.
    #[serde(default)]
    pub surcharge: Decimal,
    /// Free text typed by the customer, for note entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Customization {
    /// A surcharged add-on.
    #[must_use]
    pub fn add_on(label: impl Into<String>, surcharge: Decimal) -> Self {
        Self {
            label: label.into(),
            surcharge,
            note: None,
        }
    }

    /// A free modifier, such as an ingredient removal.
    #[must_use]
    pub fn free(label: impl Into<String>) -> Self {
        Self::add_on(label, Decimal::ZERO)
    }

    /// A free-text note.
    #[must_use]
    pub fn note(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            surcharge: Decimal::ZERO,
            note: Some(text.into()),
        }
    }
}

/// Customizations of one line, keyed by customization id.
///
/// Keys are unique and iteration is always key-sorted, so insertion order
/// never leaks into equality or into [`Customizations::canonical_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customizations(BTreeMap<String, Customization>);

impl Customizations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or exclude a customization, mirroring a checkbox.
    ///
    /// Enabling inserts (or replaces) the entry; disabling removes the key.
    pub fn set(&mut self, key: impl Into<String>, customization: Customization, enabled: bool) {
        let key = key.into();
        if enabled {
            self.0.insert(key, customization);
        } else {
            self.0.remove(&key);
        }
    }

    /// Flip a customization: remove it if present, insert it otherwise.
    ///
    /// Returns whether the customization is included afterwards.
    pub fn toggle(&mut self, key: impl Into<String>, customization: Customization) -> bool {
        let key = key.into();
        if self.0.remove(&key).is_some() {
            false
        } else {
            self.0.insert(key, customization);
            true
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, customization: Customization) -> Self {
        self.0.insert(key.into(), customization);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Customization> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Customization)> {
        self.0.iter().map(|(key, c)| (key.as_str(), c))
    }

    /// Sum of all surcharges, added once per unit.
    ///
    /// Returns `None` if the sum overflows.
    #[must_use]
    pub fn surcharge_total(&self) -> Option<Decimal> {
        self.0
            .values()
            .try_fold(Decimal::ZERO, |sum, c| sum.checked_add(c.surcharge))
    }

    /// Order-independent encoding used to decide whether two lines merge.
    ///
    /// Keys are emitted sorted and surcharges normalized, so `{A, B}` and
    /// `{B, A}` encode identically and `2.0` equals `2.00`.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        let entries: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, c)| {
                let entry = json!({
                    "label": c.label,
                    "surcharge": c.surcharge.normalize().to_string(),
                    "note": c.note,
                });
                (key.clone(), entry)
            })
            .collect();
        Value::Object(entries).to_string()
    }

    pub(crate) fn validate(&self) -> Result<(), LineInputError> {
        for (key, c) in &self.0 {
            if key.trim().is_empty() {
                return Err(LineInputError::EmptyCustomizationKey);
            }
            if c.surcharge < Decimal::ZERO {
                return Err(LineInputError::NegativeSurcharge {
                    key: key.clone(),
                    surcharge: c.surcharge,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Customization)> for Customizations {
    fn from_iter<I: IntoIterator<Item = (String, Customization)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
