use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::code::MeasurementCode;

/// Measured values keyed by code, iterated in canonical code order.
///
/// Keys are unique. `insert` keeps the first value for a code and reports
/// whether the new value was accepted, so duplicates never overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMeasurements(BTreeMap<MeasurementCode, f64>);

impl ParsedMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value. Returns `false` when the code is already present.
    pub fn insert(&mut self, code: MeasurementCode, value: f64) -> bool {
        match self.0.entry(code) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, code: MeasurementCode) -> Option<f64> {
        self.0.get(&code).copied()
    }

    pub fn contains(&self, code: MeasurementCode) -> bool {
        self.0.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeasurementCode, f64)> + '_ {
        self.0.iter().map(|(code, value)| (*code, *value))
    }

    /// Required codes with no recorded value, in canonical order.
    pub fn missing_required(&self) -> Vec<MeasurementCode> {
        MeasurementCode::required()
            .iter()
            .copied()
            .filter(|code| !self.contains(*code))
            .collect()
    }
}

impl FromIterator<(MeasurementCode, f64)> for ParsedMeasurements {
    fn from_iter<I: IntoIterator<Item = (MeasurementCode, f64)>>(iter: I) -> Self {
        let mut measurements = Self::new();
        for (code, value) in iter {
            measurements.insert(code, value);
        }
        measurements
    }
}
