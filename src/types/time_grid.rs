use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of school days in a week (Monday=1 .. Friday=5)
pub const DAYS_PER_WEEK: u8 = 5;

/// One teaching period within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPeriod {
    /// Position within the day, 1-based
    pub ordem: u8,
    /// Start time as "HH:MM"
    pub start: String,
    /// End time as "HH:MM"
    pub end: String,
}

impl GridPeriod {
    pub fn new(ordem: u8, start: &str, end: &str) -> Self {
        Self {
            ordem,
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// The weekly time grid for one (school, shift): day -> ordered periods.
///
/// Invariant: within a day, periods have strictly non-overlapping
/// `[start, end)` intervals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub days: BTreeMap<u8, Vec<GridPeriod>>,
}

impl TimeGrid {
    pub fn is_empty(&self) -> bool {
        self.days.values().all(|p| p.is_empty())
    }

    /// Whether `(day, ordem)` is an addressable slot of this grid
    pub fn contains(&self, day: u8, ordem: u8) -> bool {
        self.days
            .get(&day)
            .map(|periods| periods.iter().any(|p| p.ordem == ordem))
            .unwrap_or(false)
    }

    /// All `(day, ordem)` slots in ascending (day, ordem) order
    pub fn slots(&self) -> Vec<(u8, u8)> {
        let mut out = Vec::new();
        for (day, periods) in &self.days {
            let mut ordens: Vec<u8> = periods.iter().map(|p| p.ordem).collect();
            ordens.sort_unstable();
            for ordem in ordens {
                out.push((*day, ordem));
            }
        }
        out
    }

    /// Highest period ordem across all days, if any
    pub fn max_ordem(&self) -> Option<u8> {
        self.days
            .values()
            .flat_map(|periods| periods.iter().map(|p| p.ordem))
            .max()
    }

    /// Pairs of overlapping periods within `day`, as `(ordem_a, ordem_b)`.
    ///
    /// Comparison is lexicographic on the "HH:MM" strings, which orders
    /// correctly for zero-padded 24h times.
    pub fn overlaps_on_day(&self, day: u8) -> Vec<(u8, u8)> {
        let mut found = Vec::new();
        let Some(periods) = self.days.get(&day) else {
            return found;
        };

        let mut sorted: Vec<&GridPeriod> = periods.iter().collect();
        sorted.sort_by(|a, b| a.start.cmp(&b.start).then(a.ordem.cmp(&b.ordem)));

        for pair in sorted.windows(2) {
            if pair[1].start < pair[0].end {
                found.push((pair[0].ordem, pair[1].ordem));
            }
        }
        found
    }

    /// Human-readable day name, 1-based
    pub fn day_name(day: u8) -> &'static str {
        match day {
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            _ => "Unknown",
        }
    }
}
