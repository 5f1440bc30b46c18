//! Daily habit aggregation. Everything here is pure and recomputed from the
//! habit rows on every read, so the score can never drift from the store.

use crate::models::Habit;

/// A tracked habit with its fixed daily target.
#[derive(Debug, Clone, Copy)]
pub struct HabitDef {
    pub key: &'static str,
    pub name: &'static str,
    pub target: i64,
    pub unit: &'static str,
}

/// The fixed habit set shown on the Glow tab.
pub const HABIT_DEFS: [HabitDef; 4] = [
    HabitDef {
        key: "water",
        name: "Hydration",
        target: 8,
        unit: "glasses",
    },
    HabitDef {
        key: "steps",
        name: "Movement",
        target: 10000,
        unit: "steps",
    },
    HabitDef {
        key: "sleep",
        name: "Beauty Sleep",
        target: 8,
        unit: "hours",
    },
    HabitDef {
        key: "skincare",
        name: "Skincare AM/PM",
        target: 2,
        unit: "routines",
    },
];

/// Look up a habit definition by key.
pub fn habit_def(key: &str) -> Option<&'static HabitDef> {
    HABIT_DEFS.iter().find(|d| d.key == key)
}

/// The recorded value for a habit key within one day's rows (0 if unset).
pub fn value_for(rows: &[Habit], key: &str) -> i64 {
    rows.iter()
        .find(|h| h.habit_key == key)
        .map(|h| h.value)
        .unwrap_or(0)
}

/// A habit counts as complete once its value reaches the target.
pub fn is_complete(value: i64, target: i64) -> bool {
    value >= target
}

/// Progress fraction for display, clamped so overshooting the target never
/// renders past a full bar.
pub fn progress(value: i64, target: i64) -> f64 {
    if target <= 0 {
        return 1.0;
    }
    (value as f64 / target as f64).min(1.0)
}

/// Glow score for one day's rows: round(100 * completed / defined), an
/// integer in [0, 100]. A habit with no row for the day counts as incomplete.
pub fn glow_score(rows: &[Habit]) -> u8 {
    let total = HABIT_DEFS.len();
    let completed = HABIT_DEFS
        .iter()
        .filter(|def| {
            rows.iter()
                .find(|h| h.habit_key == def.key)
                .is_some_and(|h| is_complete(h.value, h.target))
        })
        .count();
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(key: &str, value: i64, target: i64) -> Habit {
        Habit {
            id: 0,
            habit_key: key.to_string(),
            value,
            target,
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn score_is_zero_with_no_rows() {
        assert_eq!(glow_score(&[]), 0);
    }

    #[test]
    fn score_is_100_iff_every_habit_hits_target() {
        let all_done = vec![
            habit("water", 8, 8),
            habit("steps", 10000, 10000),
            habit("sleep", 8, 8),
            habit("skincare", 2, 2),
        ];
        assert_eq!(glow_score(&all_done), 100);

        let one_short = vec![
            habit("water", 7, 8),
            habit("steps", 10000, 10000),
            habit("sleep", 8, 8),
            habit("skincare", 2, 2),
        ];
        assert_eq!(glow_score(&one_short), 75);
    }

    #[test]
    fn score_stays_in_bounds_on_overshoot() {
        let overshoot = vec![
            habit("water", 80, 8),
            habit("steps", 99999, 10000),
            habit("sleep", 12, 8),
            habit("skincare", 5, 2),
        ];
        assert_eq!(glow_score(&overshoot), 100);
    }

    #[test]
    fn partial_progress_does_not_count() {
        // Water at 5/8 and the other three unset: nothing is complete yet.
        let rows = vec![habit("water", 5, 8)];
        assert_eq!(glow_score(&rows), 0);
    }

    #[test]
    fn rows_outside_the_defined_set_are_ignored() {
        let rows = vec![habit("meditation", 99, 1)];
        assert_eq!(glow_score(&rows), 0);
    }

    #[test]
    fn progress_clamps_at_one() {
        assert_eq!(progress(16, 8), 1.0);
        assert_eq!(progress(8, 8), 1.0);
        assert_eq!(progress(4, 8), 0.5);
        assert_eq!(progress(0, 8), 0.0);
    }

    #[test]
    fn completion_boundary() {
        assert!(!is_complete(7, 8));
        assert!(is_complete(8, 8));
        assert!(is_complete(9, 8));
    }

    #[test]
    fn defs_cover_the_documented_set() {
        assert_eq!(habit_def("water").unwrap().target, 8);
        assert_eq!(habit_def("steps").unwrap().target, 10000);
        assert_eq!(habit_def("sleep").unwrap().target, 8);
        assert_eq!(habit_def("skincare").unwrap().target, 2);
        assert!(habit_def("unknown").is_none());
    }
}
