// src/roster.rs
//
// Canonical shift data produced by a run.
//
// - DayShift / MonthShifts: one extracted calendar month.
// - MonthSlot: what one navigation position produced (month, revisit, gap).
// - RosterTimeline: all slots in visitation order. Only the assembler
//   appends to it; (month label, day) pairs are unique across the timeline.

use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayShift {
    /// Sequence number within the month, starting at 1.
    pub day: u32,
    pub month: String,
    pub shift: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthShifts {
    pub label: String,
    pub days: Vec<DayShift>,
}

impl MonthShifts {
    pub fn shift_count(&self) -> usize {
        self.days.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonthSlot {
    Month(MonthShifts),
    /// The page showed a month already in the timeline; its days are not
    /// emitted a second time.
    Revisit { label: String },
    /// The page never showed a valid month heading.
    Gap,
}

impl MonthSlot {
    pub fn label(&self) -> Option<&str> {
        match self {
            MonthSlot::Month(m) => Some(&m.label),
            MonthSlot::Revisit { label } => Some(label),
            MonthSlot::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, MonthSlot::Gap)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterTimeline {
    slots: Vec<MonthSlot>,
}

impl RosterTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extracted month. A label seen before becomes a `Revisit`.
    pub fn push_month(&mut self, month: MonthShifts) -> &MonthSlot {
        let slot = if self.contains_label(&month.label) {
            MonthSlot::Revisit { label: month.label }
        } else {
            MonthSlot::Month(month)
        };
        self.slots.push(slot);
        &self.slots[self.slots.len() - 1]
    }

    pub fn push_gap(&mut self) {
        self.slots.push(MonthSlot::Gap);
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.months().any(|m| m.label == label)
    }

    pub fn slots(&self) -> &[MonthSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn months(&self) -> impl Iterator<Item = &MonthShifts> {
        self.slots.iter().filter_map(|s| match s {
            MonthSlot::Month(m) => Some(m),
            _ => None,
        })
    }

    /// Every emitted day, in visitation order.
    pub fn days(&self) -> impl Iterator<Item = &DayShift> {
        self.months().flat_map(|m| m.days.iter())
    }

    /// Positions (0-based, visitation order) that ended as gaps.
    pub fn gap_positions(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_gap())
            .map(|(i, _)| i)
            .collect()
    }

    /// True when no (label, day) pair occurs twice.
    pub fn is_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.days().all(|d| seen.insert((d.month.as_str(), d.day)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(label: &str, shifts: &[&str]) -> MonthShifts {
        MonthShifts {
            label: s!(label),
            days: shifts
                .iter()
                .enumerate()
                .map(|(i, s)| DayShift { day: i as u32 + 1, month: s!(label), shift: s!(*s) })
                .collect(),
        }
    }

    #[test]
    fn revisited_label_is_not_emitted_twice() {
        let mut t = RosterTimeline::new();
        t.push_month(month("May 2024", &["A", "B"]));
        t.push_month(month("June 2024", &["C"]));
        let slot = t.push_month(month("May 2024", &["A", "B"]));
        assert_eq!(slot, &MonthSlot::Revisit { label: s!("May 2024") });

        assert_eq!(t.len(), 3);
        assert_eq!(t.months().count(), 2);
        assert_eq!(t.days().count(), 3);
        assert!(t.is_unique());
    }

    #[test]
    fn gaps_keep_their_position() {
        let mut t = RosterTimeline::new();
        t.push_month(month("May 2024", &["A"]));
        t.push_gap();
        t.push_month(month("March 2024", &["B"]));
        assert_eq!(t.gap_positions(), vec![1]);
        assert_eq!(t.slots()[1].label(), None);
        assert_eq!(t.slots()[2].label(), Some("March 2024"));
    }
}
