use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkloadStats {
    operations: usize,
    transitions: usize,
    no_ops: usize,
    clear_alls: usize,
    dirty_at_end: usize,
}

impl WorkloadStats {
    pub fn new() -> Self {
        WorkloadStats {
            operations: 0,
            transitions: 0,
            no_ops: 0,
            clear_alls: 0,
            dirty_at_end: 0,
        }
    }

    /// Record a single-field operation that flipped the field's state
    pub fn bump_transitions(&mut self) {
        self.operations += 1;
        self.transitions += 1;
    }

    /// Record a single-field operation that left the field as it was
    pub fn bump_no_ops(&mut self) {
        self.operations += 1;
        self.no_ops += 1;
    }

    pub fn bump_clear_alls(&mut self) {
        self.operations += 1;
        self.clear_alls += 1;
    }

    pub fn record_dirty_at_end(&mut self, dirty: usize) {
        self.dirty_at_end = dirty;
    }

    pub fn get_operations(&self) -> usize {
        self.operations
    }

    pub fn get_transitions(&self) -> usize {
        self.transitions
    }

    pub fn get_no_ops(&self) -> usize {
        self.no_ops
    }

    pub fn get_clear_alls(&self) -> usize {
        self.clear_alls
    }

    pub fn get_dirty_at_end(&self) -> usize {
        self.dirty_at_end
    }

    /// Sums counters of two runs. `dirty_at_end` keeps the later run's value.
    pub fn merge(&self, other: &WorkloadStats) -> WorkloadStats {
        WorkloadStats {
            operations: self.operations + other.operations,
            transitions: self.transitions + other.transitions,
            no_ops: self.no_ops + other.no_ops,
            clear_alls: self.clear_alls + other.clear_alls,
            dirty_at_end: other.dirty_at_end,
        }
    }
}

impl Default for WorkloadStats {
    fn default() -> Self {
        WorkloadStats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = WorkloadStats::new();
        assert_eq!(stats.get_operations(), 0);
        assert_eq!(stats.get_transitions(), 0);
        assert_eq!(stats.get_no_ops(), 0);
        assert_eq!(stats.get_clear_alls(), 0);
        assert_eq!(stats.get_dirty_at_end(), 0);
        assert_eq!(WorkloadStats::default(), stats);
    }

    #[test]
    fn test_every_bump_counts_an_operation() {
        let mut stats = WorkloadStats::new();
        stats.bump_transitions();
        stats.bump_transitions();
        stats.bump_no_ops();
        stats.bump_clear_alls();

        assert_eq!(stats.get_operations(), 4);
        assert_eq!(stats.get_transitions(), 2);
        assert_eq!(stats.get_no_ops(), 1);
        assert_eq!(stats.get_clear_alls(), 1);
    }

    #[test]
    fn test_merge_sums_counters() {
        let mut a = WorkloadStats::new();
        a.bump_transitions();
        a.bump_no_ops();
        a.record_dirty_at_end(3);

        let mut b = WorkloadStats::new();
        b.bump_clear_alls();
        b.bump_transitions();
        b.record_dirty_at_end(1);

        let merged = a.merge(&b);
        assert_eq!(merged.get_operations(), 4);
        assert_eq!(merged.get_transitions(), 2);
        assert_eq!(merged.get_no_ops(), 1);
        assert_eq!(merged.get_clear_alls(), 1);
        assert_eq!(merged.get_dirty_at_end(), 1);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut stats = WorkloadStats::new();
        stats.bump_transitions();
        stats.record_dirty_at_end(1);
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"operations":1,"transitions":1,"no_ops":0,"clear_alls":0,"dirty_at_end":1}"#
        );
    }
}
