use std::time::{Duration, Instant};

use hashbrown::HashSet;
use tracing::debug;

use crate::{
    fields::FieldIndex,
    storage::BuildFieldHasher,
    tracker::FieldTracker,
    workload::{Operation, WorkloadConfig, WorkloadStats, generate_seeded},
};

/// Applies `ops` to `tracker` in order.
///
/// A single-field operation counts as a transition when it changes what
/// [`FieldTracker::is_dirty`] reports for that field.
pub fn run<T: FieldTracker>(tracker: &mut T, ops: &[Operation]) -> WorkloadStats {
    let mut stats = WorkloadStats::new();
    let mut touched: HashSet<FieldIndex, BuildFieldHasher> = HashSet::default();

    for op in ops {
        match *op {
            Operation::Set(index) | Operation::Clear(index) => {
                let before = tracker.is_dirty(index);
                if matches!(op, Operation::Set(_)) {
                    tracker.mark_dirty(index);
                } else {
                    tracker.mark_clean(index);
                }
                if tracker.is_dirty(index) != before {
                    stats.bump_transitions();
                } else {
                    stats.bump_no_ops();
                }
                touched.insert(index);
            }
            Operation::ClearAll => {
                tracker.clear_all();
                touched.clear();
                stats.bump_clear_alls();
            }
        }
    }

    stats.record_dirty_at_end(count_dirty(tracker, &touched));
    stats
}

// Fields not touched since the last clear-all are clean, so only those need checking.
fn count_dirty<T: FieldTracker>(
    tracker: &T,
    touched: &HashSet<FieldIndex, BuildFieldHasher>,
) -> usize {
    touched.iter().filter(|&&i| tracker.is_dirty(i)).count()
}

/// Runs every round of `config` against a fresh tracker from `make_tracker`.
/// Round `r` uses seed `config.seed + r`.
pub fn run_rounds<T, M>(config: &WorkloadConfig, make_tracker: M) -> (WorkloadStats, Duration)
where
    T: FieldTracker,
    M: Fn() -> T,
{
    let mut combined = WorkloadStats::new();
    let mut elapsed = Duration::ZERO;

    for round in 0..config.rounds {
        let ops = generate_seeded(config, config.seed.wrapping_add(round as u64));
        let mut tracker = make_tracker();

        let start = Instant::now();
        let stats = run(&mut tracker, &ops);
        elapsed += start.elapsed();

        debug!(
            round,
            transitions = stats.get_transitions(),
            no_ops = stats.get_no_ops(),
            "round finished"
        );
        combined = combined.merge(&stats);
    }

    (combined, elapsed)
}
