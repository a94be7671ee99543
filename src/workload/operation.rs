use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Geometric};

use crate::{
    fields::{BASE_FIELDS_COUNT, FieldIndex},
    workload::WorkloadConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Set(FieldIndex),
    Clear(FieldIndex),
    ClearAll,
}

/// Produces `config.operations` operations from `config.seed`.
///
/// # Panics
///
/// Panics if `config` does not pass [`WorkloadConfig::validate`].
pub fn generate(config: &WorkloadConfig) -> Vec<Operation> {
    generate_seeded(config, config.seed)
}

pub(crate) fn generate_seeded(config: &WorkloadConfig, seed: u64) -> Vec<Operation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base_distr = Geometric::new(config.skew).expect("skew validated to be in (0, 1]");
    let mut ops = Vec::with_capacity(config.operations);

    for i in 0..config.operations {
        if config.clear_all_every > 0 && i % config.clear_all_every == config.clear_all_every - 1 {
            ops.push(Operation::ClearAll);
            continue;
        }

        let index = if rng.random_bool(config.overflow_ratio) {
            rng.random_range(BASE_FIELDS_COUNT as u16..config.max_field)
        } else {
            // wrap the geometric tail back into the base range
            (base_distr.sample(&mut rng) % BASE_FIELDS_COUNT as u64) as u16
        };
        let index = FieldIndex::new(index);

        if rng.random_bool(config.clear_probability) {
            ops.push(Operation::Clear(index));
        } else {
            ops.push(Operation::Set(index));
        }
    }

    ops
}
