// Sharded deduplicating candidate sink

use std::hash::BuildHasher;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use hashbrown::{DefaultHashBuilder, HashSet};
use tracing::trace;

/// Smallest and largest shard counts the sink will use.
const MIN_SHARDS: usize = 16;
const MAX_SHARDS: usize = 1024;

/// Shards allocated per worker thread.
const SHARDS_PER_WORKER: usize = 8;

/// A capped sink prunes back to `cap` entries once it holds more than
/// `cap * PRUNE_FACTOR`.
const PRUNE_FACTOR: usize = 2;

/// Storage of one shard.
#[derive(Default)]
struct Shard {
    entries: HashSet<String>,
    /// Candidates greater than this are never kept. Only set on capped sinks,
    /// and only ever lowered.
    cutoff: Option<String>,
}

/// The merged content of a sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkOutput {
    /// Distinct candidates in ascending byte order.
    pub words: Vec<String>,
    /// `true` if the cap forced some accepted candidates out.
    pub truncated: bool,
}

/// A concurrent set of accepted candidates, partitioned into shards.
///
/// A candidate always hashes to the same shard, so deduplication is exact
/// while concurrent inserters only contend when they hit the same shard.
///
/// With a cap, the sink keeps the `cap` lexicographically smallest distinct
/// candidates it was offered, and never holds much more than that: whenever
/// the total passes `2 * cap` the sink computes the `cap`-th smallest entry
/// across all shards, drops everything above it and hands that cutoff to
/// every shard, which then rejects larger candidates without storing them.
/// A cutoff is always the `cap`-th smallest of some set of offered
/// candidates, so it never excludes one of the overall `cap` smallest; the
/// result is the same whatever order the candidates arrived in.
pub struct CandidateSink {
    shards: Box<[Mutex<Shard>]>,
    hasher: DefaultHashBuilder,
    mask: usize,
    cap: Option<NonZeroUsize>,
    held: AtomicUsize,
    overflowed: AtomicBool,
    pruning: Mutex<()>,
}

impl CandidateSink {
    /// Create a sink with `shards` partitions (rounded to a power of two and
    /// clamped to a sane range) and an optional cap.
    pub fn new(shards: usize, cap: Option<NonZeroUsize>) -> Self {
        let count = shards.clamp(MIN_SHARDS, MAX_SHARDS).next_power_of_two();
        Self {
            shards: (0..count).map(|_| Mutex::new(Shard::default())).collect(),
            hasher: DefaultHashBuilder::default(),
            mask: count - 1,
            cap,
            held: AtomicUsize::new(0),
            overflowed: AtomicBool::new(false),
            pruning: Mutex::new(()),
        }
    }

    /// A sink sized for `workers` concurrent inserters.
    pub fn for_workers(workers: usize, cap: Option<NonZeroUsize>) -> Self {
        Self::new(workers.saturating_mul(SHARDS_PER_WORKER), cap)
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// The configured cap, if any.
    pub fn cap(&self) -> Option<NonZeroUsize> {
        self.cap
    }

    /// Offer a candidate. Returns `true` if it was not held before and is
    /// small enough to keep under the current cutoff.
    ///
    /// Empty strings are never stored. Rejected candidates are not copied.
    pub fn insert(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let held = {
            let mut shard = self.lock(self.shard_of(candidate));
            if let Some(cutoff) = &shard.cutoff {
                if candidate > cutoff.as_str() {
                    self.overflowed.store(true, Ordering::Relaxed);
                    return false;
                }
            }
            if shard.entries.contains(candidate) {
                return false;
            }
            shard.entries.insert(candidate.to_string());
            // Counted under the shard lock so a concurrent prune sees it.
            self.held.fetch_add(1, Ordering::Relaxed) + 1
        };
        if let Some(cap) = self.cap {
            if held > cap.get().saturating_mul(PRUNE_FACTOR) {
                self.prune(cap.get());
            }
        }
        true
    }

    /// Number of candidates currently held.
    pub fn len(&self) -> usize {
        (0..self.shards.len()).map(|i| self.lock(i).entries.len()).sum()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge all shards into one sorted list, applying the cap.
    pub fn into_sorted(self) -> SinkOutput {
        let mut truncated = self.overflowed.into_inner();
        let mut words = Vec::new();
        for shard in self.shards.into_vec() {
            let shard = shard.into_inner().unwrap_or_else(PoisonError::into_inner);
            words.extend(shard.entries);
        }
        words.sort_unstable();
        if let Some(cap) = self.cap {
            if words.len() > cap.get() {
                words.truncate(cap.get());
                truncated = true;
            }
        }
        SinkOutput { words, truncated }
    }

    /// Shrink a capped sink back to its `cap` smallest entries and publish
    /// the new cutoff to every shard.
    ///
    /// Only one thread prunes at a time; others keep inserting. The pruner
    /// takes the shard locks in index order while inserters hold at most one
    /// shard lock and never call this with it held.
    fn prune(&self, cap: usize) {
        let _pruning = match self.pruning.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        let mut shards: Vec<MutexGuard<'_, Shard>> =
            (0..self.shards.len()).map(|i| self.lock(i)).collect();

        let cutoff = {
            let mut all: Vec<&str> = shards
                .iter()
                .flat_map(|shard| shard.entries.iter().map(String::as_str))
                .collect();
            if all.len() <= cap {
                return;
            }
            let (_, nth, _) = all.select_nth_unstable(cap - 1);
            nth.to_string()
        };

        let mut removed = 0;
        for shard in &mut shards {
            let before = shard.entries.len();
            shard.entries.retain(|entry| entry.as_str() <= cutoff.as_str());
            removed += before - shard.entries.len();
            shard.cutoff = Some(cutoff.clone());
        }
        self.held.fetch_sub(removed, Ordering::Relaxed);
        if removed > 0 {
            self.overflowed.store(true, Ordering::Relaxed);
        }
        trace!(removed, cap, "pruned candidate sink");
    }

    fn shard_of(&self, candidate: &str) -> usize {
        // High bits: the shard's own table indexes by the low ones.
        ((self.hasher.hash_one(candidate) >> 48) as usize) & self.mask
    }

    fn lock(&self, index: usize) -> MutexGuard<'_, Shard> {
        self.shards[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
