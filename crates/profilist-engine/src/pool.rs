// Fixed-size scoped worker pool over an index space

use std::panic;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Number of workers to use when the caller asks for "automatic" (0).
pub(crate) fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// What a pool run left behind.
pub(crate) struct Drained<S> {
    /// One state per worker.
    pub states: Vec<S>,
    /// Every index was claimed and worked, stop flag or not.
    pub complete: bool,
}

/// Run `work` once for every index in `0..len`, spread over `workers`
/// threads.
///
/// Workers pull the next unclaimed index from a shared cursor, so uneven
/// per-index cost balances itself. Each worker owns a private state built by
/// `init`; the states are returned (one per worker) for the caller to merge.
/// Once `stop` is set, workers finish the index they are on and exit; the
/// run is then incomplete only if some index was never claimed.
///
/// A panic in any worker is propagated to the caller.
pub(crate) fn run_indexed<S, I, F>(
    workers: usize,
    len: usize,
    stop: &AtomicBool,
    init: I,
    work: F,
) -> Drained<S>
where
    S: Send,
    I: Fn() -> S + Sync,
    F: Fn(&mut S, usize) + Sync,
{
    let workers = workers.clamp(1, len.max(1));
    let cursor = AtomicUsize::new(0);

    let drain = |state: &mut S| {
        while !stop.load(Ordering::Relaxed) {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            if index >= len {
                break;
            }
            work(state, index);
        }
    };

    let states = if workers == 1 {
        let mut state = init();
        drain(&mut state);
        vec![state]
    } else {
        run_scoped(workers, &init, &drain)
    };
    Drained {
        states,
        complete: cursor.load(Ordering::Relaxed) >= len,
    }
}

fn run_scoped<S, I, D>(workers: usize, init: &I, drain: &D) -> Vec<S>
where
    S: Send,
    I: Fn() -> S + Sync,
    D: Fn(&mut S) + Sync,
{
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut state = init();
                    drain(&mut state);
                    state
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_index_visited_once() {
        let stop = AtomicBool::new(false);
        let drained = run_indexed(4, 1000, &stop, Vec::new, |seen: &mut Vec<usize>, i| {
            seen.push(i);
        });
        assert!(drained.complete);
        assert!(drained.states.len() <= 4);
        let mut all: Vec<usize> = drained.states.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn empty_index_space_runs_no_work() {
        let stop = AtomicBool::new(false);
        let drained = run_indexed(8, 0, &stop, || 0usize, |count, _| *count += 1);
        assert_eq!(drained.states, vec![0]);
        assert!(drained.complete);
    }

    #[test]
    fn stop_flag_prevents_work() {
        let stop = AtomicBool::new(true);
        let drained = run_indexed(3, 50, &stop, || 0usize, |count, _| *count += 1);
        assert_eq!(drained.states.iter().sum::<usize>(), 0);
        assert!(!drained.complete);
    }

    #[test]
    fn stop_set_mid_run_halts_remaining_indices() {
        let stop = AtomicBool::new(false);
        let drained = run_indexed(1, 100, &stop, || 0usize, |count, i| {
            *count += 1;
            if i == 9 {
                stop.store(true, Ordering::Relaxed);
            }
        });
        assert_eq!(drained.states, vec![10]);
        assert!(!drained.complete);
    }

    #[test]
    fn stop_set_on_last_index_still_completes() {
        let stop = AtomicBool::new(false);
        let drained = run_indexed(1, 100, &stop, || 0usize, |count, i| {
            *count += 1;
            if i == 99 {
                stop.store(true, Ordering::Relaxed);
            }
        });
        assert_eq!(drained.states, vec![100]);
        assert!(drained.complete);
    }

    #[test]
    fn stop_after_all_work_with_many_workers_still_completes() {
        let stop = AtomicBool::new(false);
        let visited = AtomicUsize::new(0);
        let drained = run_indexed(4, 64, &stop, || (), |_, _| {
            if visited.fetch_add(1, Ordering::Relaxed) + 1 == 64 {
                stop.store(true, Ordering::Relaxed);
            }
        });
        assert_eq!(visited.load(Ordering::Relaxed), 64);
        assert!(drained.complete);
    }

    #[test]
    fn auto_workers_is_positive() {
        assert!(resolve_workers(0) >= 1);
        assert_eq!(resolve_workers(3), 3);
    }
}
