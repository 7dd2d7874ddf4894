/// Parallel processing utilities
use crate::PhirboError;
use rayon::ThreadPool;

/// Worker count to use when none is configured.
pub fn default_threads() -> usize {
    num_cpus::get()
}

/// Resolve an optional worker count, falling back to all available cores.
pub fn resolve_threads(threads: Option<usize>) -> usize {
    threads.unwrap_or_else(default_threads)
}

pub fn validate_threads(threads: usize) -> Result<usize, PhirboError> {
    if threads == 0 {
        Err(PhirboError::InvalidParameter(
            "worker pool size must be at least 1".to_string(),
        ))
    } else {
        Ok(threads)
    }
}

/// Build a dedicated pool of exactly `threads` workers.
///
/// A local pool keeps batch runs with different sizes independent of each
/// other and of rayon's global pool.
pub fn build_pool(threads: usize) -> Result<ThreadPool, PhirboError> {
    let threads = validate_threads(threads)?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("phirbo-worker-{}", i))
        .build()
        .map_err(|e| PhirboError::WorkerFailure(format!("Failed to build thread pool: {}", e)))
}

pub fn chunk_size_for_parallelism(total_items: usize, threads: usize) -> usize {
    let threads = if threads == 0 {
        rayon::current_num_threads()
    } else {
        threads
    };

    // Aim for at least 10 items per thread, but not more than 1000 per chunk
    let ideal_chunk = total_items / (threads * 10);
    ideal_chunk.clamp(10, 1000)
}
