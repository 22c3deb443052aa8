//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;

/// Parallel multi-threaded executor
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: Option<rayon::ThreadPool>,
}

impl ParallelExecutor {
    /// Executor on the global rayon pool, or a dedicated pool of `threads`
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let pool = threads
            .map(|n| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| EngineError::ParallelError(e.to_string()))
            })
            .transpose()?;
        Ok(Self { pool })
    }

    /// Worker threads available to this executor
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |p| p.current_num_threads())
    }
}

impl Executor for ParallelExecutor {
    fn execute<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        // Indexed parallel iterators collect in input order
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.par_iter().map(&f).collect(),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_input_order() {
        let items: Vec<usize> = (0..1000).collect();
        let out = ParallelExecutor::new(Some(4)).unwrap().execute(&items, |x| x * 2);
        assert_eq!(out, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_dedicated_pool_size() {
        let executor = ParallelExecutor::new(Some(2)).unwrap();
        assert_eq!(executor.threads(), 2);
        assert_eq!(executor.mode(), ExecutionMode::Parallel);
    }
}
