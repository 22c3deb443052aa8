//! Execution strategies for document batches
//!
//! Documents are independent, so an executor only decides where each one
//! runs. Results always come back in input order.

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One document after another on the calling thread
    #[default]
    Sequential,
    /// Documents spread over a rayon pool
    Parallel,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Apply `f` to every item, returning results in input order
    fn execute<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}
