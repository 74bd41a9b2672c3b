//! The algorithm registry: wire key → algorithm.
//!
//! A registry is built once at startup and shared (`Arc`) by every session.
//! It is an ordinary value rather than a global, so tests can register fakes
//! under any key.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::algorithms::{
    AlgorithmId, BubbleSort, CountingSort, HeapSort, InsertionSort, MergeSort, QuickSort,
    RadixSort, SelectionSort, ShellSort, SortAlgorithm,
};

/// Maps algorithm keys (`"bubbleSort"`, ...) to implementations.
#[derive(Default, Clone)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Arc<dyn SortAlgorithm>>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding all nine built-in algorithms.
    ///
    /// `max_counting_range` bounds the count buffer of counting sort.
    pub fn standard(max_counting_range: u64) -> Self {
        let mut registry = Self::new();
        for id in AlgorithmId::ALL {
            let algorithm: Arc<dyn SortAlgorithm> = match id {
                AlgorithmId::BubbleSort => Arc::new(BubbleSort),
                AlgorithmId::QuickSort => Arc::new(QuickSort),
                AlgorithmId::MergeSort => Arc::new(MergeSort),
                AlgorithmId::InsertionSort => Arc::new(InsertionSort),
                AlgorithmId::SelectionSort => Arc::new(SelectionSort),
                AlgorithmId::HeapSort => Arc::new(HeapSort),
                AlgorithmId::ShellSort => Arc::new(ShellSort),
                AlgorithmId::CountingSort => Arc::new(CountingSort::new(max_counting_range)),
                AlgorithmId::RadixSort => Arc::new(RadixSort),
            };
            registry.register(id.as_str(), algorithm);
        }
        registry
    }

    /// Registers `algorithm` under `key`, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<String>, algorithm: Arc<dyn SortAlgorithm>) {
        let key = key.into();
        if self.algorithms.insert(key.clone(), algorithm).is_some() {
            debug!("replaced sorting algorithm '{key}'");
        }
    }

    /// Looks up an algorithm by its wire key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn SortAlgorithm>> {
        self.algorithms.get(key).cloned()
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.algorithms.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
