//! Configuration for consistency checking.

use vacheck_table::TableLayout;

/// Settings shared by single-record and batch evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckConfig {
    /// Clear a not-to-be-asked symptom whatever its value, not only when it
    /// holds its trigger value (the InSilicoVA rule).
    pub inference_mode: bool,

    /// Worker threads for batch evaluation (at least 1).
    pub workers: usize,

    /// Expected rule table shape.
    pub layout: TableLayout,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            inference_mode: false,
            workers: 1,
            layout: TableLayout::interva5(),
        }
    }
}

impl CheckConfig {
    /// The InterVA5 check: trigger-value suppression only, one worker.
    #[must_use]
    pub fn interva5() -> Self {
        Self::default()
    }

    /// The InSilicoVA check: suppression regardless of value.
    #[must_use]
    pub fn insilico() -> Self {
        Self {
            inference_mode: true,
            ..Self::default()
        }
    }

    /// Uses every available core for batches.
    #[must_use]
    pub fn parallel() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        Self::default().with_workers(workers)
    }

    /// Builder method to set inference mode.
    #[must_use]
    pub fn with_inference_mode(mut self, inference_mode: bool) -> Self {
        self.inference_mode = inference_mode;
        self
    }

    /// Builder method to set the worker count (0 is treated as 1).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Builder method to set the table layout.
    #[must_use]
    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }
}
