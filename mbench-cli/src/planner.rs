//! Benchmark Planner
//!
//! Selects the registry entries a run measures. Filtering is a regex match
//! on the entry name; the selection keeps registration order and records
//! each entry's position so the driver can visit entries without name lookups.

/// Execution plan for benchmarks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Names of the selected entries, in registration order
    pub benchmarks: Vec<String>,
    /// Registry positions of the selected entries, parallel to `benchmarks`
    pub positions: Vec<usize>,
}

impl ExecutionPlan {
    /// Whether the entry at registry `position` is selected
    pub fn includes(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }

    /// Number of selected entries
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// Build execution plan from registered names
pub fn build_plan<'a>(
    names: impl IntoIterator<Item = &'a str>,
    filter: Option<&regex::Regex>,
) -> ExecutionPlan {
    let (positions, benchmarks) = names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| filter.is_none_or(|re| re.is_match(name)))
        .map(|(position, name)| (position, name.to_string()))
        .unzip();

    ExecutionPlan {
        benchmarks,
        positions,
    }
}
