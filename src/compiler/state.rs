//! Partial-path state threaded through one compilation run.

/// Structural role of the value about to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotKind {
    /// Element of a sequence
    ArrayElement,
    /// Value of a mapping entry
    MapValue,
    /// Key of a mapping entry
    MapKey,
    /// Not inside any container (bare root value)
    #[default]
    None,
}

/// Counters describing one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalStats {
    pub enters: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

/// Accumulator, snapshot stack, depth and slot kind for one `compile` call.
///
/// `stack.len() == depth` holds after every `dive` and `rise`.
#[derive(Debug, Default)]
pub(crate) struct TraversalState {
    accumulator: String,
    stack: Vec<String>,
    depth: usize,
    slot: SlotKind,
    stats: TraversalStats,
}

impl TraversalState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn slot(&self) -> SlotKind {
        self.slot
    }

    pub(crate) fn set_slot(&mut self, slot: SlotKind) {
        self.slot = slot;
    }

    pub(crate) fn stats(&self) -> TraversalStats {
        self.stats
    }

    pub(crate) fn append(&mut self, text: &str) {
        self.accumulator.push_str(text);
    }

    /// Current partial path.
    pub(crate) fn path(&self) -> &str {
        &self.accumulator
    }

    /// Saves the accumulator and descends one level.
    pub(crate) fn dive(&mut self) {
        self.stack.push(self.accumulator.clone());
        self.depth += 1;
        self.stats.enters += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        assert_eq!(self.stack.len(), self.depth, "traversal stack out of balance");
    }

    /// Restores the accumulator saved by the matching `dive` and ascends one
    /// level. Text appended by the finished branch is dropped with it, so
    /// siblings (and empty containers) never leak into each other's paths.
    pub(crate) fn rise(&mut self) {
        self.accumulator = self
            .stack
            .pop()
            .unwrap_or_else(|| panic!("rise without matching dive at depth {}", self.depth));
        self.depth -= 1;
        self.stats.leaves += 1;
        assert_eq!(self.stack.len(), self.depth, "traversal stack out of balance");
    }

    pub(crate) fn clear(&mut self) {
        self.accumulator.clear();
        self.slot = SlotKind::None;
    }
}
