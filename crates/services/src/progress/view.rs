/// Aggregated view of one category's completion, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProgress {
    pub total: usize,
    pub completed: usize,
    pub fraction: f32,
}

impl CategoryProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
