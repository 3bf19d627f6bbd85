use std::collections::HashMap;

/// Per-charge-state visibility flags. An index with no entry is visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesVisibility {
    flags: HashMap<usize, bool>,
}

impl SeriesVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.flags.get(&index).copied().unwrap_or(true)
    }

    /// Flip one index and return its new value.
    pub fn toggle(&mut self, index: usize) -> bool {
        let next = !self.is_visible(index);
        self.flags.insert(index, next);
        next
    }

    /// Set every index in `0..count` to `visible`.
    pub fn set_all(&mut self, count: usize, visible: bool) {
        for index in 0..count {
            self.flags.insert(index, visible);
        }
    }

    /// Forget every flag so all indices fall back to visible.
    pub fn reset(&mut self) {
        self.flags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_index_defaults_to_visible() {
        let vis = SeriesVisibility::new();
        assert!(vis.is_visible(0));
        assert!(vis.is_visible(99));
    }

    #[test]
    fn test_toggle_flips_and_reports() {
        let mut vis = SeriesVisibility::new();
        assert!(!vis.toggle(4));
        assert!(!vis.is_visible(4));
        assert!(vis.toggle(4));
        assert!(vis.is_visible(4));
    }

    #[test]
    fn test_set_all_then_reset() {
        let mut vis = SeriesVisibility::new();
        vis.set_all(3, false);
        assert!((0..3).all(|i| !vis.is_visible(i)));
        assert!(vis.is_visible(3));

        vis.reset();
        assert!((0..3).all(|i| vis.is_visible(i)));
    }
}
