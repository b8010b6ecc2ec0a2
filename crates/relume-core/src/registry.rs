//! Ordered registry of regions and their brightness levels.
//!
//! Regions are identified by their position in creation order; deleting a
//! region shifts the positions above it down by one. Brightness travels
//! with its rectangle in a single record, so the two can never drift apart.

use crate::models::{clamp_brightness, Rect, RoiId, RoiRecord, BRIGHTNESS_MIN};

#[derive(Debug, Clone, Default)]
pub struct RoiRegistry {
    records: Vec<RoiRecord>,
    next_id: u64,
}

impl RoiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a region with brightness 0 and return its id.
    ///
    /// The all-zero rect is the "selection cancelled" sentinel; it is not
    /// recorded and `None` is returned.
    pub fn add(&mut self, rect: Rect) -> Option<RoiId> {
        if rect.is_cancelled() {
            return None;
        }
        let id = RoiId(self.next_id);
        self.next_id += 1;
        self.records.push(RoiRecord {
            id,
            rect,
            brightness: 0,
        });
        Some(id)
    }

    /// Remove the regions at `indices`, highest index first so the
    /// remaining removals are unaffected by the shift.
    ///
    /// Duplicate and out-of-range indices are ignored.
    pub fn remove_indices(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < self.records.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            self.records.remove(index);
        }
    }

    /// Set the brightness level for the region at `index`, clamped to the
    /// valid range. Unknown indices are ignored.
    pub fn set_brightness(&mut self, index: usize, level: i32) {
        if let Some(record) = self.records.get_mut(index) {
            record.brightness = clamp_brightness(level);
        }
    }

    /// Darken the region at `index` as far as the level range allows.
    pub fn blacken(&mut self, index: usize) {
        self.set_brightness(index, BRIGHTNESS_MIN);
    }

    pub fn get(&self, index: usize) -> Option<&RoiRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoiRecord> {
        self.records.iter()
    }

    /// List row for the region at `index`, 1-based for display, e.g.
    /// `"ROI 1: (10, 10, 50, 50) (Brightness: 0)"`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.records.get(index).map(|record| {
            format!(
                "ROI {}: ({}, {}, {}, {}) (Brightness: {})",
                index + 1,
                record.rect.x,
                record.rect.y,
                record.rect.width,
                record.rect.height,
                record.brightness
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BRIGHTNESS_MAX;

    fn rect(x: u32) -> Rect {
        Rect::new(x, 10, 50, 50)
    }

    // ========================================================================
    // Add Tests
    // ========================================================================

    #[test]
    fn test_add_assigns_zero_brightness() {
        let mut registry = RoiRegistry::new();
        registry.add(rect(10)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().brightness, 0);
        assert_eq!(registry.get(0).unwrap().rect, rect(10));
    }

    #[test]
    fn test_add_rejects_cancel_sentinel() {
        let mut registry = RoiRegistry::new();
        assert!(registry.add(Rect::new(0, 0, 0, 0)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut registry = RoiRegistry::new();
        let a = registry.add(rect(0)).unwrap();
        let b = registry.add(rect(1)).unwrap();
        let c = registry.add(rect(2)).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);

        registry.remove_indices(&[0]);
        // Remaining records keep the ids they were created with
        assert_eq!(registry.get(0).unwrap().id, b);
        assert_eq!(registry.get(1).unwrap().id, c);
    }

    // ========================================================================
    // Removal Tests
    // ========================================================================

    #[test]
    fn test_delete_shifts_indices_down() {
        // Registry [A,B,C] with brightness {0:10, 1:20, 2:30}; deleting
        // index 1 must yield [A,C] with brightness {0:10, 1:30}
        let mut registry = RoiRegistry::new();
        registry.add(rect(0)).unwrap();
        registry.add(rect(1)).unwrap();
        registry.add(rect(2)).unwrap();
        registry.set_brightness(0, 10);
        registry.set_brightness(1, 20);
        registry.set_brightness(2, 30);

        registry.remove_indices(&[1]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().rect, rect(0));
        assert_eq!(registry.get(0).unwrap().brightness, 10);
        assert_eq!(registry.get(1).unwrap().rect, rect(2));
        assert_eq!(registry.get(1).unwrap().brightness, 30);
    }

    #[test]
    fn test_remove_multiple_in_any_order() {
        let mut registry = RoiRegistry::new();
        for x in 0..4 {
            registry.add(rect(x)).unwrap();
        }

        // Unsorted input must not corrupt positions during removal
        registry.remove_indices(&[2, 0]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).unwrap().rect, rect(1));
        assert_eq!(registry.get(1).unwrap().rect, rect(3));
    }

    #[test]
    fn test_remove_ignores_out_of_range_and_duplicates() {
        let mut registry = RoiRegistry::new();
        registry.add(rect(0)).unwrap();
        registry.add(rect(1)).unwrap();

        registry.remove_indices(&[1, 1, 7]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).unwrap().rect, rect(0));
    }

    #[test]
    fn test_brightness_exists_for_exactly_the_valid_indices() {
        let mut registry = RoiRegistry::new();
        for x in 0..5 {
            registry.add(rect(x)).unwrap();
            registry.set_brightness(x as usize, x as i32 * 10);
        }
        registry.remove_indices(&[4, 1]);
        registry.add(rect(9)).unwrap();

        for index in 0..registry.len() {
            assert!(registry.get(index).is_some(), "missing record {}", index);
            assert!(registry.label(index).is_some(), "missing label {}", index);
        }
        assert!(registry.get(registry.len()).is_none());
    }

    // ========================================================================
    // Brightness Tests
    // ========================================================================

    #[test]
    fn test_set_brightness_clamps() {
        let mut registry = RoiRegistry::new();
        registry.add(rect(0)).unwrap();

        registry.set_brightness(0, 150);
        assert_eq!(registry.get(0).unwrap().brightness, BRIGHTNESS_MAX);

        registry.set_brightness(0, -150);
        assert_eq!(registry.get(0).unwrap().brightness, BRIGHTNESS_MIN);
    }

    #[test]
    fn test_set_brightness_unknown_index_is_ignored() {
        let mut registry = RoiRegistry::new();
        registry.add(rect(0)).unwrap();
        registry.set_brightness(3, 50);
        assert_eq!(registry.get(0).unwrap().brightness, 0);
    }

    #[test]
    fn test_blacken_equals_min_level() {
        let mut registry = RoiRegistry::new();
        registry.add(rect(0)).unwrap();
        registry.set_brightness(0, 40);

        registry.blacken(0);
        assert_eq!(registry.get(0).unwrap().brightness, BRIGHTNESS_MIN);
    }

    // ========================================================================
    // Label Tests
    // ========================================================================

    #[test]
    fn test_label_format() {
        let mut registry = RoiRegistry::new();
        registry.add(Rect::new(10, 10, 50, 50)).unwrap();

        assert_eq!(
            registry.label(0).unwrap(),
            "ROI 1: (10, 10, 50, 50) (Brightness: 0)"
        );

        registry.set_brightness(0, -100);
        assert_eq!(
            registry.label(0).unwrap(),
            "ROI 1: (10, 10, 50, 50) (Brightness: -100)"
        );
        assert!(registry.label(1).is_none());
    }
}
