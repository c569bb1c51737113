//! Priority-ordered registration of pipeline participants.

/// A value tagged with a priority.
///
/// Lower priority values run first; when several participants register
/// for the same slot, the lowest value wins.
#[derive(Debug, Clone)]
pub struct Prioritized<T> {
    pub value: T,
    pub priority: i32,
}

impl<T> Prioritized<T> {
    #[inline]
    pub const fn new(value: T, priority: i32) -> Self {
        Self { value, priority }
    }
}

/// Sorts participants by ascending priority, keeping registration order for ties.
pub fn sort_by_priority<T>(items: &mut [Prioritized<T>]) {
    items.sort_by_key(|item| item.priority);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable_for_equal_priorities() {
        let mut items = vec![
            Prioritized::new("late", 500),
            Prioritized::new("first", 100),
            Prioritized::new("second", 100),
            Prioritized::new("early", 10),
        ];
        sort_by_priority(&mut items);

        let order: Vec<_> = items.iter().map(|item| item.value).collect();
        assert_eq!(order, vec!["early", "first", "second", "late"]);
    }
}
