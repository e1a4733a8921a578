use std::fmt;

/// Displayed like count of the current event. Local to the process, never sent anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeCounter {
    count: u64,
}

impl LikeCounter {
    pub fn new(count: u64) -> Self {
        Self { count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }
}

impl fmt::Display for LikeCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_returns_and_displays_the_new_count() {
        let mut likes = LikeCounter::new(41);
        assert_eq!(likes.increment(), 42);
        assert_eq!(likes.to_string(), "42");
    }

    #[test]
    fn n_increments_add_n() {
        let mut likes = LikeCounter::new(5);
        for _ in 0..7 {
            likes.increment();
        }
        assert_eq!(likes.count(), 12);
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let mut likes = LikeCounter::new(u64::MAX);
        assert_eq!(likes.increment(), u64::MAX);
    }
}
