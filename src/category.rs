use serde::{Deserialize, Serialize};

/// Content partitions of the feed. Declaration order is the cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Default,
    New,
    Ask,
    Show,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Default,
        Category::New,
        Category::Ask,
        Category::Show,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Default => 0,
            Category::New => 1,
            Category::Ask => 2,
            Category::Show => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn max_pages(self) -> usize {
        match self {
            Category::Default | Category::New => 2,
            Category::Ask | Category::Show => 1,
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Default => "news",
            Category::New => "newest",
            Category::Ask => "ask",
            Category::Show => "show",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Default => "top",
            Category::New => "new",
            Category::Ask => "ask",
            Category::Show => "show",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_four_times_returns_to_start() {
        for start in Category::ALL {
            let mut current = start;
            for _ in 0..4 {
                current = current.next();
            }
            assert_eq!(current, start);
        }
    }

    #[test]
    fn previous_is_inverse_of_next() {
        for category in Category::ALL {
            assert_eq!(category.next().previous(), category);
            assert_eq!(category.previous().next(), category);
        }
    }

    #[test]
    fn ring_order_wraps_around() {
        assert_eq!(Category::Default.next(), Category::New);
        assert_eq!(Category::New.next(), Category::Ask);
        assert_eq!(Category::Ask.next(), Category::Show);
        assert_eq!(Category::Show.next(), Category::Default);
        assert_eq!(Category::Default.previous(), Category::Show);
    }

    #[test]
    fn page_policy_is_fixed_per_category() {
        assert_eq!(Category::Default.max_pages(), 2);
        assert_eq!(Category::New.max_pages(), 2);
        assert_eq!(Category::Ask.max_pages(), 1);
        assert_eq!(Category::Show.max_pages(), 1);
    }
}
