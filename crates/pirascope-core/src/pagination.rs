// ── Page-number strip ──
//
// First and last page always show; up to three pages around the current
// one fill the middle, with ellipses marking the gaps.

use std::fmt;

use serde::Serialize;

const MAX_VISIBLE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => f.write_str("..."),
        }
    }
}

/// The strip for `current` of `total` pages (both 1-based).
pub fn page_numbers(current: u32, total: u32) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= MAX_VISIBLE {
        return (1..=total).map(PageItem::Page).collect();
    }

    let (start, end) = if current <= 2 {
        (2, 4)
    } else if current >= total - 1 {
        (total - 3, total - 1)
    } else {
        (current - 1, current + 1)
    };

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}
