/// Contiguous range of page numbers to render as clickable number buttons.
///
/// Invariants (for any input accepted by [`page_window`]):
/// `1 <= start <= end <= total_pages` and
/// `end - start + 1 == min(button_count, total_pages)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, page: u32) -> bool {
        self.start <= page && page <= self.end
    }

    /// Iterate the page numbers in the window, in order.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Compute the window of page numbers to display around `current_page`.
///
/// Two candidate windows are built independently: a forward one anchored at
/// `current_page - back` and a backward one anchored at
/// `current_page + fwd`, each clamped into `[1, total_pages]`. The
/// bounding box of the two honors both boundary clamps at once: near the low
/// boundary the window starts at 1 and extends forward, near the high
/// boundary it ends at `total_pages` and extends backward, and mid-range the
/// two candidates coincide on the centered window.
///
/// Pure and deterministic. `current_page` is expected to be within
/// `[1, total_pages]`; out-of-range values are clamped first so the result
/// always satisfies the window invariants.
pub fn page_window(current_page: u32, total_pages: u32, button_count: u32) -> PageWindow {
    let total_pages = total_pages.max(1);
    let button_count = button_count.max(1);
    let current_page = current_page.clamp(1, total_pages);

    // Split the buttons around the current page: `back` slots behind it,
    // the rest (minus the current page itself) ahead, so the unclamped
    // window is exactly button_count wide.
    let back = button_count / 2;
    let fwd = button_count - 1 - back;

    let start1 = current_page.saturating_sub(back).max(1);
    let end1 = start1.saturating_add(button_count - 1).min(total_pages);

    let end2 = current_page.saturating_add(fwd).min(total_pages);
    let start2 = end2.saturating_add(1).saturating_sub(button_count).max(1);

    PageWindow {
        start: start1.min(start2),
        end: end1.max(end2),
    }
}
