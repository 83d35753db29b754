use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::pager::RenderPlan;
use crate::theme::Base16Palette;
use crate::window::PageWindow;

pub const PAGE_PLACEHOLDER: &str = "%page%";

/// Label templates for the strip controls. `%page%` in the number template
/// is substituted with the page number of each button.
#[derive(Debug, Clone)]
pub struct Templates {
    pub number: String,
    pub first: String,
    pub prev: String,
    pub next: String,
    pub last: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            number: PAGE_PLACEHOLDER.to_string(),
            first: "First".to_string(),
            prev: "Prev".to_string(),
            next: "Next".to_string(),
            last: "Last".to_string(),
        }
    }
}

impl Templates {
    fn number_label(&self, page: u32) -> String {
        self.number.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

/// Input resolved against the strip. The strip never mutates the pager;
/// the embedding app feeds these into `Pager::go_to_page` and friends,
/// which silently absorb requests that are invalid for the current state
/// (e.g. a click on a disabled button).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripAction {
    Number(u32),
    First,
    Prev,
    Next,
    Last,
}

struct NumbersCache {
    window: PageWindow,
    current_page: u32,
    spans: Vec<Span<'static>>,
}

/// One-row pagination strip: `First Prev [numbers] Next Last`.
///
/// The number-button spans are cached and rebuilt only when the render plan
/// changes; the nav buttons are restyled in place from the plan's disabled
/// flags on every render. Hit regions are recorded per render so mouse
/// clicks map back to the control under the cursor.
pub struct PagerStrip {
    templates: Templates,
    numbers_cache: Option<NumbersCache>,
    rebuilds: u32,
    regions: Vec<(std::ops::Range<u16>, StripAction)>,
    last_area: Option<Rect>,
}

impl Default for PagerStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl PagerStrip {
    pub fn new() -> Self {
        Self::with_templates(Templates::default())
    }

    pub fn with_templates(templates: Templates) -> Self {
        Self {
            templates,
            numbers_cache: None,
            rebuilds: 0,
            regions: Vec::new(),
            last_area: None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, plan: &RenderPlan, palette: &Base16Palette) {
        let line = self.layout(area, plan, palette);
        f.render_widget(line, area);
    }

    /// Resolve a key press to a strip action.
    pub fn handle_key(&self, key: KeyEvent) -> Option<StripAction> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(StripAction::Prev),
            KeyCode::Right | KeyCode::Char('l') => Some(StripAction::Next),
            KeyCode::Home | KeyCode::Char('g') => Some(StripAction::First),
            KeyCode::End | KeyCode::Char('G') => Some(StripAction::Last),
            _ => None,
        }
    }

    /// Resolve a mouse event to a strip action. Clicks hit-test against the
    /// regions recorded by the last render; scrolling anywhere over the
    /// strip row pages backward/forward.
    pub fn handle_mouse(&self, event: MouseEvent) -> Option<StripAction> {
        let area = self.last_area?;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.hit_test(event.column, event.row),
            MouseEventKind::ScrollUp if self.in_area(area, event.column, event.row) => {
                Some(StripAction::Prev)
            }
            MouseEventKind::ScrollDown if self.in_area(area, event.column, event.row) => {
                Some(StripAction::Next)
            }
            _ => None,
        }
    }

    /// Map a cell coordinate to the control rendered there.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<StripAction> {
        let area = self.last_area?;
        if y != area.y || x >= area.x + area.width {
            return None;
        }
        self.regions
            .iter()
            .find(|(range, _)| range.contains(&x))
            .map(|(_, action)| *action)
    }

    fn in_area(&self, area: Rect, x: u16, y: u16) -> bool {
        y == area.y && x >= area.x && x < area.x + area.width
    }

    /// Build the strip line for the given plan and record hit regions.
    fn layout(&mut self, area: Rect, plan: &RenderPlan, palette: &Base16Palette) -> Line<'static> {
        let stale = match &self.numbers_cache {
            Some(cache) => {
                cache.window != plan.window || cache.current_page != plan.current_page
            }
            None => true,
        };
        if stale {
            self.numbers_cache = Some(NumbersCache {
                window: plan.window,
                current_page: plan.current_page,
                spans: self.build_number_spans(plan, palette),
            });
            self.rebuilds += 1;
            log::debug!(
                "number strip rebuilt for [{}, {}] (rebuild #{})",
                plan.window.start,
                plan.window.end,
                self.rebuilds
            );
        }

        let nav = |label: &str, disabled: bool| {
            Span::styled(format!(" {label} "), palette.nav_style(disabled))
        };

        let mut spans = vec![
            nav(&self.templates.first, plan.first_prev_disabled),
            nav(&self.templates.prev, plan.first_prev_disabled),
        ];
        spans.extend(
            self.numbers_cache
                .as_ref()
                .expect("cache filled above")
                .spans
                .iter()
                .cloned(),
        );
        spans.push(nav(&self.templates.next, plan.next_last_disabled));
        spans.push(nav(&self.templates.last, plan.next_last_disabled));

        self.record_regions(area, &spans, plan);
        self.last_area = Some(area);

        Line::from(spans)
    }

    fn build_number_spans(&self, plan: &RenderPlan, palette: &Base16Palette) -> Vec<Span<'static>> {
        plan.window
            .pages()
            .map(|page| {
                Span::styled(
                    format!(" {} ", self.templates.number_label(page)),
                    palette.number_style(page == plan.current_page),
                )
            })
            .collect()
    }

    fn record_regions(&mut self, area: Rect, spans: &[Span<'static>], plan: &RenderPlan) {
        let mut actions = vec![StripAction::First, StripAction::Prev];
        actions.extend(plan.window.pages().map(StripAction::Number));
        actions.push(StripAction::Next);
        actions.push(StripAction::Last);

        self.regions.clear();
        let mut col = area.x;
        let right = area.x.saturating_add(area.width);
        for (span, action) in spans.iter().zip(actions) {
            let width = span.content.as_ref().width() as u16;
            let end = col.saturating_add(width).min(right);
            if col < end {
                self.regions.push((col..end, action));
            }
            col = col.saturating_add(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::{Pager, PagerConfig};
    use crate::theme::current_theme;

    fn plan(total: u32, buttons: u32, page: u32) -> RenderPlan {
        Pager::new(PagerConfig {
            total_pages: total,
            button_count: buttons,
            initial_page: page,
            page_query: None,
        })
        .unwrap()
        .render_plan()
    }

    fn area() -> Rect {
        Rect::new(0, 0, 120, 1)
    }

    #[test]
    fn clicks_resolve_to_controls() {
        let mut strip = PagerStrip::new();
        let plan = plan(20, 10, 1);
        strip.layout(area(), &plan, current_theme());

        // " First " occupies the first 7 columns.
        assert_eq!(strip.hit_test(0, 0), Some(StripAction::First));
        assert_eq!(strip.hit_test(6, 0), Some(StripAction::First));
        // " Prev " follows.
        assert_eq!(strip.hit_test(7, 0), Some(StripAction::Prev));
        // First number button " 1 " starts at column 13.
        assert_eq!(strip.hit_test(13, 0), Some(StripAction::Number(1)));
        assert_eq!(strip.hit_test(16, 0), Some(StripAction::Number(2)));
    }

    #[test]
    fn clicks_outside_the_strip_row_miss() {
        let mut strip = PagerStrip::new();
        let plan = plan(20, 10, 1);
        strip.layout(area(), &plan, current_theme());

        assert_eq!(strip.hit_test(0, 1), None);
        assert_eq!(strip.hit_test(119, 0), None);
    }

    #[test]
    fn number_strip_rebuilds_only_when_plan_changes() {
        let mut strip = PagerStrip::new();
        let unchanged = plan(20, 10, 1);

        strip.layout(area(), &unchanged, current_theme());
        strip.layout(area(), &unchanged, current_theme());
        assert_eq!(strip.rebuilds, 1);

        let moved = plan(20, 10, 7);
        strip.layout(area(), &moved, current_theme());
        assert_eq!(strip.rebuilds, 2);
    }

    #[test]
    fn keyboard_maps_to_navigation() {
        let strip = PagerStrip::new();
        let key = |code| KeyEvent::new(code, crossterm::event::KeyModifiers::NONE);

        assert_eq!(strip.handle_key(key(KeyCode::Left)), Some(StripAction::Prev));
        assert_eq!(strip.handle_key(key(KeyCode::Char('l'))), Some(StripAction::Next));
        assert_eq!(strip.handle_key(key(KeyCode::Home)), Some(StripAction::First));
        assert_eq!(strip.handle_key(key(KeyCode::Char('G'))), Some(StripAction::Last));
        assert_eq!(strip.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn scroll_over_the_strip_pages() {
        let mut strip = PagerStrip::new();
        let plan = plan(20, 10, 5);
        strip.layout(area(), &plan, current_theme());

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(strip.handle_mouse(scroll), Some(StripAction::Next));

        let off_row = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 4,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(strip.handle_mouse(off_row), None);
    }

    #[test]
    fn custom_number_template_substitutes_page() {
        let templates = Templates {
            number: format!("p{PAGE_PLACEHOLDER}"),
            ..Default::default()
        };
        assert_eq!(templates.number_label(4), "p4");
    }

    #[test]
    fn disabled_buttons_still_hit_test() {
        // The pager absorbs the resulting no-op request; the strip does not
        // second-guess it.
        let mut strip = PagerStrip::new();
        let plan = plan(20, 10, 1);
        assert!(plan.first_prev_disabled);
        strip.layout(area(), &plan, current_theme());

        assert_eq!(strip.hit_test(1, 0), Some(StripAction::First));
    }
}
