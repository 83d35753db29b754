use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::event_source::EventSource;
use crate::pager::{PageChange, Pager, PagerConfig};
use crate::query_store::PageStore;
use crate::theme::current_theme;
use crate::widget::{PagerStrip, StripAction};

const ITEMS_PER_PAGE: usize = 8;

/// Demo item browser: a generated item list split into pages, navigated
/// through the pagination strip.
pub struct App {
    pager: Pager,
    strip: PagerStrip,
    items: Vec<String>,
    changes: Rc<RefCell<Vec<PageChange>>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: PagerConfig) -> Result<Self> {
        let items = (1..=config.total_pages as usize * ITEMS_PER_PAGE)
            .map(|n| format!("Item {n}"))
            .collect();

        let mut pager = Pager::new(config)?;
        let changes: Rc<RefCell<Vec<PageChange>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        pager.on_page_change(move |change| {
            info!("page changed to {}", change.page);
            sink.borrow_mut().push(change);
        });

        Ok(Self {
            pager,
            strip: PagerStrip::new(),
            items,
            changes,
            should_quit: false,
        })
    }

    pub fn with_store(config: PagerConfig, store: Box<dyn PageStore>) -> Result<Self> {
        let mut app = Self::new(config)?;
        app.pager.set_store(store);
        Ok(app)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Pages delivered to the observer interface so far.
    pub fn page_changes(&self) -> Vec<u32> {
        self.changes.borrow().iter().map(|c| c.page).collect()
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => {
                if let Some(action) = self.strip.handle_mouse(*mouse) {
                    self.apply(action);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Digit keys jump straight to that page; out-of-range requests
            // are absorbed by the pager.
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.apply(StripAction::Number(c.to_digit(10).unwrap_or(0)));
            }
            _ => {
                if let Some(action) = self.strip.handle_key(key) {
                    self.apply(action);
                }
            }
        }
    }

    fn apply(&mut self, action: StripAction) {
        let plan = match action {
            StripAction::Number(page) => self.pager.go_to_page(page),
            StripAction::First => self.pager.first(),
            StripAction::Prev => self.pager.prev(),
            StripAction::Next => self.pager.next(),
            StripAction::Last => self.pager.last(),
        };
        if let Some(plan) = plan {
            debug!(
                "window now [{}, {}], current {}",
                plan.window.start, plan.window.end, plan.current_page
            );
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let palette = current_theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.draw_items(f, chunks[0]);

        let plan = self.pager.render_plan();
        self.strip.render(f, chunks[1], &plan, palette);

        self.draw_status(f, chunks[2]);
    }

    fn draw_items(&self, f: &mut Frame, area: Rect) {
        let palette = current_theme();
        let page = self.pager.current_page() as usize;
        let start = (page - 1) * ITEMS_PER_PAGE;
        let end = (start + ITEMS_PER_PAGE).min(self.items.len());

        let items: Vec<ListItem> = self.items[start..end]
            .iter()
            .map(|item| ListItem::new(Line::from(item.clone())))
            .collect();

        let title = format!(
            " Page {}/{} ",
            self.pager.current_page(),
            self.pager.total_pages()
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.base_04)),
            )
            .style(Style::default().fg(palette.base_05));
        f.render_widget(list, area);
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let palette = current_theme();
        let mut spans = Vec::new();
        if let Some(change) = self.changes.borrow().last() {
            spans.push(Span::styled(
                format!(" page {} ", change.page),
                palette.hud_style(),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            "h/l: prev/next | g/G: first/last | 1-9: jump | click strip | q: quit",
            Style::default().fg(palette.base_03),
        ));
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event_source.poll(tick_rate)? {
            let event = event_source.read()?;
            app.handle_event(&event);
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(total: u32, initial: u32) -> App {
        App::new(PagerConfig {
            total_pages: total,
            button_count: 10,
            initial_page: initial,
            page_query: None,
        })
        .unwrap()
    }

    #[test]
    fn digit_key_jumps_to_page() {
        let mut a = app(20, 1);
        a.handle_event(&crate::event_source::SimulatedEventSource::char_key('7'));
        assert_eq!(a.pager().current_page(), 7);
        assert_eq!(a.page_changes(), vec![7]);
    }

    #[test]
    fn out_of_range_digit_is_absorbed() {
        let mut a = app(5, 1);
        a.handle_event(&crate::event_source::SimulatedEventSource::char_key('9'));
        assert_eq!(a.pager().current_page(), 1);
        assert!(a.page_changes().is_empty());
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut a = app(5, 1);
        a.handle_event(&crate::event_source::SimulatedEventSource::char_key('q'));
        assert!(a.should_quit());
    }

    #[test]
    fn navigation_keys_move_the_page() {
        let mut a = app(20, 1);
        let press = crate::event_source::SimulatedEventSource::char_key;

        a.handle_event(&press('l'));
        a.handle_event(&press('l'));
        assert_eq!(a.pager().current_page(), 3);

        a.handle_event(&press('h'));
        assert_eq!(a.pager().current_page(), 2);

        a.handle_event(&press('G'));
        assert_eq!(a.pager().current_page(), 20);

        a.handle_event(&press('g'));
        assert_eq!(a.pager().current_page(), 1);

        assert_eq!(a.page_changes(), vec![2, 3, 2, 20, 1]);
    }
}
