use thiserror::Error;

use crate::query_store::PageStore;
use crate::window::{PageWindow, page_window};

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("total_pages must be at least 1")]
    NoPages,
    #[error("button_count must be at least 1")]
    NoButtons,
}

/// Immutable pager configuration. Changing `total_pages` means building a
/// new [`Pager`].
#[derive(Debug, Clone)]
pub struct PagerConfig {
    pub total_pages: u32,
    /// Target number of visible page-number buttons.
    pub button_count: u32,
    /// Clamped into `[1, total_pages]` at construction; 0 falls back to 1.
    pub initial_page: u32,
    /// When set, every successful transition mirrors the current page into
    /// the page store under this key.
    pub page_query: Option<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            total_pages: 1,
            button_count: 10,
            initial_page: 1,
            page_query: None,
        }
    }
}

/// Notification payload delivered to page-change observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page: u32,
}

/// Declarative result of a transition: everything the rendering adapter
/// needs to update the strip without reaching into pager state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub window: PageWindow,
    pub current_page: u32,
    pub first_prev_disabled: bool,
    pub next_last_disabled: bool,
}

type Observer = Box<dyn FnMut(PageChange)>;

/// Page-change state machine. Owns `current_page`, validates transition
/// requests, writes through the page store and notifies observers on every
/// successful transition.
pub struct Pager {
    config: PagerConfig,
    current_page: u32,
    store: Option<Box<dyn PageStore>>,
    observers: Vec<Observer>,
}

impl Pager {
    pub fn new(config: PagerConfig) -> Result<Self, PagerError> {
        if config.total_pages == 0 {
            return Err(PagerError::NoPages);
        }
        if config.button_count == 0 {
            return Err(PagerError::NoButtons);
        }
        let current_page = config.initial_page.clamp(1, config.total_pages);
        Ok(Self {
            config,
            current_page,
            store: None,
            observers: Vec::new(),
        })
    }

    /// Attach the persistence backend the `page_query` key is mirrored into.
    pub fn set_store(&mut self, store: Box<dyn PageStore>) {
        self.store = Some(store);
    }

    /// Register a page-change observer. Observers run synchronously, in
    /// registration order, on every successful transition.
    pub fn on_page_change(&mut self, observer: impl FnMut(PageChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.config.total_pages
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn window(&self) -> PageWindow {
        page_window(
            self.current_page,
            self.config.total_pages,
            self.config.button_count,
        )
    }

    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan {
            window: self.window(),
            current_page: self.current_page,
            first_prev_disabled: self.current_page == 1,
            next_last_disabled: self.current_page == self.config.total_pages,
        }
    }

    /// Request a transition to `target`.
    ///
    /// Invalid requests (absent/zero target, target past the last page, or
    /// target equal to the current page) are silently absorbed: no state
    /// change, no store write, no notification, `None` returned. A disabled
    /// button should prevent most of these; the guard covers stale input
    /// state and programmatic misuse.
    pub fn go_to_page(&mut self, target: u32) -> Option<RenderPlan> {
        if target == 0 || target > self.config.total_pages || target == self.current_page {
            return None;
        }

        if let Some(key) = &self.config.page_query {
            if let Some(store) = self.store.as_mut() {
                store.set(key, target);
            }
        }

        self.current_page = target;

        let change = PageChange { page: target };
        for observer in &mut self.observers {
            observer(change);
        }

        Some(self.render_plan())
    }

    pub fn first(&mut self) -> Option<RenderPlan> {
        self.go_to_page(1)
    }

    pub fn last(&mut self) -> Option<RenderPlan> {
        self.go_to_page(self.config.total_pages)
    }

    pub fn prev(&mut self) -> Option<RenderPlan> {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    pub fn next(&mut self) -> Option<RenderPlan> {
        self.go_to_page(self.current_page + 1)
    }
}

impl std::fmt::Debug for Pager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("config", &self.config)
            .field("current_page", &self.current_page)
            .field("observers", &self.observers.len())
            .finish()
    }
}
