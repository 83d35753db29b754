use ratatui::style::{Color, Modifier, Style};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone)]
pub struct Base16Palette {
    pub base_00: Color, // Background
    pub base_01: Color, // Lighter background
    pub base_02: Color, // Selection background
    pub base_03: Color, // Comments, disabled
    pub base_04: Color, // Dark foreground
    pub base_05: Color, // Default foreground
    pub base_06: Color, // Light foreground
    pub base_07: Color, // Light background
    pub base_08: Color, // Red
    pub base_0a: Color, // Yellow
    pub base_0b: Color, // Green
    pub base_0c: Color, // Cyan
    pub base_0d: Color, // Blue
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ThemeId {
    OceanicNext = 0,
    GruvboxDark = 1,
}

impl ThemeId {
    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::OceanicNext => "Oceanic Next",
            ThemeId::GruvboxDark => "Gruvbox Dark",
        }
    }

    pub fn all() -> &'static [ThemeId] {
        &[ThemeId::OceanicNext, ThemeId::GruvboxDark]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    fn from_index(idx: usize) -> Self {
        match idx {
            1 => ThemeId::GruvboxDark,
            _ => ThemeId::OceanicNext,
        }
    }
}

static CURRENT_THEME_INDEX: AtomicUsize = AtomicUsize::new(0);

pub fn current_theme_id() -> ThemeId {
    ThemeId::from_index(CURRENT_THEME_INDEX.load(Ordering::Relaxed))
}

pub fn set_theme(theme: ThemeId) {
    CURRENT_THEME_INDEX.store(theme as usize, Ordering::Relaxed);
}

pub fn current_theme() -> &'static Base16Palette {
    match current_theme_id() {
        ThemeId::OceanicNext => &OCEANIC_NEXT_PALETTE,
        ThemeId::GruvboxDark => &GRUVBOX_DARK_PALETTE,
    }
}

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

static OCEANIC_NEXT_PALETTE: LazyLock<Base16Palette> = LazyLock::new(|| Base16Palette {
    base_00: rgb(0x1B2B34),
    base_01: rgb(0x343D46),
    base_02: rgb(0x4F5B66),
    base_03: rgb(0x65737E),
    base_04: rgb(0xA7ADBA),
    base_05: rgb(0xC0C5CE),
    base_06: rgb(0xCDD3DE),
    base_07: rgb(0xF0F4F8),
    base_08: rgb(0xEC5F67),
    base_0a: rgb(0xFAC863),
    base_0b: rgb(0x99C794),
    base_0c: rgb(0x5FB3B3),
    base_0d: rgb(0x6699CC),
});

static GRUVBOX_DARK_PALETTE: LazyLock<Base16Palette> = LazyLock::new(|| Base16Palette {
    base_00: rgb(0x282828),
    base_01: rgb(0x3C3836),
    base_02: rgb(0x504945),
    base_03: rgb(0x665C54),
    base_04: rgb(0xBDAE93),
    base_05: rgb(0xD5C4A1),
    base_06: rgb(0xEBDBB2),
    base_07: rgb(0xFBF1C7),
    base_08: rgb(0xFB4934),
    base_0a: rgb(0xFABD2F),
    base_0b: rgb(0xB8BB26),
    base_0c: rgb(0x8EC07C),
    base_0d: rgb(0x83A598),
});

impl Base16Palette {
    /// Style for a page-number button; the current page gets the selection
    /// background and bold text.
    pub fn number_style(&self, is_current: bool) -> Style {
        if is_current {
            Style::default()
                .fg(self.base_07)
                .bg(self.base_02)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.base_05)
        }
    }

    /// Style for first/prev/next/last controls.
    pub fn nav_style(&self, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(self.base_03)
        } else {
            Style::default()
                .fg(self.base_0c)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn hud_style(&self) -> Style {
        Style::default()
            .fg(self.base_06)
            .bg(self.base_02)
            .add_modifier(Modifier::BOLD)
    }
}
