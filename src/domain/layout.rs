use serde::Deserialize;

/// Grid geometry, in terminal cells.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: u16,
    pub card_height: u16,
    pub gap: u16,
    pub horizontal_padding: u16,
    pub vertical_padding: u16,
    /// Used until the rendered header has been measured.
    pub header_estimate: u16,
    /// Used until the rendered footer has been measured.
    pub footer_estimate: u16,
    pub min_cards_per_page: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: 12,
            card_height: 5,
            gap: 1,
            horizontal_padding: 2,
            vertical_padding: 2,
            header_estimate: 3,
            footer_estimate: 3,
            min_cards_per_page: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// Heights of the rows above and below the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub header: u16,
    pub footer: u16,
}

impl Chrome {
    pub fn estimated(config: &LayoutConfig) -> Self {
        Self {
            header: config.header_estimate,
            footer: config.footer_estimate,
        }
    }
}

pub fn columns(viewport: Viewport, config: &LayoutConfig) -> usize {
    let available = viewport.width.saturating_sub(config.horizontal_padding);
    fit(available, config.card_width, config.gap)
}

pub fn rows(viewport: Viewport, chrome: Chrome, config: &LayoutConfig) -> usize {
    let available = viewport
        .height
        .saturating_sub(chrome.header)
        .saturating_sub(chrome.footer)
        .saturating_sub(config.vertical_padding);
    fit(available, config.card_height, config.gap)
}

/// Number of cards that fit the viewport, never below the configured minimum.
pub fn cards_per_page(viewport: Viewport, chrome: Chrome, config: &LayoutConfig) -> usize {
    let fitted = rows(viewport, chrome, config) * columns(viewport, config);
    fitted.max(config.min_cards_per_page).max(1)
}

// floor((available + gap) / (size + gap))
fn fit(available: u16, size: u16, gap: u16) -> usize {
    let step = usize::from(size) + usize::from(gap);
    if step == 0 {
        return 0;
    }
    (usize::from(available) + usize::from(gap)) / step
}
