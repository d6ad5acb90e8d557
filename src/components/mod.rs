pub mod browser;
pub mod detail_panel;
pub mod option_tabs;
pub mod reference_list;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use browser::{Browser, BrowserProps};
pub use detail_panel::{DetailPanel, DetailPanelProps};
pub use option_tabs::{OptionTabs, OptionTabsProps};
pub use reference_list::{ReferenceList, ReferenceListProps};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(226, 96, 92);

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn spinner(tick: u64) -> char {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}
