use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::catalog::categories;
use crate::platform::PlatformChoice;
use crate::theme::Palette;
use crate::ui::{bold, dim, italic, HORIZONTAL_MARGIN, VERTICAL_MARGIN};

const LEGEND: &str = "(↑/↓) move / (space) select / (enter) start / (p)latform / (t)heme / (q)uit";

/// Set list grouped by category, with the platform and theme line underneath
pub struct MenuView<'a> {
    app: &'a App,
    palette: Palette,
}

impl<'a> MenuView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            palette: app.theme.palette(),
        }
    }

    fn platform_line(&self) -> Line<'static> {
        let choice = match self.app.platform_choice {
            PlatformChoice::Auto => "auto",
            PlatformChoice::Mac => "mac",
            PlatformChoice::Windows => "windows",
        };
        Line::from(vec![
            Span::styled("Platform: ", bold()),
            Span::styled(self.app.platform.display_name(), bold().fg(self.palette.accent)),
            Span::styled(format!(" ({choice})"), dim()),
            Span::styled("   Theme: ", bold()),
            Span::styled(self.app.theme.to_string(), dim()),
        ])
    }

    fn set_lines(&self) -> Vec<Line<'static>> {
        let sets = &self.app.sets;
        let name_width = sets.iter().map(|s| s.name.width()).max().unwrap_or(0);
        let selected = self.app.selected_set.as_deref();

        let mut lines = Vec::new();
        for category in categories(sets) {
            lines.push(Line::from(Span::styled(
                category.to_string(),
                Style::default().fg(self.palette.heading).add_modifier(Modifier::BOLD),
            )));

            for (idx, set) in sets.iter().enumerate().filter(|(_, s)| s.category == category) {
                let under_cursor = idx == self.app.menu.cursor;
                let marker = if Some(set.id.as_str()) == selected { "●" } else { " " };
                let pad = " ".repeat(name_width.saturating_sub(set.name.width()));

                let name_style = if under_cursor {
                    bold().add_modifier(Modifier::REVERSED)
                } else {
                    bold()
                };
                let mut spans = vec![
                    Span::styled(format!("  {marker} "), Style::default().fg(self.palette.good)),
                    Span::styled(set.name.clone(), name_style),
                    Span::raw(pad),
                    Span::styled(format!("  {} shortcuts", set.size), dim()),
                ];
                if let Some(description) = &set.description {
                    spans.push(Span::styled(format!("  {description}"), italic()));
                }
                lines.push(Line::from(spans));
            }
        }
        lines
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Min(1),    // set list
                Constraint::Length(1), // platform
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled("memokeys", bold().fg(self.palette.title)))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let list = if self.app.sets.is_empty() {
            Paragraph::new(Span::styled("No shortcut sets found.", italic()))
        } else {
            Paragraph::new(self.set_lines())
        };
        list.block(Block::default().borders(Borders::ALL).title("Shortcut Sets"))
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        Paragraph::new(self.platform_line()).render(chunks[3], buf);

        Paragraph::new(Span::styled(LEGEND, italic())).render(chunks[4], buf);
    }
}
