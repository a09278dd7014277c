use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Utility functions for common UI layouts and components
pub struct LayoutUtils;

impl LayoutUtils {
    /// Title, button row, tree, optional log panel and status bar, top to bottom
    pub fn create_main_layout(area: Rect, log_panel: bool) -> Vec<Rect> {
        let mut constraints = vec![
            Constraint::Length(1), // Title
            Constraint::Length(3), // Create New Root button
            Constraint::Min(3),    // Tree
        ];
        if log_panel {
            constraints.push(Constraint::Length(8));
        }
        constraints.push(Constraint::Length(1)); // Status bar

        Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area)
            .to_vec()
    }

    /// Left-aligned button area of `width` columns with a two column margin
    pub fn create_button_area(area: Rect, width: u16) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(2), // Left margin
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(area)[1]
    }

    pub fn create_title_paragraph(title_text: &str) -> Paragraph<'_> {
        Paragraph::new(title_text).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    }

    pub fn create_panel_block(title: String) -> Block<'static> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
    }

    /// Rectangle of the given size centred in `r`, shrunk to fit
    pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
        let width = width.min(r.width);
        let height = height.min(r.height);
        Rect {
            x: r.x + (r.width - width) / 2,
            y: r.y + (r.height - height) / 2,
            width,
            height,
        }
    }
}
