use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

const MENU_WIDTH: u16 = 16;
const MENU_HEIGHT: u16 = ContextMenuAction::ALL.len() as u16 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuAction {
    AddChild,
    Rename,
    Delete,
}

impl ContextMenuAction {
    pub const ALL: [ContextMenuAction; 3] = [
        ContextMenuAction::AddChild,
        ContextMenuAction::Rename,
        ContextMenuAction::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContextMenuAction::AddChild => "Add Child",
            ContextMenuAction::Rename => "Rename",
            ContextMenuAction::Delete => "Delete",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|a| *a == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Action menu anchored where it was opened. Only exists while visible.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub anchor: Position,
    pub highlighted: ContextMenuAction,
}

impl ContextMenu {
    pub fn new(anchor: Position) -> Self {
        Self {
            anchor,
            highlighted: ContextMenuAction::AddChild,
        }
    }

    /// Area of the popup, opened down-right of the anchor and shifted back
    /// inside `bounds` when it would overflow.
    pub fn area(&self, bounds: Rect) -> Rect {
        let width = MENU_WIDTH.min(bounds.width);
        let height = MENU_HEIGHT.min(bounds.height);
        let max_x = bounds.x + bounds.width - width;
        let max_y = bounds.y + bounds.height - height;
        Rect {
            x: self.anchor.x.clamp(bounds.x, max_x),
            y: self.anchor.y.saturating_add(1).clamp(bounds.y, max_y),
            width,
            height,
        }
    }

    pub fn action_at(&self, bounds: Rect, column: u16, row: u16) -> Option<ContextMenuAction> {
        let area = self.area(bounds);
        let inner = area.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        ContextMenuAction::ALL
            .get((row - inner.y) as usize)
            .copied()
    }

    pub fn contains(&self, bounds: Rect, column: u16, row: u16) -> bool {
        self.area(bounds).contains(Position::new(column, row))
    }

    pub fn render(&self, f: &mut Frame, bounds: Rect) {
        let area = self.area(bounds);

        let items: Vec<ListItem> = ContextMenuAction::ALL
            .iter()
            .map(|action| {
                let style = if *action == self.highlighted {
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Black)
                };
                ListItem::new(Line::from(format!(" {}", action.label()))).style(style)
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().bg(Color::White).fg(Color::Black));

        // Clear the area first so the popup covers the rows beneath
        f.render_widget(Clear, area);
        f.render_widget(menu, area);
    }
}
