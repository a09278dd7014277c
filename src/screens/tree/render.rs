use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::input::INDENT_WIDTH;
use super::types::{TreeScreen, VisibleRow};
use crate::ui_utils::LayoutUtils;

const RENAME_PROMPT: &str = "Enter a new name:";

impl TreeScreen {
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.frame_area = f.area();
        self.render_tree_view(f, area);
    }

    /// Open menus and the rename prompt, drawn last over the whole frame
    pub fn render_overlays(&mut self, f: &mut Frame) {
        for (_, menu) in self.visible_menus() {
            menu.render(f, self.frame_area);
        }
        self.render_rename_dialog(f);
    }

    fn render_tree_view(&mut self, f: &mut Frame, area: Rect) {
        let title = format!(
            "Tree ({} roots, {} nodes)",
            self.store.root_count(),
            self.store.node_count()
        );
        let block = LayoutUtils::create_panel_block(title);
        self.tree_area = block.inner(area);
        self.update_scroll();

        let visible_height = self.tree_area.height as usize;
        let start_idx = self.scroll_offset.min(self.rows.len());
        let end_idx = (start_idx + visible_height).min(self.rows.len());

        let items: Vec<ListItem> = self.rows[start_idx..end_idx]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_selected = start_idx + i == self.selected_node_index;
                let is_menu_open = self.is_menu_visible(&row.id);

                let style = if is_selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_menu_open {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };

                ListItem::new(self.row_line(row)).style(style)
            })
            .collect();

        let list = if items.is_empty() {
            List::new(vec![ListItem::new(Span::styled(
                "No nodes. Press n or click Create New Root.",
                Style::default().fg(Color::DarkGray),
            ))])
        } else {
            List::new(items)
        };

        f.render_widget(list.block(block), area);
    }

    fn row_line(&self, row: &VisibleRow) -> Line<'static> {
        let indent = " ".repeat(row.level * INDENT_WIDTH as usize);
        let toggle = if row.is_expanded { "[-]" } else { "[+]" };
        let (icon, icon_style) = match (row.is_root_node, self.ascii_icons) {
            (true, false) => ("🌲", Style::default().fg(Color::Green)),
            (false, false) => ("📁", Style::default().fg(Color::Yellow)),
            (true, true) => ("[R]", Style::default().fg(Color::Green)),
            (false, true) => ("[F]", Style::default().fg(Color::Yellow)),
        };

        Line::from(vec![
            Span::raw(indent),
            Span::styled(toggle, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(icon, icon_style),
            Span::raw(" "),
            Span::raw(row.name.clone()),
        ])
    }

    fn render_rename_dialog(&mut self, f: &mut Frame) {
        let Some(dialog) = self.rename_dialog.as_ref() else {
            self.dialog_area = None;
            return;
        };

        let area = LayoutUtils::centered_rect(50, 5, self.frame_area);
        self.dialog_area = Some(area);

        let block = Block::default()
            .title("Rename")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(area);

        f.render_widget(Clear, area);
        f.render_widget(block, area);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let prompt_area = Rect { height: 1, ..inner };
        f.render_widget(
            Paragraph::new(RENAME_PROMPT).style(Style::default().fg(Color::White)),
            prompt_area,
        );

        if inner.height < 2 {
            return;
        }
        let input_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        let width = input_area.width.max(1) as usize;
        let scroll = dialog.input.visual_scroll(width - 1);
        let input = Paragraph::new(dialog.input.value())
            .style(Style::default().fg(Color::Black).bg(Color::Gray))
            .scroll((0, scroll as u16));
        f.render_widget(input, input_area);

        let cursor = dialog.input.visual_cursor().saturating_sub(scroll) as u16;
        f.set_cursor_position(Position::new(input_area.x + cursor, input_area.y));

        if inner.height >= 3 {
            let hint_area = Rect {
                y: inner.y + 2,
                height: 1,
                ..inner
            };
            f.render_widget(
                Paragraph::new("Enter to confirm, Esc to cancel")
                    .style(Style::default().fg(Color::DarkGray)),
                hint_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, TreeStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(screen: &mut TreeScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
                screen.render_overlays(f);
            })
            .unwrap();
        buffer_text(&terminal)
    }

    fn screen() -> TreeScreen {
        let mut root = Node::root("r".to_string(), "Root Node");
        root.children.push(Node::child("c".to_string(), "Leaf"));
        TreeScreen::new(TreeStore::new(vec![root]), true)
    }

    #[test]
    fn test_renders_rows_with_toggles_and_icons() {
        let mut screen = screen();
        let text = draw(&mut screen);
        assert!(text.contains("[-] [R] Root Node"));
        assert!(text.contains("  [-] [F] Leaf"));
        assert!(text.contains("Tree (1 roots, 2 nodes)"));
        assert_eq!(screen.tree_area, Rect::new(1, 1, 58, 14));
    }

    #[test]
    fn test_collapsed_node_shows_plus() {
        let mut screen = screen();
        screen.toggle_expand("r");
        let text = draw(&mut screen);
        assert!(text.contains("[+] [R] Root Node"));
        assert!(!text.contains("Leaf"));
    }

    #[test]
    fn test_renders_open_menu() {
        let mut screen = screen();
        draw(&mut screen);
        screen.handle_right_click(5, 1);
        let text = draw(&mut screen);
        assert!(text.contains("Add Child"));
        assert!(text.contains("Rename"));
        assert!(text.contains("Delete"));

        screen.dismiss_context_menus();
        let text = draw(&mut screen);
        assert!(!text.contains("Add Child"));
    }

    #[test]
    fn test_renders_rename_prompt() {
        let mut screen = screen();
        screen.open_rename_dialog("c");
        let text = draw(&mut screen);
        assert!(text.contains(RENAME_PROMPT));
        assert!(screen.dialog_area.is_some());
    }

    #[test]
    fn test_empty_forest_hint() {
        let mut screen = screen();
        screen.delete_node("r");
        let text = draw(&mut screen);
        assert!(text.contains("No nodes"));
    }
}
