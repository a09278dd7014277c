use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Position;
use tui_input::InputRequest;

use super::types::TreeScreen;
use crate::menu::ContextMenuAction;

/// Width of the `[-]` toggle drawn in front of every node
pub const TOGGLE_WIDTH: u16 = 3;
pub const INDENT_WIDTH: u16 = 2;

impl TreeScreen {
    pub fn handle_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if self.rename_dialog.is_some() {
            self.handle_rename_input(key, modifiers);
            return;
        }
        if self.focused_menu.is_some() {
            self.handle_menu_input(key);
            return;
        }

        match key {
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(row) = self.selected_row() {
                    if key != KeyCode::Right || !row.is_expanded {
                        self.toggle_selected();
                    }
                }
            }
            KeyCode::Left => {
                // Collapse first, then walk up to the parent
                match self.selected_row() {
                    Some(row) if row.is_expanded && row.has_children => self.toggle_selected(),
                    Some(_) => self.move_to_parent(),
                    None => {}
                }
            }
            KeyCode::Char('m') | KeyCode::Menu => self.open_menu_on_selected(),
            KeyCode::Char('a') => {
                if let Some(id) = self.selected_node_id() {
                    self.add_child(&id);
                }
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.selected_node_id() {
                    self.open_rename_dialog(&id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_node_id() {
                    self.delete_node(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_rename_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let request = match key {
            KeyCode::Enter => {
                self.confirm_rename();
                return;
            }
            KeyCode::Esc => {
                self.cancel_rename();
                return;
            }
            KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
            KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
            KeyCode::Char(c) if !ctrl => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left if ctrl => InputRequest::GoToPrevWord,
            KeyCode::Right if ctrl => InputRequest::GoToNextWord,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };
        self.edit_rename_input(request);
    }

    fn handle_menu_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                if let Some(menu) = self.focused_menu_mut() {
                    menu.highlighted = menu.highlighted.previous();
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if let Some(menu) = self.focused_menu_mut() {
                    menu.highlighted = menu.highlighted.next();
                }
            }
            KeyCode::Enter => {
                let target = self.focused_menu.clone();
                let action = self.focused_menu_mut().map(|menu| menu.highlighted);
                if let (Some(node_id), Some(action)) = (target, action) {
                    self.perform_menu_action(&node_id, action);
                }
                self.dismiss_context_menus();
            }
            KeyCode::Esc => self.dismiss_context_menus(),
            _ => {}
        }
    }

    fn open_menu_on_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let id = row.id.clone();
        let line = (self.selected_node_index.saturating_sub(self.scroll_offset)) as u16;
        let column = self.tree_area.x + row.level as u16 * INDENT_WIDTH + TOGGLE_WIDTH;
        self.open_context_menu(&id, Position::new(column, self.tree_area.y + line));
    }

    /// Menu option under the cursor, checking the topmost menu first
    pub fn menu_action_at(&self, column: u16, row: u16) -> Option<(String, ContextMenuAction)> {
        self.visible_menus()
            .into_iter()
            .rev()
            .find(|(_, menu)| menu.contains(self.frame_area, column, row))
            .and_then(|(id, menu)| {
                menu.action_at(self.frame_area, column, row)
                    .map(|action| (id, action))
            })
    }

    /// Run a menu option if the click landed on one. Returns whether a menu
    /// consumed the click; the caller dismisses menus afterwards either way.
    pub fn click_context_menu(&mut self, column: u16, row: u16) -> bool {
        let hit = self.visible_menus().into_iter().rev().any(|(_, menu)| {
            menu.contains(self.frame_area, column, row)
        });
        if let Some((id, action)) = self.menu_action_at(column, row) {
            self.perform_menu_action(&id, action);
        }
        hit
    }

    /// Clicking outside the rename prompt cancels it
    pub fn handle_dialog_click(&mut self, column: u16, row: u16) {
        let inside = self
            .dialog_area
            .is_some_and(|area| area.contains(Position::new(column, row)));
        if !inside {
            self.cancel_rename();
        }
    }

    pub fn handle_left_click(&mut self, column: u16, row: u16) {
        let Some(index) = self.row_index_at(row) else {
            return;
        };
        if column < self.tree_area.x || column >= self.tree_area.x + self.tree_area.width {
            return;
        }

        let node = &self.rows[index];
        let toggle_start = self.tree_area.x + node.level as u16 * INDENT_WIDTH;
        let on_toggle = (toggle_start..toggle_start + TOGGLE_WIDTH).contains(&column);
        let id = node.id.clone();

        self.selected_node_index = index;
        self.update_scroll();
        if on_toggle {
            self.toggle_expand(&id);
        }
    }

    pub fn handle_right_click(&mut self, column: u16, row: u16) {
        if column < self.tree_area.x || column >= self.tree_area.x + self.tree_area.width {
            return;
        }
        if let Some(index) = self.row_index_at(row) {
            let id = self.rows[index].id.clone();
            self.selected_node_index = index;
            self.update_scroll();
            self.open_context_menu(&id, Position::new(column, row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, TreeStore};
    use ratatui::layout::Rect;

    fn screen() -> TreeScreen {
        let mut root = Node::root("r".to_string(), "Root Node");
        root.children.push(Node::child("c".to_string(), "Child"));
        let mut screen = TreeScreen::new(TreeStore::new(vec![root]), false);
        screen.frame_area = Rect::new(0, 0, 80, 24);
        screen.tree_area = Rect::new(1, 5, 78, 15);
        screen
    }

    #[test]
    fn test_right_click_opens_menu_for_row() {
        let mut screen = screen();
        screen.handle_right_click(10, 6);
        assert!(screen.is_menu_visible("c"));
        assert!(!screen.is_menu_visible("r"));
        assert_eq!(screen.selected_node_id().as_deref(), Some("c"));
    }

    #[test]
    fn test_right_click_outside_rows_does_nothing() {
        let mut screen = screen();
        screen.handle_right_click(10, 12);
        assert!(!screen.has_visible_menu());
    }

    #[test]
    fn test_click_on_menu_option_runs_it() {
        let mut screen = screen();
        screen.handle_right_click(10, 5);
        // menu opens one line below the anchor; first option sits inside the border
        assert!(screen.click_context_menu(12, 7));
        screen.dismiss_context_menus();
        assert_eq!(screen.store.node_count(), 3);
        assert!(!screen.has_visible_menu());
    }

    #[test]
    fn test_click_elsewhere_is_not_consumed() {
        let mut screen = screen();
        screen.handle_right_click(10, 5);
        assert!(!screen.click_context_menu(60, 15));
        assert_eq!(screen.store.node_count(), 2);
    }

    #[test]
    fn test_click_outside_prompt_cancels_rename() {
        let mut screen = screen();
        screen.open_rename_dialog("c");
        screen.dialog_area = Some(Rect::new(15, 9, 50, 5));
        screen.handle_dialog_click(20, 10);
        assert!(screen.rename_dialog.is_some());
        screen.handle_dialog_click(2, 2);
        assert!(screen.rename_dialog.is_none());
        assert_eq!(screen.rows[1].name, "Child");
    }

    #[test]
    fn test_click_on_toggle_collapses() {
        let mut screen = screen();
        screen.handle_left_click(2, 5);
        assert_eq!(screen.rows.len(), 1);
        screen.handle_left_click(2, 5);
        assert_eq!(screen.rows.len(), 2);
    }

    #[test]
    fn test_click_on_name_selects() {
        let mut screen = screen();
        screen.handle_left_click(12, 6);
        assert_eq!(screen.selected_node_id().as_deref(), Some("c"));
        assert_eq!(screen.rows.len(), 2);
    }

    #[test]
    fn test_keyboard_menu_flow() {
        let mut screen = screen();
        screen.handle_input(KeyCode::Char('m'), KeyModifiers::NONE);
        assert!(screen.is_menu_visible("r"));

        screen.handle_input(KeyCode::Down, KeyModifiers::NONE);
        screen.handle_input(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!screen.has_visible_menu());
        assert!(screen.rename_dialog.is_some());

        for c in "Top".chars() {
            screen.handle_input(KeyCode::Char(c), KeyModifiers::NONE);
        }
        screen.handle_input(KeyCode::Backspace, KeyModifiers::NONE);
        screen.handle_input(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(screen.rows[0].name, "To");
    }

    #[test]
    fn test_escape_closes_menu() {
        let mut screen = screen();
        screen.handle_input(KeyCode::Menu, KeyModifiers::NONE);
        screen.handle_input(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!screen.has_visible_menu());
        assert_eq!(screen.store.node_count(), 2);
    }

    #[test]
    fn test_shortcut_keys() {
        let mut screen = screen();
        screen.handle_input(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(screen.store.node_count(), 3);
        screen.handle_input(KeyCode::Down, KeyModifiers::NONE);
        screen.handle_input(KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(screen.store.find("c").is_none());
    }

    #[test]
    fn test_left_collapses_then_moves_to_parent() {
        let mut screen = screen();
        screen.handle_input(KeyCode::Down, KeyModifiers::NONE);
        screen.handle_input(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(screen.selected_node_id().as_deref(), Some("r"));
        screen.handle_input(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(screen.rows.len(), 1);
        screen.handle_input(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(screen.rows.len(), 2);
    }
}
