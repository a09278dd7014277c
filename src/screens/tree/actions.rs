use ratatui::layout::Position;
use tui_input::InputRequest;

use super::types::{MenuState, RenameDialog, TreeScreen};
use crate::menu::{ContextMenu, ContextMenuAction};

impl TreeScreen {
    pub fn create_root(&mut self) {
        let id = self.store.create_root();
        self.sync_with_store();
        self.select_node(&id);
        self.last_action = "Created new root node".to_string();
    }

    /// The new child always gets a generated name; nothing here takes a name.
    pub fn add_child(&mut self, node_id: &str) {
        match self.store.add_child(node_id) {
            Some(child_id) => {
                self.sync_with_store();
                let name = self
                    .store
                    .find(&child_id)
                    .map(|found| found.node.name.clone())
                    .unwrap_or_default();
                self.last_action = format!("Added '{name}'");
            }
            None => self.last_action = "Node no longer exists".to_string(),
        }
    }

    pub fn delete_node(&mut self, node_id: &str) {
        let name = self.store.find(node_id).map(|found| found.node.name.clone());
        if self.store.delete_node(node_id) {
            self.last_action = format!("Deleted '{}'", name.unwrap_or_default());
        }
        self.hide_context_menu(node_id);
        self.sync_with_store();
    }

    pub fn open_rename_dialog(&mut self, node_id: &str) {
        if self.store.contains(node_id) {
            self.rename_dialog = Some(RenameDialog::new(node_id.to_string()));
        }
    }

    /// Apply the prompt's value. An empty value leaves the name as it was.
    pub fn confirm_rename(&mut self) {
        if let Some(dialog) = self.rename_dialog.take() {
            let new_name = dialog.input.value().to_string();
            if self.store.rename(&dialog.node_id, &new_name) {
                self.last_action = format!("Renamed to '{new_name}'");
            } else if new_name.is_empty() {
                self.last_action = "Rename cancelled, empty name".to_string();
            }
            self.sync_with_store();
        }
    }

    pub fn cancel_rename(&mut self) {
        if self.rename_dialog.take().is_some() {
            self.last_action = "Rename cancelled".to_string();
        }
    }

    pub fn edit_rename_input(&mut self, request: InputRequest) {
        if let Some(dialog) = self.rename_dialog.as_mut() {
            dialog.input.handle(request);
        }
    }

    /// Secondary activation on a row: show that node's menu at `anchor`.
    pub fn open_context_menu(&mut self, node_id: &str, anchor: Position) {
        if !self.store.contains(node_id) {
            return;
        }
        let state = self.view_states.entry(node_id.to_string()).or_default();
        state.menu = MenuState::Visible(ContextMenu::new(anchor));
        self.focused_menu = Some(node_id.to_string());
    }

    pub fn hide_context_menu(&mut self, node_id: &str) {
        if let Some(state) = self.view_states.get_mut(node_id) {
            state.menu = MenuState::Hidden;
        }
        if self.focused_menu.as_deref() == Some(node_id) {
            self.focused_menu = None;
        }
    }

    /// Hide every visible menu. Runs on each primary click.
    pub fn dismiss_context_menus(&mut self) {
        for state in self.view_states.values_mut() {
            state.menu = MenuState::Hidden;
        }
        self.focused_menu = None;
    }

    pub fn perform_menu_action(&mut self, node_id: &str, action: ContextMenuAction) {
        log::debug!("Context menu {action:?} on {node_id}");
        match action {
            ContextMenuAction::AddChild => self.add_child(node_id),
            ContextMenuAction::Rename => self.open_rename_dialog(node_id),
            ContextMenuAction::Delete => self.delete_node(node_id),
        }
    }

    /// Menus in drawing order; the focused one comes last so it is on top.
    pub fn visible_menus(&self) -> Vec<(String, ContextMenu)> {
        let mut menus: Vec<(String, ContextMenu)> = self
            .rows
            .iter()
            .filter_map(|row| match self.menu_state(&row.id) {
                MenuState::Visible(menu) => Some((row.id.clone(), menu)),
                MenuState::Hidden => None,
            })
            .collect();

        if let Some(focused) = self.focused_menu.as_deref() {
            if let Some(index) = menus.iter().position(|(id, _)| id == focused) {
                let entry = menus.remove(index);
                menus.push(entry);
            }
        }
        menus
    }

    pub fn focused_menu_mut(&mut self) -> Option<&mut ContextMenu> {
        let focused = self.focused_menu.as_deref()?;
        match self.view_states.get_mut(focused).map(|state| &mut state.menu) {
            Some(MenuState::Visible(menu)) => Some(menu),
            _ => None,
        }
    }

    /// Drop view state of removed nodes and refresh the rows. A node created
    /// later with fresh state starts expanded with its menu hidden.
    fn sync_with_store(&mut self) {
        let store = &self.store;
        self.view_states.retain(|id, _| store.contains(id));
        if let Some(focused) = self.focused_menu.as_deref() {
            if !self.store.contains(focused) {
                self.focused_menu = None;
            }
        }

        let selected = self.selected_node_id();
        self.rebuild_rows();
        if let Some(selected) = selected {
            self.select_node(&selected);
        }
        self.update_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, TreeStore};

    fn screen() -> TreeScreen {
        let root = Node::root("r".to_string(), "Root Node");
        TreeScreen::new(TreeStore::new(vec![root]), false)
    }

    fn child_names(screen: &TreeScreen, id: &str) -> Vec<String> {
        screen
            .store
            .find(id)
            .unwrap()
            .node
            .children
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    #[test]
    fn test_menu_starts_hidden_and_opens_on_request() {
        let mut screen = screen();
        assert!(!screen.is_menu_visible("r"));
        screen.open_context_menu("r", Position::new(3, 3));
        assert!(screen.is_menu_visible("r"));
        assert_eq!(screen.focused_menu.as_deref(), Some("r"));
    }

    #[test]
    fn test_dismiss_hides_all_menus() {
        let mut screen = screen();
        screen.add_child("r");
        let child = screen.rows[1].id.clone();
        screen.open_context_menu("r", Position::new(3, 3));
        screen.open_context_menu(&child, Position::new(3, 4));
        assert_eq!(screen.visible_menus().len(), 2);
        assert_eq!(screen.visible_menus().last().unwrap().0, child);

        screen.dismiss_context_menus();
        assert!(!screen.has_visible_menu());
        assert!(screen.focused_menu.is_none());
    }

    #[test]
    fn test_menu_add_child_twice() {
        let mut screen = screen();
        screen.perform_menu_action("r", ContextMenuAction::AddChild);
        screen.perform_menu_action("r", ContextMenuAction::AddChild);
        assert_eq!(child_names(&screen, "r"), vec!["New Child 1", "New Child 2"]);
        assert_eq!(screen.rows.len(), 3);
        assert_eq!(screen.last_action, "Added 'New Child 2'");
    }

    #[test]
    fn test_delete_hides_menu_and_removes_rows() {
        let mut screen = screen();
        screen.add_child("r");
        let child = screen.rows[1].id.clone();
        screen.open_context_menu(&child, Position::new(3, 4));

        screen.perform_menu_action(&child, ContextMenuAction::Delete);
        assert!(!screen.is_menu_visible(&child));
        assert!(screen.focused_menu.is_none());
        assert!(!screen.view_states.contains_key(&child));
        assert_eq!(screen.rows.len(), 1);
    }

    #[test]
    fn test_delete_last_root_empties_view() {
        let mut screen = screen();
        screen.delete_node("r");
        assert!(screen.rows.is_empty());
        assert!(screen.selected_row().is_none());
        screen.create_root();
        assert_eq!(screen.rows.len(), 1);
        assert_eq!(screen.rows[0].name, "New Root Node");
    }

    #[test]
    fn test_recreated_state_starts_expanded() {
        let mut screen = screen();
        screen.add_child("r");
        screen.toggle_expand("r");
        screen.delete_node("r");
        screen.create_root();
        let id = screen.rows[0].id.clone();
        assert!(screen.is_expanded(&id));
    }

    #[test]
    fn test_rename_confirm() {
        let mut screen = screen();
        screen.perform_menu_action("r", ContextMenuAction::Rename);
        for c in "Forest".chars() {
            screen.edit_rename_input(InputRequest::InsertChar(c));
        }
        screen.confirm_rename();
        assert!(screen.rename_dialog.is_none());
        assert_eq!(screen.rows[0].name, "Forest");
    }

    #[test]
    fn test_rename_empty_keeps_name() {
        let mut screen = screen();
        screen.add_child("r");
        let child = screen.rows[1].id.clone();
        screen.open_rename_dialog(&child);
        screen.confirm_rename();
        assert_eq!(screen.rows[1].name, "New Child 1");
    }

    #[test]
    fn test_rename_cancel_keeps_name() {
        let mut screen = screen();
        screen.open_rename_dialog("r");
        screen.edit_rename_input(InputRequest::InsertChar('x'));
        screen.cancel_rename();
        assert!(screen.rename_dialog.is_none());
        assert_eq!(screen.rows[0].name, "Root Node");
    }

    #[test]
    fn test_unknown_node_is_ignored() {
        let mut screen = screen();
        screen.open_context_menu("missing", Position::new(0, 0));
        assert!(!screen.has_visible_menu());
        screen.open_rename_dialog("missing");
        assert!(screen.rename_dialog.is_none());
        screen.add_child("missing");
        assert_eq!(screen.store.node_count(), 1);
    }
}
