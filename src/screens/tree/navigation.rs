use super::types::{TreeScreen, VisibleRow};
use crate::tree::Node;

const PAGE_SIZE: usize = 10;

impl TreeScreen {
    /// Recompute the flattened rows from the current forest. Children of
    /// collapsed nodes are skipped.
    pub fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        for root in self.store.forest() {
            self.flatten_node(root, 0, &mut rows);
        }
        self.rows = rows;

        if self.selected_node_index >= self.rows.len() {
            self.selected_node_index = self.rows.len().saturating_sub(1);
        }
    }

    fn flatten_node(&self, node: &Node, level: usize, rows: &mut Vec<VisibleRow>) {
        let is_expanded = self.is_expanded(&node.id);
        rows.push(VisibleRow {
            id: node.id.clone(),
            name: node.name.clone(),
            level,
            is_root_node: node.is_root_node,
            is_expanded,
            has_children: node.has_children(),
        });

        if is_expanded {
            for child in &node.children {
                self.flatten_node(child, level + 1, rows);
            }
        }
    }

    pub fn toggle_expand(&mut self, node_id: &str) {
        let state = self.view_states.entry(node_id.to_string()).or_default();
        state.is_expanded = !state.is_expanded;
        log::debug!(
            "{} {node_id}",
            if state.is_expanded { "Expanded" } else { "Collapsed" }
        );

        // Keep the toggled node selected even though rows below it moved
        let selected = self.selected_node_id();
        self.rebuild_rows();
        if let Some(selected) = selected {
            if !self.select_node(&selected) {
                self.select_node(node_id);
            }
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_node_id() {
            self.toggle_expand(&id);
        }
    }

    /// Select the row showing `node_id`. Returns false when it is not visible.
    pub fn select_node(&mut self, node_id: &str) -> bool {
        match self.rows.iter().position(|row| row.id == node_id) {
            Some(index) => {
                self.selected_node_index = index;
                self.update_scroll();
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_node_index > 0 {
            self.selected_node_index -= 1;
            self.update_scroll();
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_node_index < self.rows.len().saturating_sub(1) {
            self.selected_node_index += 1;
            self.update_scroll();
        }
    }

    pub fn page_up(&mut self) {
        self.selected_node_index = self.selected_node_index.saturating_sub(PAGE_SIZE);
        self.update_scroll();
    }

    pub fn page_down(&mut self) {
        self.selected_node_index =
            (self.selected_node_index + PAGE_SIZE).min(self.rows.len().saturating_sub(1));
        self.update_scroll();
    }

    pub fn move_home(&mut self) {
        self.selected_node_index = 0;
        self.scroll_offset = 0;
    }

    pub fn move_end(&mut self) {
        self.selected_node_index = self.rows.len().saturating_sub(1);
        self.update_scroll();
    }

    pub fn move_to_parent(&mut self) {
        if let Some(current_level) = self.selected_row().map(|row| row.level) {
            // Parent is the closest row above with a smaller level
            if let Some(index) = (0..self.selected_node_index)
                .rev()
                .find(|i| self.rows[*i].level < current_level)
            {
                self.selected_node_index = index;
                self.update_scroll();
            }
        }
    }

    pub fn visible_height(&self) -> usize {
        // Before the first render there is no area yet
        if self.tree_area.height == 0 {
            20
        } else {
            self.tree_area.height as usize
        }
    }

    pub fn update_scroll(&mut self) {
        let visible_height = self.visible_height();
        if self.selected_node_index < self.scroll_offset {
            self.scroll_offset = self.selected_node_index;
        } else if self.selected_node_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_node_index + 1 - visible_height;
        }
        let max_offset = self.rows.len().saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Index into `rows` shown at terminal line `y`, if any
    pub fn row_index_at(&self, y: u16) -> Option<usize> {
        if y < self.tree_area.y || y >= self.tree_area.y + self.tree_area.height {
            return None;
        }
        let index = (y - self.tree_area.y) as usize + self.scroll_offset;
        (index < self.rows.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::TreeScreen;
    use crate::tree::{Node, TreeStore};

    fn screen() -> TreeScreen {
        let mut root = Node::root("r".to_string(), "Root Node");
        let mut a = Node::child("a".to_string(), "A");
        a.children.push(Node::child("a1".to_string(), "A1"));
        root.children.push(a);
        root.children.push(Node::child("b".to_string(), "B"));
        TreeScreen::new(
            TreeStore::new(vec![root, Node::root("s".to_string(), "Second")]),
            false,
        )
    }

    fn ids(screen: &TreeScreen) -> Vec<&str> {
        screen.rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_rows_are_preorder_and_expanded_by_default() {
        let screen = screen();
        assert_eq!(ids(&screen), vec!["r", "a", "a1", "b", "s"]);
        let levels: Vec<usize> = screen.rows.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 1, 2, 1, 0]);
        assert!(screen.rows.iter().all(|r| r.is_expanded));
        assert!(screen.rows[0].is_root_node);
        assert!(!screen.rows[1].is_root_node);
    }

    #[test]
    fn test_collapse_hides_descendants_and_expand_restores_them() {
        let mut screen = screen();
        screen.toggle_expand("r");
        assert_eq!(ids(&screen), vec!["r", "s"]);
        assert!(!screen.rows[0].is_expanded);

        screen.toggle_expand("r");
        assert_eq!(ids(&screen), vec!["r", "a", "a1", "b", "s"]);
    }

    #[test]
    fn test_nested_collapse_survives_parent_toggle() {
        let mut screen = screen();
        screen.toggle_expand("a");
        screen.toggle_expand("r");
        screen.toggle_expand("r");
        assert_eq!(ids(&screen), vec!["r", "a", "b", "s"]);
    }

    #[test]
    fn test_selection_follows_toggled_node() {
        let mut screen = screen();
        screen.select_node("a1");
        screen.toggle_expand("r");
        assert_eq!(screen.selected_node_id().as_deref(), Some("r"));
    }

    #[test]
    fn test_keyboard_moves() {
        let mut screen = screen();
        screen.move_up();
        assert_eq!(screen.selected_node_index, 0);
        screen.move_end();
        assert_eq!(screen.selected_node_id().as_deref(), Some("s"));
        screen.move_down();
        assert_eq!(screen.selected_node_id().as_deref(), Some("s"));
        screen.page_up();
        assert_eq!(screen.selected_node_index, 0);
        screen.page_down();
        assert_eq!(screen.selected_node_index, 4);
        screen.move_home();
        assert_eq!(screen.selected_node_index, 0);
    }

    #[test]
    fn test_move_to_parent() {
        let mut screen = screen();
        screen.select_node("a1");
        screen.move_to_parent();
        assert_eq!(screen.selected_node_id().as_deref(), Some("a"));
        screen.move_to_parent();
        assert_eq!(screen.selected_node_id().as_deref(), Some("r"));
        screen.move_to_parent();
        assert_eq!(screen.selected_node_id().as_deref(), Some("r"));
    }

    #[test]
    fn test_row_index_at_respects_scroll() {
        let mut screen = screen();
        screen.tree_area = ratatui::layout::Rect::new(1, 4, 30, 2);
        assert_eq!(screen.row_index_at(3), None);
        assert_eq!(screen.row_index_at(4), Some(0));
        screen.select_node("a1");
        assert_eq!(screen.scroll_offset, 1);
        assert_eq!(screen.row_index_at(4), Some(1));
        assert_eq!(screen.row_index_at(6), None);
    }
}
