use std::collections::HashMap;

use ratatui::layout::Rect;
use tui_input::Input;

use crate::menu::ContextMenu;
use crate::tree::TreeStore;

/// Visibility of one node's context menu
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Hidden,
    Visible(ContextMenu),
}

/// View state owned by a single node's row. Lives as long as the node does.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeViewState {
    pub is_expanded: bool,
    pub menu: MenuState,
}

impl Default for NodeViewState {
    fn default() -> Self {
        Self {
            is_expanded: true,
            menu: MenuState::Hidden,
        }
    }
}

/// One line of the rendered tree
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub id: String,
    pub name: String,
    pub level: usize,
    pub is_root_node: bool,
    pub is_expanded: bool,
    pub has_children: bool,
}

/// Modal prompt collecting a new name for `node_id`
#[derive(Debug, Clone)]
pub struct RenameDialog {
    pub node_id: String,
    pub input: Input,
}

impl RenameDialog {
    pub fn new(node_id: String) -> Self {
        Self {
            node_id,
            input: Input::default(),
        }
    }
}

pub struct TreeScreen {
    pub store: TreeStore,
    pub view_states: HashMap<String, NodeViewState>,

    // Flattened rows and selection
    pub rows: Vec<VisibleRow>,
    pub selected_node_index: usize,
    pub scroll_offset: usize,

    // Node whose visible menu receives keyboard input
    pub focused_menu: Option<String>,
    pub rename_dialog: Option<RenameDialog>,

    pub ascii_icons: bool,
    pub last_action: String,

    // Areas from the last render, used for mouse hit testing
    pub tree_area: Rect,
    pub frame_area: Rect,
    pub dialog_area: Option<Rect>,
}

impl TreeScreen {
    pub fn new(store: TreeStore, ascii_icons: bool) -> Self {
        let mut screen = Self {
            store,
            view_states: HashMap::new(),
            rows: Vec::new(),
            selected_node_index: 0,
            scroll_offset: 0,
            focused_menu: None,
            rename_dialog: None,
            ascii_icons,
            last_action: "Ready".to_string(),
            tree_area: Rect::default(),
            frame_area: Rect::default(),
            dialog_area: None,
        };
        screen.rebuild_rows();
        screen
    }

    pub fn selected_row(&self) -> Option<&VisibleRow> {
        self.rows.get(self.selected_node_index)
    }

    pub fn selected_node_id(&self) -> Option<String> {
        self.selected_row().map(|row| row.id.clone())
    }

    pub fn is_expanded(&self, node_id: &str) -> bool {
        self.view_states
            .get(node_id)
            .is_none_or(|state| state.is_expanded)
    }

    pub fn menu_state(&self, node_id: &str) -> MenuState {
        self.view_states
            .get(node_id)
            .map(|state| state.menu.clone())
            .unwrap_or_default()
    }

    pub fn is_menu_visible(&self, node_id: &str) -> bool {
        matches!(self.menu_state(node_id), MenuState::Visible(_))
    }

    pub fn has_visible_menu(&self) -> bool {
        self.view_states
            .values()
            .any(|state| matches!(state.menu, MenuState::Visible(_)))
    }
}
