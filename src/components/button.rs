use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonState {
    Normal,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonAction {
    Clicked,
    None,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub id: String,
    pub label: String,
    pub hotkey: Option<char>, // For Alt+key shortcuts
    pub state: ButtonState,
    pub area: Option<Rect>, // Set during rendering for click detection
}

impl Button {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            hotkey: None,
            state: ButtonState::Normal,
            area: None,
        }
    }

    pub fn with_hotkey(mut self, key: char) -> Self {
        self.hotkey = Some(key);
        self
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    pub fn handle_key_input(&self, key: KeyCode, modifiers: KeyModifiers) -> ButtonAction {
        if let (KeyCode::Char(c), Some(hotkey)) = (key, self.hotkey) {
            if modifiers.contains(KeyModifiers::ALT) && c.eq_ignore_ascii_case(&hotkey) {
                return ButtonAction::Clicked;
            }
        }
        ButtonAction::None
    }

    pub fn handle_mouse_click(&mut self, column: u16, row: u16) -> ButtonAction {
        if self.contains(column, row) {
            log::debug!("Button {} clicked", self.id);
            self.state = ButtonState::Pressed;
            return ButtonAction::Clicked;
        }
        ButtonAction::None
    }

    /// Hover tracking for mouse move events
    pub fn handle_mouse_move(&mut self, column: u16, row: u16) {
        if self.state == ButtonState::Pressed {
            return;
        }
        self.state = if self.contains(column, row) {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        };
    }

    /// Called on every tick so a press only flashes briefly
    pub fn release(&mut self) {
        if self.state == ButtonState::Pressed {
            self.state = ButtonState::Normal;
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        // Store area for click detection
        self.area = Some(area);

        let style = match self.state {
            ButtonState::Normal => Style::default().fg(Color::White),
            ButtonState::Hovered => Style::default().fg(Color::Yellow),
            ButtonState::Pressed => Style::default().fg(Color::Green),
        };

        let paragraph = Paragraph::new(self.create_button_text(style))
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .style(style);

        f.render_widget(paragraph, area);
    }

    fn create_button_text(&self, base_style: Style) -> Line<'_> {
        let mut spans = Vec::new();

        if let Some(hotkey) = self.hotkey {
            // Highlight the first occurrence of the hotkey in the label
            let position = self
                .label
                .char_indices()
                .find(|(_, ch)| ch.eq_ignore_ascii_case(&hotkey));

            match position {
                Some((index, ch)) => {
                    let end = index + ch.len_utf8();
                    spans.push(Span::styled(&self.label[..index], base_style));
                    spans.push(Span::styled(&self.label[index..end], base_style.fg(Color::Red)));
                    spans.push(Span::styled(&self.label[end..], base_style));
                }
                None => {
                    spans.push(Span::styled(self.label.as_str(), base_style));
                    spans.push(Span::styled(
                        format!(" (Alt+{})", hotkey.to_ascii_uppercase()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
        } else {
            spans.push(Span::styled(self.label.as_str(), base_style));
        }

        Line::from(spans)
    }
}
