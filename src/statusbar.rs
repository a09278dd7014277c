use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEY_HELP: &str = "n new root | m menu | a add | r rename | d delete | l logs | q quit";

pub struct StatusBarRenderer {
    pub status_message: String,
}

impl StatusBarRenderer {
    pub fn new() -> Self {
        Self {
            status_message: "Ready".to_string(),
        }
    }

    pub fn render_status_bar(&self, f: &mut Frame, area: Rect, selected: Option<&str>) {
        let selected = selected.unwrap_or("none");
        let status = Paragraph::new(Line::from(vec![
            Span::raw(format!(" {} | Selected: {selected} | ", self.status_message)),
            Span::styled(KEY_HELP, Style::default().fg(Color::Gray)),
        ]))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(status, area);
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = message;
    }
}
