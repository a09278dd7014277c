use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tui_logger::TuiLoggerWidget;

use crate::components::{Button, ButtonAction};
use crate::config::TreeViewConfig;
use crate::logging;
use crate::screens::tree::TreeScreen;
use crate::statusbar::StatusBarRenderer;
use crate::tree::TreeStore;
use crate::ui_utils::LayoutUtils;

const TITLE: &str = " Treeview";
const CREATE_ROOT_LABEL: &str = "Create New Root";

pub struct App {
    tree_screen: TreeScreen,
    create_root_button: Button,
    statusbar_renderer: StatusBarRenderer,
    show_log_panel: bool,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &TreeViewConfig) -> Self {
        let store = TreeStore::with_root(&config.initial_root_name);
        Self {
            tree_screen: TreeScreen::new(store, config.ascii_icons),
            create_root_button: Button::new("create_root", CREATE_ROOT_LABEL).with_hotkey('n'),
            statusbar_renderer: StatusBarRenderer::new(),
            show_log_panel: config.show_log_panel,
            tick_rate: Duration::from_millis(config.tick_rate_ms.max(10)),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        logging::switch_to_tui_logging();

        let result = self.run_app(&mut terminal).await;

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;
        logging::switch_to_console_logging();

        result
    }

    async fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|f| self.ui(f))?;

            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_input(key.code, key.modifiers);
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.on_tick();
                last_tick = Instant::now();
            }

            if self.should_quit {
                log::info!("Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The rename prompt is modal
        if self.tree_screen.rename_dialog.is_some() {
            self.tree_screen.handle_input(key, modifiers);
            return;
        }

        if modifiers.contains(KeyModifiers::ALT) {
            if key == KeyCode::Char('x') {
                self.should_quit = true;
            } else if self.create_root_button.handle_key_input(key, modifiers)
                == ButtonAction::Clicked
            {
                self.tree_screen.create_root();
            }
            return;
        }

        if self.tree_screen.focused_menu.is_some() {
            self.tree_screen.handle_input(key, modifiers);
            return;
        }

        match key {
            KeyCode::Esc if self.tree_screen.has_visible_menu() => {
                self.tree_screen.dismiss_context_menus();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => self.tree_screen.create_root(),
            KeyCode::Char('l') => {
                self.show_log_panel = !self.show_log_panel;
            }
            _ => self.tree_screen.handle_input(key, modifiers),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.tree_screen.rename_dialog.is_some() {
                    self.tree_screen.handle_dialog_click(column, row);
                    return;
                }

                // A click on an option runs it; any primary click then closes every menu
                let consumed = self.tree_screen.click_context_menu(column, row);
                self.tree_screen.dismiss_context_menus();
                if consumed {
                    return;
                }

                if self.create_root_button.handle_mouse_click(column, row) == ButtonAction::Clicked {
                    self.tree_screen.create_root();
                } else {
                    self.tree_screen.handle_left_click(column, row);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if self.tree_screen.rename_dialog.is_none() {
                    self.tree_screen.handle_right_click(column, row);
                }
            }
            MouseEventKind::Moved => self.create_root_button.handle_mouse_move(column, row),
            MouseEventKind::ScrollUp if self.tree_screen.rename_dialog.is_none() => {
                self.tree_screen.move_up()
            }
            MouseEventKind::ScrollDown if self.tree_screen.rename_dialog.is_none() => {
                self.tree_screen.move_down()
            }
            _ => {}
        }
    }

    fn on_tick(&mut self) {
        self.create_root_button.release();
    }

    fn ui(&mut self, f: &mut Frame) {
        let chunks = LayoutUtils::create_main_layout(f.area(), self.show_log_panel);

        f.render_widget(LayoutUtils::create_title_paragraph(TITLE), chunks[0]);

        let button_width = CREATE_ROOT_LABEL.len() as u16 + 4;
        self.create_root_button
            .render(f, LayoutUtils::create_button_area(chunks[1], button_width));

        self.tree_screen.render(f, chunks[2]);

        if self.show_log_panel {
            tui_logger::move_events();
            let logger = TuiLoggerWidget::default()
                .block(
                    Block::default()
                        .title("Log")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Gray)),
                )
                .style_error(Style::default().fg(Color::Red))
                .style_warn(Style::default().fg(Color::Yellow))
                .style_info(Style::default().fg(Color::Cyan));
            f.render_widget(logger, chunks[3]);
        }

        let status_area = chunks[chunks.len() - 1];
        self.statusbar_renderer
            .set_status_message(self.tree_screen.last_action.clone());
        let selected = self.tree_screen.selected_row().map(|row| row.name.as_str());
        self.statusbar_renderer.render_status_bar(f, status_area, selected);

        self.tree_screen.render_overlays(f);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let terminal = (|| -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
    })();
    undo_on_error(terminal, || {
        // the setup error is the one worth reporting
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

/// Runs `undo` when a setup step failed, then hands the result back unchanged
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
