//! Terminal UI implementation using ratatui
//!
//! Concrete `UIRenderer` drawing a session: a tab bar of loaded sources, the
//! materialized viewport rows, a scrollbar sized from the total content height, and the
//! status line.

use crate::error::Result;
use crate::render::state::RenderFrame;
use crate::render::ui::{ColorTheme, StatusLine, UIRenderer};
use crate::render::viewport::DisplayRow;
use crate::session::Session;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// One span per source: check mark, name, source color, active highlight.
    fn tab_line(session: &Session, theme: &ColorTheme) -> Line<'static> {
        let active = session.view().active_source();
        let store = session.store();
        let mut spans = Vec::new();

        for source in store.sources().iter().chain(store.synthetic()) {
            let marker = if source.is_synthetic {
                ""
            } else if session.is_checked(&source.name) {
                "[x] "
            } else {
                "[ ] "
            };
            let style = theme.tab_style(
                source.color.into(),
                active == Some(source.name.as_str()),
            );
            spans.push(Span::styled(format!(" {marker}{} ", source.name), style));
            spans.push(Span::raw("│"));
        }
        Line::from(spans)
    }

    /// Gutter width fitting the largest line number in the window.
    fn gutter_width(rows: &[DisplayRow<'_>]) -> usize {
        rows.iter()
            .map(|row| row.line_number)
            .max()
            .map_or(1, |max| max.to_string().len())
    }

    fn row_line<'a>(row: &'a DisplayRow<'a>, gutter: usize, theme: &ColorTheme) -> Line<'a> {
        let number_style = theme
            .line_numbers
            .map_or(Style::default(), |color| Style::default().fg(color));
        Line::from(vec![
            Span::styled(format!("{:>gutter$} ", row.line_number), number_style),
            Span::styled(
                row.text.as_ref(),
                theme.row_style(row.color.map(Into::into)),
            ),
        ])
    }

    fn render_content(
        frame: &mut Frame,
        area: Rect,
        view: &RenderFrame<'_>,
        row_height: u64,
        theme: &ColorTheme,
    ) {
        if let Some(placeholder) = view.placeholder {
            let message = Paragraph::new(placeholder.message())
                .style(theme.placeholder)
                .alignment(Alignment::Center);
            let top = Rect {
                y: area.y + area.height / 3,
                height: 1.min(area.height),
                ..area
            };
            frame.render_widget(message, top);
            return;
        }

        let gutter = Self::gutter_width(&view.rows);
        for row in &view.rows {
            // Rows are placed by their absolute offset, not by materialization order
            let Some(relative) = row.top.checked_sub(view.scroll_offset) else {
                continue;
            };
            let y = relative / row_height;
            if y >= u64::from(area.height) {
                continue;
            }
            let row_area = Rect {
                y: area.y + y as u16,
                height: 1,
                width: area.width.saturating_sub(1),
                ..area
            };
            frame.render_widget(Paragraph::new(Self::row_line(row, gutter, theme)), row_area);
        }

        let mut scrollbar_state = ScrollbarState::new(view.total_height as usize)
            .position(view.scroll_offset as usize)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }

    fn render_status(
        frame: &mut Frame,
        area: Rect,
        session: &Session,
        status: &StatusLine,
        theme: &ColorTheme,
    ) {
        let fg = match &status.message {
            Some(message) if message.is_error() && status.prompt.is_none() => theme.error_text,
            _ => theme.status_fg,
        };
        let style = Style::default().bg(theme.status_bg).fg(fg);
        frame.render_widget(Paragraph::new(status.format(session)).style(style), area);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, session: &Session, status: &StatusLine) -> Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };
        let theme = &self.theme;
        let row_height = session.view().viewport().row_height();

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(frame.size());

            frame.render_widget(Paragraph::new(Self::tab_line(session, theme)), chunks[0]);
            Self::render_content(frame, chunks[1], &session.frame(), row_height, theme);
            Self::render_status(frame, chunks[2], session, status, theme);
        })?;
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.take().is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());

        let mono = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(mono.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_render_without_terminal_is_noop() {
        let mut ui = TerminalUI::new().unwrap();
        let session = Session::default();
        assert!(ui.render(&session, &StatusLine::new()).is_ok());
    }

    #[test]
    fn test_tab_line_marks_checked_and_query() {
        let mut session = Session::default();
        session.import("a.log", "error a").unwrap();
        session.import("b.log", "b").unwrap();
        session.toggle_checked("a.log");
        session.mass_search("error").unwrap();

        let line = TerminalUI::tab_line(&session, &ColorTheme::default());
        let labels: Vec<String> = line
            .spans
            .iter()
            .map(|span| span.content.to_string())
            .filter(|text| text != "│")
            .collect();
        assert_eq!(labels, [" [x] a.log ", " [ ] b.log ", " Query "]);
        assert_eq!(line.spans[0].style.fg, Some(Color::Rgb(0x4c, 0xaf, 0x50)));
    }

    #[test]
    fn test_row_line_has_right_aligned_number() {
        let mut session = Session::default();
        let text: Vec<String> = (1..=12).map(|i| format!("l{i}")).collect();
        session.import("a.log", &text.join("\n")).unwrap();

        let frame = session.frame();
        let gutter = TerminalUI::gutter_width(&frame.rows);
        assert_eq!(gutter, 2);
        let line = TerminalUI::row_line(&frame.rows[0], gutter, &ColorTheme::default());
        assert_eq!(line.spans[0].content, " 1 ");
        assert_eq!(line.spans[1].content, "l1");
    }
}
