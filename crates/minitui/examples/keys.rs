// SPDX-License-Identifier: MIT
//
// minitui key viewer: shows every decoded key as it arrives.
//
// Exercises the whole pipeline: raw mode → poll_event → ScreenBuffer →
// row diff → single write(). Resize the terminal to see the full redraw.
// Ctrl-Q or Ctrl-C to quit.
//
// Usage:
//   cargo run -p minitui --example keys

use std::collections::VecDeque;

use minitui::{
    Block, Borders, Color, Constraint, Direction, Event, KeyCode, KeyEvent, List, Modifiers,
    Paragraph, RuntimeConfig, Style, TextLine, TextSpan,
};

/// Maximum number of keys kept in the scrolling log.
const MAX_LOG_ENTRIES: usize = 100;

/// Poll timeout. The idle screen is redrawn this often, which costs
/// zero bytes when nothing changed.
const POLL_MS: u64 = 250;

fn format_key(key: KeyEvent) -> String {
    let code = match key.code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => format!("'{c}'"),
        other => format!("{other:?}"),
    };
    if key.modifiers.contains(Modifiers::CTRL) {
        format!("Ctrl+{code}")
    } else {
        code
    }
}

fn main() -> minitui::Result<()> {
    let mut log: VecDeque<String> = VecDeque::with_capacity(MAX_LOG_ENTRIES);
    let mut count = 0_u64;

    minitui::run(RuntimeConfig::default(), |rt| {
        loop {
            let stats = rt.draw(|frame| {
                let rows = screen_rows(frame.area());
                let title = TextLine::new(vec![
                    TextSpan::styled(" keys ", Style::new().fg(Color::Black).bg(Color::Green)),
                    TextSpan::raw(format!(" {count} received")),
                ]);
                frame.render_widget(Paragraph::new(title), rows[0]);

                // Newest at the top.
                let list = List::new(log.iter().rev().map(String::as_str))
                    .block(Block::new().title("Log").borders(Borders::ALL));
                frame.render_widget(list, rows[1]);

                frame.render_widget(
                    Paragraph::new("Ctrl-Q to quit").style(Style::new().dim()),
                    rows[2],
                );
            })?;
            tracing::trace!(bytes = stats.bytes_written, "frame");

            let Some(Event::Key(key)) = rt.poll_event(POLL_MS)? else {
                continue;
            };
            if key.is_ctrl('q') || key.is_ctrl('c') {
                return Ok(());
            }
            count += 1;
            if log.len() >= MAX_LOG_ENTRIES {
                log.pop_front();
            }
            log.push_back(format_key(key));
        }
    })
}

fn screen_rows(area: minitui::Rect) -> Vec<minitui::Rect> {
    minitui::layout::split(
        area,
        Direction::Vertical,
        &[Constraint::length(1), Constraint::fill(1), Constraint::length(1)],
    )
}
