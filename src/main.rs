// SPDX-License-Identifier: MIT
//
// minitui-demo: a small deployment dashboard built on minitui.
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ header                       │  ← 1 row
//   ├─────────────┬────────────────┤
//   │ ┌─ Apps ──┐ │ ┌─ Details ──┐ │
//   │ │ ● web   │ │ │ name: web  │ │  ← fill
//   │ └─────────┘ │ └────────────┘ │
//   ├─────────────┴────────────────┤
//   │ key hints / last key         │  ← 1 row
//   └──────────────────────────────┘
//
// ↑/↓ (or k/j) move the selection, q or Ctrl-C quits.
//
// Logging is off unless MINITUI_LOG holds a filter directive, e.g.
// `MINITUI_LOG=minitui=trace`. Output then goes to `minitui.log` in the
// current directory, never to the terminal the dashboard is drawing on.

use std::env;
use std::fs::File;
use std::process;
use std::sync::Mutex;

use minitui::{
    Block, Borders, Color, Constraint, Direction, Event, Frame, KeyCode, KeyEvent, List,
    Paragraph, RuntimeConfig, Style, TextLine, TextSpan,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MINITUI_LOG";
const LOG_FILE: &str = "minitui.log";

// ─── Model ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Deploying,
    Failed,
}

impl Status {
    const fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Deploying => "deploying",
            Self::Failed => "failed",
        }
    }

    const fn color(self) -> Color {
        match self {
            Self::Running => Color::Green,
            Self::Deploying => Color::Yellow,
            Self::Failed => Color::Red,
        }
    }
}

struct App {
    name: &'static str,
    project: &'static str,
    replicas: u8,
    status: Status,
    url: &'static str,
}

const APPS: &[App] = &[
    App {
        name: "web",
        project: "shop",
        replicas: 3,
        status: Status::Running,
        url: "https://web.shop.example.com",
    },
    App {
        name: "worker",
        project: "shop",
        replicas: 2,
        status: Status::Deploying,
        url: "https://worker.shop.example.com",
    },
    App {
        name: "api",
        project: "billing",
        replicas: 1,
        status: Status::Failed,
        url: "https://api.billing.example.com",
    },
    App {
        name: "docs",
        project: "site",
        replicas: 1,
        status: Status::Running,
        url: "https://docs.example.com",
    },
];

/// What the main loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

struct Dashboard {
    selected: usize,
    last_key: Option<KeyEvent>,
}

impl Dashboard {
    const fn new() -> Self {
        Self {
            selected: 0,
            last_key: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.last_key = Some(key);
        if key.is_ctrl('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(APPS.len() - 1);
            }
            _ => {}
        }
        Action::Continue
    }

    // ─── Painting ───────────────────────────────────────────────────────

    fn paint(&self, frame: &mut Frame<'_>) {
        let rows = minitui::layout::split(
            frame.area(),
            Direction::Vertical,
            &[Constraint::length(1), Constraint::fill(1), Constraint::length(1)],
        );
        let columns = minitui::layout::split(
            rows[1],
            Direction::Horizontal,
            &[Constraint::percentage(40), Constraint::fill(1)],
        );

        frame.render_widget(Paragraph::new(header()), rows[0]);
        frame.render_widget(self.app_list(), columns[0]);

        let details = Block::new().title("Details").borders(Borders::ALL);
        let inner = details.inner_area(columns[1]);
        frame.render_widget(&details, columns[1]);
        frame.render_widget(self.details(), inner);

        frame.render_widget(
            Paragraph::new(self.status_line()).style(Style::new().dim()),
            rows[2],
        );
    }

    fn app_list(&self) -> List {
        let items = APPS.iter().enumerate().map(|(i, app)| {
            let marker = if i == self.selected { "▶ " } else { "  " };
            let name = if i == self.selected {
                TextSpan::styled(app.name, Style::new().bold())
            } else {
                TextSpan::raw(app.name)
            };
            TextLine::new(vec![
                TextSpan::raw(marker),
                TextSpan::styled("● ", Style::new().fg(app.status.color())),
                name,
            ])
        });
        List::new(items).block(
            Block::new()
                .title("Apps")
                .borders(Borders::ALL)
                .border_style(Style::new().fg(Color::Cyan)),
        )
    }

    fn details(&self) -> Paragraph {
        let app = &APPS[self.selected];
        let label = Style::new().fg(Color::DarkGray);
        let field = |name: &str, value: TextSpan| {
            TextLine::new(vec![TextSpan::styled(format!("{name:<9}"), label.clone()), value])
        };
        Paragraph::from_lines([
            field("name", TextSpan::styled(app.name, Style::new().bold())),
            field("project", TextSpan::raw(app.project)),
            field("replicas", TextSpan::raw(app.replicas.to_string())),
            field(
                "status",
                TextSpan::styled(app.status.label(), Style::new().fg(app.status.color())),
            ),
            field(
                "url",
                TextSpan::styled(app.url, Style::new().fg(Color::Blue).link(app.url)),
            ),
        ])
    }

    fn status_line(&self) -> String {
        let hint = "↑/↓ select  q quit";
        match self.last_key {
            Some(key) => format!("{hint}  │  last key: {:?}", key.code),
            None => hint.to_owned(),
        }
    }
}

fn header() -> TextLine {
    TextLine::new(vec![
        TextSpan::styled(" minitui ", Style::new().fg(Color::Black).bg(Color::Cyan).bold()),
        TextSpan::raw(" deployments"),
    ])
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Install a file-backed subscriber when `MINITUI_LOG` is set.
fn init_logging() {
    let Ok(directive) = env::var(LOG_ENV) else {
        return;
    };
    let file = match File::create(LOG_FILE) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("minitui-demo: cannot open {LOG_FILE}: {e}");
            return;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    let mut dashboard = Dashboard::new();
    let result = minitui::run(RuntimeConfig::default(), |rt| {
        loop {
            rt.draw(|frame| dashboard.paint(frame))?;
            if let Some(Event::Key(key)) = rt.poll_default()? {
                if dashboard.handle_key(key) == Action::Quit {
                    return Ok(());
                }
            }
        }
    });

    if let Err(e) = result {
        tracing::error!(%e, "dashboard exited with an error");
        eprintln!("minitui-demo: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
