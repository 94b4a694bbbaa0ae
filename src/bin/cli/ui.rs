use std::fmt::Display;
use std::io::IsTerminal;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use nu_ansi_term::{Color, Style};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Theme {
    Auto,
    Light,
    Dark,
    Plain,
}

/// Terminal output for text mode. Colors and the spinner are only used when
/// stdout is a terminal and `--quiet` is off.
pub struct Ui {
    palette: Palette,
    fancy: bool,
}

impl Ui {
    pub fn new(theme: Theme, quiet: bool) -> Self {
        let fancy = !quiet && theme != Theme::Plain && std::io::stdout().is_terminal();

        #[cfg(windows)]
        if fancy {
            let _ = nu_ansi_term::enable_ansi_support();
        }

        Self {
            palette: Palette::for_theme(if fancy { theme } else { Theme::Plain }),
            fancy,
        }
    }

    /// Prints `key: value` lines under a heading, keys right-aligned.
    pub fn section<'a, V: Display>(&self, title: &str, rows: impl IntoIterator<Item = (&'a str, V)>) {
        let rows: Vec<(&str, String)> = rows.into_iter().map(|(k, v)| (k, v.to_string())).collect();
        self.heading(title);
        let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            println!("  {} {value}", self.palette.key.paint(format!("{key:>width$}:")));
        }
    }

    /// Prints a right-aligned table. Every row must have `headers.len()` cells.
    pub fn table(&self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        self.heading(title);
        if rows.is_empty() {
            println!("  (none)");
            return;
        }
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                rows.iter()
                    .map(|row| row[col].len())
                    .fold(header.len(), usize::max)
            })
            .collect();
        let line = |cells: &mut dyn Iterator<Item = String>| {
            cells
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        };
        let header = line(&mut headers.iter().map(|h| h.to_string()));
        println!("  {}", self.palette.key.paint(header));
        for row in rows {
            println!("  {}", line(&mut row.iter().cloned()));
        }
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.tagged(self.palette.ok, "ok", message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.tagged(self.palette.info, "info", message));
    }

    /// Warnings go to stderr so they never mix into JSON on stdout.
    pub fn warn(&self, message: &str) {
        eprintln!("{}", self.tagged(self.palette.warn, "warn", message));
    }

    /// Starts a spinner labelled `label`; a no-op outside a terminal.
    pub fn spinner(&self, label: impl Into<String>) -> Spinner {
        let bar = self.fancy.then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(label.into());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Spinner {
            bar,
            started: Instant::now(),
        }
    }

    fn tagged(&self, style: Style, tag: &str, message: &str) -> String {
        if self.fancy {
            format!("{} {message}", style.paint(format!("[{tag}]")))
        } else {
            message.to_string()
        }
    }

    fn heading(&self, title: &str) {
        println!("{}", self.palette.heading.paint(title));
    }
}

/// Running spinner; cleared when finished or dropped.
pub struct Spinner {
    bar: Option<ProgressBar>,
    started: Instant,
}

impl Spinner {
    /// Stops the spinner and returns the time since it started.
    pub fn finish(self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    heading: Style,
    key: Style,
    info: Style,
    ok: Style,
    warn: Style,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Plain => Self {
                heading: Style::new(),
                key: Style::new(),
                info: Style::new(),
                ok: Style::new(),
                warn: Style::new(),
            },
            Theme::Light => Self {
                heading: Color::Blue.bold(),
                key: Color::Black.bold(),
                info: Color::Purple.normal(),
                ok: Color::Green.bold(),
                warn: Color::Red.bold(),
            },
            Theme::Dark | Theme::Auto => Self {
                heading: Color::Purple.bold(),
                key: Color::LightBlue.bold(),
                info: Color::LightCyan.normal(),
                ok: Color::LightGreen.bold(),
                warn: Color::Yellow.bold(),
            },
        }
    }
}
