pub use colored::{Color, Colorize};

pub const PANEL_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelKind {
    Answer,
    Explanation,
    GitSuggestion,
    FileSearch,
    Help,
    Models,
    Fix,
    Error,
    Notice,
}

impl PanelKind {
    pub fn title(&self) -> Option<&'static str> {
        match self {
            PanelKind::Answer => Some("Shellmate"),
            PanelKind::Explanation => Some("Explanation"),
            PanelKind::GitSuggestion => Some("Git Suggestion"),
            PanelKind::FileSearch => Some("File Search"),
            PanelKind::Help => Some("Help"),
            PanelKind::Models => Some("Available Models"),
            PanelKind::Fix => Some("Try This"),
            PanelKind::Error | PanelKind::Notice => None,
        }
    }

    pub fn border(&self) -> Color {
        match self {
            PanelKind::Answer | PanelKind::Help => Color::Blue,
            PanelKind::Explanation | PanelKind::Notice => Color::Yellow,
            PanelKind::GitSuggestion => Color::Green,
            PanelKind::FileSearch | PanelKind::Models => Color::Cyan,
            PanelKind::Fix | PanelKind::Error => Color::Red,
        }
    }
}

/// One piece of feedback for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Panel(PanelKind, String),
    Stdout(String),
    Stderr(String),
    Success(String),
    Failure(String),
}

pub trait OutputSink {
    fn emit(&mut self, output: Output);
}

impl OutputSink for Vec<Output> {
    fn emit(&mut self, output: Output) {
        self.push(output);
    }
}

/// Prints outputs to the terminal as they arrive.
#[derive(Default)]
pub struct Terminal;

impl OutputSink for Terminal {
    fn emit(&mut self, output: Output) {
        match output {
            Output::Panel(kind, body) => {
                println!("{}", Panel::new(kind.title(), kind.border()).render(&body))
            }
            Output::Stdout(text) => print!("{}", with_newline(&text)),
            Output::Stderr(text) => print!("{}", with_newline(&text).red()),
            Output::Success(text) => println!("{}", text.green()),
            Output::Failure(text) => println!("{}", text.red()),
        }
    }
}

fn with_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

pub struct Panel<'a> {
    title: Option<&'a str>,
    subtitle: Option<&'a str>,
    border: Color,
    width: usize,
}

impl<'a> Panel<'a> {
    pub fn new(title: Option<&'a str>, border: Color) -> Self {
        Self {
            title,
            subtitle: None,
            border,
            width: PANEL_WIDTH,
        }
    }

    pub fn subtitle(mut self, subtitle: &'a str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn render(&self, body: &str) -> String {
        let inner = self.width - 4;
        let mut out = String::new();

        out.push_str(&self.edge('╭', '╮', self.title, false));
        out.push('\n');
        for line in body.trim_matches('\n').lines() {
            for segment in wrap(line, inner) {
                let pad = inner.saturating_sub(segment.chars().count());
                out.push_str(&format!(
                    "{} {}{} {}\n",
                    "│".color(self.border),
                    segment,
                    " ".repeat(pad),
                    "│".color(self.border)
                ));
            }
        }
        out.push_str(&self.edge('╰', '╯', self.subtitle, true));
        out
    }

    fn edge(&self, left: char, right: char, label: Option<&str>, align_right: bool) -> String {
        let span = self.width - 2;
        let fill = match label {
            Some(label) => {
                let label = format!(" {} ", label);
                let rest = span.saturating_sub(label.chars().count() + 1);
                if align_right {
                    format!("{}{}─", "─".repeat(rest), label)
                } else {
                    format!("─{}{}", label, "─".repeat(rest))
                }
            }
            None => "─".repeat(span),
        };
        format!("{}{}{}", left, fill, right)
            .color(self.border)
            .to_string()
    }
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }

        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    lines.push(current);
    lines
}

/// One `• item` line per entry.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
