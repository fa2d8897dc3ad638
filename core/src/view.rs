//! Rendering of `ViewState` into display lines.

use std::fmt;

use crate::controller::ViewState;

/// Format a score with two decimal places (`1` → `1.00`, `0.005` → `0.01`).
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// One rendered line of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading,
    Label(String),
    Score(String),
    /// Error text meant to be announced to the user right away.
    Alert(String),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Heading => write!(f, "Result:"),
            Line::Label(label) => write!(f, "Label: {label}"),
            Line::Score(score) => write!(f, "Score: {score}"),
            Line::Alert(message) => write!(f, "[alert] {message}"),
        }
    }
}

/// The result and error regions of the form. Idle state renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<Line>,
}

impl Screen {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines of the result region, without the alert.
    pub fn result_region(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| !matches!(line, Line::Alert(_)))
            .map(ToString::to_string)
            .collect()
    }

    pub fn alert(&self) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Alert(message) => Some(message.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub fn render(state: &ViewState) -> Screen {
    let mut lines = Vec::new();
    if let Some(sentiment) = &state.result {
        lines.push(Line::Heading);
        lines.push(Line::Label(sentiment.label.clone()));
        lines.push(Line::Score(format_score(sentiment.score)));
    }
    if let Some(error) = &state.error {
        lines.push(Line::Alert(error.clone()));
    }
    Screen { lines }
}
