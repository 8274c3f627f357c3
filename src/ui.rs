use ratatui::{prelude::*, widgets::*};

use crate::models::TransactionKind;

/// Renders a single-line form field
pub fn render_input<'a>(label: &'a str, value: &str, secret: bool, focused: bool) -> Paragraph<'a> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let shown = if secret {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", label));

    Paragraph::new(shown).block(block)
}

/// Color a record by its direction
pub fn kind_color(kind: TransactionKind) -> Color {
    match kind {
        TransactionKind::Income => Color::Green,
        TransactionKind::Expense => Color::Red,
    }
}

/// Sign prefix a record's amount is shown with
pub fn kind_sign(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    }
}
