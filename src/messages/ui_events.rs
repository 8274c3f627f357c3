//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    FocusNext,
    FocusPrev,
    CursorUp,
    CursorDown,

    // Accounts widget
    SelectAccount,
    OpenCreateAccount,

    // Transactions widget shortcuts
    OpenNewIncome,
    OpenNewExpense,

    // Page actions
    RequestRemoveTransaction,
    RequestRemoveAccount,

    // Confirmation popup
    ConfirmYes,
    ConfirmNo,

    // Dialog-hosted form input
    ModalChar(char),
    ModalBackspace,
    ModalNextField,
    ModalOptionPrev,
    ModalOptionNext,
    ModalSubmit,
    ModalDismiss,

    // Session
    OpenLogin,
    Logout,
    Refresh,

    // System
    Quit,
}

/// Panel holding keyboard focus on the main screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Accounts,
    Transactions,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Accounts => Panel::Transactions,
            Panel::Transactions => Panel::Accounts,
        }
    }

    pub fn prev(&self) -> Panel {
        self.next()
    }
}

/// Convert a key event to a UiEvent based on current UI context.
///
/// Popups capture input first: an open confirmation popup sees every key,
/// then an open dialog, then the main screen. While logged out only the
/// login dialog and quitting are reachable.
pub fn key_to_ui_event(
    key: KeyEvent,
    confirm_open: bool,
    modal_open: bool,
    focus: Panel,
    logged_in: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if confirm_open {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(UiEvent::ConfirmYes),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::ConfirmNo),
            _ => None,
        };
    }

    if modal_open {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::ModalDismiss),
            KeyCode::Enter => Some(UiEvent::ModalSubmit),
            KeyCode::Tab => Some(UiEvent::ModalNextField),
            KeyCode::Up => Some(UiEvent::ModalOptionPrev),
            KeyCode::Down => Some(UiEvent::ModalOptionNext),
            KeyCode::Backspace => Some(UiEvent::ModalBackspace),
            KeyCode::Char(c) => Some(UiEvent::ModalChar(c)),
            _ => None,
        };
    }

    if !logged_in {
        return match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('l') | KeyCode::Enter => Some(UiEvent::OpenLogin),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Tab => Some(UiEvent::FocusNext),
        KeyCode::BackTab => Some(UiEvent::FocusPrev),
        KeyCode::Up => Some(UiEvent::CursorUp),
        KeyCode::Down => Some(UiEvent::CursorDown),
        KeyCode::Enter if focus == Panel::Accounts => Some(UiEvent::SelectAccount),
        KeyCode::Char('a') => Some(UiEvent::OpenCreateAccount),
        KeyCode::Char('i') => Some(UiEvent::OpenNewIncome),
        KeyCode::Char('e') => Some(UiEvent::OpenNewExpense),
        KeyCode::Char('d') if focus == Panel::Transactions => {
            Some(UiEvent::RequestRemoveTransaction)
        }
        KeyCode::Char('x') => Some(UiEvent::RequestRemoveAccount),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Char('o') => Some(UiEvent::Logout),
        _ => None,
    }
}
