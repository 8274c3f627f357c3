//! Render state - data structure sent from App layer to UI for rendering
//!
//! The UI never reaches into live components; it draws each frame from
//! this immutable projection, recomputed after every app-layer step.

use crate::constants::EMPTY_PAGE_TITLE;
use crate::messages::ui_events::Panel;
use crate::models::TransactionKind;

/// One selectable row in the accounts sidebar
#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub sum: String,
    pub active: bool,
}

/// One rendered record on the transactions page
#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub id: String,
    pub name: String,
    pub sum: String,
    pub date: String,
    pub kind: TransactionKind,
}

/// A text field inside an open dialog
#[derive(Debug, Clone)]
pub struct FieldView {
    pub label: String,
    pub value: String,
    pub secret: bool,
    pub focused: bool,
}

/// The account selector inside a create-transaction dialog
#[derive(Debug, Clone)]
pub struct SelectView {
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub focused: bool,
}

/// The currently open dialog, if any
#[derive(Debug, Clone)]
pub struct ModalView {
    pub name: String,
    pub title: String,
    pub select: Option<SelectView>,
    pub fields: Vec<FieldView>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub logged_in: bool,
    pub user_name: String,

    pub focus: Panel,

    pub accounts: Vec<AccountRow>,
    pub accounts_cursor: usize,

    pub page_title: String,
    pub page_bound: bool,
    pub page_rows: Vec<TransactionRow>,
    pub page_cursor: usize,

    pub modal: Option<ModalView>,
    pub confirm: Option<String>,

    pub busy: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            logged_in: false,
            user_name: String::new(),
            focus: Panel::Accounts,
            accounts: Vec::new(),
            accounts_cursor: 0,
            page_title: String::from(EMPTY_PAGE_TITLE),
            page_bound: false,
            page_rows: Vec::new(),
            page_cursor: 0,
            modal: None,
            confirm: None,
            busy: false,
        }
    }
}
