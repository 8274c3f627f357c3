//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::constants::{
    FORM_CREATE_ACCOUNT, FORM_CREATE_EXPENSE, FORM_CREATE_INCOME, FORM_LOGIN,
    MODAL_CREATE_ACCOUNT, MODAL_LOGIN, MODAL_NEW_EXPENSE, MODAL_NEW_INCOME, PAGE_TRANSACTIONS,
};
use crate::format::{format_date, format_sum};
use crate::messages::gateway::{ApiOp, GatewayCommand};
use crate::messages::render::{
    AccountRow, FieldView, ModalView, RenderState, SelectView, TransactionRow,
};
use crate::messages::ui_events::Panel;
use crate::models::User;
use crate::views::{Form, ViewError, ViewTree, Views};

/// Process-wide authentication state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    UserLogged,
}

/// The continuation recorded for one in-flight request. A reply is
/// matched back to its purpose by id; several may be outstanding at once
/// (the page's title and list reads always are).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pending {
    /// Account metadata for the page title
    PageTitle,
    /// Record list for the page body
    PageList,
    /// Account list for the accounts widget
    AccountsWidget,
    /// Account list for a create-transaction form's selector
    FormOptions { form: &'static str },
    /// A form's mutation
    Submit { form: &'static str },
    RemoveTransaction,
    RemoveAccount,
    CurrentUser,
    Logout,
}

/// A mutation held back until the user answers the confirmation popup
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    RemoveTransaction { id: String },
    RemoveAccount { id: String },
}

impl ConfirmAction {
    pub fn message(&self) -> &'static str {
        match self {
            ConfirmAction::RemoveTransaction { .. } => "Remove this transaction?",
            ConfirmAction::RemoveAccount { .. } => "Remove this account and all its records?",
        }
    }
}

/// Dialog title and hosted form for each registered dialog
pub fn modal_form(modal: &str) -> Option<(&'static str, &'static str)> {
    match modal {
        MODAL_LOGIN => Some(("Sign in", FORM_LOGIN)),
        MODAL_CREATE_ACCOUNT => Some(("New account", FORM_CREATE_ACCOUNT)),
        MODAL_NEW_INCOME => Some(("New income", FORM_CREATE_INCOME)),
        MODAL_NEW_EXPENSE => Some(("New expense", FORM_CREATE_EXPENSE)),
        _ => None,
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub auth: AuthState,
    pub user: Option<User>,
    pub views: Views,

    // UI interaction state
    pub focus: Panel,
    pub accounts_cursor: usize,
    pub page_cursor: usize,
    pub confirm: Option<ConfirmAction>,

    // Request correlation
    pub pending: HashMap<u64, Pending>,
    next_request_id: u64,
    outbox: Vec<GatewayCommand>,
}

impl AppState {
    /// Build the state with every view component registered. Fails when
    /// any component binds to a region the layout never declared.
    pub fn new() -> Result<Self, ViewError> {
        let tree = ViewTree::standard();
        Ok(AppState {
            auth: AuthState::LoggedOut,
            user: None,
            views: Views::build(&tree)?,
            focus: Panel::Accounts,
            accounts_cursor: 0,
            page_cursor: 0,
            confirm: None,
            pending: HashMap::new(),
            next_request_id: 1,
            outbox: Vec::new(),
        })
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Record a continuation and queue the gateway command carrying it.
    pub(crate) fn enqueue(&mut self, op: ApiOp, purpose: Pending) -> u64 {
        let id = self.next_id();
        self.pending.insert(id, purpose);
        self.outbox.push(GatewayCommand::Request { id, op });
        id
    }

    /// Commands queued since the last drain, in issue order.
    pub fn drain_commands(&mut self) -> Vec<GatewayCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn logged_in(&self) -> bool {
        self.auth == AuthState::UserLogged
    }

    /// Keep cursors inside the lists they point into.
    pub(crate) fn clamp_cursors(&mut self) {
        let accounts_len = self
            .views
            .accounts_widget_ref()
            .map(|w| w.accounts.len())
            .unwrap_or(0);
        self.accounts_cursor = self.accounts_cursor.min(accounts_len.saturating_sub(1));

        let rows_len = self
            .views
            .page(PAGE_TRANSACTIONS)
            .map(|p| p.rows.len())
            .unwrap_or(0);
        self.page_cursor = self.page_cursor.min(rows_len.saturating_sub(1));
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let accounts = self
            .views
            .accounts_widget_ref()
            .map(|widget| {
                widget
                    .accounts
                    .iter()
                    .map(|account| AccountRow {
                        id: account.id.clone(),
                        name: account.name.clone(),
                        sum: format_sum(account.sum),
                        active: widget.is_active(account),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let (page_title, page_bound, page_rows) = self
            .views
            .page(PAGE_TRANSACTIONS)
            .map(|page| {
                let rows = page
                    .rows
                    .iter()
                    .map(|tx| TransactionRow {
                        id: tx.id.clone(),
                        name: tx.name.clone(),
                        sum: format_sum(tx.sum),
                        date: format_date(&tx.created_at),
                        kind: tx.kind,
                    })
                    .collect();
                (page.title.clone(), page.last_options.is_some(), rows)
            })
            .unwrap_or_default();

        RenderState {
            logged_in: self.logged_in(),
            user_name: self
                .views
                .user_widget_ref()
                .map(|w| w.name.clone())
                .unwrap_or_default(),
            focus: self.focus,
            accounts,
            accounts_cursor: self.accounts_cursor,
            page_title,
            page_bound,
            page_rows,
            page_cursor: self.page_cursor,
            modal: self.modal_view(),
            confirm: self.confirm.as_ref().map(|c| c.message().to_string()),
            busy: !self.pending.is_empty(),
        }
    }

    fn modal_view(&self) -> Option<ModalView> {
        let name = self.views.open_modal_name()?;
        let (title, form_name) = modal_form(name)?;
        let form = self.views.form(form_name)?;

        let view = match form {
            Form::Login(f) => ModalView {
                name: name.to_string(),
                title: title.to_string(),
                select: None,
                fields: field_views(&f.fields, f.focus),
            },
            Form::CreateAccount(f) => ModalView {
                name: name.to_string(),
                title: title.to_string(),
                select: None,
                fields: field_views(&f.fields, f.focus),
            },
            Form::CreateTransaction(f) => ModalView {
                name: name.to_string(),
                title: title.to_string(),
                select: Some(SelectView {
                    options: f.options.iter().map(|a| a.name.clone()).collect(),
                    selected: f.selected,
                    focused: f.focus == 0,
                }),
                fields: f
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(i, field)| FieldView {
                        label: field.label.to_string(),
                        value: field.value.clone(),
                        secret: field.secret,
                        focused: f.focus == i + 1,
                    })
                    .collect(),
            },
        };
        Some(view)
    }
}

fn field_views(fields: &[crate::views::form::Field], focus: usize) -> Vec<FieldView> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| FieldView {
            label: field.label.to_string(),
            value: field.value.clone(),
            secret: field.secret,
            focused: focus == i,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut state = AppState::new().unwrap();
        let a = state.next_id();
        let b = state.next_id();
        assert!(b > a);
    }

    #[test]
    fn test_enqueue_records_continuation() {
        let mut state = AppState::new().unwrap();
        let id = state.enqueue(ApiOp::AccountList, Pending::AccountsWidget);
        assert_eq!(state.pending.get(&id), Some(&Pending::AccountsWidget));
        let drained = state.drain_commands();
        assert_eq!(drained.len(), 1);
        assert!(state.drain_commands().is_empty());
    }

    #[test]
    fn test_render_state_reflects_open_modal() {
        let mut state = AppState::new().unwrap();
        state.views.get_modal(MODAL_LOGIN).unwrap().open();
        let rs = state.to_render_state();
        let modal = rs.modal.unwrap();
        assert_eq!(modal.title, "Sign in");
        assert_eq!(modal.fields.len(), 2);
        assert!(modal.fields[0].focused);
        assert!(modal.fields[1].secret);
    }

    #[test]
    fn test_busy_tracks_pending_requests() {
        let mut state = AppState::new().unwrap();
        assert!(!state.to_render_state().busy);
        state.enqueue(ApiOp::AccountList, Pending::AccountsWidget);
        assert!(state.to_render_state().busy);
    }
}
