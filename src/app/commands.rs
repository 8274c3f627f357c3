//! Command handlers - event processing and the refresh choreography that
//! ties every mutation to the views it invalidates.

use crate::app::state::{modal_form, AppState, AuthState, ConfirmAction, Pending};
use crate::constants::{MODAL_CREATE_ACCOUNT, MODAL_LOGIN, MODAL_NEW_EXPENSE, MODAL_NEW_INCOME, PAGE_TRANSACTIONS};
use crate::constants::{FORM_CREATE_ACCOUNT, FORM_CREATE_EXPENSE, FORM_CREATE_INCOME, FORM_LOGIN};
use crate::gateway::outcome;
use crate::messages::gateway::{ApiOp, GatewayReply};
use crate::messages::ui_events::{Panel, UiEvent};
use crate::models::{Account, Envelope, PageOptions, Transaction, User};
use crate::views::SubmitForm;

impl AppState {
    /// Handle a UI event, returns true if quit was requested
    pub fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::FocusNext => self.focus = self.focus.next(),
            UiEvent::FocusPrev => self.focus = self.focus.prev(),
            UiEvent::CursorUp => self.cursor_up(),
            UiEvent::CursorDown => self.cursor_down(),

            // Accounts widget
            UiEvent::SelectAccount => self.select_account(),
            UiEvent::OpenCreateAccount => self.open_create_account(),

            // Transactions widget shortcuts
            UiEvent::OpenNewIncome => self.open_new_income(),
            UiEvent::OpenNewExpense => self.open_new_expense(),

            // Page actions
            UiEvent::RequestRemoveTransaction => self.request_remove_transaction(),
            UiEvent::RequestRemoveAccount => self.request_remove_account(),
            UiEvent::ConfirmYes => self.confirm_yes(),
            UiEvent::ConfirmNo => self.confirm_no(),

            // Dialog-hosted form input
            UiEvent::ModalChar(c) => self.modal_char(c),
            UiEvent::ModalBackspace => self.modal_backspace(),
            UiEvent::ModalNextField => self.modal_next_field(),
            UiEvent::ModalOptionPrev => self.modal_option_prev(),
            UiEvent::ModalOptionNext => self.modal_option_next(),
            UiEvent::ModalSubmit => self.modal_submit(),
            UiEvent::ModalDismiss => self.modal_dismiss(),

            // Session
            UiEvent::OpenLogin => self.open_login(),
            UiEvent::Logout => self.logout(),
            UiEvent::Refresh => self.update(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    // ========================
    // Navigation
    // ========================

    fn cursor_up(&mut self) {
        match self.focus {
            Panel::Accounts => self.accounts_cursor = self.accounts_cursor.saturating_sub(1),
            Panel::Transactions => self.page_cursor = self.page_cursor.saturating_sub(1),
        }
    }

    fn cursor_down(&mut self) {
        match self.focus {
            Panel::Accounts => self.accounts_cursor += 1,
            Panel::Transactions => self.page_cursor += 1,
        }
        self.clamp_cursors();
    }

    // ========================
    // Accounts widget
    // ========================

    /// Mark the hovered account active and show its transactions.
    fn select_account(&mut self) {
        let cursor = self.accounts_cursor;
        let Some(widget) = self.views.accounts_widget() else {
            return;
        };
        let Some(account_id) = widget.select(cursor) else {
            return;
        };
        self.show_page(PAGE_TRANSACTIONS, PageOptions { account_id });
    }

    fn open_create_account(&mut self) {
        if let Some(modal) = self.views.get_modal(MODAL_CREATE_ACCOUNT) {
            modal.open();
        }
    }

    // ========================
    // Transactions widget shortcuts
    // ========================

    fn open_new_income(&mut self) {
        if let Some(target) = self.views.transactions_widget().map(|w| w.income_target()) {
            self.open_transaction_dialog(target);
        }
    }

    fn open_new_expense(&mut self) {
        if let Some(target) = self.views.transactions_widget().map(|w| w.expense_target()) {
            self.open_transaction_dialog(target);
        }
    }

    /// Pre-seed the form's selector with the widget's active account,
    /// then show the dialog.
    fn open_transaction_dialog(&mut self, (modal, form): (&'static str, &'static str)) {
        let active = self
            .views
            .accounts_widget_ref()
            .and_then(|w| w.active_account_id.clone());
        if let Some(form) = self.views.transaction_form(form) {
            form.set_selected(active.as_deref());
        }
        if let Some(modal) = self.views.get_modal(modal) {
            modal.open();
        }
    }

    // ========================
    // Removals (confirmation gated)
    // ========================

    fn request_remove_transaction(&mut self) {
        let id = self
            .views
            .page(PAGE_TRANSACTIONS)
            .and_then(|p| p.rows.get(self.page_cursor))
            .map(|row| row.id.clone());
        if let Some(id) = id {
            self.confirm = Some(ConfirmAction::RemoveTransaction { id });
        }
    }

    fn request_remove_account(&mut self) {
        let id = self
            .views
            .page(PAGE_TRANSACTIONS)
            .and_then(|p| p.account_id().map(String::from));
        if let Some(id) = id {
            self.confirm = Some(ConfirmAction::RemoveAccount { id });
        }
    }

    fn confirm_yes(&mut self) {
        let Some(action) = self.confirm.take() else {
            return;
        };
        match action {
            ConfirmAction::RemoveTransaction { id } => {
                self.enqueue(ApiOp::TransactionRemove { id }, Pending::RemoveTransaction);
            }
            ConfirmAction::RemoveAccount { id } => {
                self.enqueue(ApiOp::AccountRemove { id }, Pending::RemoveAccount);
                // optimistic local clear; the reply only drives refreshes
                if let Some(page) = self.views.get_page(PAGE_TRANSACTIONS) {
                    page.clear();
                }
                self.page_cursor = 0;
            }
        }
    }

    fn confirm_no(&mut self) {
        self.confirm = None;
    }

    // ========================
    // Dialog-hosted form input
    // ========================

    fn open_form_name(&self) -> Option<&'static str> {
        let modal = self.views.open_modal_name()?;
        modal_form(modal).map(|(_, form)| form)
    }

    fn modal_char(&mut self, c: char) {
        if let Some(name) = self.open_form_name() {
            if let Some(form) = self.views.get_form(name) {
                form.input_char(c);
            }
        }
    }

    fn modal_backspace(&mut self) {
        if let Some(name) = self.open_form_name() {
            if let Some(form) = self.views.get_form(name) {
                form.backspace();
            }
        }
    }

    fn modal_next_field(&mut self) {
        if let Some(name) = self.open_form_name() {
            if let Some(form) = self.views.get_form(name) {
                form.next_field();
            }
        }
    }

    fn modal_option_prev(&mut self) {
        if let Some(name) = self.open_form_name() {
            if let Some(form) = self.views.get_form(name) {
                form.option_prev();
            }
        }
    }

    fn modal_option_next(&mut self) {
        if let Some(name) = self.open_form_name() {
            if let Some(form) = self.views.get_form(name) {
                form.option_next();
            }
        }
    }

    /// Serialize the hosted form and dispatch its mutation. The dialog
    /// stays open until a successful reply closes it.
    fn modal_submit(&mut self) {
        let Some(form_name) = self.open_form_name() else {
            return;
        };
        let op = self.views.get_form(form_name).and_then(|form| form.submit_op());
        if let Some(op) = op {
            self.enqueue(op, Pending::Submit { form: form_name });
        }
    }

    /// Route dismissal through the dialog's own close indirection.
    fn modal_dismiss(&mut self) {
        if let Some(name) = self.views.open_modal_name() {
            if let Some(modal) = self.views.get_modal(name) {
                modal.on_close();
            }
        }
    }

    // ========================
    // Session
    // ========================

    fn open_login(&mut self) {
        if let Some(modal) = self.views.get_modal(MODAL_LOGIN) {
            modal.open();
        }
    }

    fn logout(&mut self) {
        self.enqueue(ApiOp::Logout, Pending::Logout);
    }

    /// Queue the reads every fresh session starts with: the session
    /// user, the widgets (a no-op until a user exists) and the form
    /// selectors (which fail open when unauthorized).
    pub fn bootstrap(&mut self) {
        self.enqueue(ApiOp::CurrentUser, Pending::CurrentUser);
        self.update_widgets();
        self.update_forms();
    }

    // ========================
    // Coordinator surface
    // ========================

    /// Render the named page under the given filter.
    pub fn show_page(&mut self, name: &str, options: PageOptions) {
        let ops = self.views.get_page(name).map(|page| page.render(options));
        if let Some((title_op, list_op)) = ops {
            self.enqueue(title_op, Pending::PageTitle);
            self.enqueue(list_op, Pending::PageList);
        }
    }

    /// Global refresh: every page, widget and form re-fetches.
    pub fn update(&mut self) {
        self.update_pages();
        self.update_widgets();
        self.update_forms();
    }

    fn update_pages(&mut self) {
        let ops = self
            .views
            .get_page(PAGE_TRANSACTIONS)
            .and_then(|page| page.update());
        if let Some((title_op, list_op)) = ops {
            self.enqueue(title_op, Pending::PageTitle);
            self.enqueue(list_op, Pending::PageList);
        }
    }

    /// Refresh the always-visible panels from current state.
    pub fn update_widgets(&mut self) {
        let user = self.user.clone();
        if let Some(widget) = self.views.user_widget() {
            widget.update(user.as_ref());
        }
        self.update_accounts_widget();
    }

    fn update_accounts_widget(&mut self) {
        let op = self
            .views
            .accounts_widget_ref()
            .and_then(|w| w.refresh_op(self.user.as_ref()));
        if let Some(op) = op {
            self.enqueue(op, Pending::AccountsWidget);
        }
    }

    /// Re-fetch the account selectors of both creation forms.
    pub fn update_forms(&mut self) {
        for name in self.views.transaction_form_names() {
            let op = self.views.transaction_form(name).map(|f| f.options_op());
            if let Some(op) = op {
                self.enqueue(op, Pending::FormOptions { form: name });
            }
        }
    }

    /// Authentication-state transition.
    pub fn set_state(&mut self, state: AuthState) {
        self.auth = state;
        match state {
            AuthState::UserLogged => self.update(),
            AuthState::LoggedOut => {
                self.user = None;
                if let Some(page) = self.views.get_page(PAGE_TRANSACTIONS) {
                    page.clear();
                }
                if let Some(widget) = self.views.accounts_widget() {
                    widget.clear();
                    widget.active_account_id = None;
                }
                self.accounts_cursor = 0;
                self.page_cursor = 0;
                if let Some(modal) = self.views.get_modal(MODAL_LOGIN) {
                    modal.open();
                }
            }
        }
    }

    // ========================
    // Reply handling
    // ========================

    /// Run the continuation recorded for a reply. Replies for unknown
    /// ids are dropped; replies for views that changed in the interim
    /// still land (nothing cancels).
    pub fn handle_reply(&mut self, reply: GatewayReply) {
        let Some(purpose) = self.pending.remove(&reply.id) else {
            return;
        };

        let ok = outcome::handle_error(&reply.outcome);
        let envelope = reply.outcome.ok();

        match purpose {
            Pending::PageTitle => {
                if ok {
                    if let Some(account) = decode::<Account>(&envelope) {
                        if let Some(page) = self.views.get_page(PAGE_TRANSACTIONS) {
                            page.render_title(account.name);
                        }
                    }
                }
            }

            Pending::PageList => {
                if ok {
                    if let Some(rows) = decode::<Vec<Transaction>>(&envelope) {
                        if let Some(page) = self.views.get_page(PAGE_TRANSACTIONS) {
                            page.render_transactions(rows);
                        }
                        self.clamp_cursors();
                    }
                }
            }

            Pending::AccountsWidget => {
                if ok {
                    if let Some(accounts) = decode::<Vec<Account>>(&envelope) {
                        if let Some(widget) = self.views.accounts_widget() {
                            widget.clear();
                            widget.render_items(accounts);
                        }
                        self.clamp_cursors();
                    }
                }
            }

            Pending::FormOptions { form } => {
                // fails open: a missing list leaves the selector empty
                if ok {
                    if let Some(accounts) = decode::<Vec<Account>>(&envelope) {
                        if let Some(form) = self.views.transaction_form(form) {
                            form.set_options(accounts);
                        }
                    }
                }
            }

            Pending::Submit { form } => {
                if ok {
                    self.submit_succeeded(form, envelope.as_ref());
                }
                // unconditional cleanup; not a success signal
                if let Some(form) = self.views.get_form(form) {
                    form.reset();
                }
            }

            Pending::RemoveTransaction => {
                if ok {
                    self.update_pages();
                    self.update_accounts_widget();
                }
            }

            Pending::RemoveAccount => {
                // the page was already cleared when the user confirmed
                if ok {
                    self.update_widgets();
                    self.update_forms();
                }
            }

            Pending::CurrentUser => {
                if ok {
                    if let Some(user) = envelope.as_ref().and_then(decode_user) {
                        self.user = Some(user);
                        self.set_state(AuthState::UserLogged);
                        return;
                    }
                }
                // no session: ask for credentials
                self.open_login();
            }

            Pending::Logout => {
                if ok {
                    self.set_state(AuthState::LoggedOut);
                }
            }
        }
    }

    /// Success-only completion of a form submission: close the hosting
    /// dialog(s) and fan out the refreshes this mutation requires.
    fn submit_succeeded(&mut self, form: &'static str, envelope: Option<&Envelope>) {
        match form {
            FORM_LOGIN => {
                if let Some(user) = envelope.and_then(decode_user) {
                    self.user = Some(user);
                }
                if let Some(modal) = self.views.get_modal(MODAL_LOGIN) {
                    modal.close();
                }
                self.set_state(AuthState::UserLogged);
            }

            FORM_CREATE_ACCOUNT => {
                if let Some(modal) = self.views.get_modal(MODAL_CREATE_ACCOUNT) {
                    modal.close();
                }
                self.update_widgets();
                self.update_forms();
            }

            // a new record moves an account balance, so everything
            // refreshes; only one of the two dialogs is ever open and
            // closing the other is a harmless no-op
            FORM_CREATE_INCOME | FORM_CREATE_EXPENSE => {
                if let Some(modal) = self.views.get_modal(MODAL_NEW_INCOME) {
                    modal.close();
                }
                if let Some(modal) = self.views.get_modal(MODAL_NEW_EXPENSE) {
                    modal.close();
                }
                self.update();
            }

            _ => {}
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(envelope: &Option<Envelope>) -> Option<T> {
    envelope.as_ref().and_then(|e| e.decode())
}

/// The login and current-user endpoints wrap the user object either
/// directly in `data` or under `data.user`.
fn decode_user(envelope: &Envelope) -> Option<User> {
    envelope
        .decode::<User>()
        .or_else(|| serde_json::from_value(envelope.data.get("user").cloned()?).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::gateway::{ApiOutcome, GatewayCommand};
    use serde_json::{json, Value};

    fn ok_env(data: Value) -> ApiOutcome {
        Ok(Envelope {
            success: true,
            data,
            error: None,
        })
    }

    fn rejected() -> ApiOutcome {
        Ok(Envelope {
            success: false,
            data: Value::Null,
            error: Some("rejected".into()),
        })
    }

    fn logged_in() -> AppState {
        let mut state = AppState::new().unwrap();
        state.auth = AuthState::UserLogged;
        state.user = Some(User {
            id: "1".into(),
            name: "Alice".into(),
            email: "a@x.io".into(),
        });
        state
    }

    /// Drain the outbox into (id, op) pairs
    fn issued(state: &mut AppState) -> Vec<(u64, ApiOp)> {
        state
            .drain_commands()
            .into_iter()
            .filter_map(|cmd| match cmd {
                GatewayCommand::Request { id, op } => Some((id, op)),
                GatewayCommand::Shutdown => None,
            })
            .collect()
    }

    fn reply(state: &mut AppState, id: u64, outcome: ApiOutcome) {
        state.handle_reply(GatewayReply { id, outcome });
    }

    fn accounts_json() -> Value {
        json!([
            {"id": "7", "name": "Cash", "sum": 100},
            {"id": "8", "name": "Card", "sum": 250.5}
        ])
    }

    /// Bind the page to account "7" and settle both reads
    fn bind_page(state: &mut AppState) {
        state.show_page(
            PAGE_TRANSACTIONS,
            PageOptions {
                account_id: "7".into(),
            },
        );
        for (id, op) in issued(state) {
            match op {
                ApiOp::AccountGet { .. } => {
                    reply(state, id, ok_env(json!({"id": "7", "name": "Cash", "sum": 100})))
                }
                ApiOp::TransactionList { .. } => reply(
                    state,
                    id,
                    ok_env(json!([{
                        "id": "42",
                        "name": "Coffee",
                        "sum": 3.5,
                        "type": "expense",
                        "created_at": "2019-03-10 03:20:41",
                        "account_id": "7"
                    }])),
                ),
                other => panic!("unexpected op {other:?}"),
            }
        }
    }

    /// Load both creation forms' selectors with the account list
    fn load_form_options(state: &mut AppState) {
        state.update_forms();
        for (id, _) in issued(state) {
            reply(state, id, ok_env(accounts_json()));
        }
    }

    #[test]
    fn test_show_page_issues_two_independent_reads() {
        let mut state = logged_in();
        state.show_page(
            PAGE_TRANSACTIONS,
            PageOptions {
                account_id: "7".into(),
            },
        );
        let ops = issued(&mut state);
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0].1, ApiOp::AccountGet { id } if id == "7"));
        assert!(matches!(&ops[1].1, ApiOp::TransactionList { account_id } if account_id == "7"));

        // the list lands first; the title read then fails alone
        let (title_id, list_id) = (ops[0].0, ops[1].0);
        reply(
            &mut state,
            list_id,
            ok_env(json!([{
                "id": "42", "name": "Coffee", "sum": 3.5, "type": "expense",
                "created_at": "2019-03-10 03:20:41", "account_id": "7"
            }])),
        );
        reply(&mut state, title_id, rejected());

        let page = state.views.page(PAGE_TRANSACTIONS).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.title, crate::constants::EMPTY_PAGE_TITLE);
    }

    #[test]
    fn test_show_page_with_unknown_name_is_a_noop() {
        let mut state = logged_in();
        state.show_page(
            "settings",
            PageOptions {
                account_id: "7".into(),
            },
        );
        assert!(issued(&mut state).is_empty());
    }

    #[test]
    fn test_select_account_marks_one_row_active_and_shows_page() {
        let mut state = logged_in();
        state.update_widgets();
        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, ok_env(accounts_json()));

        state.accounts_cursor = 1;
        state.handle_ui_event(UiEvent::SelectAccount);

        let widget = state.views.accounts_widget_ref().unwrap();
        let active: Vec<bool> = widget.accounts.iter().map(|a| widget.is_active(a)).collect();
        assert_eq!(active, vec![false, true]);

        let ops = issued(&mut state);
        assert!(matches!(&ops[0].1, ApiOp::AccountGet { id } if id == "8"));
        assert!(matches!(&ops[1].1, ApiOp::TransactionList { account_id } if account_id == "8"));
    }

    #[test]
    fn test_create_transaction_success_closes_both_dialogs_and_refreshes() {
        for (open_event, form_name) in [
            (UiEvent::OpenNewIncome, FORM_CREATE_INCOME),
            (UiEvent::OpenNewExpense, FORM_CREATE_EXPENSE),
        ] {
            let mut state = logged_in();
            load_form_options(&mut state);
            bind_page(&mut state);

            state.handle_ui_event(open_event.clone());
            assert!(state.views.open_modal_name().is_some());

            state.handle_ui_event(UiEvent::ModalSubmit);
            let ops = issued(&mut state);
            assert_eq!(ops.len(), 1, "{form_name}: one create call expected");
            let (id, op) = ops[0].clone();
            assert!(matches!(op, ApiOp::TransactionCreate { .. }));
            assert_eq!(state.pending.get(&id), Some(&Pending::Submit { form: form_name }));

            reply(&mut state, id, ok_env(Value::Null));

            assert!(!state.views.modal(MODAL_NEW_INCOME).unwrap().is_open());
            assert!(!state.views.modal(MODAL_NEW_EXPENSE).unwrap().is_open());
            // global refresh: page reads, accounts widget, both selectors
            assert!(state.pending.values().any(|p| *p == Pending::AccountsWidget));
            assert!(state.pending.values().any(|p| *p == Pending::PageList));
            assert!(state
                .pending
                .values()
                .any(|p| matches!(p, Pending::FormOptions { .. })));
        }
    }

    #[test]
    fn test_failed_submission_keeps_dialog_open_but_resets_fields() {
        let mut state = logged_in();
        load_form_options(&mut state);

        state.handle_ui_event(UiEvent::OpenNewIncome);
        state.handle_ui_event(UiEvent::ModalNextField);
        state.handle_ui_event(UiEvent::ModalChar('T'));
        state.handle_ui_event(UiEvent::ModalSubmit);

        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, rejected());

        assert!(state.views.modal(MODAL_NEW_INCOME).unwrap().is_open());
        let form = state.views.transaction_form(FORM_CREATE_INCOME).unwrap();
        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        // no success side effects
        assert!(issued(&mut state).is_empty());
    }

    #[test]
    fn test_submit_without_selected_account_sends_nothing() {
        let mut state = logged_in();
        state.handle_ui_event(UiEvent::OpenNewIncome);
        state.handle_ui_event(UiEvent::ModalSubmit);
        assert!(issued(&mut state).is_empty());
    }

    #[test]
    fn test_remove_transaction_confirmed_refreshes_page_and_accounts() {
        let mut state = logged_in();
        bind_page(&mut state);
        state.focus = Panel::Transactions;

        state.handle_ui_event(UiEvent::RequestRemoveTransaction);
        assert!(state.confirm.is_some());
        state.handle_ui_event(UiEvent::ConfirmYes);

        let ops = issued(&mut state);
        assert_eq!(ops.len(), 1);
        let (id, op) = ops[0].clone();
        assert!(matches!(op, ApiOp::TransactionRemove { id } if id == "42"));

        reply(&mut state, id, ok_env(Value::Null));
        let purposes: Vec<_> = state.pending.values().cloned().collect();
        assert!(purposes.contains(&Pending::PageTitle));
        assert!(purposes.contains(&Pending::PageList));
        assert!(purposes.contains(&Pending::AccountsWidget));
    }

    #[test]
    fn test_remove_transaction_declined_does_nothing() {
        let mut state = logged_in();
        bind_page(&mut state);
        state.focus = Panel::Transactions;

        state.handle_ui_event(UiEvent::RequestRemoveTransaction);
        state.handle_ui_event(UiEvent::ConfirmNo);

        assert!(state.confirm.is_none());
        assert!(issued(&mut state).is_empty());
        assert_eq!(state.views.page(PAGE_TRANSACTIONS).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_remove_account_clears_page_immediately() {
        let mut state = logged_in();
        bind_page(&mut state);

        state.handle_ui_event(UiEvent::RequestRemoveAccount);
        state.handle_ui_event(UiEvent::ConfirmYes);

        // cleared before any reply arrives
        let page = state.views.page(PAGE_TRANSACTIONS).unwrap();
        assert!(page.rows.is_empty());
        assert!(page.last_options.is_none());
        assert_eq!(page.title, crate::constants::EMPTY_PAGE_TITLE);

        let ops = issued(&mut state);
        assert_eq!(ops.len(), 1);
        let (id, op) = ops[0].clone();
        assert!(matches!(op, ApiOp::AccountRemove { id } if id == "7"));

        // widgets and forms refresh only once the reply succeeds
        reply(&mut state, id, ok_env(Value::Null));
        let purposes: Vec<_> = state.pending.values().cloned().collect();
        assert!(purposes.contains(&Pending::AccountsWidget));
        assert!(purposes
            .iter()
            .any(|p| matches!(p, Pending::FormOptions { .. })));
        // the page stays unbound, so no page reads were issued
        assert!(!purposes.contains(&Pending::PageList));
    }

    #[test]
    fn test_remove_account_failure_still_leaves_page_cleared() {
        let mut state = logged_in();
        bind_page(&mut state);

        state.handle_ui_event(UiEvent::RequestRemoveAccount);
        state.handle_ui_event(UiEvent::ConfirmYes);
        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, rejected());

        assert!(state.views.page(PAGE_TRANSACTIONS).unwrap().rows.is_empty());
        assert!(issued(&mut state).is_empty());
    }

    #[test]
    fn test_remove_account_requires_bound_page() {
        let mut state = logged_in();
        state.handle_ui_event(UiEvent::RequestRemoveAccount);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn test_login_success_sets_user_closes_dialog_and_refreshes() {
        let mut state = AppState::new().unwrap();
        state.handle_ui_event(UiEvent::OpenLogin);
        for c in "a@x.io".chars() {
            state.handle_ui_event(UiEvent::ModalChar(c));
        }
        state.handle_ui_event(UiEvent::ModalNextField);
        state.handle_ui_event(UiEvent::ModalChar('p'));
        state.handle_ui_event(UiEvent::ModalSubmit);

        let (id, op) = issued(&mut state)[0].clone();
        assert!(matches!(op, ApiOp::Login { .. }));

        reply(
            &mut state,
            id,
            ok_env(json!({"user": {"id": "1", "name": "Alice", "email": "a@x.io"}})),
        );

        assert!(state.logged_in());
        assert_eq!(state.user.as_ref().unwrap().name, "Alice");
        assert!(!state.views.modal(MODAL_LOGIN).unwrap().is_open());
        assert!(state.pending.values().any(|p| *p == Pending::AccountsWidget));
        // the user widget picked the name up synchronously
        assert_eq!(state.views.user_widget_ref().unwrap().name, "Alice");
    }

    #[test]
    fn test_login_failure_keeps_dialog_open_and_resets_fields() {
        let mut state = AppState::new().unwrap();
        state.handle_ui_event(UiEvent::OpenLogin);
        state.handle_ui_event(UiEvent::ModalChar('x'));
        state.handle_ui_event(UiEvent::ModalSubmit);

        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, rejected());

        assert!(!state.logged_in());
        assert!(state.views.modal(MODAL_LOGIN).unwrap().is_open());
        match state.views.form(FORM_LOGIN) {
            Some(crate::views::Form::Login(form)) => {
                assert!(form.fields.iter().all(|f| f.value.is_empty()));
            }
            _ => panic!("login form missing"),
        }
    }

    #[test]
    fn test_create_account_success_refreshes_widgets_and_forms() {
        let mut state = logged_in();
        state.handle_ui_event(UiEvent::OpenCreateAccount);
        state.handle_ui_event(UiEvent::ModalChar('W'));
        state.handle_ui_event(UiEvent::ModalSubmit);

        let (id, op) = issued(&mut state)[0].clone();
        assert!(matches!(op, ApiOp::AccountCreate { .. }));
        reply(&mut state, id, ok_env(Value::Null));

        assert!(!state.views.modal(MODAL_CREATE_ACCOUNT).unwrap().is_open());
        let purposes: Vec<_> = state.pending.values().cloned().collect();
        assert!(purposes.contains(&Pending::AccountsWidget));
        assert!(purposes
            .iter()
            .any(|p| matches!(p, Pending::FormOptions { .. })));
    }

    #[test]
    fn test_bootstrap_without_session_opens_login() {
        let mut state = AppState::new().unwrap();
        state.bootstrap();
        let ops = issued(&mut state);
        let (id, _) = ops
            .iter()
            .find(|(_, op)| matches!(op, ApiOp::CurrentUser))
            .cloned()
            .unwrap();
        reply(&mut state, id, rejected());
        assert!(state.views.modal(MODAL_LOGIN).unwrap().is_open());
        assert!(!state.logged_in());
    }

    #[test]
    fn test_bootstrap_with_session_logs_in() {
        let mut state = AppState::new().unwrap();
        state.bootstrap();
        let ops = issued(&mut state);
        let (id, _) = ops
            .iter()
            .find(|(_, op)| matches!(op, ApiOp::CurrentUser))
            .cloned()
            .unwrap();
        reply(
            &mut state,
            id,
            ok_env(json!({"id": "1", "name": "Alice", "email": "a@x.io"})),
        );
        assert!(state.logged_in());
        assert!(state.pending.values().any(|p| *p == Pending::AccountsWidget));
    }

    #[test]
    fn test_logout_clears_session_and_reopens_login() {
        let mut state = logged_in();
        state.update_widgets();
        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, ok_env(accounts_json()));
        bind_page(&mut state);

        state.handle_ui_event(UiEvent::Logout);
        let (id, op) = issued(&mut state)[0].clone();
        assert!(matches!(op, ApiOp::Logout));
        reply(&mut state, id, ok_env(Value::Null));

        assert!(!state.logged_in());
        assert!(state.user.is_none());
        assert!(state.views.accounts_widget_ref().unwrap().accounts.is_empty());
        assert!(state.views.page(PAGE_TRANSACTIONS).unwrap().rows.is_empty());
        assert!(state.views.modal(MODAL_LOGIN).unwrap().is_open());
        // the user widget intentionally keeps the last-known name
        assert_eq!(state.views.user_widget_ref().unwrap().name, "Alice");
    }

    #[test]
    fn test_form_options_fail_open() {
        let mut state = logged_in();
        state.update_forms();
        for (id, _) in issued(&mut state) {
            reply(&mut state, id, Err("connection refused".into()));
        }
        let form = state.views.transaction_form(FORM_CREATE_INCOME).unwrap();
        assert!(form.options.is_empty());
        assert!(form.selected.is_none());
    }

    #[test]
    fn test_unknown_reply_id_is_dropped() {
        let mut state = logged_in();
        reply(&mut state, 9999, ok_env(Value::Null));
        assert!(issued(&mut state).is_empty());
    }

    #[test]
    fn test_reply_after_clear_still_lands() {
        let mut state = logged_in();
        state.show_page(
            PAGE_TRANSACTIONS,
            PageOptions {
                account_id: "7".into(),
            },
        );
        let ops = issued(&mut state);
        let (title_id, _) = ops[0].clone();

        if let Some(page) = state.views.get_page(PAGE_TRANSACTIONS) {
            page.clear();
        }
        reply(
            &mut state,
            title_id,
            ok_env(json!({"id": "7", "name": "Cash", "sum": 100})),
        );
        // nothing cancels: the title write happened anyway
        assert_eq!(state.views.page(PAGE_TRANSACTIONS).unwrap().title, "Cash");
    }

    #[test]
    fn test_dismiss_closes_the_open_dialog_only() {
        let mut state = logged_in();
        state.handle_ui_event(UiEvent::OpenCreateAccount);
        assert!(state.views.modal(MODAL_CREATE_ACCOUNT).unwrap().is_open());
        state.handle_ui_event(UiEvent::ModalDismiss);
        assert!(state.views.open_modal_name().is_none());
        // a second dismiss is harmless
        state.handle_ui_event(UiEvent::ModalDismiss);
    }

    #[test]
    fn test_open_income_preseeds_active_account() {
        let mut state = logged_in();
        load_form_options(&mut state);
        state.update_widgets();
        let (id, _) = issued(&mut state)[0].clone();
        reply(&mut state, id, ok_env(accounts_json()));

        state.accounts_cursor = 1;
        state.handle_ui_event(UiEvent::SelectAccount);
        issued(&mut state);

        state.handle_ui_event(UiEvent::OpenNewIncome);
        let form = state.views.transaction_form(FORM_CREATE_INCOME).unwrap();
        assert_eq!(form.selected, Some(1));
    }
}
