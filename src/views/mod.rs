//! View components and the name->instance registry binding them together.
//!
//! The registry is populated once at startup and never torn down. Every
//! cross-component refresh call resolves through an `Option`-returning
//! lookup, so choreography against an unknown name is a no-op by
//! construction rather than a panic.

pub mod form;
pub mod modal;
pub mod page;
pub mod tree;
pub mod widgets;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::constants::{
    FORM_CREATE_ACCOUNT, FORM_CREATE_EXPENSE, FORM_CREATE_INCOME, FORM_LOGIN,
    MODAL_CREATE_ACCOUNT, MODAL_LOGIN, MODAL_NEW_EXPENSE, MODAL_NEW_INCOME, PAGE_TRANSACTIONS,
    WIDGET_ACCOUNTS, WIDGET_TRANSACTIONS, WIDGET_USER,
};
use crate::messages::gateway::ApiOp;
use crate::models::TransactionKind;

pub use form::{CreateAccountForm, CreateTransactionForm, LoginForm, SubmitForm};
pub use modal::Modal;
pub use page::TransactionsPage;
pub use tree::{ViewError, ViewTree};
pub use widgets::{AccountsWidget, TransactionsWidget, UserWidget};

/// Dialog names in the order the UI checks them
pub const MODAL_NAMES: [&str; 4] = [
    MODAL_LOGIN,
    MODAL_CREATE_ACCOUNT,
    MODAL_NEW_INCOME,
    MODAL_NEW_EXPENSE,
];

/// A registered form instance
#[derive(Debug)]
pub enum Form {
    Login(LoginForm),
    CreateAccount(CreateAccountForm),
    CreateTransaction(CreateTransactionForm),
}

impl Form {
    pub fn input_char(&mut self, c: char) {
        match self {
            Form::Login(f) => f.input_char(c),
            Form::CreateAccount(f) => f.input_char(c),
            Form::CreateTransaction(f) => f.input_char(c),
        }
    }

    pub fn backspace(&mut self) {
        match self {
            Form::Login(f) => f.backspace(),
            Form::CreateAccount(f) => f.backspace(),
            Form::CreateTransaction(f) => f.backspace(),
        }
    }

    pub fn next_field(&mut self) {
        match self {
            Form::Login(f) => f.next_field(),
            Form::CreateAccount(f) => f.next_field(),
            Form::CreateTransaction(f) => f.next_field(),
        }
    }

    pub fn option_prev(&mut self) {
        if let Form::CreateTransaction(f) = self {
            f.option_prev();
        }
    }

    pub fn option_next(&mut self) {
        if let Form::CreateTransaction(f) = self {
            f.option_next();
        }
    }

    /// Base submission behavior: serialize the current field values and
    /// hand the record to the variant's own mutation logic.
    pub fn submit_op(&self) -> Option<ApiOp> {
        let data: Map<String, Value> = self.serialize();
        match self {
            Form::Login(f) => f.on_submit(data),
            Form::CreateAccount(f) => f.on_submit(data),
            Form::CreateTransaction(f) => f.on_submit(data),
        }
    }
}

impl SubmitForm for Form {
    fn serialize(&self) -> Map<String, Value> {
        match self {
            Form::Login(f) => f.serialize(),
            Form::CreateAccount(f) => f.serialize(),
            Form::CreateTransaction(f) => f.serialize(),
        }
    }

    fn reset(&mut self) {
        match self {
            Form::Login(f) => f.reset(),
            Form::CreateAccount(f) => f.reset(),
            Form::CreateTransaction(f) => f.reset(),
        }
    }
}

/// A registered widget instance
#[derive(Debug)]
pub enum Widget {
    Accounts(AccountsWidget),
    Transactions(TransactionsWidget),
    User(UserWidget),
}

/// The four disjoint name->instance registries.
pub struct Views {
    modals: HashMap<&'static str, Modal>,
    forms: HashMap<&'static str, Form>,
    pages: HashMap<&'static str, TransactionsPage>,
    widgets: HashMap<&'static str, Widget>,
}

impl Views {
    /// Construct and register every component of the standard layout.
    /// Any component binding to an undeclared region aborts the build;
    /// nothing is partially registered.
    pub fn build(tree: &ViewTree) -> Result<Self, ViewError> {
        let mut modals = HashMap::new();
        modals.insert(MODAL_LOGIN, Modal::new(tree, "modal-login")?);
        modals.insert(MODAL_CREATE_ACCOUNT, Modal::new(tree, "modal-create-account")?);
        modals.insert(MODAL_NEW_INCOME, Modal::new(tree, "modal-new-income")?);
        modals.insert(MODAL_NEW_EXPENSE, Modal::new(tree, "modal-new-expense")?);

        let mut forms = HashMap::new();
        forms.insert(FORM_LOGIN, Form::Login(LoginForm::new(tree)?));
        forms.insert(
            FORM_CREATE_ACCOUNT,
            Form::CreateAccount(CreateAccountForm::new(tree)?),
        );
        forms.insert(
            FORM_CREATE_INCOME,
            Form::CreateTransaction(CreateTransactionForm::new(
                tree,
                "modal-new-income",
                TransactionKind::Income,
            )?),
        );
        forms.insert(
            FORM_CREATE_EXPENSE,
            Form::CreateTransaction(CreateTransactionForm::new(
                tree,
                "modal-new-expense",
                TransactionKind::Expense,
            )?),
        );

        let mut pages = HashMap::new();
        pages.insert(PAGE_TRANSACTIONS, TransactionsPage::new(tree)?);

        let mut widgets = HashMap::new();
        widgets.insert(WIDGET_ACCOUNTS, Widget::Accounts(AccountsWidget::new(tree)?));
        widgets.insert(
            WIDGET_TRANSACTIONS,
            Widget::Transactions(TransactionsWidget::new(tree)?),
        );
        widgets.insert(WIDGET_USER, Widget::User(UserWidget::new(tree)?));

        Ok(Views {
            modals,
            forms,
            pages,
            widgets,
        })
    }

    // Registry lookups; an unknown name resolves to None and the caller
    // no-ops.

    pub fn get_modal(&mut self, name: &str) -> Option<&mut Modal> {
        self.modals.get_mut(name)
    }

    pub fn get_form(&mut self, name: &str) -> Option<&mut Form> {
        self.forms.get_mut(name)
    }

    pub fn get_page(&mut self, name: &str) -> Option<&mut TransactionsPage> {
        self.pages.get_mut(name)
    }

    pub fn get_widget(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(name)
    }

    pub fn modal(&self, name: &str) -> Option<&Modal> {
        self.modals.get(name)
    }

    pub fn form(&self, name: &str) -> Option<&Form> {
        self.forms.get(name)
    }

    pub fn page(&self, name: &str) -> Option<&TransactionsPage> {
        self.pages.get(name)
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.get(name)
    }

    // Typed conveniences over the generic lookups.

    pub fn accounts_widget(&mut self) -> Option<&mut AccountsWidget> {
        match self.get_widget(WIDGET_ACCOUNTS) {
            Some(Widget::Accounts(w)) => Some(w),
            _ => None,
        }
    }

    pub fn accounts_widget_ref(&self) -> Option<&AccountsWidget> {
        match self.widget(WIDGET_ACCOUNTS) {
            Some(Widget::Accounts(w)) => Some(w),
            _ => None,
        }
    }

    pub fn user_widget(&mut self) -> Option<&mut UserWidget> {
        match self.get_widget(WIDGET_USER) {
            Some(Widget::User(w)) => Some(w),
            _ => None,
        }
    }

    pub fn user_widget_ref(&self) -> Option<&UserWidget> {
        match self.widget(WIDGET_USER) {
            Some(Widget::User(w)) => Some(w),
            _ => None,
        }
    }

    pub fn transactions_widget(&self) -> Option<&TransactionsWidget> {
        match self.widget(WIDGET_TRANSACTIONS) {
            Some(Widget::Transactions(w)) => Some(w),
            _ => None,
        }
    }

    /// The create-transaction form registered under `name`, if that is
    /// what the name resolves to.
    pub fn transaction_form(&mut self, name: &str) -> Option<&mut CreateTransactionForm> {
        match self.get_form(name) {
            Some(Form::CreateTransaction(f)) => Some(f),
            _ => None,
        }
    }

    /// Names of all create-transaction forms, for fan-out refreshes.
    pub fn transaction_form_names(&self) -> Vec<&'static str> {
        [FORM_CREATE_INCOME, FORM_CREATE_EXPENSE]
            .into_iter()
            .filter(|name| matches!(self.forms.get(*name), Some(Form::CreateTransaction(_))))
            .collect()
    }

    /// The dialog currently shown, if any. At most one is ever open.
    pub fn open_modal_name(&self) -> Option<&'static str> {
        MODAL_NAMES
            .into_iter()
            .find(|name| self.modals.get(*name).is_some_and(|m| m.is_open()))
    }
}
