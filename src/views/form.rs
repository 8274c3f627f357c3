//! Submit-driven form controllers hosted by dialogs.
//!
//! The base behavior every variant shares: serialize current field values
//! into a plain key-value record, hand it to the variant's submission
//! logic, and reset visible fields once the remote reply arrives - on
//! success AND on failure. Reset is unconditional cleanup, not a success
//! signal; closing the hosting dialog and fanning out refreshes happen on
//! success only, in the coordinator's reply handling.

use serde_json::{Map, Value};

use crate::messages::gateway::ApiOp;
use crate::models::{Account, TransactionKind};
use crate::views::tree::{RegionId, ViewError, ViewTree};

/// A single-line text field
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub secret: bool,
    pub value: String,
}

impl Field {
    fn new(name: &'static str, label: &'static str) -> Self {
        Field {
            name,
            label,
            secret: false,
            value: String::new(),
        }
    }

    fn secret(name: &'static str, label: &'static str) -> Self {
        Field {
            secret: true,
            ..Field::new(name, label)
        }
    }
}

/// Behavior common to every form variant
pub trait SubmitForm {
    /// Current field values as a plain key-value record
    fn serialize(&self) -> Map<String, Value>;

    /// Clear visible fields; runs after every reply regardless of outcome
    fn reset(&mut self);
}

fn serialize_fields(fields: &[Field]) -> Map<String, Value> {
    let mut data = Map::new();
    for field in fields {
        data.insert(field.name.to_string(), Value::String(field.value.clone()));
    }
    data
}

// ---------------------------------------------------------------------------
// Login form
// ---------------------------------------------------------------------------

/// Credentials form hosted by the login dialog
#[derive(Debug)]
pub struct LoginForm {
    #[allow(dead_code)]
    region: RegionId,
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl LoginForm {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(LoginForm {
            region: tree.region("modal-login")?,
            fields: vec![
                Field::new("email", "Email"),
                Field::secret("password", "Password"),
            ],
            focus: 0,
        })
    }

    pub fn input_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Post the credentials
    pub fn on_submit(&self, data: Map<String, Value>) -> Option<ApiOp> {
        Some(ApiOp::Login {
            payload: Value::Object(data),
        })
    }
}

impl SubmitForm for LoginForm {
    fn serialize(&self) -> Map<String, Value> {
        serialize_fields(&self.fields)
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

// ---------------------------------------------------------------------------
// Create-account form
// ---------------------------------------------------------------------------

/// Single-field form creating a new account
#[derive(Debug)]
pub struct CreateAccountForm {
    #[allow(dead_code)]
    region: RegionId,
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl CreateAccountForm {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(CreateAccountForm {
            region: tree.region("modal-create-account")?,
            fields: vec![Field::new("name", "Account name")],
            focus: 0,
        })
    }

    pub fn input_char(&mut self, c: char) {
        self.fields[self.focus].value.push(c);
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].value.pop();
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn on_submit(&self, data: Map<String, Value>) -> Option<ApiOp> {
        Some(ApiOp::AccountCreate {
            payload: Value::Object(data),
        })
    }
}

impl SubmitForm for CreateAccountForm {
    fn serialize(&self) -> Map<String, Value> {
        serialize_fields(&self.fields)
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

// ---------------------------------------------------------------------------
// Create-transaction form
// ---------------------------------------------------------------------------

/// Focus slot 0 is the account selector, text fields follow
const SELECT_SLOT: usize = 0;

/// Income/expense creation form; the kind is fixed per instance. The
/// account selector is populated from the current account list and fails
/// open: when the list cannot be loaded it simply stays empty.
#[derive(Debug)]
pub struct CreateTransactionForm {
    #[allow(dead_code)]
    region: RegionId,
    pub kind: TransactionKind,
    pub options: Vec<Account>,
    pub selected: Option<usize>,
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl CreateTransactionForm {
    pub fn new(tree: &ViewTree, region: &str, kind: TransactionKind) -> Result<Self, ViewError> {
        Ok(CreateTransactionForm {
            region: tree.region(region)?,
            kind,
            options: Vec::new(),
            selected: None,
            fields: vec![Field::new("name", "Name"), Field::new("sum", "Sum")],
            focus: SELECT_SLOT,
        })
    }

    /// The read that fills the account selector
    pub fn options_op(&self) -> ApiOp {
        ApiOp::AccountList
    }

    /// Replace the selectable option set with a freshly fetched list
    pub fn set_options(&mut self, accounts: Vec<Account>) {
        self.selected = if accounts.is_empty() { None } else { Some(0) };
        self.options = accounts;
    }

    /// Pre-select the account currently active in the accounts widget,
    /// reconciling on id equality. No active account leaves the
    /// selection untouched.
    pub fn set_selected(&mut self, active_id: Option<&str>) {
        let Some(id) = active_id else {
            return;
        };
        if let Some(pos) = self.options.iter().position(|o| o.id == id) {
            self.selected = Some(pos);
        }
    }

    pub fn option_prev(&mut self) {
        if let Some(selected) = self.selected {
            if self.focus == SELECT_SLOT && selected > 0 {
                self.selected = Some(selected - 1);
            }
        }
    }

    pub fn option_next(&mut self) {
        if let Some(selected) = self.selected {
            if self.focus == SELECT_SLOT && selected + 1 < self.options.len() {
                self.selected = Some(selected + 1);
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus > SELECT_SLOT {
            self.fields[self.focus - 1].value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus > SELECT_SLOT {
            self.fields[self.focus - 1].value.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    /// Build the create call. Without a selected account there is
    /// nothing to submit.
    pub fn on_submit(&self, data: Map<String, Value>) -> Option<ApiOp> {
        if self.selected.is_none() {
            return None;
        }
        Some(ApiOp::TransactionCreate {
            payload: Value::Object(data),
        })
    }
}

impl SubmitForm for CreateTransactionForm {
    fn serialize(&self) -> Map<String, Value> {
        let mut data = serialize_fields(&self.fields);
        data.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        if let Some(account) = self.selected.and_then(|i| self.options.get(i)) {
            data.insert("account_id".to_string(), Value::String(account.id.clone()));
        }
        data
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = SELECT_SLOT;
    }
}
