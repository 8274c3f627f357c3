//! Always-visible panels: accounts sidebar, creation shortcuts, user name.

use crate::constants::{FORM_CREATE_EXPENSE, FORM_CREATE_INCOME, MODAL_NEW_EXPENSE, MODAL_NEW_INCOME};
use crate::messages::gateway::ApiOp;
use crate::models::{Account, User};
use crate::views::tree::{RegionId, ViewError, ViewTree};

/// Sidebar list of accounts with one exclusive active row.
#[derive(Debug)]
pub struct AccountsWidget {
    #[allow(dead_code)]
    region: RegionId,
    pub accounts: Vec<Account>,
    pub active_account_id: Option<String>,
}

impl AccountsWidget {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(AccountsWidget {
            region: tree.region("sidebar-accounts")?,
            accounts: Vec::new(),
            active_account_id: None,
        })
    }

    /// The read that refreshes the list. Only authorized sessions fetch;
    /// without a current user the widget stays as it is.
    pub fn refresh_op(&self, user: Option<&User>) -> Option<ApiOp> {
        user.map(|_| ApiOp::AccountList)
    }

    /// Drop previously rendered rows. The active id survives a refresh
    /// so the same account is re-marked when it reappears.
    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    /// Show a freshly fetched list.
    pub fn render_items(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// Mark the row at `index` active (exclusive) and hand back its id
    /// so the caller can show the transactions page for it.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let id = self.accounts.get(index)?.id.clone();
        self.active_account_id = Some(id.clone());
        Some(id)
    }

    pub fn is_active(&self, account: &Account) -> bool {
        self.active_account_id.as_deref() == Some(account.id.as_str())
    }
}

/// Stateless dispatcher for the two record-creation shortcuts: each
/// action names the dialog to open and the form to pre-seed.
#[derive(Debug)]
pub struct TransactionsWidget {
    #[allow(dead_code)]
    region: RegionId,
}

impl TransactionsWidget {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(TransactionsWidget {
            region: tree.region("sidebar-menu")?,
        })
    }

    pub fn income_target(&self) -> (&'static str, &'static str) {
        (MODAL_NEW_INCOME, FORM_CREATE_INCOME)
    }

    pub fn expense_target(&self) -> (&'static str, &'static str) {
        (MODAL_NEW_EXPENSE, FORM_CREATE_EXPENSE)
    }
}

/// Header panel showing the authenticated user's display name.
#[derive(Debug)]
pub struct UserWidget {
    #[allow(dead_code)]
    region: RegionId,
    pub name: String,
}

impl UserWidget {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(UserWidget {
            region: tree.region("header-user")?,
            name: String::new(),
        })
    }

    /// Write the current user's name. With nobody logged in the prior
    /// content is left untouched.
    pub fn update(&mut self, user: Option<&User>) {
        if let Some(user) = user {
            self.name = user.name.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.into(),
            name: name.into(),
            sum: 100.0,
        }
    }

    fn user() -> User {
        User {
            id: "1".into(),
            name: "Alice".into(),
            email: "a@x.io".into(),
        }
    }

    #[test]
    fn test_refresh_requires_current_user() {
        let w = AccountsWidget::new(&ViewTree::standard()).unwrap();
        assert!(w.refresh_op(None).is_none());
        assert!(matches!(w.refresh_op(Some(&user())), Some(ApiOp::AccountList)));
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut w = AccountsWidget::new(&ViewTree::standard()).unwrap();
        w.render_items(vec![account("1", "Cash"), account("2", "Card")]);

        assert_eq!(w.select(0), Some("1".to_string()));
        assert_eq!(w.select(1), Some("2".to_string()));

        let active: Vec<bool> = w.accounts.iter().map(|a| w.is_active(a)).collect();
        assert_eq!(active, vec![false, true]);
        assert!(w.select(5).is_none());
    }

    #[test]
    fn test_active_id_survives_clear_and_rerender() {
        let mut w = AccountsWidget::new(&ViewTree::standard()).unwrap();
        w.render_items(vec![account("1", "Cash")]);
        w.select(0);
        w.clear();
        w.render_items(vec![account("1", "Cash"), account("2", "Card")]);
        assert!(w.is_active(&w.accounts[0]));
    }

    #[test]
    fn test_user_widget_keeps_prior_name_when_logged_out() {
        let mut w = UserWidget::new(&ViewTree::standard()).unwrap();
        w.update(Some(&user()));
        assert_eq!(w.name, "Alice");
        w.update(None);
        assert_eq!(w.name, "Alice");
    }
}
