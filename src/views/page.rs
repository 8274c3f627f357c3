//! Transactions page: the content region bound to one account's records.

use crate::constants::EMPTY_PAGE_TITLE;
use crate::messages::gateway::ApiOp;
use crate::models::{PageOptions, Transaction};
use crate::views::tree::{RegionId, ViewError, ViewTree};

/// The page is *empty* until `render` binds it to an account and *bound*
/// afterwards; `clear` returns it to empty. A bound page remembers its
/// filter so external callers can invalidate it without knowing the
/// current account.
#[derive(Debug)]
pub struct TransactionsPage {
    #[allow(dead_code)]
    region: RegionId,
    pub last_options: Option<PageOptions>,
    pub title: String,
    pub rows: Vec<Transaction>,
}

impl TransactionsPage {
    pub fn new(tree: &ViewTree) -> Result<Self, ViewError> {
        Ok(TransactionsPage {
            region: tree.region("content")?,
            last_options: None,
            title: String::from(EMPTY_PAGE_TITLE),
            rows: Vec::new(),
        })
    }

    /// Bind the page to an account and produce the two independent reads
    /// that fill it: account metadata for the title, the record list for
    /// the body. The reads complete in any order and fail independently;
    /// each updates only its own region on arrival.
    pub fn render(&mut self, options: PageOptions) -> (ApiOp, ApiOp) {
        let account_id = options.account_id.clone();
        self.last_options = Some(options);
        (
            ApiOp::AccountGet {
                id: account_id.clone(),
            },
            ApiOp::TransactionList { account_id },
        )
    }

    /// Re-render under the remembered filter. With no prior render there
    /// is nothing to fetch and nothing to draw.
    pub fn update(&mut self) -> Option<(ApiOp, ApiOp)> {
        self.last_options.clone().map(|options| self.render(options))
    }

    /// Drop content and title and return to the empty state.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.title = String::from(EMPTY_PAGE_TITLE);
        self.last_options = None;
    }

    /// Title region update; arrives whenever the metadata read resolves,
    /// even if the page was cleared in the interim.
    pub fn render_title(&mut self, name: String) {
        self.title = name;
    }

    /// Body region update from a freshly fetched record list.
    pub fn render_transactions(&mut self, rows: Vec<Transaction>) {
        self.rows = rows;
    }

    /// The account the page is currently bound to.
    pub fn account_id(&self) -> Option<&str> {
        self.last_options.as_ref().map(|o| o.account_id.as_str())
    }
}
