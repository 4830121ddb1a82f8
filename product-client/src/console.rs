//! Form-bound console
//!
//! An [`Action`] is executed against a snapshot of the form and yields a
//! [`Completion`]. Applying the completion updates the form, the flash
//! message and the result table. Splitting the two lets a front end run the
//! HTTP call off its event loop and apply whatever comes back, in arrival
//! order, with no sequencing: the last response wins.

use shared::Product;

use crate::form::ProductForm;
use crate::http::ProductApi;
use crate::table::ResultTable;
use crate::ClientError;

/// Flash text after a successful action
pub const FLASH_SUCCESS: &str = "Success";
/// Flash text after a successful delete
pub const FLASH_DELETED: &str = "Product has been Deleted!";
/// Flash text after any failed delete, whatever the backend said
pub const FLASH_DELETE_FAILED: &str = "Server error!";

/// User actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Retrieve,
    Delete,
    Search,
    Buy,
    Clear,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Update,
        Action::Retrieve,
        Action::Delete,
        Action::Search,
        Action::Buy,
        Action::Clear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Update => "Update",
            Action::Retrieve => "Retrieve",
            Action::Delete => "Delete",
            Action::Search => "Search",
            Action::Buy => "Buy",
            Action::Clear => "Clear",
        }
    }

    /// Whether the action goes over the network
    pub fn is_remote(self) -> bool {
        self != Action::Clear
    }
}

/// Result of one action, ready to be applied to the console state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Create / Update / Retrieve / Buy returned a record
    Record { action: Action, product: Product },
    /// Delete succeeded
    Deleted,
    /// Search returned a list
    Listed(Vec<Product>),
    /// The call failed; `message` is what the flash shows
    Failed { action: Action, message: String },
    /// Clear, no call made
    Cleared,
}

impl Completion {
    /// Whether applying this completion rewrites any form field
    ///
    /// Failures only set the flash, except Retrieve which blanks the
    /// data fields. A search with no hits leaves the form as it was.
    pub fn touches_form(&self) -> bool {
        match self {
            Completion::Record { .. } | Completion::Deleted | Completion::Cleared => true,
            Completion::Listed(products) => !products.is_empty(),
            Completion::Failed { action, .. } => *action == Action::Retrieve,
        }
    }
}

/// Flash text for a failed action
///
/// Delete always reports the fixed string. Everything else shows the
/// backend's `message`, or the error description when there is none.
pub fn failure_message(action: Action, error: &ClientError) -> String {
    if action == Action::Delete {
        return FLASH_DELETE_FAILED.to_string();
    }
    error
        .api_message()
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

/// Run one action against the API using the form values given
pub async fn execute<A>(api: &A, action: Action, form: &ProductForm) -> Completion
where
    A: ProductApi + ?Sized,
{
    let result = match action {
        Action::Create => api
            .create(&form.payload())
            .await
            .map(|product| Completion::Record { action, product }),
        Action::Update => api
            .update(&form.id, &form.payload())
            .await
            .map(|product| Completion::Record { action, product }),
        Action::Retrieve => api
            .retrieve(&form.id)
            .await
            .map(|product| Completion::Record { action, product }),
        Action::Buy => api
            .buy(&form.id)
            .await
            .map(|product| Completion::Record { action, product }),
        Action::Delete => api.delete(&form.id).await.map(|_| Completion::Deleted),
        Action::Search => api.search(&form.query()).await.map(Completion::Listed),
        Action::Clear => Ok(Completion::Cleared),
    };

    match result {
        Ok(completion) => {
            tracing::info!(action = action.label(), "Action completed");
            completion
        }
        Err(e) => {
            tracing::warn!(action = action.label(), error = %e, "Action failed");
            Completion::Failed {
                action,
                message: failure_message(action, &e),
            }
        }
    }
}

/// Everything a front end renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleState {
    pub form: ProductForm,
    /// Single-slot status line, overwritten by every remote action
    pub flash: Option<String>,
    /// Last search result; `None` until the first successful search
    pub results: Option<ResultTable>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flash(&self) -> &str {
        self.flash.as_deref().unwrap_or("")
    }

    /// Write a completion back into the state
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Record { product, .. } => {
                self.form.populate(&product);
                self.flash = Some(FLASH_SUCCESS.to_string());
            }
            Completion::Deleted => {
                self.form.clear();
                self.flash = Some(FLASH_DELETED.to_string());
            }
            Completion::Listed(products) => {
                let table = ResultTable::new(products);
                // 复制第一条结果到表单
                if let Some(first) = table.first() {
                    self.form.populate(first);
                }
                self.results = Some(table);
                self.flash = Some(FLASH_SUCCESS.to_string());
            }
            Completion::Failed { action, message } => {
                if action == Action::Retrieve {
                    self.form.clear_fields();
                }
                self.flash = Some(message);
            }
            Completion::Cleared => self.form.clear(),
        }
    }

    /// Execute an action and apply its completion in one step
    pub async fn dispatch<A>(&mut self, api: &A, action: Action)
    where
        A: ProductApi + ?Sized,
    {
        let completion = execute(api, action, &self.form).await;
        self.apply(completion);
    }
}
