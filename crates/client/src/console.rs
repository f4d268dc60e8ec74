//! Controller behind the users pages.
//!
//! Owns the session, the loaded user collection and the table state. Every
//! operation that reaches the backend authorizes itself first, whatever the
//! UI showed, and resolves to an [`Outcome`].

use chrono::Utc;

use adminconsole_auth::{
    AuthzError, Capability, ModuleId, PermissionGate, RequiresCapability, Session, authorize_action,
};
use adminconsole_core::{UserId, ValidationErrors};
use adminconsole_view::{
    CategoricalFilter, Page, RecordCollection, SortSpec, TableView, ViewState, distinct_values,
};

use crate::config::ClientConfig;
use crate::directory::{HttpUserDirectory, UserDirectory};
use crate::error::ConsoleError;
use crate::outcome::Outcome;
use crate::store::{FileSessionStore, SessionStore};
use crate::users::{INVALID_EMAIL_MESSAGE, NewUser, UserRecord, UserUpdate, is_valid_email};

/// Records requested per refresh; the table paginates locally.
pub const LIST_FETCH_SIZE: u32 = 500;

pub const SEARCH_FIELDS: [&str; 5] = ["displayName", "email", "username", "employeeId", "role"];
pub const FILTER_FIELDS: [&str; 3] = ["employeeType", "departmentName", "status"];

/// What a console operation needs from the permission gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserAction {
    List,
    View,
    Create,
    Update,
    Delete,
}

impl RequiresCapability for UserAction {
    fn module(&self) -> ModuleId {
        ModuleId::Users
    }

    fn capability(&self) -> Capability {
        match self {
            UserAction::List | UserAction::View => Capability::View,
            UserAction::Create | UserAction::Update | UserAction::Delete => Capability::Write,
        }
    }
}

pub struct UsersConsole<D, S> {
    directory: D,
    store: S,
    session: Option<Session>,
    users: RecordCollection<UserRecord>,
    state: ViewState,
    table: TableView<UserRecord>,
}

impl UsersConsole<HttpUserDirectory, FileSessionStore> {
    /// Console talking to the proxy at `api_base_url`, persisting to `session_path`.
    pub fn from_config(config: &ClientConfig) -> Self {
        tracing::info!(
            api = %config.api_base_url,
            session = %config.session_path.display(),
            "users console configured"
        );
        Self::new(
            HttpUserDirectory::new(config.api_base_url.clone()),
            FileSessionStore::new(config.session_path.clone()),
        )
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        Ok(Self::from_config(&config))
    }
}

impl<D: UserDirectory, S: SessionStore> UsersConsole<D, S> {
    pub fn new(directory: D, store: S) -> Self {
        let mut table = TableView::new().search_on(SEARCH_FIELDS);
        for field in FILTER_FIELDS {
            table = table.with_filter(CategoricalFilter::on(field));
        }

        let mut state = ViewState::new();
        state.set_sort(Some(SortSpec::asc("displayName")));

        Self {
            directory,
            store,
            session: None,
            users: RecordCollection::default(),
            state,
            table,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn gate(&self) -> PermissionGate {
        match &self.session {
            Some(session) => session.gate(Utc::now()),
            None => PermissionGate::anonymous(),
        }
    }

    pub fn can_view(&self, module: ModuleId) -> bool {
        self.gate().can_view(module)
    }

    pub fn can_write(&self, module: ModuleId) -> bool {
        self.gate().can_write(module)
    }

    /// Load the persisted session, if any and still valid.
    pub fn restore(&mut self) -> Outcome<String> {
        let result = self.try_restore();
        Outcome::from_result("restore_session", result, "Session restored", "No saved session")
    }

    fn try_restore(&mut self) -> Result<String, ConsoleError> {
        let session = self
            .store
            .load()?
            .ok_or(ConsoleError::Authz(AuthzError::Unauthenticated))?;

        if let Err(e) = session.validate(Utc::now()) {
            self.store.clear()?;
            self.session = None;
            return Err(e.into());
        }

        let name = session.name.clone();
        self.session = Some(session);
        Ok(name)
    }

    /// Sign in; on success the session is persisted and becomes current.
    pub async fn login(&mut self, email: &str, password: &str) -> Outcome<String> {
        let result = self.try_login(email.trim(), password).await;
        Outcome::from_result("login", result, "Login successful", "Login failed")
    }

    async fn try_login(&mut self, email: &str, password: &str) -> Result<String, ConsoleError> {
        let mut errors = ValidationErrors::new();
        if email.is_empty() {
            errors.push("email", "Email is required.");
        } else if !is_valid_email(email) {
            errors.push("email", INVALID_EMAIL_MESSAGE);
        }
        if password.is_empty() {
            errors.push("password", "Password is required.");
        }
        errors.into_result()?;

        let grant = self.directory.login(email, password).await?;
        let session = grant.into_session(email)?;
        session.validate(Utc::now())?;

        self.store.save(&session)?;
        let name = session.name.clone();
        tracing::info!(session_id = %session.session_id, role = %session.role, "signed in");

        self.session = Some(session);
        self.users.replace(Vec::new());
        Ok(name)
    }

    /// Forget the session locally. Always succeeds from the operator's view;
    /// storage failures are logged.
    pub fn logout(&mut self) -> Outcome<()> {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "failed to clear stored session");
        }
        self.session = None;
        self.users.replace(Vec::new());
        self.state = ViewState::new();
        self.state.set_sort(Some(SortSpec::asc("displayName")));
        Outcome::ok("Signed out", ())
    }

    fn authorize(&self, action: UserAction) -> Result<String, ConsoleError> {
        authorize_action(&self.gate(), &action)?;
        self.session
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(ConsoleError::Authz(AuthzError::Unauthenticated))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Listing
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch the user list without touching local state.
    ///
    /// Pair with [`UsersConsole::apply_users`]. Responses are applied in the
    /// order they are handed back: a slow, older fetch applied last replaces
    /// newer data.
    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, ConsoleError> {
        let token = self.authorize(UserAction::List)?;
        Ok(self
            .directory
            .list_users(&token, 1, LIST_FETCH_SIZE)
            .await?)
    }

    /// Replace the collection with a completed fetch; failures leave it as is.
    pub fn apply_users(&mut self, result: Result<Vec<UserRecord>, ConsoleError>) -> Outcome<usize> {
        let result = result.map(|users| {
            let count = users.len();
            self.users.replace(users);
            count
        });
        Outcome::from_result("list_users", result, "Users loaded", "Failed to fetch users")
    }

    pub async fn refresh(&mut self) -> Outcome<usize> {
        let result = self.fetch_users().await;
        self.apply_users(result)
    }

    pub async fn get_user(&self, id: &UserId) -> Outcome<UserRecord> {
        let result = self.try_get(id).await;
        Outcome::from_result("get_user", result, "User loaded", "Failed to fetch user")
    }

    async fn try_get(&self, id: &UserId) -> Result<UserRecord, ConsoleError> {
        let token = self.authorize(UserAction::View)?;
        Ok(self.directory.get_user(&token, id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations (no optimistic updates: the list is reloaded on success)
    // ─────────────────────────────────────────────────────────────────────

    pub async fn create_user(&mut self, user: NewUser) -> Outcome<Option<UserRecord>> {
        let result = self.try_create(&user).await;
        Outcome::from_result(
            "create_user",
            result,
            "User created successfully!",
            "Failed to create user",
        )
    }

    async fn try_create(&mut self, user: &NewUser) -> Result<Option<UserRecord>, ConsoleError> {
        let token = self.authorize(UserAction::Create)?;
        user.validate()?;
        let created = self.directory.create_user(&token, user).await?;
        self.reload_after_mutation().await;
        Ok(created)
    }

    pub async fn update_user(
        &mut self,
        id: &UserId,
        update: UserUpdate,
    ) -> Outcome<Option<UserRecord>> {
        let result = self.try_update(id, &update).await;
        Outcome::from_result(
            "update_user",
            result,
            "User updated successfully",
            "Failed to update user",
        )
    }

    async fn try_update(
        &mut self,
        id: &UserId,
        update: &UserUpdate,
    ) -> Result<Option<UserRecord>, ConsoleError> {
        let token = self.authorize(UserAction::Update)?;
        update.validate()?;
        let updated = self.directory.update_user(&token, id, update).await?;
        self.reload_after_mutation().await;
        Ok(updated)
    }

    pub async fn delete_user(&mut self, id: &UserId) -> Outcome<()> {
        let result = self.try_delete(id).await;
        Outcome::from_result(
            "delete_user",
            result,
            "User deleted successfully",
            "Failed to delete user",
        )
    }

    async fn try_delete(&mut self, id: &UserId) -> Result<(), ConsoleError> {
        let token = self.authorize(UserAction::Delete)?;
        self.directory.delete_user(&token, id).await?;
        self.reload_after_mutation().await;
        Ok(())
    }

    /// The mutation already succeeded; a failed reload only leaves the list stale.
    async fn reload_after_mutation(&mut self) {
        match self.fetch_users().await {
            Ok(users) => {
                self.users.replace(users);
            }
            Err(e) => tracing::warn!(error = %e, "reload after mutation failed"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────

    pub fn users(&self) -> &[UserRecord] {
        self.users.as_slice()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn view_state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn set_page_size(&mut self, size: usize) -> Outcome<()> {
        let result = self.state.set_page_size(size).map_err(ConsoleError::from);
        Outcome::from_result("set_page_size", result, "Page size updated", "Invalid page size")
    }

    /// Rows of the current page after search, filters and sort.
    pub fn page(&self) -> Page<'_, UserRecord> {
        self.table.compute(self.users.as_slice(), &self.state)
    }

    /// Option list for one of the categorical filters.
    pub fn filter_options(&self, field: &str) -> Vec<String> {
        distinct_values(self.users.iter(), field)
    }
}
