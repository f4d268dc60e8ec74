//! `adminconsole-client`: the console side of the admin tool.
//!
//! - [`UserDirectory`] is the port to the user-management backend;
//!   [`HttpUserDirectory`] reaches it through the proxy.
//! - [`SessionStore`] persists the session blob between runs.
//! - [`UsersConsole`] ties both to the permission gate and the table engine.

pub mod config;
pub mod console;
pub mod directory;
pub mod error;
pub mod outcome;
pub mod store;
pub mod users;

pub use config::ClientConfig;
pub use console::{UserAction, UsersConsole};
pub use directory::{Envelope, GrantedRole, HttpUserDirectory, LoginGrant, UserDirectory, UserList};
pub use error::{ConsoleError, DirectoryError, StoreError};
pub use outcome::Outcome;
pub use store::{FileSessionStore, InMemorySessionStore, SessionStore};
pub use users::{EmployeeType, NewUser, UserRecord, UserStatus, UserUpdate};
