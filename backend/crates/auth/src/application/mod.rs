//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credential;
pub mod delete_user;
pub mod get_user;
pub mod login;
pub mod register;
pub mod update_user;

// Re-exports
pub use config::AuthConfig;
pub use credential::CredentialService;
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use update_user::{UpdateUserInput, UpdateUserUseCase};
