//! Command handlers shared by the CLI entrypoint.
//!
//! Each handler drives one account operation and folds the outcome into a
//! [`MessageResponse`], so the binary only has to print it.

use roster_accounts::{
    AccountResult, AccountService, CreateUserRequest, LoginRequest, MessageResponse, UserStore,
};
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

/// How `get-user` addresses an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Username(String),
    Id(i64),
}

fn respond<T: Serialize>(success: &str, failure: &str, outcome: AccountResult<T>) -> MessageResponse {
    match outcome {
        Ok(result) => MessageResponse::ok(success, &result),
        Err(error) => MessageResponse::from_error(failure, &error),
    }
}

pub async fn create_user<S: UserStore>(
    service: &AccountService<S>,
    request: &CreateUserRequest,
    cancel: &CancellationToken,
) -> MessageResponse {
    let outcome = service
        .create_user(request, cancel)
        .await
        .map(|id| json!({ "id": id }));
    respond("user created", "unable to create user", outcome)
}

pub async fn list_users<S: UserStore>(
    service: &AccountService<S>,
    cancel: &CancellationToken,
) -> MessageResponse {
    let outcome = service.list_users(cancel).await;
    respond("users listed", "unable to list users", outcome)
}

pub async fn get_user<S: UserStore>(
    service: &AccountService<S>,
    lookup: &Lookup,
    cancel: &CancellationToken,
) -> MessageResponse {
    let outcome = match lookup {
        Lookup::Username(username) => service.get_user_by_username(username, cancel).await,
        Lookup::Id(id) => service.get_user_by_id(*id, cancel).await,
    };
    respond("user found", "unable to fetch user", outcome)
}

pub async fn login<S: UserStore>(
    service: &AccountService<S>,
    request: &LoginRequest,
    cancel: &CancellationToken,
) -> MessageResponse {
    let outcome = service.authenticate(request, cancel).await;
    respond("login successful", "login failed", outcome)
}

/// Use the password given on the command line, or read one line from `input`.
pub async fn resolve_password<R>(given: Option<String>, input: &mut R) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    if let Some(password) = given {
        return Ok(password);
    }

    let mut line = String::new();
    input.read_line(&mut line).await?;
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_accounts::InMemoryUserStore;
    use roster_config::AccountsConfig;

    fn service() -> AccountService<InMemoryUserStore> {
        AccountService::in_memory(AccountsConfig::default())
    }

    fn ada() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ada".into(),
            username: "ada".into(),
            age: 36,
            password: "engine".into(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_by_username() {
        let service = service();
        let cancel = CancellationToken::new();

        let created = create_user(&service, &ada(), &cancel).await;
        assert!(!created.is_error());
        assert_eq!(created.result, Some(json!({ "id": 1 })));

        let fetched = get_user(&service, &Lookup::Username("ada".into()), &cancel).await;
        let result = fetched.result.expect("user payload");
        assert_eq!(result["username"], "ada");
        assert!(result.get("password").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_create_reports_conflict() {
        let service = service();
        let cancel = CancellationToken::new();

        create_user(&service, &ada(), &cancel).await;
        let again = create_user(&service, &ada(), &cancel).await;

        assert!(again.is_error());
        assert_eq!(again.message, "already exists: unable to create user");
    }

    #[tokio::test]
    async fn test_get_missing_id_reports_not_found() {
        let service = service();
        let response = get_user(&service, &Lookup::Id(42), &CancellationToken::new()).await;

        assert_eq!(response.message, "not found: unable to fetch user");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let service = service();
        let cancel = CancellationToken::new();
        create_user(&service, &ada(), &cancel).await;

        let ok = login(&service, &LoginRequest::new("ada", "engine"), &cancel).await;
        assert_eq!(ok.message, "login successful");

        let denied = login(&service, &LoginRequest::new("ada", "loom"), &cancel).await;
        assert_eq!(denied.message, "invalid credentials: login failed");
        assert_eq!(denied.error.as_deref(), Some("invalid credentials"));
    }

    #[tokio::test]
    async fn test_list_users_wraps_summaries() {
        let service = service();
        let cancel = CancellationToken::new();
        create_user(&service, &ada(), &cancel).await;

        let listed = list_users(&service, &cancel).await;
        let users = listed.result.expect("list payload");
        assert_eq!(users.as_array().map(Vec::len), Some(1));
        assert_eq!(users[0]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_resolve_password_prefers_argument() {
        let mut input: &[u8] = b"from-stdin\n";
        let password = resolve_password(Some("given".into()), &mut input).await.unwrap();
        assert_eq!(password, "given");
    }

    #[tokio::test]
    async fn test_resolve_password_reads_single_line() {
        let mut input: &[u8] = b"hunter2\r\nignored\n";
        let password = resolve_password(None, &mut input).await.unwrap();
        assert_eq!(password, "hunter2");
    }

    #[tokio::test]
    async fn test_resolve_password_keeps_inner_whitespace() {
        let mut input: &[u8] = b" pass word ";
        let password = resolve_password(None, &mut input).await.unwrap();
        assert_eq!(password, " pass word ");
    }
}
