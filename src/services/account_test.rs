use super::*;
use crate::api::types::{ApiError, StatusResponse};
use crate::notify::{Notification, NotificationLevel};
use crate::state::{AccountState, CurrentUserStatus};
use crate::test_helpers::{Call, drain, scripted_state};

fn ctx() -> SessionContext {
    SessionContext::new("tok", "Bob@Example.com")
}

fn login_ok(user: &str, balance: &str) -> Result<UserLoginResponse, ApiError> {
    Ok(UserLoginResponse {
        status: None,
        confidios_user: Some(user.to_owned()),
        confidios_balance: Some(balance.to_owned()),
    })
}

fn rejected(status: u16) -> ApiError {
    ApiError::Status { status, body: "rejected".to_owned() }
}

fn bob_logged_in() -> UserStatus {
    UserStatus::logged_in(Some("bob".to_owned()), Some("10".to_owned()))
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_success_sets_member_status() {
    let (state, api, mut rx) = scripted_state();
    api.user_login.push(login_ok("bob", "10"));

    assert!(login(&state, &ctx()).await);

    assert_eq!(state.account.snapshot().current_user_status, CurrentUserStatus::Present(bob_logged_in()));
    assert_eq!(drain(&mut rx), vec![Notification::success(LOGIN_SUCCESS_FALLBACK)]);
}

#[tokio::test]
async fn login_sends_derived_identifier_and_token() {
    let (state, api, _rx) = scripted_state();
    api.user_login.push(login_ok("bob", "10"));

    login(&state, &ctx()).await;

    assert_eq!(
        api.calls(),
        vec![Call::UserLogin { token: "tok".to_owned(), username: "bob-at-example.com".to_owned() }]
    );
}

#[tokio::test]
async fn login_success_uses_backend_status_message() {
    let (state, api, mut rx) = scripted_state();
    api.user_login.push(Ok(UserLoginResponse { status: Some("Welcome back".to_owned()), ..Default::default() }));

    assert!(login(&state, &ctx()).await);

    assert_eq!(drain(&mut rx), vec![Notification::success("Welcome back")]);
}

#[tokio::test]
async fn login_success_with_empty_status_uses_fallback() {
    let (state, api, mut rx) = scripted_state();
    api.user_login.push(Ok(UserLoginResponse { status: Some(String::new()), ..Default::default() }));

    login(&state, &ctx()).await;

    assert_eq!(drain(&mut rx), vec![Notification::success(LOGIN_SUCCESS_FALLBACK)]);
}

#[tokio::test]
async fn login_success_without_fields_still_marks_member() {
    let (state, api, _rx) = scripted_state();
    api.user_login.push(Ok(UserLoginResponse::default()));

    assert!(login(&state, &ctx()).await);

    assert_eq!(
        state.account.snapshot().current_user_status,
        CurrentUserStatus::Present(UserStatus::logged_in(None, None))
    );
}

#[tokio::test]
async fn login_failure_from_absent_sets_only_logged_in_flag() {
    let (state, api, mut rx) = scripted_state();
    api.user_login.push(Err(rejected(401)));

    assert!(!login(&state, &ctx()).await);

    assert_eq!(
        state.account.snapshot().current_user_status,
        CurrentUserStatus::Present(UserStatus { is_logged_in: Some(false), ..UserStatus::default() })
    );
    let notes = drain(&mut rx);
    assert_eq!(notes, vec![Notification::error(LOGIN_FAILURE_MESSAGE)]);
}

#[tokio::test]
async fn login_failure_preserves_previous_fields() {
    let (state, api, _rx) = scripted_state();
    state.account.update(|s| s.with_user_status(bob_logged_in()));
    api.user_login.push(Err(ApiError::Parse("expected value".to_owned())));

    assert!(!login(&state, &ctx()).await);

    let status = state.account.snapshot().current_user_status;
    assert_eq!(status, CurrentUserStatus::Present(UserStatus { is_logged_in: Some(false), ..bob_logged_in() }));
}

#[tokio::test]
async fn login_failure_kinds_are_indistinguishable() {
    for cause in [rejected(500), ApiError::Request("refused".to_owned()), ApiError::Parse("eof".to_owned())] {
        let (state, api, mut rx) = scripted_state();
        api.user_login.push(Err(cause));

        assert!(!login(&state, &ctx()).await);
        assert_eq!(drain(&mut rx), vec![Notification::error(LOGIN_FAILURE_MESSAGE)]);
    }
}

#[tokio::test]
async fn login_leaves_admin_flag_alone() {
    let (state, api, _rx) = scripted_state();
    state.account.update(|s| s.with_admin_logged_in(true));
    api.user_login.push(Err(rejected(403)));

    login(&state, &ctx()).await;

    assert!(state.account.snapshot().is_admin_logged_in);
}

#[tokio::test]
async fn login_notifies_observers() {
    let (state, api, _rx) = scripted_state();
    let mut observer = state.account.subscribe();
    api.user_login.push(login_ok("bob", "10"));

    login(&state, &ctx()).await;

    assert!(observer.has_changed().unwrap());
    assert!(observer.borrow_and_update().current_user_status.is_logged_in());
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_success_clears_balance_and_keeps_identity() {
    let (state, api, mut rx) = scripted_state();
    state.account.update(|s| s.with_user_status(bob_logged_in()));
    api.user_logout.push(Ok(StatusResponse { status: Some("Logged out".to_owned()) }));

    assert!(logout(&state, &ctx()).await);

    let status = state.account.snapshot().current_user_status;
    assert_eq!(
        status,
        CurrentUserStatus::Present(UserStatus {
            is_member: Some(true),
            is_logged_in: Some(false),
            username: Some("bob".to_owned()),
            balance: None,
        })
    );
    assert_eq!(drain(&mut rx), vec![Notification::success("Logged out")]);
    assert_eq!(api.calls(), vec![Call::UserLogout { token: "tok".to_owned() }]);
}

#[tokio::test]
async fn logout_success_from_absent_sets_only_logged_in_flag() {
    let (state, api, mut rx) = scripted_state();
    api.user_logout.push(Ok(StatusResponse::default()));

    assert!(logout(&state, &ctx()).await);

    assert_eq!(
        state.account.snapshot().current_user_status,
        CurrentUserStatus::Present(UserStatus { is_logged_in: Some(false), ..UserStatus::default() })
    );
    assert_eq!(drain(&mut rx), vec![Notification::success(LOGOUT_SUCCESS_FALLBACK)]);
}

#[tokio::test]
async fn logout_failure_leaves_state_unchanged() {
    let (state, api, mut rx) = scripted_state();
    state.account.update(|s| s.with_user_status(bob_logged_in()));
    let before = state.account.snapshot();
    api.user_logout.push(Err(rejected(502)));

    assert!(!logout(&state, &ctx()).await);

    assert_eq!(state.account.snapshot(), before);
    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Error);
    assert_eq!(notes[0].message, LOGOUT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn logout_failure_on_absent_state_stays_absent() {
    let (state, api, _rx) = scripted_state();
    api.user_logout.push(Err(ApiError::Request("refused".to_owned())));

    assert!(!logout(&state, &ctx()).await);

    assert_eq!(state.account.snapshot(), AccountState::default());
}

// =============================================================================
// overlapping calls
// =============================================================================

#[tokio::test]
async fn concurrent_logins_last_completion_wins() {
    let (state, api, _rx) = scripted_state();
    let release_first = api.user_login.push_gated(login_ok("first", "1"));
    api.user_login.push(login_ok("second", "2"));

    let ctx = ctx();
    let (first, second) = tokio::join!(login(&state, &ctx), async {
        let ok = login(&state, &ctx).await;
        release_first.send(()).unwrap();
        ok
    });

    assert!(first && second);
    let status = state.account.snapshot().current_user_status;
    assert_eq!(status.as_present().unwrap().username.as_deref(), Some("first"));
}

#[tokio::test]
async fn concurrent_login_failure_after_success_marks_logged_out() {
    let (state, api, _rx) = scripted_state();
    let release_failure = api.user_login.push_gated(Err(rejected(500)));
    api.user_login.push(login_ok("bob", "10"));

    let ctx = ctx();
    let (failed, succeeded) = tokio::join!(login(&state, &ctx), async {
        let ok = login(&state, &ctx).await;
        release_failure.send(()).unwrap();
        ok
    });

    assert!(!failed);
    assert!(succeeded);
    let status = state.account.snapshot().current_user_status;
    assert_eq!(status, CurrentUserStatus::Present(UserStatus { is_logged_in: Some(false), ..bob_logged_in() }));
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn message_or_prefers_non_empty_status() {
    assert_eq!(message_or(Some("hi".to_owned()), "fallback"), "hi");
    assert_eq!(message_or(Some(String::new()), "fallback"), "fallback");
    assert_eq!(message_or(None, "fallback"), "fallback");
}
