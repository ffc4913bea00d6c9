use super::*;
use crate::test_helpers::auth_client;

#[tokio::test]
async fn dashboard_shows_logged_in_email() {
    let (auth, _cookies) = auth_client();
    auth.login("test@example.com", "pw").await.unwrap();
    let (notifier, _rx) = Notifier::channel();
    let page = DashboardPage::new(auth, notifier);
    assert_eq!(page.user().map(|u| u.email.as_str()), Some("test@example.com"));
    assert_eq!(page.greeting(), "Welcome, test@example.com!");
}

#[test]
fn dashboard_without_user_has_generic_greeting() {
    let (auth, _cookies) = auth_client();
    let (notifier, _rx) = Notifier::channel();
    let page = DashboardPage::new(auth, notifier);
    assert!(page.user().is_none());
    assert_eq!(page.greeting(), "Welcome!");
}

#[test]
fn navigate_to_list_targets_list_route() {
    let (auth, _cookies) = auth_client();
    let (notifier, _rx) = Notifier::channel();
    assert_eq!(DashboardPage::new(auth, notifier).navigate_to_list(), Route::List);
}

#[tokio::test]
async fn logout_clears_session_notifies_and_routes_to_login() {
    let (auth, _cookies) = auth_client();
    auth.login("test@example.com", "pw").await.unwrap();
    let (notifier, mut rx) = Notifier::channel();
    let page = DashboardPage::new(auth.clone(), notifier);

    assert_eq!(page.logout(), Route::Login);
    assert!(!auth.is_authenticated());
    let note = rx.try_recv().unwrap();
    assert_eq!(note.message, LOGGED_OUT_MESSAGE);
    assert_eq!(note.action, "Close");
}
