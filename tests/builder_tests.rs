use std::time::Duration;

use gymweg::client::GymClient;
use gymweg::types::GymError;
use reqwest::Client;

#[test]
fn success_construct_client() {
    let client = GymClient::builder()
        .with_client(Client::new())
        .with_timeout(Duration::from_secs(5))
        .try_build();
    assert!(client.is_ok());
}

#[test]
fn fail_construct_client_bad_url() {
    let client = GymClient::builder().with_base_url("not a url").try_build();
    assert!(matches!(client, Err(GymError::UrlParseError(_))));
}

#[test]
fn new_client_has_no_session() {
    let client = GymClient::new(Client::new()).unwrap();
    assert!(client.session_cookies().is_empty());
}

#[test]
fn construct_client_with_cookies() {
    let client = GymClient::builder()
        .with_cookies("ASP.NET_SessionId=abc; APP_LGD_COOKIE_TEST=true")
        .try_build()
        .unwrap();
    assert_eq!(
        "ASP.NET_SessionId=abc; APP_LGD_COOKIE_TEST=true",
        client.session_cookies()
    );
}

#[test]
#[cfg(not(feature = "multi"))]
fn set_cookies_replaces_session() {
    let mut client = GymClient::builder().with_cookies("a=b").try_build().unwrap();
    client.set_cookies("Responsive=1; APP_LGD_COOKIE_TEST=true");
    assert_eq!("Responsive=1; APP_LGD_COOKIE_TEST=true", client.session_cookies());
}

#[test]
#[cfg(feature = "multi")]
fn set_cookies_replaces_session() {
    let client = GymClient::builder().with_cookies("a=b").try_build().unwrap();
    client.set_cookies("Responsive=1; APP_LGD_COOKIE_TEST=true");
    assert_eq!("Responsive=1; APP_LGD_COOKIE_TEST=true", client.session_cookies());
}
