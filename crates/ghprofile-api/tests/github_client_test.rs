#![allow(clippy::unwrap_used)]
// Integration tests for `GitHubClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ghprofile_api::{Error, GitHubClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GitHubClient) {
    let server = MockServer::start().await;
    let client = GitHubClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn octocat() -> serde_json::Value {
    json!({
        "login": "octocat",
        "id": 1,
        "name": "The Octocat",
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "bio": null,
        "company": "@github",
        "location": "San Francisco",
        "public_repos": 8,
        "followers": 20,
        "following": 9,
        "created_at": "2011-01-25T18:44:36Z",
        "html_url": "https://github.com/octocat"
    })
}

// ── Profile ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_user_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.get_user("octocat").await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.followers, 20);
    assert_eq!(user.html_url, "https://github.com/octocat");
}

#[tokio::test]
async fn test_transport_sends_github_headers() {
    let server = MockServer::start().await;
    let transport = TransportConfig::default().with_user_agent("ghprofile-test");
    let client = GitHubClient::new(server.uri().parse().unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("user-agent", "ghprofile-test"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .expect(1)
        .mount(&server)
        .await;

    client.get_user("octocat").await.unwrap();
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost-404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let err = client.get_user("ghost-404").await.unwrap_err();

    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
    assert_eq!(err.server_message(), Some("Not Found"));
}

#[tokio::test]
async fn test_get_user_rate_limited_reads_reset_header() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-RateLimit-Reset", "1700000000")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&server)
        .await;

    let err = client.get_user("octocat").await.unwrap_err();

    match err {
        Error::RateLimited {
            reset_epoch,
            message,
        } => {
            assert_eq!(reset_epoch, Some(1_700_000_000));
            assert_eq!(message.as_deref(), Some("API rate limit exceeded"));
        }
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_user_other_status_keeps_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Server Error" })))
        .mount(&server)
        .await;

    let err = client.get_user("octocat").await.unwrap_err();

    assert!(
        matches!(err, Error::Api { status: 500, .. }),
        "expected Api 500, got: {err:?}"
    );
    assert_eq!(err.server_message(), Some("Server Error"));
}

#[tokio::test]
async fn test_error_status_with_non_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client.get_user("octocat").await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "<html>Bad Gateway</html>"),
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_with_json_body_without_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let err = client.get_user("octocat").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_success_with_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_user("octocat").await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and immediately drop a server to get a port nothing listens on.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = GitHubClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();

    let err = client.get_user("octocat").await.unwrap_err();

    assert!(err.is_network_or_parse(), "expected Transport, got: {err:?}");
}

// ── Repositories ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_user_repos_query_and_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "updated"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Spoon-Knife",
                "html_url": "https://github.com/octocat/Spoon-Knife",
                "description": "This repo is for demonstration purposes only.",
                "language": "HTML",
                "stargazers_count": 12_000,
                "forks_count": 140_000,
                "homepage": ""
            },
            {
                "name": "Hello-World",
                "html_url": "https://github.com/octocat/Hello-World",
                "description": null,
                "language": null,
                "stargazers_count": 2,
                "forks_count": 1,
                "homepage": "https://octocat.github.io"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let repos = client.list_user_repos("octocat").await.unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "Spoon-Knife");
    assert_eq!(repos[0].language.as_deref(), Some("HTML"));
    assert_eq!(repos[1].name, "Hello-World");
    assert_eq!(repos[1].homepage.as_deref(), Some("https://octocat.github.io"));
}

#[tokio::test]
async fn test_list_user_repos_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repos = client.list_user_repos("octocat").await.unwrap();
    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_list_user_repos_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(451).set_body_json(json!({
            "message": "Repository access blocked"
        })))
        .mount(&server)
        .await;

    let err = client.list_user_repos("octocat").await.unwrap_err();

    assert_eq!(err.status(), Some(451));
    assert_eq!(err.server_message(), Some("Repository access blocked"));
}
