#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_VARS: &[&str] = &[
    "SOQ_LEXER",
    "SOQ_STYLE",
    "SOQ_QUESTIONS",
    "SOQ_ANSWERS",
    "SOQ_API_KEY",
    "SOQ_SE",
    "SOQ_OS_HOST",
    "SOQ_OS_PORT",
    "SOQ_GOOGLE_URL",
    "SOQ_STACKEXCHANGE_URL",
];

fn config_dir() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| {
            let dir = tempfile::tempdir().expect("failed to create config dir for tests");
            std::fs::write(dir.path().join("empty.toml"), "").expect("failed to write settings");
            dir
        })
        .path()
}

/// A `soq` command isolated from the caller's `SOQ_*` environment.
///
/// Points `SOQ_CONFIG` at an empty settings file so a developer's own
/// settings never leak into assertions.
#[allow(dead_code)]
pub fn soq_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("soq"));
    cmd.timeout(CMD_TIMEOUT);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("SOQ_CONFIG", config_dir().join("empty.toml"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A `soq` command wired to mocked Google and Stack Exchange endpoints.
#[allow(dead_code)]
pub fn google_cmd(google: &MockServer, stackexchange: &MockServer) -> Command {
    let mut cmd = soq_cmd();
    cmd.env("SOQ_API_KEY", "test-key")
        .env("SOQ_SE", "test-cx")
        .env("SOQ_GOOGLE_URL", google.uri())
        .env("SOQ_STACKEXCHANGE_URL", stackexchange.uri());
    cmd
}

#[allow(dead_code)]
pub fn google_item(id: u64, title: &str, upvotes: i64) -> Value {
    json!({
        "title": title,
        "link": format!("https://stackoverflow.com/questions/{id}/slug"),
        "pagemap": {
            "question": [{
                "upvotecount": upvotes.to_string(),
                "answercount": "1",
                "datecreated": "2012-08-06T12:00:00",
            }]
        }
    })
}

#[allow(dead_code)]
pub fn answer_item(question_id: u64, answer_id: u64, score: i64, author: &str, body: &str) -> Value {
    json!({
        "owner": {"display_name": author},
        "is_accepted": false,
        "score": score,
        "creation_date": 1_344_254_400,
        "answer_id": answer_id,
        "question_id": question_id,
        "body": body,
    })
}

/// Mount a Google search response with the given items.
#[allow(dead_code)]
pub async fn mount_google(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

/// Mount a Stack Exchange answers response for any question id list.
#[allow(dead_code)]
pub async fn mount_answers(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/2\.3/questions/[0-9;]+/answers$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": items, "quota_remaining": 299 })),
        )
        .mount(server)
        .await;
}
