use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct Entry {
    id: String,
    title: String,
    content: String,
    mood: String,
    photo: Option<String>,
    date: String,
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    entries: Vec<Entry>,
    streak: u32,
}

#[derive(Debug, Deserialize)]
struct EntrySavedResponse {
    entry: Entry,
    streak: u32,
}

#[derive(Debug, Deserialize)]
struct StreakResponse {
    streak: u32,
}

#[derive(Debug, Deserialize)]
struct CalendarCell {
    day: u32,
    is_today: bool,
    entry_count: usize,
    preview: Vec<serde_json::Value>,
    overflow: usize,
}

#[derive(Debug, Deserialize)]
struct MonthRef {
    year: i32,
    month: u32,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    year: i32,
    month: u32,
    days_in_month: u32,
    leading_blanks: u32,
    previous: MonthRef,
    next: MonthRef,
    cells: Vec<CalendarCell>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("photo_journal_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/streak")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_photo_journal"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn timeline(client: &Client, base_url: &str) -> TimelineResponse {
    client
        .get(format!("{base_url}/api/entries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn create(client: &Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/entries"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_create_entry_appears_first_in_timeline() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = create(
        &client,
        &server.base_url,
        serde_json::json!({
            "title": "Morning walk",
            "content": "Fog over the river.",
            "mood": "happy",
            "photo": "data:image/png;base64,iVBORw0KGgo="
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved: EntrySavedResponse = response.json().await.unwrap();
    assert_eq!(saved.entry.title, "Morning walk");
    assert_eq!(saved.entry.mood, "happy");
    assert_eq!(saved.streak, 1);

    let after = timeline(&client, &server.base_url).await;
    assert_eq!(after.entries.first(), Some(&saved.entry));
    assert_eq!(after.streak, 1);
}

#[tokio::test]
async fn http_mood_defaults_to_neutral() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = create(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "Plain", "content": "No mood given" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved: EntrySavedResponse = response.json().await.unwrap();
    assert_eq!(saved.entry.mood, "neutral");
    assert_eq!(saved.entry.photo, None);
}

#[tokio::test]
async fn http_empty_title_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = timeline(&client, &server.base_url).await;
    let response = create(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "  ", "content": "something" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after = timeline(&client, &server.base_url).await;
    assert_eq!(after.entries, before.entries);
}

#[tokio::test]
async fn http_missing_title_is_rejected_as_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = create(
        &client,
        &server.base_url,
        serde_json::json!({ "content": "no title at all" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_delete_removes_only_that_entry() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let keep: EntrySavedResponse = create(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "Keep", "content": "stays" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let gone: EntrySavedResponse = create(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "Gone", "content": "leaves" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let before = timeline(&client, &server.base_url).await;

    let response = client
        .delete(format!("{}/api/entries/{}", server.base_url, gone.entry.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let streak: StreakResponse = response.json().await.unwrap();
    assert_eq!(streak.streak, 1);

    let after = timeline(&client, &server.base_url).await;
    assert_eq!(after.entries.len(), before.entries.len() - 1);
    assert!(after.entries.iter().all(|entry| entry.id != gone.entry.id));
    assert!(after.entries.contains(&keep.entry));

    let again = client
        .delete(format!("{}/api/entries/{}", server.base_url, gone.entry.id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_calendar_buckets_todays_entries() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    create(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "Calendar", "content": "today" }),
    )
    .await;

    let calendar: CalendarResponse = client
        .get(format!("{}/api/calendar", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(calendar.cells.len() as u32, calendar.days_in_month);
    assert!(calendar.leading_blanks < 7);
    let today = calendar
        .cells
        .iter()
        .find(|cell| cell.is_today)
        .expect("current month has a today cell");
    assert!(today.entry_count >= 1);
    assert_eq!(today.preview.len(), today.entry_count.min(4));
    assert_eq!(today.overflow, today.entry_count.saturating_sub(4));
    assert!(today.day >= 1);

    let previous: CalendarResponse = client
        .get(format!(
            "{}/api/calendar?year={}&month={}",
            server.base_url, calendar.previous.year, calendar.previous.month
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(previous.next.year, calendar.year);
    assert_eq!(previous.next.month, calendar.month);
    assert!(previous.cells.iter().all(|cell| !cell.is_today));
}

#[tokio::test]
async fn http_calendar_rejects_invalid_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/calendar?year=2026&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_reminder_requires_permission() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/notifications/permission", server.base_url))
        .json(&serde_json::json!({ "permission": "denied" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let reminder: Option<serde_json::Value> = client
        .get(format!("{}/api/reminder", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reminder.is_none());
}

#[tokio::test]
async fn http_index_serves_the_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("My Journal"));
    assert!(body.contains(r#"id="streak""#));
}
