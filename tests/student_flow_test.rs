//! 学生参加考试的完整流程：登记作答 → 会话 → 结果 / 回到列表

use exam_portal_client::models::User;
use exam_portal_client::orchestrator::student_shell::StudentShell;
use exam_portal_client::Config;
use std::path::PathBuf;
use tokio::sync::mpsc;

mod common;
use common::FakeServer;

// 时长为 0，加载后立即自动交卷，不需要输入
const EXAM: &str = r#"{"id":"e1","title":"Ujian Biologi","subject_id":"s1","subject_name":"Biologi","duration_minutes":0,"total_points":20}"#;
const QUESTIONS: &str = r#"[{"id":"q1","exam_id":"e1","question_text":"Organel penghasil energi?","question_type":"multiple_choice","options":["Mitokondria","Ribosom"],"points":10,"order":0},
    {"id":"q2","exam_id":"e1","question_text":"Jelaskan osmosis","question_type":"essay","points":10,"order":1}]"#;
const SUBMITTED: &str = r#"{"message":"Exam submitted successfully","score":10.0,"total_points":20}"#;
const STARTED: &str = r#"{"id":"se1","exam_id":"e1","student_id":"u1","student_name":"Rina","exam_title":"Ujian Biologi","status":"in_progress"}"#;

fn student() -> User {
    serde_json::from_str(
        r#"{"id":"u1","email":"rina@sekolah.id","name":"Rina","role":"student","class_name":"XI IPS 2"}"#,
    )
    .unwrap()
}

fn log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "exam_client_sessions_{}_{}.txt",
        std::process::id(),
        name
    ))
}

fn config_for(server: &FakeServer, log_file: &PathBuf) -> Config {
    Config {
        api_base_url: server.base_url.clone(),
        output_log_file: log_file.to_string_lossy().to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// 已关闭的输入源
fn no_input() -> mpsc::UnboundedReceiver<String> {
    let (_tx, rx) = mpsc::unbounded_channel();
    rx
}

fn has_request(server: &FakeServer, prefix: &str) -> bool {
    server.requests().iter().any(|r| r.starts_with(prefix))
}

#[tokio::test]
async fn test_in_progress_attempt_resumes_without_start() {
    let server = FakeServer::start(vec![
        (
            "GET /api/exams/history",
            200,
            r#"[{"id":"se1","exam_id":"e1","student_id":"u1","student_name":"Rina","exam_title":"Ujian Biologi","status":"in_progress"}]"#,
        ),
        ("POST /api/exams/e1/start", 400, r#"{"detail":"Exam already started or completed"}"#),
        ("GET /api/exams/e1/questions", 200, QUESTIONS),
        ("GET /api/exams/e1 ", 200, EXAM),
        ("POST /api/exams/e1/submit", 200, SUBMITTED),
    ])
    .await;
    let log = log_path("resume");
    let _ = std::fs::remove_file(&log);

    let config = config_for(&server, &log);
    let api = server.client().with_token(Some("student-token".to_string()));
    let user = student();

    StudentShell::new(&user, &api, &config)
        .take_exam_with_input("e1", no_input())
        .await
        .unwrap();

    assert!(!has_request(&server, "post /api/exams/e1/start"));
    assert!(has_request(&server, "get /api/exams/e1 "));
    assert!(has_request(&server, "post /api/exams/e1/submit"));

    let written = std::fs::read_to_string(&log).unwrap();
    assert!(written.contains("Ujian Biologi (e1)"));
    assert!(written.contains("10/20"));
    let _ = std::fs::remove_file(&log);
}

#[tokio::test]
async fn test_new_attempt_starts_then_completes() {
    let server = FakeServer::start(vec![
        ("GET /api/exams/history", 200, "[]"),
        ("POST /api/exams/e1/start", 200, STARTED),
        ("GET /api/exams/e1/questions", 200, QUESTIONS),
        ("GET /api/exams/e1 ", 200, EXAM),
        ("POST /api/exams/e1/submit", 200, SUBMITTED),
    ])
    .await;
    let log = log_path("fresh");
    let _ = std::fs::remove_file(&log);

    let config = config_for(&server, &log);
    let api = server.client().with_token(Some("student-token".to_string()));
    let user = student();

    StudentShell::new(&user, &api, &config)
        .take_exam_with_input("e1", no_input())
        .await
        .unwrap();

    let requests = server.requests();
    let start = requests
        .iter()
        .position(|r| r.starts_with("post /api/exams/e1/start"))
        .unwrap();
    let submit = requests
        .iter()
        .position(|r| r.starts_with("post /api/exams/e1/submit"))
        .unwrap();
    assert!(start < submit);
    // 未作答的题目以空串提交
    assert!(requests[submit].contains(r#"{"question_id":"q2","answer_text":""}"#));
    assert!(log.exists());
    let _ = std::fs::remove_file(&log);
}

#[tokio::test]
async fn test_start_failure_reports_detail_and_skips_session() {
    let server = FakeServer::start(vec![
        ("GET /api/exams/history", 200, "[]"),
        ("POST /api/exams/e1/start", 400, r#"{"detail":"Exam not found"}"#),
    ])
    .await;
    let log = log_path("start_failure");
    let config = config_for(&server, &log);
    let api = server.client().with_token(Some("student-token".to_string()));
    let user = student();

    let err = StudentShell::new(&user, &api, &config)
        .take_exam_with_input("e1", no_input())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("无法开始考试 e1"));
    assert!(format!("{:#}", err).contains("status=400"));
    assert!(!has_request(&server, "get /api/exams/e1"));
    assert!(!log.exists());
}

#[tokio::test]
async fn test_finished_exam_is_not_restarted() {
    let server = FakeServer::start(vec![(
        "GET /api/exams/history",
        200,
        r#"[{"id":"se1","exam_id":"e1","student_id":"u1","student_name":"Rina","exam_title":"Ujian Biologi","score":15,"total_points":20,"status":"graded"}]"#,
    )])
    .await;
    let log = log_path("finished");
    let config = config_for(&server, &log);
    let api = server.client().with_token(Some("student-token".to_string()));
    let user = student();

    let err = StudentShell::new(&user, &api, &config)
        .take_exam_with_input("e1", no_input())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("不能再次作答"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_load_failure_returns_to_available_exams() {
    let server = FakeServer::start(vec![
        ("GET /api/exams/history", 200, "[]"),
        ("POST /api/exams/e1/start", 200, STARTED),
        ("GET /api/exams/e1", 404, r#"{"detail":"Exam not found"}"#),
        (
            "GET /api/exams ",
            200,
            r#"[{"id":"e2","title":"Ujian Kimia","subject_id":"s2","duration_minutes":45}]"#,
        ),
    ])
    .await;
    let log = log_path("load_failure");
    let config = config_for(&server, &log);
    let api = server.client().with_token(Some("student-token".to_string()));
    let user = student();

    StudentShell::new(&user, &api, &config)
        .take_exam_with_input("e1", no_input())
        .await
        .unwrap();

    assert!(has_request(&server, "get /api/exams http"));
    assert!(!has_request(&server, "post /api/exams/e1/submit"));
    assert!(!log.exists());
}
