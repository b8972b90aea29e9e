//! Integration tests for the portal scrape flow
//!
//! These tests use wiremock to stand in for the portal with recorded
//! page fixtures, driving the real login and scrape pipeline end to end.

use samvidha_cli::client::{PortalClient, SessionProvider};
use samvidha_cli::config::PortalCredentials;
use samvidha_cli::error::SamvidhaError;
use samvidha_cli::scrape::ScrapeEngine;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ATTENDANCE_PAGE: &str = include_str!("fixtures/attendance.html");
const BIOMETRIC_PAGE: &str = include_str!("fixtures/biometric.html");
const REGISTER_PAGE: &str = include_str!("fixtures/register.html");

fn test_credentials() -> PortalCredentials {
    PortalCredentials {
        username: "22951A0501".to_string(),
        password: "hunter2".to_string(),
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/pages/login/checkUser.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, action: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/home"))
        .and(query_param("action", action))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Log in against the mock portal and return a ready engine
async fn logged_in_engine(server: &MockServer) -> ScrapeEngine {
    let provider = SessionProvider::new(test_credentials(), Some(server.uri()));
    let client = provider.session().await.expect("login failed");
    ScrapeEngine::new(client)
}

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_posts_credentials_as_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pages/login/checkUser.php"))
            .and(body_string_contains("username=22951A0501"))
            .and(body_string_contains("password=hunter2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PortalClient::new_with_base_url(&server.uri()).unwrap();
        client.login("22951A0501", "hunter2").await.unwrap();
    }

    #[tokio::test]
    async fn test_login_failure_status_is_an_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pages/login/checkUser.php"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PortalClient::new_with_base_url(&server.uri()).unwrap();
        let result = client.login("22951A0501", "hunter2").await;

        assert!(matches!(result, Err(SamvidhaError::Authentication(_))));
    }
}

mod report_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_report_from_fixture_pages() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_page(&server, "stud_att_STD", 200, ATTENDANCE_PAGE).await;
        mount_page(&server, "std_bio", 200, BIOMETRIC_PAGE).await;
        mount_page(&server, "std_att_register", 200, REGISTER_PAGE).await;

        let engine = logged_in_engine(&server).await;
        let report = engine.run().await.expect("scrape failed");

        // Student info block, with the derived photo URL
        assert_eq!(report.student_info.name(), Some("ASHA RANI"));
        assert_eq!(report.student_info.roll_no(), Some("22951A0501"));
        assert_eq!(report.student_info.fields.get("Branch"), Some("CSE"));
        assert_eq!(report.student_info.fields.get("Year/Sem"), Some("III / I"));
        assert_eq!(
            report.student_info.profile_image.as_deref(),
            Some("https://iare-data.s3.ap-south-1.amazonaws.com/uploads/STUDENTS/22951A0501/22951A0501.jpg")
        );

        // Course table: three subjects, note row dropped
        assert_eq!(report.course_attendance.len(), 3);
        let first = &report.course_attendance[0];
        assert_eq!(first.get("Course Code"), Some("ACS001"));
        assert_eq!(first.get("Course Name"), Some("DATA STRUCTURES"));
        assert_eq!(first.get("Attendance %"), Some("90.00"));
        assert_eq!(report.overall_average, 81.46);

        // Biometric summary discounts the trailing totals row
        let biometric = report.biometric.as_ref().expect("no biometric summary");
        assert_eq!(biometric.count, 5);
        assert_eq!(biometric.adjusted, 4);
        assert_eq!(biometric.present, 3);
        assert_eq!(biometric.percentage, 75.0);

        // Register: Date column dropped, date labels shifted forward
        assert_eq!(report.register.len(), 3);
        assert_eq!(
            report.register[0].keys().collect::<Vec<_>>(),
            vec!["Period", "Subject", "Dec 2", "Dec 3"]
        );
        assert_eq!(report.register[0].get("Dec 2"), Some("P"));
        assert_eq!(report.register[1].get("Dec 3"), Some("P"));
        // Short row is padded out to the header width
        assert_eq!(report.register[2].get("Dec 3"), Some(""));
    }

    #[tokio::test]
    async fn test_report_serializes_with_derived_fields() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_page(&server, "stud_att_STD", 200, ATTENDANCE_PAGE).await;
        mount_page(&server, "std_bio", 200, BIOMETRIC_PAGE).await;
        mount_page(&server, "std_att_register", 200, REGISTER_PAGE).await;

        let engine = logged_in_engine(&server).await;
        let report = engine.run().await.unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["student_info"]["profile_image"],
            "https://iare-data.s3.ap-south-1.amazonaws.com/uploads/STUDENTS/22951A0501/22951A0501.jpg"
        );
        assert_eq!(value["student_info"]["Name"], "ASHA RANI");
        assert_eq!(value["overall_average"], 81.46);
        assert_eq!(value["biometric"]["adjusted"], 4);
        assert_eq!(value["course_attendance"][0]["Course Code"], "ACS001");
        assert_eq!(value["register"][0]["Dec 2"], "P");
    }

    #[tokio::test]
    async fn test_empty_attendance_page_means_invalid_credentials() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_page(&server, "stud_att_STD", 200, "<html><body>Login</body></html>").await;
        mount_page(&server, "std_bio", 200, BIOMETRIC_PAGE).await;
        mount_page(&server, "std_att_register", 200, REGISTER_PAGE).await;

        let engine = logged_in_engine(&server).await;
        let result = engine.run().await;

        assert!(matches!(result, Err(SamvidhaError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_biometric_failure_degrades_to_none() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_page(&server, "stud_att_STD", 200, ATTENDANCE_PAGE).await;
        mount_page(&server, "std_bio", 500, "server error").await;
        mount_page(&server, "std_att_register", 200, REGISTER_PAGE).await;

        let engine = logged_in_engine(&server).await;
        let report = engine.run().await.expect("scrape failed");

        assert!(report.biometric.is_none());
        assert_eq!(report.overall_average, 81.46);
        assert_eq!(report.register.len(), 3);
    }

    #[tokio::test]
    async fn test_register_failure_degrades_to_empty() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_page(&server, "stud_att_STD", 200, ATTENDANCE_PAGE).await;
        mount_page(&server, "std_bio", 200, BIOMETRIC_PAGE).await;
        mount_page(&server, "std_att_register", 404, "not found").await;

        let engine = logged_in_engine(&server).await;
        let report = engine.run().await.expect("scrape failed");

        assert!(report.register.is_empty());
        assert!(report.biometric.is_some());
        assert_eq!(report.course_attendance.len(), 3);
    }
}
