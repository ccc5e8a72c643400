mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use predicates::str::contains;
    use serde_json::{Value, json};

    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "ga4-dashboard";
    const PROPERTY_ID: &str = "480682703";
    const REPORT_PATH: &str = "/v1beta/properties/480682703:runReport";

    /// Command with a clean credential environment, run inside `dir`.
    fn command(dir: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.current_dir(dir.path())
            .env_remove("GA4_ACCESS_TOKEN")
            .env_remove("GA4_CREDENTIALS_JSON")
            .env_remove("GOOGLE_APPLICATION_CREDENTIALS")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        Ok(cmd)
    }

    fn report_args(cmd: &mut Command, server: &ServerGuard, dashboard: &str) {
        cmd.args([
            "--no-config",
            "--no-progress",
            "--property-id",
            PROPERTY_ID,
            "--display-name",
            "Buen Valle",
            "--start-date",
            "2025-10-01",
            "--end-date",
            "2025-10-31",
            "--api-base-url",
            server.url().as_str(),
            "--html-dashboard",
            dashboard,
        ]);
    }

    fn api_rows(rows: &[(&[&str], &[&str])]) -> String {
        let rows: Vec<Value> = rows
            .iter()
            .map(|(dims, metrics)| {
                json!({
                    "dimensionValues": dims.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
                    "metricValues": metrics.iter().map(|v| json!({ "value": v })).collect::<Vec<_>>(),
                })
            })
            .collect();
        let row_count = rows.len();
        json!({ "rows": rows, "rowCount": row_count }).to_string()
    }

    /// Mock for the report whose first dimension is `dimension`.
    fn report_mock(server: &mut ServerGuard, dimension: &str, body: String) -> Mock {
        server
            .mock("POST", REPORT_PATH)
            .match_header("authorization", "Bearer test-token")
            .match_body(Matcher::Regex(format!(
                r#""dimensions":\[\{{"name":"{dimension}"\}}"#
            )))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    fn mock_all_but_devices(server: &mut ServerGuard) -> Vec<Mock> {
        vec![
            report_mock(
                server,
                "date",
                api_rows(&[
                    (
                        &["20251002"],
                        &["40", "30", "50", "30", "0.6", "0.4", "120", "2.5", "300", "4000"],
                    ),
                    (
                        &["20251001"],
                        &["60", "50", "70", "40", "0.5", "0.5", "90", "2.0", "400", "5000"],
                    ),
                ]),
            ),
            report_mock(
                server,
                "sessionSource",
                api_rows(&[
                    (&["(not set)", "(not set)"], &["10", "2", "0.2", "0.8", "30"]),
                    (&["google", "organic"], &["50", "30", "0.6", "0.4", "125"]),
                ]),
            ),
            report_mock(
                server,
                "pageTitle",
                api_rows(&[
                    (&["Inicio", "/"], &["120", "3000", "200", "0.3"]),
                    (&["Habitaciones", "/rooms"], &["80", "2500", "150", "0.35"]),
                ]),
            ),
            report_mock(
                server,
                "eventName",
                api_rows(&[
                    (&["form_submit"], &["12", "8"]),
                    (&["page_view"], &["100", "90"]),
                ]),
            ),
        ]
    }

    #[test]
    fn test_help() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(contains("--property-id"))
            .stdout(contains("--channel-catch-all"));
        Ok(())
    }

    #[test]
    fn test_output__when_property_id_missing() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = command(&dir)?;

        cmd.args([
            "--no-config",
            "--start-date",
            "2025-10-01",
            "--end-date",
            "2025-10-31",
        ]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("No property id configured"));
        Ok(())
    }

    #[test]
    fn test_output__when_property_id_not_numeric() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = command(&dir)?;

        cmd.args(["--no-config", "--property-id", "properties/1"]);

        cmd.assert().failure().code(1).stderr(contains("not numeric"));
        Ok(())
    }

    #[test]
    fn test_output__when_date_invalid() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = command(&dir)?;

        cmd.args([
            "--no-config",
            "--property-id",
            PROPERTY_ID,
            "--start-date",
            "2025-13-01",
            "--end-date",
            "2025-10-31",
        ]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Invalid start_date"));
        Ok(())
    }

    #[test]
    fn test_output__when_start_after_end() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = command(&dir)?;

        cmd.args([
            "--no-config",
            "--property-id",
            PROPERTY_ID,
            "--start-date",
            "2025-11-01",
            "--end-date",
            "2025-10-31",
        ]);

        cmd.assert().failure().code(1).stderr(contains("is after"));
        Ok(())
    }

    #[test]
    fn test_output__when_no_credentials() -> TestResult {
        let dir = TempDir::new()?;
        let server = Server::new();
        let dashboard = dir.path().join("out.html");
        let mut cmd = command(&dir)?;

        report_args(&mut cmd, &server, &dashboard.to_string_lossy());

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("No credentials found"));
        assert!(!dashboard.exists());
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_invalid() -> TestResult {
        let dir = TempDir::new()?;
        let config = dir.path().join("custom.toml");
        fs::write(&config, "property_id = \"abc\"\n")?;
        let mut cmd = command(&dir)?;

        cmd.arg("--config").arg(&config);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Property id 'abc' is invalid"));
        Ok(())
    }

    #[test]
    fn test_output__when_all_sections_available() -> TestResult {
        let dir = TempDir::new()?;
        let dashboard = dir.path().join("dashboard.html");
        let mut server = Server::new();
        let _mocks = mock_all_but_devices(&mut server);
        let _devices = report_mock(
            &mut server,
            "deviceCategory",
            api_rows(&[
                (&["mobile"], &["70", "40", "0.57", "0.43", "500"]),
                (&["desktop"], &["30", "20", "0.66", "0.34", "200"]),
            ]),
        );
        let mut cmd = command(&dir)?;

        report_args(&mut cmd, &server, &dashboard.to_string_lossy());
        cmd.args(["--format", "json"]).env("GA4_ACCESS_TOKEN", "test-token");

        let output = cmd.assert().success().code(0).get_output().stdout.clone();
        let summary: Value = serde_json::from_slice(&output)?;

        assert_eq!(summary["status"], "success");
        assert_eq!(summary["property_id"], PROPERTY_ID);
        assert_eq!(summary["headline"]["total_users"], 100.0);
        assert_eq!(summary["sections"]["channels"]["rows"], 1);
        assert_eq!(
            summary["sections"]["channels"]["table"][0]["canal"],
            "google / organic"
        );
        assert_eq!(
            summary["sections"]["events"]["table"][0]["eventName"],
            "buscar_disponibilidad"
        );
        assert_eq!(
            summary["sections"]["performance"]["table"][0]["date"],
            "20251001"
        );

        let html = fs::read_to_string(&dashboard)?;
        assert!(html.contains("Analytics - Buen Valle"));
        assert!(html.contains("google / organic"));
        assert!(!html.contains("No hay datos de"));
        Ok(())
    }

    #[test]
    fn test_output__when_one_section_degrades() -> TestResult {
        let dir = TempDir::new()?;
        let dashboard = dir.path().join("dashboard.html");
        let mut server = Server::new();
        let _mocks = mock_all_but_devices(&mut server);
        let _devices = server
            .mock("POST", REPORT_PATH)
            .match_body(Matcher::Regex("deviceCategory".to_string()))
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"Field deviceCategory is invalid","status":"INVALID_ARGUMENT"}}"#)
            .create();
        let mut cmd = command(&dir)?;

        report_args(&mut cmd, &server, &dashboard.to_string_lossy());
        cmd.args(["--format", "minimal"])
            .env("GA4_ACCESS_TOKEN", "test-token");

        cmd.assert()
            .failure()
            .code(2)
            .stdout(contains("channels ok 1"))
            .stdout(contains("devices failed Request error"))
            .stdout(contains("dashboard "))
            .stderr(contains("devices"));

        let html = fs::read_to_string(&dashboard)?;
        assert!(html.contains("No hay datos de dispositivos disponibles"));
        assert!(html.contains("buscar_disponibilidad"));
        Ok(())
    }

    #[test]
    fn test_output__when_token_rejected() -> TestResult {
        let dir = TempDir::new()?;
        let dashboard = dir.path().join("dashboard.html");
        let mut server = Server::new();
        let rejected = server
            .mock("POST", REPORT_PATH)
            .with_status(401)
            .with_body(r#"{"error":{"code":401,"message":"Request had invalid authentication credentials.","status":"UNAUTHENTICATED"}}"#)
            .expect(5)
            .create();
        let mut cmd = command(&dir)?;

        report_args(&mut cmd, &server, &dashboard.to_string_lossy());
        cmd.args(["--format", "minimal"])
            .env("GA4_ACCESS_TOKEN", "expired-token");

        cmd.assert()
            .failure()
            .code(1)
            .stdout(contains("performance failed Authentication error"));
        rejected.assert();
        Ok(())
    }
}
