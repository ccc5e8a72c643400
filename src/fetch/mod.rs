//! Report fetching
//!
//! Issues GA4 Data API `runReport` calls and turns each response into a
//! [`Table`] whose columns are the requested dimensions followed by the
//! requested metrics.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{Config, DateRange};
use crate::core::constants::api;
use crate::core::error::{Ga4Error, Result};
use crate::table::{Cell, Table};

/// Dimensions and metrics of one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
}

impl ReportRequest {
    pub fn new(dimensions: &[&str], metrics: &[&str]) -> Self {
        Self {
            dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Column names of the fetched table, dimensions first.
    pub fn columns(&self) -> Vec<String> {
        self.dimensions
            .iter()
            .chain(self.metrics.iter())
            .cloned()
            .collect()
    }

    fn body(&self, range: &DateRange) -> RunReportBody<'_> {
        RunReportBody {
            dimensions: self.dimensions.iter().map(|name| Named { name }).collect(),
            metrics: self.metrics.iter().map(|name| Named { name }).collect(),
            date_ranges: vec![ApiDateRange {
                start_date: range.start_str(),
                end_date: range.end_str(),
            }],
        }
    }
}

#[async_trait]
pub trait RunReport: Send + Sync {
    /// Fetch one report for the configured property.
    async fn run_report(&self, request: &ReportRequest, range: &DateRange) -> Result<Table>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReportBody<'a> {
    dimensions: Vec<Named<'a>>,
    metrics: Vec<Named<'a>>,
    date_ranges: Vec<ApiDateRange>,
}

#[derive(Debug, Serialize)]
struct Named<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiDateRange {
    start_date: String,
    end_date: String,
}

/// Subset of the `runReport` response used here. `rows` is omitted by the
/// API when the range has no data.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
    #[serde(default)]
    pub row_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRow {
    #[serde(default)]
    pub dimension_values: Vec<ApiValue>,
    #[serde(default)]
    pub metric_values: Vec<ApiValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiValue {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetails {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Convert a decoded response into a table, one row per API row.
pub fn rows_to_table(request: &ReportRequest, response: RunReportResponse) -> Result<Table> {
    let mut table = Table::new(request.columns());

    for (i, row) in response.rows.into_iter().enumerate() {
        if row.dimension_values.len() != request.dimensions.len()
            || row.metric_values.len() != request.metrics.len()
        {
            return Err(Ga4Error::Request(format!(
                "row {i} has {} dimension and {} metric values, expected {} and {}",
                row.dimension_values.len(),
                row.metric_values.len(),
                request.dimensions.len(),
                request.metrics.len()
            )));
        }

        let mut cells = Vec::with_capacity(request.dimensions.len() + request.metrics.len());
        cells.extend(row.dimension_values.into_iter().map(|v| Cell::Text(v.value)));
        for (metric, value) in request.metrics.iter().zip(row.metric_values) {
            cells.push(Cell::Number(parse_metric(metric, &value.value)?));
        }
        table.push_row(cells)?;
    }

    Ok(table)
}

fn parse_metric(metric: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Ga4Error::Request(format!(
            "metric '{metric}' has non-numeric value '{raw}'"
        ))),
    }
}

/// Build the shared HTTP client with the configured timeout.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .timeout(config.timeout_duration())
        .user_agent(user_agent)
        .build()
        .map_err(Ga4Error::Http)
}

/// `runReport` client bound to one property and one access token.
#[derive(Debug, Clone)]
pub struct Ga4Client {
    client: Client,
    base_url: String,
    property_id: String,
    access_token: String,
}

impl Ga4Client {
    pub fn new(client: Client, config: &Config, access_token: String) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
            property_id: config.property_id()?.to_string(),
            access_token,
        })
    }

    pub fn report_url(&self) -> String {
        format!(
            "{}/{}/properties/{}:runReport",
            self.base_url,
            api::VERSION,
            self.property_id
        )
    }
}

#[async_trait]
impl RunReport for Ga4Client {
    async fn run_report(&self, request: &ReportRequest, range: &DateRange) -> Result<Table> {
        let url = self.report_url();
        debug!(
            "POST {url} dimensions={:?} metrics={:?}",
            request.dimensions, request.metrics
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request.body(range))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(rejection_error(status, &body));
        }

        let decoded: RunReportResponse = serde_json::from_str(&body)
            .map_err(|e| Ga4Error::Request(format!("malformed runReport response: {e}")))?;
        if let Some(row_count) = decoded.row_count {
            debug!("runReport returned {row_count} row(s)");
        }

        rows_to_table(request, decoded)
    }
}

/// Every transport failure of a report call is a request error.
fn transport_error(err: reqwest::Error) -> Ga4Error {
    match Ga4Error::from_transport(err) {
        Ga4Error::Http(err) => Ga4Error::Request(format!("transport failure: {err}")),
        mapped => mapped,
    }
}

/// Map a non-2xx API response onto the error taxonomy.
fn rejection_error(status: StatusCode, body: &str) -> Ga4Error {
    let detail = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|e| format!("{} {}", e.error.status, e.error.message).trim().to_string())
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Ga4Error::Authentication(format!("API refused credentials ({status}): {detail}"))
        }
        _ => Ga4Error::Request(format!("API rejected request ({status}): {detail}")),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};

    fn range() -> DateRange {
        DateRange::parse("2025-10-01", "2025-10-31").unwrap()
    }

    fn events_request() -> ReportRequest {
        ReportRequest::new(&["eventName"], &["eventCount", "totalUsers"])
    }

    fn config_for(server_url: &str) -> Config {
        Config {
            property_id: Some("480682703".to_string()),
            start_date: Some("2025-10-01".to_string()),
            end_date: Some("2025-10-31".to_string()),
            api_base_url: Some(server_url.to_string()),
            timeout: Some(5),
            ..Default::default()
        }
    }

    fn client_for(config: &Config) -> Ga4Client {
        Ga4Client::new(build_http_client(config).unwrap(), config, "token".to_string()).unwrap()
    }

    const EVENTS_BODY: &str = r#"{
        "dimensionHeaders": [{"name": "eventName"}],
        "metricHeaders": [{"name": "eventCount", "type": "TYPE_INTEGER"}, {"name": "totalUsers", "type": "TYPE_INTEGER"}],
        "rows": [
            {"dimensionValues": [{"value": "form_submit"}], "metricValues": [{"value": "12"}, {"value": "8"}]},
            {"dimensionValues": [{"value": "page_view"}], "metricValues": [{"value": "100"}, {"value": "90"}]}
        ],
        "rowCount": 2,
        "kind": "analyticsData#runReport"
    }"#;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(events_request().body(&range())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "dimensions": [{"name": "eventName"}],
                "metrics": [{"name": "eventCount"}, {"name": "totalUsers"}],
                "dateRanges": [{"startDate": "2025-10-01", "endDate": "2025-10-31"}]
            })
        );
    }

    #[test]
    fn test_rows_to_table__column_count_and_values() {
        let response: RunReportResponse = serde_json::from_str(EVENTS_BODY).unwrap();
        let table = rows_to_table(&events_request(), response).unwrap();

        assert_eq!(table.columns(), ["eventName", "eventCount", "totalUsers"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.texts("eventName").unwrap(), ["form_submit", "page_view"]);
        assert_eq!(table.numbers("eventCount").unwrap(), [12.0, 100.0]);
    }

    #[test]
    fn test_rows_to_table__no_rows_is_empty_table() {
        let response: RunReportResponse =
            serde_json::from_str(r#"{"kind": "analyticsData#runReport"}"#).unwrap();
        let table = rows_to_table(&events_request(), response).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_rows_to_table__non_numeric_metric() {
        let response: RunReportResponse = serde_json::from_str(
            r#"{"rows": [{"dimensionValues": [{"value": "x"}], "metricValues": [{"value": "abc"}, {"value": "1"}]}]}"#,
        )
        .unwrap();
        let err = rows_to_table(&events_request(), response).unwrap_err();
        assert!(matches!(err, Ga4Error::Request(_)));
        assert!(format!("{err}").contains("eventCount"));
    }

    #[test]
    fn test_rows_to_table__non_finite_metric() {
        let response: RunReportResponse = serde_json::from_str(
            r#"{"rows": [{"dimensionValues": [{"value": "x"}], "metricValues": [{"value": "NaN"}, {"value": "1"}]}]}"#,
        )
        .unwrap();
        assert!(rows_to_table(&events_request(), response).is_err());
    }

    #[test]
    fn test_rows_to_table__wrong_width() {
        let response: RunReportResponse = serde_json::from_str(
            r#"{"rows": [{"dimensionValues": [{"value": "x"}], "metricValues": [{"value": "1"}]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            rows_to_table(&events_request(), response),
            Err(Ga4Error::Request(_))
        ));
    }

    #[test]
    fn test_rows_to_table__decimal_rates() {
        let request = ReportRequest::new(&["deviceCategory"], &["engagementRate"]);
        let response: RunReportResponse = serde_json::from_str(
            r#"{"rows": [{"dimensionValues": [{"value": "mobile"}], "metricValues": [{"value": "0.6234"}]}]}"#,
        )
        .unwrap();
        let table = rows_to_table(&request, response).unwrap();
        assert_eq!(table.numbers("engagementRate").unwrap(), [0.6234]);
    }

    #[test]
    fn test_report_url() {
        let config = config_for("http://localhost:8080/");
        let client = client_for(&config);
        assert_eq!(
            client.report_url(),
            "http://localhost:8080/v1beta/properties/480682703:runReport"
        );
    }

    #[tokio::test]
    async fn test_run_report__success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .match_header("authorization", "Bearer token")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "dimensions": [{"name": "eventName"}],
                "dateRanges": [{"startDate": "2025-10-01", "endDate": "2025-10-31"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EVENTS_BODY)
            .create_async()
            .await;

        let config = config_for(&server.url());
        let table = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap();

        assert_eq!(table.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_report__empty_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .with_status(200)
            .with_body(r#"{"rowCount": 0}"#)
            .create_async()
            .await;

        let config = config_for(&server.url());
        let table = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_run_report__unauthorized_is_authentication_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .with_status(401)
            .with_body(r#"{"error": {"code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED"}}"#)
            .create_async()
            .await;

        let config = config_for(&server.url());
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();

        assert!(matches!(err, Ga4Error::Authentication(_)));
        assert!(format!("{err}").contains("UNAUTHENTICATED"));
    }

    #[tokio::test]
    async fn test_run_report__bad_request_is_request_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .with_status(400)
            .with_body(r#"{"error": {"code": 400, "message": "Did you mean sessions?", "status": "INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let config = config_for(&server.url());
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();

        assert!(matches!(err, Ga4Error::Request(_)));
        assert!(format!("{err}").contains("INVALID_ARGUMENT Did you mean sessions?"));
    }

    #[tokio::test]
    async fn test_run_report__non_json_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let config = config_for(&server.url());
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();
        assert!(format!("{err}").contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_run_report__timeout_is_request_error() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let silent = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = Config {
            timeout: Some(1),
            ..config_for(&format!("http://{addr}"))
        };
        let started = std::time::Instant::now();
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();

        assert!(matches!(err, Ga4Error::Request(_)));
        assert!(format!("{err}").contains("timed out"));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
        silent.abort();
    }

    #[tokio::test]
    async fn test_run_report__invalid_base_url_is_request_error() {
        let config = config_for("not a url");
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();

        assert!(matches!(err, Ga4Error::Request(_)));
        assert!(format!("{err}").contains("transport failure"));
    }

    #[tokio::test]
    async fn test_run_report__malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/properties/480682703:runReport")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let config = config_for(&server.url());
        let err = client_for(&config)
            .run_report(&events_request(), &range())
            .await
            .unwrap_err();
        assert!(matches!(err, Ga4Error::Request(_)));
    }
}
