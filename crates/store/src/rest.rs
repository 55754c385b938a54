//! Request building and response parsing for the hosted table.
//!
//! The service speaks the PostgREST dialect: filters and ordering travel in
//! the query string, inserts are JSON arrays, and
//! `Prefer: return=representation` makes the service echo inserted rows.
//! Nothing here performs I/O; the transports in `native`/`web` do.

use serde::Deserialize;

use parcels::config::StoreConfig;
use parcels::{NewParcel, ParcelRecord, StoreError};

/// Table holding the parcel rows.
pub const TABLE: &str = "parcels";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully described HTTP request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl RestRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of whatever the service answered, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn table_url(config: &StoreConfig) -> String {
    format!("{}/rest/v1/{TABLE}", config.service_url)
}

fn auth_headers(config: &StoreConfig) -> Vec<(&'static str, String)> {
    vec![
        ("apikey", config.anon_key.clone()),
        ("Authorization", format!("Bearer {}", config.anon_key)),
        ("Accept", "application/json".to_string()),
    ]
}

/// `select * order by created_at desc limit n`.
pub fn fetch_recent_request(config: &StoreConfig, limit: usize) -> RestRequest {
    RestRequest {
        method: Method::Get,
        url: format!(
            "{}?select=*&order=created_at.desc&limit={limit}",
            table_url(config)
        ),
        headers: auth_headers(config),
        body: None,
    }
}

/// Insert one row and ask for it back.
pub fn insert_request(config: &StoreConfig, parcel: &NewParcel) -> Result<RestRequest, StoreError> {
    let body = serde_json::to_string(&[parcel])?;
    let mut headers = auth_headers(config);
    headers.push(("Content-Type", "application/json".to_string()));
    headers.push(("Prefer", "return=representation".to_string()));
    Ok(RestRequest {
        method: Method::Post,
        url: format!("{}?select=*", table_url(config)),
        headers,
        body: Some(body),
    })
}

/// Error body the service sends with non-2xx statuses.
#[derive(Deserialize)]
struct ServiceError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

fn remote_error(response: &RestResponse) -> StoreError {
    let message = match serde_json::from_str::<ServiceError>(&response.body) {
        Ok(err) => {
            let mut parts: Vec<String> = Vec::new();
            if let Some(code) = err.code {
                parts.push(format!("[{code}]"));
            }
            parts.extend(err.message);
            parts.extend(err.details);
            parts.extend(err.hint.map(|h| format!("hint: {h}")));
            parts.join(" ")
        }
        Err(_) => response.body.trim().to_string(),
    };
    StoreError::Remote {
        status: response.status,
        message,
    }
}

/// Rows from a `select`, in the order the service returned them.
pub fn parse_rows(response: RestResponse) -> Result<Vec<ParcelRecord>, StoreError> {
    if !response.is_success() {
        return Err(remote_error(&response));
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// The single row echoed by an insert.
pub fn parse_inserted(response: RestResponse) -> Result<ParcelRecord, StoreError> {
    parse_rows(response)?
        .into_iter()
        .next()
        .ok_or(StoreError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            service_url: "https://demo.supabase.co".to_string(),
            anon_key: "anon-key".to_string(),
        }
    }

    fn new_parcel() -> NewParcel {
        NewParcel {
            ada_no: "123".to_string(),
            parsel_no: "45".to_string(),
            il: None,
            ilce: None,
            mahalle: Some("Caferağa".to_string()),
            coordinates: Some(vec![[300.0, 200.0], [200.0, 310.0], [90.0, 200.0], [200.0, 95.0]]),
        }
    }

    #[test]
    fn test_fetch_recent_request_shape() {
        let req = fetch_recent_request(&config(), 10);
        assert_eq!(req.method, Method::Get);
        assert_eq!(
            req.url,
            "https://demo.supabase.co/rest/v1/parcels?select=*&order=created_at.desc&limit=10"
        );
        assert_eq!(req.header("apikey"), Some("anon-key"));
        assert_eq!(req.header("authorization"), Some("Bearer anon-key"));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_insert_request_shape() {
        let req = insert_request(&config(), &new_parcel()).expect("serializable");
        assert_eq!(req.method, Method::Post);
        assert!(req.url.ends_with("/rest/v1/parcels?select=*"));
        assert_eq!(req.header("Prefer"), Some("return=representation"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));

        let body: serde_json::Value =
            serde_json::from_str(req.body.as_deref().unwrap_or("")).expect("json body");
        let rows = body.as_array().expect("array of rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["ada_no"], "123");
        assert_eq!(rows[0]["mahalle"], "Caferağa");
        assert!(rows[0].get("il").is_none());
        assert_eq!(rows[0]["coordinates"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_parse_rows_success() {
        let rows = parse_rows(RestResponse {
            status: 200,
            body: r#"[{"id":"b","ada_no":"2","parsel_no":"2","created_at":"2024-02-02T00:00:00Z"},
                      {"id":"a","ada_no":"1","parsel_no":"1","created_at":"2024-01-01T00:00:00Z",
                       "coordinates":[[1,2],[3,4]]}]"#
                .to_string(),
        })
        .expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "b");
        assert_eq!(rows[1].geometry().len(), 2);
    }

    #[test]
    fn test_parse_rows_empty_table() {
        let rows = parse_rows(RestResponse {
            status: 200,
            body: "[]".to_string(),
        })
        .expect("empty page");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_remote_error() {
        let err = parse_rows(RestResponse {
            status: 401,
            body: r#"{"message":"Invalid API key","hint":"Double check your key","code":"PGRST301"}"#
                .to_string(),
        })
        .expect_err("401 is a failure");
        match err {
            StoreError::Remote { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("Invalid API key"), "got: {message}");
                assert!(message.contains("PGRST301"), "got: {message}");
                assert!(message.contains("hint: Double check"), "got: {message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_remote_error_plain_body() {
        let err = parse_rows(RestResponse {
            status: 502,
            body: "Bad Gateway\n".to_string(),
        })
        .expect_err("502 is a failure");
        assert_eq!(
            err,
            StoreError::Remote {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn test_parse_garbage_is_decode_error() {
        let err = parse_rows(RestResponse {
            status: 200,
            body: "<html>".to_string(),
        })
        .expect_err("not json");
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn test_parse_inserted_requires_a_row() {
        let err = parse_inserted(RestResponse {
            status: 201,
            body: "[]".to_string(),
        })
        .expect_err("no row");
        assert_eq!(err, StoreError::EmptyResponse);

        let row = parse_inserted(RestResponse {
            status: 201,
            body: r#"[{"id":5,"ada_no":"123","parsel_no":"45","created_at":"2024-03-03T12:00:00Z"}]"#
                .to_string(),
        })
        .expect("one row");
        assert_eq!(row.id, "5");
    }
}
