#![cfg(feature = "http")]

//! `HttpTransport` against a local mock server.

use std::time::Duration;

use evatr::check::Checker;
use evatr::core::*;
use evatr::transport::{EvatrConfig, HttpTransport, Transport};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn response(pairs: &[(&str, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<params>\n");
    for (name, value) in pairs {
        xml.push_str(&format!(
            "<param><value><array><data><value><string>{name}</string></value><value><string>{value}</string></value></data></array></value></param>\n"
        ));
    }
    xml.push_str("</params>\n");
    xml
}

fn config_for(server_uri: &str) -> EvatrConfig {
    EvatrConfig::default()
        .with_base_url(&format!("{server_uri}/evatrRPC"))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn simple_check_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/evatrRPC"))
        .and(query_param("UstId_1", "DE115235681"))
        .and(query_param("UstId_2", "LU26375245"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response(&[
            ("UstId_1", "DE115235681"),
            ("ErrorCode", "200"),
            ("UstId_2", "LU26375245"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    // The blocking client must live outside the async runtime.
    let result = tokio::task::spawn_blocking(move || {
        let checker = Checker::from_config(config)?;
        checker.check_simple(&SimpleCheckInput::new("DE 115 235 681", "LU 26375245"))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.validated_vat_number, "LU26375245");
}

#[tokio::test(flavor = "multi_thread")]
async fn qualified_check_sends_company_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/evatrRPC"))
        .and(query_param("Firmenname", "Müller & Söhne"))
        .and(query_param("Ort", "Wien"))
        .and(query_param("PLZ", "1010"))
        .and(query_param("Druck", "nein"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response(&[
            ("ErrorCode", "200"),
            ("Erg_Name", "A"),
            ("Erg_Ort", "B"),
            ("Erg_PLZ", "A"),
            ("Erg_Str", "C"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let result = tokio::task::spawn_blocking(move || {
        let input = QualifiedCheckInput::new("DE123456789", "ATU12345678")
            .company_name("Müller & Söhne")
            .city("Wien")
            .post_code("1010");
        Checker::from_config(config)?.check_qualified(&input)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.name, MatchStatus::Matched);
    assert_eq!(result.city, MatchStatus::NotMatched);
    assert_eq!(result.post_code, MatchStatus::Matched);
    assert_eq!(result.street, MatchStatus::NotQueried);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_body_is_still_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string(response(&[("ErrorCode", "999")])))
        .mount(&server)
        .await;

    let config = config_for(&server.uri());
    let result = tokio::task::spawn_blocking(move || {
        Checker::from_config(config)?
            .check_simple(&SimpleCheckInput::new("DE123456789", "LU26375245"))
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.error_code, 999);
    assert!(!result.is_valid);
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(response(&[("ErrorCode", "200")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server.uri())
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let err = tokio::task::spawn_blocking(move || {
        Checker::from_config(config)?
            .check_simple(&SimpleCheckInput::new("DE123456789", "LU26375245"))
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, EvatrError::ServiceUnreachable(_)));
}

#[test]
fn closed_port_is_service_unreachable() {
    let config = EvatrConfig::default()
        .with_base_url("http://127.0.0.1:1/evatrRPC")
        .unwrap();
    let err = Checker::from_config(config)
        .unwrap()
        .check_simple(&SimpleCheckInput::new("DE123456789", "LU26375245"))
        .unwrap_err();
    assert!(matches!(err, EvatrError::ServiceUnreachable(_)));
}

/// Answers one request with a 200 status that promises more body bytes than
/// it sends, then hangs up.
fn truncated_body_server() -> std::net::SocketAddr {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 2 {
            line.clear();
        }
        let mut stream = reader.into_inner();
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n<params>")
            .unwrap();
    });
    addr
}

#[test]
fn truncated_body_is_service_unreachable() {
    let addr = truncated_body_server();
    let config = EvatrConfig::default()
        .with_base_url(&format!("http://{addr}/evatrRPC"))
        .unwrap();
    let err = Checker::from_config(config)
        .unwrap()
        .check_simple(&SimpleCheckInput::new("DE123456789", "LU26375245"))
        .unwrap_err();
    assert!(matches!(err, EvatrError::ServiceUnreachable(_)), "{err:?}");
    assert!(!err.is_decode_error());
}

#[test]
fn transport_keeps_base_url() {
    let url = url::Url::parse("https://evatr.bff-online.de/evatrRPC").unwrap();
    let transport = HttpTransport::new(url).unwrap();
    assert_eq!(transport.base_url().path(), "/evatrRPC");
    let local = HttpTransport::new(url::Url::parse("http://127.0.0.1:1/").unwrap()).unwrap();
    assert!(local.get("UstId_1=DE1", Duration::from_millis(500)).is_err());
}
