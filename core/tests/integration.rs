//! Example sequence against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing work end-to-end with the actual server.

use qrshow_core::{
    ApiError, Format, HttpMethod, HttpRequest, HttpResponse, QrClient, QrOptions, QrOutput, VersionType,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k.as_str(), v.as_str());
            }
            builder.send(req.body.unwrap_or_default().as_bytes())
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    HttpResponse { status, headers, body }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn example_sequence() {
    // Step 1: start mock server on a random port.
    let addr = start_server();
    let client = QrClient::new(&format!("http://{addr}"));

    // Step 2: plain GET.
    let req = client.build_get("this+is+nodejs", &QrOptions::new()).unwrap();
    let plain = client.parse_text(execute(req)).unwrap();
    assert!(plain.contains("data: this+is+nodejs\n"));

    // Step 3: GET with 50x50 size headers renders differently.
    let opts = QrOptions::new().size(50, 50);
    let req = client.build_get("this+is+nodejs", &opts).unwrap();
    let sized = client.parse_text(execute(req)).unwrap();
    assert_ne!(plain, sized);
    assert!(sized.contains("x-qr-width: 50\n"));
    assert!(sized.contains("x-qr-height: 50\n"));

    // Step 4: GET with the micro version type.
    let opts = QrOptions::new().version_type(VersionType::Micro);
    let req = client.build_get("this+is+nodejs", &opts).unwrap();
    let micro = client.parse_text(execute(req)).unwrap();
    assert!(micro.contains("x-qr-version-type: micro\n"));

    // Step 5: POST asking for a PNG keeps the bytes intact.
    let opts = QrOptions::new().format(Format::Png);
    let req = client.build_post("this is nodejs", &opts).unwrap();
    let output = client.parse_output(execute(req), Format::Png).unwrap();
    match output {
        QrOutput::Binary { content_type, bytes } => {
            assert_eq!(content_type, "image/png");
            assert_eq!(&bytes[..8], &mock_server::PNG_SIGNATURE);
            assert_eq!(&bytes[8..], b"this is nodejs");
        }
        QrOutput::Text(_) => panic!("expected binary output"),
    }

    // Step 6: help text at the root.
    let req = client.build_help(Format::Unicode).unwrap();
    let help = client.parse_text(execute(req)).unwrap();
    assert_eq!(help, mock_server::HELP);
}

#[test]
fn escaped_text_reaches_the_server() {
    let addr = start_server();
    let client = QrClient::new(&format!("http://{addr}"));

    let req = client.build_get("a b#c", &QrOptions::new().format(Format::PlainText)).unwrap();
    let out = client.parse_output(execute(req), Format::PlainText).unwrap();
    // The service does not decode the path.
    assert!(out.as_text().unwrap().contains("data: a%20b%23c\n"));
}

#[test]
fn rejected_request_surfaces_body() {
    let addr = start_server();
    let client = QrClient::new(&format!("http://{addr}"));

    // Bypass client-side validation to see the server's answer.
    let mut req = client.build_get("x", &QrOptions::new()).unwrap();
    req.headers.push(("X-QR-Min-Width".to_string(), "wide".to_string()));
    let err = client.parse_text(execute(req)).unwrap_err();

    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    assert_eq!(err.body(), Some("Bad Request: invalid x-qr-min-width"));
}
