//! HTTP front end: a single `GET /night-time-temperature?lat=..&lng=..` route.
//!
//! | outcome                         | status | body                        |
//! |---------------------------------|--------|-----------------------------|
//! | temperature computed            | 200    | `{"temperature": 5175}`     |
//! | bad or missing coordinates      | 400    | `{"error": "..."}`          |
//! | provider failure                | 502    | `{"error": "..."}`          |
//! | computation failure             | 500    | `{"error": "..."}`          |
//! | unknown path                    | 404    | `{"error": "..."}`          |
//! | method other than GET           | 405    | `{"error": "..."}`          |

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use hyper::header;
use hyper::http::StatusCode;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, Uri};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::common::constants::TEMPERATURE_ROUTE;
use crate::error::NightTempError;
use crate::nighttemp::NightTemp;
use crate::provider::Coordinates;

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(app: NightTemp, addr: SocketAddr) -> Result<()> {
    let app = Arc::new(app);
    let make_service = make_service_fn(move |_conn| {
        let app = app.clone();
        async move { Ok::<_, Infallible>(service_fn(move |req| handle(app.clone(), req))) }
    });

    let server = Server::try_bind(&addr)
        .with_context(|| format!("Failed to bind {addr}"))?
        .serve(make_service);

    log_block_start!("Listening on http://{}{}", server.local_addr(), TEMPERATURE_ROUTE);

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log_block_start!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_warning!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log_pipe!();
    log_info!("Shutdown requested, finishing open requests");
}

async fn handle(app: Arc<NightTemp>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let (method, uri) = (req.method().clone(), req.uri().clone());
    let response = respond(&app, &method, &uri, Utc::now()).await;
    log_decorated!("{} {} -> {}", method, uri, response.status().as_u16());
    Ok(response)
}

/// Answer one request as if it arrived at `now`.
pub async fn respond(
    app: &NightTemp,
    method: &Method,
    uri: &Uri,
    now: DateTime<Utc>,
) -> Response<Body> {
    if uri.path() != TEMPERATURE_ROUTE {
        return json_error(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()));
    }
    if *method != Method::GET {
        return json_error(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("method {method} not supported"),
        );
    }

    match temperature(app, uri.query(), now).await {
        Ok(kelvin) => json_response(StatusCode::OK, json!({ "temperature": kelvin })),
        Err(e) => {
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            match e {
                NightTempError::Computation(_) => log_critical!("{}", e),
                NightTempError::Provider(_) => log_error!("{}", e),
                NightTempError::InvalidInput(_) => {}
            }
            json_error(status, e.to_string())
        }
    }
}

async fn temperature(
    app: &NightTemp,
    query: Option<&str>,
    now: DateTime<Utc>,
) -> Result<i64, NightTempError> {
    let (lat, lng) = coordinate_params(query.unwrap_or_default());
    let coordinates = Coordinates::parse(lat.as_deref(), lng.as_deref())?;
    let evaluation = app.evaluate(coordinates, now).await?;
    Ok(evaluation.temperature)
}

/// First `lat` and `lng` values of a query string, percent-decoded.
fn coordinate_params(query: &str) -> (Option<String>, Option<String>) {
    let (mut lat, mut lng) = (None, None);
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            "lat" => &mut lat,
            "lng" => &mut lng,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }
    (lat, lng)
}

fn json_error(status: StatusCode, message: String) -> Response<Body> {
    json_response(status, json!({ "error": message }))
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response<Body> {
    let mut response = Response::new(Body::from(body.to_string()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::{MockProvider, Provider};
    use chrono::TimeZone;
    use serde_json::Value;

    fn mock_app() -> NightTemp {
        NightTemp::with_provider(Config::default(), Provider::Mock(MockProvider))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn call(req: Request<Body>, hour: u32, minute: u32) -> (StatusCode, Value) {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, hour, minute, 0).unwrap();
        let response = respond(&mock_app(), req.method(), req.uri(), now).await;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_temperature_ok() {
        let (status, body) = call(get("/night-time-temperature?lat=40.7&lng=-74.0"), 17, 45).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "temperature": 5175 }));

        let (_, body) = call(get("/night-time-temperature?lng=0&lat=0"), 3, 30).await;
        assert_eq!(body["temperature"], 2700);
    }

    #[tokio::test]
    async fn test_missing_and_bad_coordinates() {
        let (status, body) = call(get("/night-time-temperature?lat=40.7"), 12, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lng"));

        let (status, _) = call(get("/night-time-temperature"), 12, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(get("/night-time-temperature?lat=abc&lng=1"), 12, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(get("/night-time-temperature?lat=10&lng=181"), 12, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_percent_encoded_query() {
        let (status, body) =
            call(get("/night-time-temperature?lat=%2B40.7&lng=%2D74.0"), 12, 0).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["temperature"], 6000);
    }

    #[tokio::test]
    async fn test_unknown_path_and_method() {
        let (status, _) = call(get("/temperature?lat=0&lng=0"), 12, 0).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let post = Request::builder()
            .method(Method::POST)
            .uri("/night-time-temperature?lat=0&lng=0")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(post, 12, 0).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(body["error"].as_str().unwrap().contains("POST"));
    }

    #[test]
    fn test_coordinate_params_takes_first_value() {
        let (lat, lng) = coordinate_params("lat=1&lat=2&lng=3");
        assert_eq!(lat.as_deref(), Some("1"));
        assert_eq!(lng.as_deref(), Some("3"));

        assert_eq!(coordinate_params(""), (None, None));
    }

    #[test]
    fn test_coordinate_params_decodes_without_base_url() {
        let (lat, lng) = coordinate_params("lat=%2B40.7&lng=-74.0+&other=%zz");
        assert_eq!(lat.as_deref(), Some("+40.7"));
        assert_eq!(lng.as_deref(), Some("-74.0 "));

        // A query that is not a valid URL tail still yields its pairs
        let (lat, lng) = coordinate_params("lat=1 2&lng=#3");
        assert_eq!(lat.as_deref(), Some("1 2"));
        assert_eq!(lng.as_deref(), Some("#3"));
    }
}
