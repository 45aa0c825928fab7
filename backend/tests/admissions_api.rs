//! End-to-end tests of the admission API over the in-memory store and a
//! stubbed ViaCEP server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use admissions::Trace;
use admissions::domain::ports::AddressLookup;
use admissions::domain::{AdmissionService, BlockingExecutor, RetryPolicy, RetryingAddressLookup};
use admissions::inbound::http::admissions::configure;
use admissions::inbound::http::state::HttpState;
use admissions::outbound::persistence::InMemoryAdmissionRepository;
use admissions::outbound::viacep::ViaCepHttpLookup;
use chrono::{DateTime, Local, TimeZone, Utc};
use httpmock::Method::GET;
use httpmock::MockServer;
use mockable::Clock;
use reqwest::Url;
use rstest::rstest;
use serde_json::{Value, json};

const BELEM_JSON: &str = r#"{
    "cep": "66050-080",
    "logradouro": "Avenida Governador José Malcher",
    "complemento": "",
    "unidade": "",
    "bairro": "Nazaré",
    "localidade": "Belém",
    "uf": "PA",
    "estado": "Pará",
    "regiao": "Norte",
    "ibge": "1501402",
    "gia": "",
    "ddd": "91",
    "siafi": "0427"
}"#;

struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 5, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

fn viacep(server: &MockServer) -> ViaCepHttpLookup {
    let base = Url::parse(&server.base_url()).expect("stub server URL");
    ViaCepHttpLookup::new(&base, Duration::from_secs(2)).expect("client builds")
}

fn state_over<L>(lookup: L) -> HttpState
where
    L: AddressLookup + 'static,
{
    let service = AdmissionService::new(
        Arc::new(InMemoryAdmissionRepository::new()),
        Arc::new(lookup),
        Arc::new(FixedClock),
        BlockingExecutor::new(4),
    );
    HttpState::new(Arc::new(service.clone()), Arc::new(service))
}

async fn stub_belem(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/66050080/json/");
            then.status(200)
                .header("content-type", "application/json")
                .body(BELEM_JSON);
        })
        .await;
}

async fn send<S, B>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn create(salary: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/calculos")
        .insert_header(("content-type", "application/json"))
        .set_payload(format!(
            r#"{{"dataAdmissao":"2022-05-10","salarioBruto":{salary},"cep":"66050-080"}}"#
        ))
}

#[actix_rt::test]
async fn created_calculation_is_enriched_and_readable_by_id() {
    let server = MockServer::start_async().await;
    stub_belem(&server).await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, created) = send(&app, create("3500.00")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["anos"], json!(3));
    assert_eq!(created["meses"], json!(1));
    assert_eq!(created["dias"], json!(25));
    assert_eq!(created["porcentagem35"].to_string(), "1225.0000");
    assert_eq!(created["endereco"]["localidade"], json!("Belém"));
    assert_eq!(created["endereco"]["uf"], json!("PA"));

    let id = created["id"].as_str().expect("id is a string");
    let (status, fetched) = send(
        &app,
        actix_test::TestRequest::get().uri(&format!("/api/calculos/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["salarioBruto"].to_string(), "3500.00");
    assert!(fetched.get("endereco").is_none());
}

#[actix_rt::test]
async fn unknown_postal_code_is_unprocessable_but_stays_stored() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/66050080/json/");
            then.status(200).body(r#"{"erro": "true"}"#);
        })
        .await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, body) = send(&app, create("3500.00")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], json!(422));
    assert_eq!(body["path"], json!("/api/calculos"));

    let (status, page) = send(&app, actix_test::TestRequest::get().uri("/api/calculos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], json!(1));
}

#[actix_rt::test]
async fn failing_upstream_is_retried_then_reported_as_bad_gateway() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/66050080/json/");
            then.status(503).body("unavailable");
        })
        .await;
    let lookup = RetryingAddressLookup::new(
        viacep(&server),
        RetryPolicy {
            name: "viacep".to_owned(),
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
        },
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(lookup)))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, body) = send(&app, create("3500.00")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!("Upstream Error"));
    mock.assert_hits_async(3).await;
}

#[rstest]
#[case("/api/calculos?size=2", 2, false)]
#[case("/api/calculos?page=1&size=2", 1, true)]
#[case("/api/calculos/por-salario?min=4000", 2, true)]
#[case("/api/calculos/por-data?inicio=2022-05-10&fim=2022-05-10", 3, true)]
#[actix_rt::test]
async fn stored_calculations_page_through_queries(
    #[case] uri: &str,
    #[case] expected_len: usize,
    #[case] expected_last: bool,
) {
    let server = MockServer::start_async().await;
    stub_belem(&server).await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    for salary in ["3500.00", "4000.00", "5200.50"] {
        let (status, _) = send(&app, create(salary)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, actix_test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK);
    let content = page["content"].as_array().expect("content array");
    assert_eq!(content.len(), expected_len);
    assert_eq!(page["last"], json!(expected_last));
}

#[actix_rt::test]
async fn salary_floor_is_sorted_highest_first_by_default() {
    let server = MockServer::start_async().await;
    stub_belem(&server).await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    for salary in ["4000.00", "5200.50", "3500.00"] {
        send(&app, create(salary)).await;
    }

    let (_, page) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/calculos/por-salario?min=3500"),
    )
    .await;
    let salaries: Vec<String> = page["content"]
        .as_array()
        .expect("content array")
        .iter()
        .map(|item| item["salarioBruto"].to_string())
        .collect();
    assert_eq!(salaries, ["5200.50", "4000.00", "3500.00"]);
}

#[actix_rt::test]
async fn unknown_sort_field_lists_like_the_default_order() {
    let server = MockServer::start_async().await;
    stub_belem(&server).await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    for salary in ["4000.00", "5200.50"] {
        send(&app, create(salary)).await;
    }

    let (status, lenient) = send(
        &app,
        actix_test::TestRequest::get().uri("/api/calculos?sort=campo,xyz"),
    )
    .await;
    let (_, default) = send(&app, actix_test::TestRequest::get().uri("/api/calculos")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(lenient["sort"], json!({"property": "criadoEm", "direction": "DESC"}));
    assert_eq!(lenient["content"], default["content"]);
}

#[rstest]
#[case::tiny_fraction(r#""1e-9223372036854775807""#)]
#[case::huge_magnitude("1e9223372036854775807")]
#[actix_rt::test]
async fn salary_with_extreme_exponent_is_rejected_before_storage(#[case] salary: &str) {
    let server = MockServer::start_async().await;
    let lookup_calls = server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/66050080/json/");
            then.status(200).body(BELEM_JSON);
        })
        .await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state_over(viacep(&server))))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, body) = send(&app, create(salary)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["messages"],
        json!(["salarioBruto: salarioBruto excede a precisão suportada"])
    );
    let (_, page) = send(&app, actix_test::TestRequest::get().uri("/api/calculos")).await;
    assert_eq!(page["totalElements"], json!(0));
    lookup_calls.assert_hits_async(0).await;
}
