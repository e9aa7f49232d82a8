//! Mock backend support for the gateway tests: a real axum server bound to
//! an ephemeral port, with every incoming method and URI recorded so tests
//! can assert on the exact wire traffic.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};

#[derive(Clone, Default)]
pub struct RequestLog {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl RequestLog {
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn uris(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, uri)| uri).collect()
    }

    fn record(&self, method: &str, uri: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((method.to_string(), uri.to_string()));
    }
}

/// Shared capture slot for request bodies a handler chooses to keep.
pub type BodyLog = Arc<Mutex<Vec<Value>>>;

pub fn body_log() -> BodyLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Serve the router on an ephemeral local port; returns the base URL to hand
/// to `ApiClient::with_base_url` plus the log every request passes through.
pub async fn spawn_backend(router: Router) -> (String, RequestLog) {
    let log = RequestLog::default();
    let recorder = log.clone();
    let router = router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        let recorder = recorder.clone();
        async move {
            recorder.record(req.method().as_str(), &req.uri().to_string());
            let response: Response = next.run(req).await;
            response
        }
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    (format!("http://{addr}"), log)
}

/// Echo a contract payload back as the stored-row shape the backend returns.
pub fn leasing_contract_row(payload: &Value, status: &str) -> Value {
    let mut row = payload.clone();
    let obj = row.as_object_mut().expect("object payload");
    obj.insert("id".into(), json!(1));
    obj.insert("customer_name".into(), json!("大同公司"));
    obj.insert("sales_payment_status".into(), json!("未付款"));
    obj.insert("service_payment_status".into(), json!("未付款"));
    obj.insert("status".into(), json!(status));
    obj.insert("created_at".into(), json!("2024-01-01T00:00:00"));
    obj.insert("updated_at".into(), json!("2024-01-01T00:00:00"));
    row
}

pub fn ledger_row(payload: &Value, id: i64) -> Value {
    let mut row = payload.clone();
    let obj = row.as_object_mut().expect("object payload");
    obj.insert("id".into(), json!(id));
    obj.insert("is_reconciled".into(), json!(false));
    row
}

pub fn customer_row(code: &str, name: &str) -> Value {
    json!({
        "id": 1,
        "customer_code": code,
        "name": name,
        "contact_name": null,
        "mobile": null,
        "phone": null,
        "address": null,
        "email": null,
        "tax_id": null,
        "sales_rep_name": null,
        "remark": null,
        "created_at": "2024-01-01T00:00:00",
        "updated_at": "2024-01-01T00:00:00"
    })
}

pub fn receivable_row(id: i64, contract_code: &str, amount: f64, status: &str) -> Value {
    json!({
        "id": id,
        "type": "租賃",
        "contract_code": contract_code,
        "customer_code": "C001",
        "customer_name": "大同公司",
        "date": "2024-03-01",
        "end_date": null,
        "amount": amount,
        "fee": 0.0,
        "received_amount": 0.0,
        "payment_status": status
    })
}

pub fn payable_row(contract_code: &str, amount: f64, status: &str) -> Value {
    json!({
        "contract_code": contract_code,
        "contract_type": "租賃",
        "customer_code": "C001",
        "customer_name": "大同公司",
        "date": "2024-03-01",
        "payable_type": "業務",
        "company_code": "S001",
        "amount": amount,
        "payment_status": status
    })
}

pub fn service_row(id: i64, contract_code: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "contract_code": contract_code,
        "customer_code": "C001",
        "customer_name": "大同公司",
        "service_date": "2024-03-10",
        "confirm_date": null,
        "service_type": "定期保養",
        "repair_company_code": "M001",
        "total_amount": amount,
        "payment_status": "未收"
    })
}
