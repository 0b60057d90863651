use autoops_core::db::open_db_in_memory;
use autoops_core::VehicleRegistry;
use autoops_server::{build_router, AppState};
use serde_json::{json, Value};

fn spawn_server(registry: VehicleRegistry) -> String {
    let state = AppState::new(registry, open_db_in_memory().unwrap());
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, build_router(state)).await.unwrap();
        });
    });

    format!("http://{addr}/api")
}

fn send(method: &str, url: &str, body: Option<Value>) -> (u16, Value) {
    let request = ureq::request(method, url);
    let result = match body {
        Some(body) => request.send_json(body),
        None => request.call(),
    };
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(err) => panic!("transport error for {method} {url}: {err}"),
    };
    let status = response.status();
    let text = response.into_string().unwrap();
    let json = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, json)
}

fn send_raw(method: &str, url: &str, body: &str) -> (u16, Value) {
    let result = ureq::request(method, url)
        .set("Content-Type", "application/json")
        .send_string(body);
    let response = match result {
        Ok(response) | Err(ureq::Error::Status(_, response)) => response,
        Err(err) => panic!("transport error for {method} {url}: {err}"),
    };
    (response.status(), response.into_json().unwrap())
}

#[test]
fn health_reports_ok_with_timestamp() {
    let base = spawn_server(VehicleRegistry::empty());
    let (status, body) = send("GET", &format!("{base}/health"), None);
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn seeded_registry_lists_one_hundred_vehicles() {
    let base = spawn_server(VehicleRegistry::new());
    let (status, body) = send("GET", &format!("{base}/vehicles"), None);
    assert_eq!(status, 200);
    let vehicles = body["data"].as_array().unwrap();
    assert_eq!(vehicles.len(), 100);
    assert_eq!(vehicles[0]["id"], 1);
    assert!(vehicles[0]["vehicleName"].is_string());

    let (_, summary) = send("GET", &format!("{base}/vehicles/dashboard-summary"), None);
    let data = &summary["data"];
    let parts = data["ok"].as_u64().unwrap()
        + data["warn"].as_u64().unwrap()
        + data["error"].as_u64().unwrap();
    assert_eq!(data["total"], 100);
    assert_eq!(parts, 100);
    assert_eq!(data["latest"].as_array().unwrap().len(), 5);
}

#[test]
fn vehicle_lifecycle_over_empty_registry() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, created) = send(
        "POST",
        &format!("{base}/vehicles"),
        Some(json!({
            "vehicleName": "Tesla",
            "model": "Model 3",
            "project": "Project A",
            "health": "WARN",
            "scc": 12,
            "temp": 40,
            "torque": 300,
            "speed": 80,
            "updated": "5 min ago"
        })),
    );
    assert_eq!(status, 201);
    assert_eq!(created["data"]["id"], 1);
    assert_eq!(created["data"]["updated"], "5 min ago");

    let (status, updated) = send(
        "PUT",
        &format!("{base}/vehicles/1"),
        Some(json!({ "vehicleName": "Tesla", "health": "ERROR", "updated": "ignored" })),
    );
    assert_eq!(status, 200);
    assert_eq!(updated["data"]["health"], "ERROR");
    assert_eq!(updated["data"]["updated"], "just now");

    let (_, summary) = send("GET", &format!("{base}/vehicles/dashboard-summary"), None);
    assert_eq!(summary["data"]["error"], 1);

    let (status, body) = send("DELETE", &format!("{base}/vehicles/1"), None);
    assert_eq!(status, 204);
    assert_eq!(body, Value::Null);

    let (status, missing) = send("GET", &format!("{base}/vehicles/1"), None);
    assert_eq!(status, 404);
    assert_eq!(missing["success"], false);
    assert_eq!(missing["message"], "Vehicle with ID 1 not found");

    let (_, recreated) = send(
        "POST",
        &format!("{base}/vehicles"),
        Some(json!({ "vehicleName": "Kia" })),
    );
    assert_eq!(recreated["data"]["id"], 2);
}

#[test]
fn invalid_vehicle_payloads_are_rejected() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, body) = send(
        "POST",
        &format!("{base}/vehicles"),
        Some(json!({ "vehicleName": "", "health": "purple", "scc": 150 })),
    );
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);

    let (status, body) = send_raw("POST", &format!("{base}/vehicles"), "{not json");
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, _) = send("GET", &format!("{base}/vehicles/abc"), None);
    assert_eq!(status, 400);

    let (_, listed) = send("GET", &format!("{base}/vehicles"), None);
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[test]
fn task_flow_completes_once_and_hides_deleted() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, created) = send(
        "POST",
        &format!("{base}/tasks"),
        Some(json!({ "title": "  Check brakes  " })),
    );
    assert_eq!(status, 201);
    assert_eq!(created["data"]["title"], "Check brakes");
    assert_eq!(created["data"]["isCompleted"], false);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, completed) = send("PATCH", &format!("{base}/tasks/{id}/complete"), None);
    assert_eq!(status, 200);
    assert_eq!(completed["data"]["isCompleted"], true);

    let (status, again) = send("PATCH", &format!("{base}/tasks/{id}/complete"), None);
    assert_eq!(status, 400);
    assert_eq!(
        again["message"],
        format!("Task with ID {id} is already completed")
    );

    let (status, _) = send("DELETE", &format!("{base}/tasks/{id}"), None);
    assert_eq!(status, 204);
    let (status, _) = send("DELETE", &format!("{base}/tasks/{id}"), None);
    assert_eq!(status, 204);
    let (status, _) = send("DELETE", &format!("{base}/tasks/9999"), None);
    assert_eq!(status, 404);

    let (_, listed) = send("GET", &format!("{base}/tasks"), None);
    assert!(listed["data"].as_array().unwrap().is_empty());

    let (status, blank) = send("POST", &format!("{base}/tasks"), Some(json!({ "title": " " })));
    assert_eq!(status, 400);
    assert_eq!(blank["success"], false);
}

#[test]
fn activity_log_records_lists_and_clears() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, created) = send(
        "POST",
        &format!("{base}/activities"),
        Some(json!({ "user": "alice", "action": "Updated vehicle 4" })),
    );
    assert_eq!(status, 201);
    assert_eq!(created["data"]["user"], "alice");
    assert!(created["data"]["time"].as_str().unwrap().len() >= 19);

    let (_, listed) = send("GET", &format!("{base}/activities"), None);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let (status, _) = send("DELETE", &format!("{base}/activities"), None);
    assert_eq!(status, 204);
    let (_, listed) = send("GET", &format!("{base}/activities"), None);
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[test]
fn access_lookup_and_login() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, admin) = send("GET", &format!("{base}/access?role=Admin"), None);
    assert_eq!(status, 200);
    assert_eq!(admin["data"]["role"], "ADMIN");
    assert_eq!(admin["data"]["permissions"]["vehicles"], "WRITE");

    let (_, guest) = send("GET", &format!("{base}/access"), None);
    assert_eq!(guest["data"]["role"], "GUEST");

    let (status, ok) = send(
        "POST",
        &format!("{base}/access/login"),
        Some(json!({ "role": "operator", "accessCode": "2222" })),
    );
    assert_eq!(status, 200);
    assert_eq!(ok["data"]["role"], "OPERATOR");

    let (status, wrong) = send(
        "POST",
        &format!("{base}/access/login"),
        Some(json!({ "role": "operator", "accessCode": "1111" })),
    );
    assert_eq!(status, 401);
    assert_eq!(wrong["message"], "Invalid access code");

    let (status, _) = send(
        "POST",
        &format!("{base}/access/login"),
        Some(json!({ "role": "", "accessCode": "" })),
    );
    assert_eq!(status, 400);
}

#[test]
fn unknown_route_gets_not_found_envelope() {
    let base = spawn_server(VehicleRegistry::empty());
    let (status, body) = send("GET", &format!("{base}/nope"), None);
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[test]
fn malformed_query_and_wrong_method_still_get_envelopes() {
    let base = spawn_server(VehicleRegistry::empty());

    let (status, body) = send("GET", &format!("{base}/access?role=admin&role=user"), None);
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let response = match ureq::request("PATCH", &format!("{base}/vehicles/dashboard-summary"))
        .call()
    {
        Ok(response) | Err(ureq::Error::Status(_, response)) => response,
        Err(err) => panic!("transport error: {err}"),
    };
    assert_eq!(response.status(), 405);
    assert!(response
        .header("allow")
        .is_some_and(|allow| allow.contains("GET")));
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Method PATCH is not allowed for /api/vehicles/dashboard-summary"
    );
}
