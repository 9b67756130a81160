//! Protocol integration tests: request documents in, response documents out

use chrono::Local;
use collecte_server::domain::{GeoCoordinate, Route};
use collecte_server::protocol::DEFAULT_DEPOT;
use collecte_server::RouteStore;
use serde_json::{json, Value};

mod common;

fn request(request_type: &str) -> Value {
    json!({"request": {"request_type": request_type}})
}

fn find_container<'a>(state: &'a Value, id: i64) -> Option<&'a Value> {
    state["container_sets"]
        .as_array()?
        .iter()
        .flat_map(|set| set["containers"].as_array().into_iter().flatten())
        .find(|c| c["id"] == id)
}

#[tokio::test]
async fn test_report_then_supervision_state() {
    let pool = common::setup_test_db().await;
    let point = common::insert_point(
        &pool,
        GeoCoordinate::new(43.61, 1.45),
        &[(0, 0, 200), (0, 0, 100)],
    )
    .await;
    let (full, empty) = (point.containers[0].id, point.containers[1].id);

    let state = common::app_state(RouteStore::new(pool));
    state.registry.load_from_store().await.unwrap();
    let dispatcher = state.dispatcher(state.open_session());

    let response = dispatcher
        .handle(&json!({"request": {
            "request_type": "CONTAINER_REPORT",
            "container_report": {"id": full, "weight": 70, "volume": 180, "volumemax": 200}
        }}))
        .await;
    assert_eq!(response, json!({"response": {"response_type": "OK"}}));

    let response = dispatcher.handle(&request("REQ_SUPERVISION_STATE")).await;
    let body = &response["response"];
    assert_eq!(body["response_type"], "RESP_SUPERVISION_STATE");

    let supervision = &body["supervision_state"];
    assert!(supervision["date_state"].is_string());

    let reported = find_container(supervision, full).expect("reported container listed");
    assert_eq!(reported["weight"], 70);
    assert_eq!(reported["volume"], 180);
    assert_eq!(reported["volumemax"], 200);
    assert_eq!(reported["fillratio"], 0.9);
    assert_eq!(reported["to_be_collected"], true);

    let idle = find_container(supervision, empty).expect("idle container listed");
    assert_eq!(idle["fillratio"], 0.0);
    assert_eq!(idle["to_be_collected"], false);

    // The point is ready as soon as one of its containers is
    let set = supervision["container_sets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|set| find_container(&json!({"container_sets": [set]}), full).is_some())
        .unwrap();
    assert_eq!(set["to_be_collected"], true);
    assert_eq!(set["location"], json!({"latitude": 43.61, "longitude": 1.45}));
}

#[tokio::test]
async fn test_report_for_container_added_after_startup() {
    let pool = common::setup_test_db().await;
    let state = common::app_state(RouteStore::new(pool.clone()));
    state.registry.load_from_store().await.unwrap();

    let point = common::insert_point(&pool, GeoCoordinate::new(43.64, 1.41), &[(0, 0, 100)]).await;
    let container_id = point.containers[0].id;
    assert!(state.registry.get_container(container_id).await.is_err());

    let dispatcher = state.dispatcher(state.open_session());
    let response = dispatcher
        .handle(&json!({"request": {
            "request_type": "CONTAINER_REPORT",
            "container_report": {"id": container_id, "weight": 30, "volume": 85, "volumemax": 100}
        }}))
        .await;
    assert_eq!(response, json!({"response": {"response_type": "OK"}}));

    let container = state.registry.get_container(container_id).await.unwrap();
    assert_eq!(container.volume(), 85);

    // Still unknown after the reload
    let response = dispatcher
        .handle(&json!({"request": {
            "request_type": "CONTAINER_REPORT",
            "container_report": {"id": -1, "weight": 1, "volume": 1, "volumemax": 10}
        }}))
        .await;
    assert_eq!(response, json!({"response": {"response_type": "ERROR"}}));
}

/// The only test touching today's planning
#[tokio::test]
async fn test_circuits_of_the_day() {
    let pool = common::setup_test_db().await;
    let store = RouteStore::new(pool.clone());
    let today = Local::now().date_naive();

    let a = common::insert_point(&pool, GeoCoordinate::new(43.62, 1.43), &[(1, 2, 10), (3, 4, 10)]).await;
    let b = common::insert_point(&pool, GeoCoordinate::new(43.63, 1.42), &[(5, 6, 10)]).await;

    let state = common::app_state(store.clone());
    let dispatcher = state.dispatcher(state.open_session());

    // Empty planning
    store.replace_planning_routes(today, Vec::new()).await.unwrap();
    let response = dispatcher.handle(&request("REQ_CIRCUITS")).await;
    assert_eq!(
        response,
        json!({"response": {
            "response_type": "RESP_CIRCUITS",
            "circuits": [],
            "not_collected": {"container_sets": []}
        }})
    );

    // Two routes, reported in planning order
    store
        .replace_planning_routes(
            today,
            vec![
                Route::new(0, 1, today).with_stop(b.clone()).with_stop(a.clone()),
                Route::new(0, 2, today).with_stop(a.clone()),
            ],
        )
        .await
        .unwrap();

    let response = dispatcher.handle(&request("REQ_CIRCUITS")).await;
    let circuits = response["response"]["circuits"].as_array().unwrap().clone();
    assert_eq!(circuits.len(), 2);

    let depot = json!({
        "latitude": DEFAULT_DEPOT.latitude(),
        "longitude": DEFAULT_DEPOT.longitude()
    });
    assert_eq!(circuits[0]["index"], 0);
    assert_eq!(circuits[0]["depot_location"], depot);
    assert_eq!(
        circuits[0]["container_sets"],
        json!([
            {
                "location": {"latitude": 43.63, "longitude": 1.42},
                "containers": [{"id": b.containers[0].id}]
            },
            {
                "location": {"latitude": 43.62, "longitude": 1.43},
                "containers": [{"id": a.containers[0].id}, {"id": a.containers[1].id}]
            }
        ])
    );
    assert_eq!(circuits[1]["index"], 1);
    assert_eq!(circuits[1]["container_sets"].as_array().unwrap().len(), 1);

    // No readings leak into circuits
    assert!(circuits[0]["container_sets"][0]["containers"][0]
        .get("weight")
        .is_none());
}

#[tokio::test]
async fn test_circuits_when_store_unreachable() {
    let state = common::app_state(common::unreachable_store());
    let dispatcher = state.dispatcher(state.open_session());

    let response = dispatcher.handle(&request("REQ_CIRCUITS")).await;
    assert_eq!(response, json!({"response": {"response_type": "ERROR"}}));

    let response = dispatcher.handle(&request("REQ_SUPERVISION_STATE")).await;
    assert_eq!(response, json!({"response": {"response_type": "ERROR"}}));
}

#[tokio::test]
async fn test_single_circuit_is_not_served() {
    let state = common::app_state(common::unreachable_store());
    let dispatcher = state.dispatcher(state.open_session());

    let response = dispatcher.handle(&request("REQ_CIRCUIT")).await;
    assert_eq!(response, json!({"response": {"response_type": "ERROR"}}));
}

#[tokio::test]
async fn test_trigger_computation_answers_immediately() {
    let state = common::app_state(common::unreachable_store());
    let dispatcher = state.dispatcher(state.open_session());

    let response = dispatcher.handle(&request("TRIG_CIRCUIT_COMPUTATION")).await;
    assert_eq!(response, json!({"response": {"response_type": "OK"}}));
}
