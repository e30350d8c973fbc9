use approx::assert_relative_eq;
use serde_json::{json, Value};
use std::path::Path;
use tempfile::tempdir;
use transport_catalogue::functions::RunError;
use transport_catalogue::queries::QueryError;
use transport_catalogue::utils::{LoadError, SnapshotError};
use transport_catalogue::{make_base, process_requests, AppConfig};

fn base_document(db: &Path) -> Value {
    json!({
        "serialization_settings": {"file": db},
        "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30},
        "render_settings": {
            "width": 1200,
            "height": 500,
            "padding": 50,
            "line_width": 14,
            "stop_radius": 5,
            "bus_label_font_size": 20,
            "bus_label_offset": [7, 15],
            "stop_label_font_size": 18,
            "stop_label_offset": [7, -3],
            "underlayer_color": [255, 255, 255, 0.85],
            "underlayer_width": 3,
            "color_palette": ["green", [255, 160, 0], "red"]
        },
        "base_requests": [
            {"type": "Bus", "name": "297", "is_roundtrip": true,
             "stops": ["Biryulyovo Zapadnoye", "Biryulyovo Tovarnaya", "Universam", "Biryulyovo Zapadnoye"]},
            {"type": "Bus", "name": "635", "is_roundtrip": false,
             "stops": ["Biryulyovo Tovarnaya", "Universam", "Prazhskaya"]},
            {"type": "Stop", "name": "Biryulyovo Zapadnoye", "latitude": 55.574371, "longitude": 37.6517,
             "road_distances": {"Biryulyovo Tovarnaya": 2600}},
            {"type": "Stop", "name": "Biryulyovo Tovarnaya", "latitude": 55.592028, "longitude": 37.653656,
             "road_distances": {"Universam": 890}},
            {"type": "Stop", "name": "Universam", "latitude": 55.587655, "longitude": 37.645687,
             "road_distances": {"Biryulyovo Zapadnoye": 2500, "Biryulyovo Tovarnaya": 1380, "Prazhskaya": 4650}},
            {"type": "Stop", "name": "Prazhskaya", "latitude": 55.611717, "longitude": 37.603938,
             "road_distances": {}},
            {"type": "Stop", "name": "Lonely", "latitude": 55.6, "longitude": 37.6}
        ]
    })
}

fn compact_config() -> AppConfig {
    AppConfig {
        log_filter: "warn".into(),
        pretty_output: false,
        router_threads: 2,
    }
}

fn run_requests(db: &Path, requests: Value, config: &AppConfig) -> Result<Value, RunError> {
    let document = json!({
        "serialization_settings": {"file": db},
        "stat_requests": requests
    });
    let mut output = Vec::new();
    process_requests(document.to_string().as_bytes(), &mut output, config)?;
    Ok(serde_json::from_slice(&output).unwrap())
}

#[test]
fn test_make_base_then_process_requests() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("transport_catalogue.db");

    let written = make_base(base_document(&db).to_string().as_bytes()).unwrap();
    assert_eq!(written, db);
    assert!(db.exists());

    let responses = run_requests(
        &db,
        json!([
            {"id": 1, "type": "Stop", "name": "Universam"},
            {"id": 2, "type": "Stop", "name": "Lonely"},
            {"id": 3, "type": "Stop", "name": "Samara"},
            {"id": 4, "type": "Bus", "name": "297"},
            {"id": 5, "type": "Bus", "name": "635"},
            {"id": 6, "type": "Bus", "name": "751"},
            {"id": 7, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Universam"},
            {"id": 8, "type": "Route", "from": "Universam", "to": "Universam"},
            {"id": 9, "type": "Route", "from": "Lonely", "to": "Prazhskaya"},
            {"id": 10, "type": "Map"}
        ]),
        &compact_config(),
    )
    .unwrap();

    let responses = responses.as_array().unwrap();
    assert_eq!(responses.len(), 10);

    assert_eq!(responses[0], json!({"request_id": 1, "buses": ["297", "635"]}));
    assert_eq!(responses[1], json!({"request_id": 2, "buses": []}));
    assert_eq!(responses[2], json!({"request_id": 3, "error_message": "not found"}));

    assert_eq!(responses[3]["stop_count"], 4);
    assert_eq!(responses[3]["unique_stop_count"], 3);
    assert_eq!(responses[3]["route_length"], 2600 + 890 + 2500);
    assert_eq!(responses[4]["stop_count"], 5);
    assert_eq!(responses[4]["unique_stop_count"], 3);
    assert_eq!(responses[4]["route_length"], 890 + 4650 + 4650 + 1380);
    assert!(responses[4]["curvature"].as_f64().unwrap() > 1.0);
    assert_eq!(responses[5], json!({"request_id": 6, "error_message": "not found"}));

    // 297 directo: espera 2 + (2600 + 890) m a 30 km/h
    let route = &responses[6];
    assert_eq!(route["request_id"], 7);
    assert_relative_eq!(
        route["total_time"].as_f64().unwrap(),
        2.0 + 3.49 / 30.0 * 60.0,
        epsilon = 1e-9
    );
    let items = route["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "Wait");
    assert_eq!(items[0]["stop_name"], "Biryulyovo Zapadnoye");
    assert_eq!(items[1]["type"], "Bus");
    assert_eq!(items[1]["bus"], "297");
    assert_eq!(items[1]["span_count"], 2);

    assert_eq!(
        responses[7],
        json!({"request_id": 8, "total_time": 0.0, "items": []})
    );
    assert_eq!(responses[8], json!({"request_id": 9, "error_message": "not found"}));

    let map = responses[9]["map"].as_str().unwrap();
    assert!(map.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
    assert!(map.contains("<polyline"));
    assert!(map.contains("Prazhskaya"));
    assert!(!map.contains("Lonely"));
}

#[test]
fn test_output_does_not_depend_on_thread_count() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("base.db");
    make_base(base_document(&db).to_string().as_bytes()).unwrap();

    let requests = json!([
        {"id": 1, "type": "Route", "from": "Prazhskaya", "to": "Biryulyovo Zapadnoye"},
        {"id": 2, "type": "Route", "from": "Biryulyovo Tovarnaya", "to": "Prazhskaya"},
        {"id": 3, "type": "Route", "from": "Universam", "to": "Biryulyovo Tovarnaya"}
    ]);

    let single = AppConfig {
        router_threads: 1,
        ..compact_config()
    };
    let many = AppConfig {
        router_threads: 4,
        pretty_output: true,
        ..compact_config()
    };
    assert_eq!(
        run_requests(&db, requests.clone(), &single).unwrap(),
        run_requests(&db, requests, &many).unwrap()
    );
}

#[test]
fn test_fatal_errors() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("base.db");

    let mut document = base_document(&db);
    document["base_requests"][2]["road_distances"] = json!({});
    let result = make_base(document.to_string().as_bytes());
    assert!(matches!(result, Err(RunError::Load(LoadError::Catalogue(_)))));

    assert!(matches!(
        make_base("not json".as_bytes()),
        Err(RunError::Load(LoadError::Json(_)))
    ));

    let result = run_requests(&dir.path().join("missing.db"), json!([]), &compact_config());
    assert!(matches!(result, Err(RunError::Snapshot(SnapshotError::Io(_)))));

    let mut document = base_document(&db);
    document.as_object_mut().unwrap().remove("render_settings");
    make_base(document.to_string().as_bytes()).unwrap();
    let result = run_requests(&db, json!([{"id": 1, "type": "Map"}]), &compact_config());
    assert!(matches!(
        result,
        Err(RunError::Query(QueryError::MissingRenderSettings(1)))
    ));
}
