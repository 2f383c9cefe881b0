use super::*;

const PLAN: &str = r##"{
    "mode": "border",
    "trips": [
        { "id": "t1", "name": "Coast", "color": "#06b6d4", "stops": ["Lisbon", "Porto"] }
    ],
    "borders": [
        { "id": "b1", "name": "Islands", "color": "#ef4444",
          "locations": [{ "name": "Box", "duration_secs": 3 }] }
    ],
    "border_timing": "manual",
    "gazetteer": {
        "places": { "Lisbon": [38.72, -9.14], "Porto": [41.15, -8.61] },
        "borders": { "Box": { "ring": [[0, 0], [0, 1], [1, 1], [1, 0]] } }
    }
}"##;

#[tokio::test]
async fn resolves_each_mode_from_the_embedded_table() {
    let plan = PlanFile::from_json_str(PLAN).unwrap();
    assert_eq!(plan.mode, PlanMode::Border);

    let direct = plan.resolve(PlanMode::Direct, Throttle::none()).await.unwrap();
    assert_eq!(direct.groups.len(), 1);
    assert!(direct.borders.is_empty());
    assert!(direct.mode.shows_markers());

    let border = plan.resolve(PlanMode::Border, Throttle::none()).await.unwrap();
    assert_eq!(border.groups[0].waypoints.len(), 5);
    assert_eq!(border.groups[0].duration, Some(3000.0));
    assert_eq!(border.borders.len(), 1);
    assert!(!border.mode.shows_markers());
}

#[test]
fn rejects_bad_colors_and_durations() {
    let bad_color = PLAN.replace("#06b6d4", "teal");
    assert!(matches!(
        PlanFile::from_json_str(&bad_color),
        Err(FlypathError::Serde(_))
    ));

    let bad_duration = PLAN.replace("\"duration_secs\": 3", "\"duration_secs\": -3");
    assert!(matches!(
        PlanFile::from_json_str(&bad_duration),
        Err(FlypathError::Validation(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = PlanFile::from_path(Path::new("/nonexistent/plan.json")).unwrap_err();
    assert!(err.to_string().contains("read plan"));
}
