use super::*;

fn frame(name: &str, video: Option<&str>, index: Option<u32>) -> Frame {
    Frame {
        name: name.to_string(),
        video_name: video.map(str::to_string),
        frame_index: index,
        ..Frame::default()
    }
}

#[test]
fn grouping_is_stable_and_first_seen_ordered() {
    let frames = vec![
        frame("f0", Some("v1"), None),
        frame("f1", Some("v2"), None),
        frame("f2", Some("v1"), None),
    ];
    let groups = group_and_sort(frames).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0][0].video_name.as_deref(), Some("v1"));
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0][0].name, "f0");
    assert_eq!(groups[0][1].name, "f2");
    assert_eq!(groups[1][0].video_name.as_deref(), Some("v2"));
    assert_eq!(groups[1].len(), 1);
}

#[test]
fn frames_sort_by_frame_index_within_group() {
    let frames = vec![
        frame("late", Some("v1"), Some(2)),
        frame("early", Some("v1"), Some(1)),
    ];
    let groups = group_and_sort(frames).unwrap();
    assert_eq!(groups[0][0].name, "early");
    assert_eq!(groups[0][1].name, "late");
}

#[test]
fn missing_video_name_fails_the_whole_run() {
    let frames = vec![
        frame("f0", Some("v1"), None),
        frame("f1", None, None),
    ];
    let err = group_and_sort(frames).unwrap_err();
    assert!(err.to_string().contains("videoName"));

    let frames = vec![frame("f0", Some(""), None)];
    assert!(group_and_sort(frames).is_err());
}

#[test]
fn save_then_load_roundtrips_frames() {
    let dir = std::path::PathBuf::from("target").join("unit_io_roundtrip");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("labels.json");

    let frames = vec![frame("a.jpg", Some("v1"), Some(0))];
    save(&path, &frames).unwrap();

    let dataset = load(&path, 1).unwrap();
    assert_eq!(dataset.frames.len(), 1);
    assert_eq!(dataset.frames[0].name, "a.jpg");
    assert!(dataset.config.is_none());
}

#[test]
fn directory_load_concatenates_in_name_order() {
    let dir = std::path::PathBuf::from("target").join("unit_io_dir");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    // One dataset object, one bare frame array; also a non-json straggler.
    std::fs::write(
        dir.join("a.json"),
        r#"{"frames": [{"name": "a0.jpg"}], "config": {"imageSize": {"width": 8, "height": 4}}}"#,
    )
    .unwrap();
    std::fs::write(dir.join("b.json"), r#"[{"name": "b0.jpg"}]"#).unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let dataset = load(&dir, 2).unwrap();
    let names: Vec<&str> = dataset.frames.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a0.jpg", "b0.jpg"]);
    assert_eq!(
        dataset.config.unwrap().image_size,
        Some(crate::label::model::ImageSize {
            width: 8,
            height: 4
        })
    );
}

#[test]
fn empty_directory_is_a_validation_error() {
    let dir = std::path::PathBuf::from("target").join("unit_io_empty");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    assert!(load(&dir, 1).is_err());
}
