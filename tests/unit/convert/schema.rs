use super::*;
use crate::config::CategorySpec;
use crate::label::model::Label;

fn config() -> DatasetConfig {
    DatasetConfig {
        image_size: None,
        categories: vec![
            CategorySpec {
                name: "pedestrian".to_string(),
                aliases: vec!["person".to_string()],
                ignored: false,
            },
            CategorySpec {
                name: "car".to_string(),
                aliases: vec![],
                ignored: false,
            },
            CategorySpec {
                name: "trailer".to_string(),
                aliases: vec![],
                ignored: true,
            },
        ],
    }
}

fn labeled_frame(categories: &[Option<&str>]) -> Frame {
    Frame {
        name: "a.jpg".to_string(),
        labels: Some(
            categories
                .iter()
                .enumerate()
                .map(|(i, category)| Label {
                    id: i.to_string(),
                    category: category.map(str::to_string),
                    ..Label::default()
                })
                .collect(),
        ),
        ..Frame::default()
    }
}

#[test]
fn aliases_canonicalize_and_known_names_pass() {
    let frames = translate_frames(vec![labeled_frame(&[Some("person"), Some("car")])], &config());
    let labels = frames[0].labels.as_ref().unwrap();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].category.as_deref(), Some("pedestrian"));
    assert_eq!(labels[1].category.as_deref(), Some("car"));
}

#[test]
fn ignored_and_unknown_categories_are_dropped() {
    let frames = translate_frames(
        vec![labeled_frame(&[Some("trailer"), Some("unicorn"), Some("car")])],
        &config(),
    );
    let labels = frames[0].labels.as_ref().unwrap();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].category.as_deref(), Some("car"));
}

#[test]
fn uncategorized_labels_pass_through() {
    let frames = translate_frames(vec![labeled_frame(&[None])], &config());
    assert_eq!(frames[0].labels.as_ref().unwrap().len(), 1);
}

#[test]
fn empty_vocabulary_disables_translation() {
    let empty = DatasetConfig::default();
    let frames = translate_frames(vec![labeled_frame(&[Some("unicorn")])], &empty);
    assert_eq!(frames[0].labels.as_ref().unwrap().len(), 1);
    assert_eq!(
        frames[0].labels.as_ref().unwrap()[0].category.as_deref(),
        Some("unicorn")
    );
}

#[test]
fn frames_are_never_dropped() {
    let frames = translate_frames(
        vec![
            labeled_frame(&[Some("unicorn")]),
            Frame {
                name: "b.jpg".to_string(),
                ..Frame::default()
            },
        ],
        &config(),
    );
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].labels.as_ref().unwrap().len(), 0);
    assert!(frames[1].labels.is_none());
}
