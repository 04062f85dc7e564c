use super::*;
use crate::label::model::{Frame, ImageSize, Label, Poly2D};

fn unit(dir: &std::path::Path, name: &str) -> ConversionUnit {
    ConversionUnit {
        out_path: dir.join(name),
        size: ImageSize {
            width: 4,
            height: 4,
        },
        frames: vec![Frame {
            name: name.to_string(),
            labels: Some(vec![Label {
                id: "1".to_string(),
                poly2d: Some(vec![Poly2D {
                    vertices: vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]],
                    types: "LLLL".to_string(),
                    closed: true,
                }]),
                ..Label::default()
            }]),
            ..Frame::default()
        }],
    }
}

#[test]
fn every_unit_writes_its_own_file() {
    let dir = std::path::PathBuf::from("target").join("unit_dispatch_fanout");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let units = vec![unit(&dir, "a.json"), unit(&dir, "b.json"), unit(&dir, "c.json")];
    dispatch_units(units, 2).unwrap();

    for name in ["a.json", "b.json", "c.json"] {
        let frames: Vec<Frame> =
            serde_json::from_str(&std::fs::read_to_string(dir.join(name)).unwrap()).unwrap();
        assert!(frames[0].labels.as_ref().unwrap()[0].rle.is_some());
    }
}

#[test]
fn worker_count_never_changes_output_bytes() {
    let dir = std::path::PathBuf::from("target").join("unit_dispatch_determinism");
    let _ = std::fs::remove_dir_all(&dir);
    let serial = dir.join("serial");
    let parallel = dir.join("parallel");
    std::fs::create_dir_all(&serial).unwrap();
    std::fs::create_dir_all(&parallel).unwrap();

    let names = ["a.json", "b.json", "c.json", "d.json"];
    dispatch_units(names.iter().map(|n| unit(&serial, n)).collect(), 1).unwrap();
    dispatch_units(names.iter().map(|n| unit(&parallel, n)).collect(), 4).unwrap();

    for name in names {
        let lhs = std::fs::read(serial.join(name)).unwrap();
        let rhs = std::fs::read(parallel.join(name)).unwrap();
        assert_eq!(lhs, rhs, "{name} differs between worker counts");
    }
}

#[test]
fn a_failing_unit_fails_the_dispatch() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_dispatch_failure")
        .join("missing-subdir");
    // parent deliberately not created: the unit's save must fail
    let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    assert!(dispatch_units(vec![unit(&dir, "a.json")], 2).is_err());
}

#[test]
fn empty_dispatch_is_a_no_op() {
    dispatch_units(Vec::new(), 4).unwrap();
}
