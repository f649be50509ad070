// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end editing, persistence and preview scenarios.

use dynasty_editor_timeline::{
    frame_at, AnimatableProperty, ClipId, ClipKind, ClipUpdate, ColorGrading, Easing,
    ManualTimeSource, PlaybackClock, PlaybackState, Project, ProjectError,
};

#[test]
fn test_fade_in_scenario() {
    let mut project = Project::new("Fade");
    project.duration = 10.0;

    let id = project.add_clip(ClipKind::Video, 2.0);
    project.update_clip(&id, ClipUpdate::new().duration(4.0));

    // Key opacity 0 at the clip start and 1 at its end.
    project.set_property_value(&id, AnimatableProperty::Opacity, 0.0, 0.0);
    project.add_keyframe(&id, AnimatableProperty::Opacity, 0.0);
    project.set_property_value(&id, AnimatableProperty::Opacity, 4.0, 1.0);
    project.add_keyframe(&id, AnimatableProperty::Opacity, 4.0);

    let frame = frame_at(&project, 4.0);
    assert_eq!(frame.len(), 1);
    let layer = &frame.layers[0];
    assert_eq!(layer.clip.id, id);
    assert_eq!(layer.relative_time, 2.0);
    assert_eq!(layer.transform.opacity, 0.5);

    project.update_keyframe_easing(&id, AnimatableProperty::Opacity, 0.0, Easing::EaseIn);
    assert_eq!(frame_at(&project, 4.0).layers[0].transform.opacity, 0.25);
}

#[test]
fn test_playback_drives_compositor() {
    let mut project = Project::new("Scrub");
    project.duration = 30.0;
    let id = project.add_clip(ClipKind::Text, 27.0);
    project.clip_mut(&id).unwrap().keyframes.x = vec![
        dynasty_editor_timeline::Keyframe::new(0.0, 0.0),
        dynasty_editor_timeline::Keyframe::new(2.0, 100.0),
    ];

    let source = ManualTimeSource::new();
    let mut clock = PlaybackClock::with_source(source.clone(), project.duration);
    clock.seek(28.0);
    let ticket = clock.play();

    source.advance_secs(0.5);
    let sample = clock.advance(ticket).unwrap();
    let frame = frame_at(&project, sample.time);
    assert_eq!(frame.layers[0].transform.x, 75.0);

    source.advance_secs(10.0);
    let sample = clock.advance(ticket).unwrap();
    assert!(sample.finished);
    assert_eq!(sample.time, 30.0);
    assert_eq!(clock.state(), PlaybackState::Stopped { at: 30.0 });
    // The clip runs to 32s but the playhead never gets there.
    assert_eq!(frame_at(&project, sample.time).layers[0].transform.x, 100.0);
}

#[test]
fn test_json_round_trip_keeps_structure() {
    let mut project = Project::new("Persisted");
    let id = project.add_clip(ClipKind::Video, 1.0);
    project.add_keyframe(&id, AnimatableProperty::Scale, 0.5);
    project.update_keyframe_easing(&id, AnimatableProperty::Scale, 0.5, Easing::EaseOut);

    let json = project.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["clips"].is_array());
    assert_eq!(value["aspectRatio"], "9:16");
    assert_eq!(value["clips"][0]["keyframes"]["scale"][0]["easing"], "ease-out");

    let loaded = Project::from_json(&json).unwrap();
    assert_eq!(loaded, project);
}

#[test]
fn test_loading_rejects_duplicate_ids() {
    let mut project = Project::new("Broken");
    let id = project.add_clip(ClipKind::Video, 0.0);
    let copy = project.clip(&id).unwrap().clone();
    project.clips.push(copy);

    let json = project.to_json().unwrap();
    assert!(matches!(
        Project::from_json(&json),
        Err(ProjectError::DuplicateClipId(_))
    ));
}

#[test]
fn test_suggested_grading_applies_as_update() {
    let mut project = Project::new("Graded");
    let id = project.add_clip(ClipKind::Video, 0.0);

    let suggestion = r#"{"colorGrading":{"brightness":105,"contrast":110,"saturation":90,"vibrance":100,"exposure":0,"highlights":-5,"shadows":5,"temperature":10,"tint":0}}"#;
    let update: ClipUpdate = serde_json::from_str(suggestion).unwrap();
    assert!(project.update_clip(&id, update));

    let frame = frame_at(&project, 1.0);
    assert_eq!(
        frame.layers[0].color_grading,
        ColorGrading {
            brightness: 105.0,
            contrast: 110.0,
            saturation: 90.0,
            vibrance: 100.0,
            exposure: 0.0,
            highlights: -5.0,
            shadows: 5.0,
            temperature: 10.0,
            tint: 0.0,
        }
    );
}

const SAVED_PROJECT: &str = r#"{
    "id": "k3j9x2m1a",
    "name": "Summer Reel",
    "clips": [
        {
            "id": "a8f2k1z9q",
            "type": "video",
            "name": "New video",
            "startTime": 0,
            "duration": 5,
            "sourceUrl": "https://cdn.dynasty.app/media/clip.mp4",
            "layer": 0,
            "transform": {"x": 0, "y": 0, "scale": 1, "rotation": 0, "opacity": 1},
            "colorGrading": {
                "brightness": 100, "contrast": 100, "saturation": 100, "vibrance": 100,
                "exposure": 0, "highlights": 0, "shadows": 0, "temperature": 0, "tint": 0
            },
            "keyframes": {
                "opacity": [
                    {"time": 0, "value": 0, "easing": "ease-out"},
                    {"time": 2, "value": 1, "easing": "linear"}
                ]
            },
            "effects": []
        },
        {
            "id": "p0c7t4n2x",
            "type": "text",
            "name": "Caption",
            "startTime": 1.5,
            "duration": 3,
            "sourceUrl": "",
            "layer": 1,
            "transform": {"x": 0, "y": 120, "scale": 1, "rotation": 0, "opacity": 1},
            "colorGrading": {
                "brightness": 100, "contrast": 100, "saturation": 100, "vibrance": 100,
                "exposure": 0, "highlights": 0, "shadows": 0, "temperature": 0, "tint": 0
            },
            "keyframes": {},
            "effects": []
        }
    ],
    "duration": 30,
    "aspectRatio": "9:16",
    "fps": 30,
    "updatedAt": "2024-05-01T12:00:00.000Z"
}"#;

#[test]
fn test_loads_project_with_short_ids() {
    let mut project = Project::from_json(SAVED_PROJECT).unwrap();
    assert_eq!(project.id.as_str(), "k3j9x2m1a");
    assert_eq!(project.clip_count(), 2);

    let video = ClipId::try_from("a8f2k1z9q".to_string()).unwrap();
    let frame = frame_at(&project, 1.0);
    assert_eq!(frame.layer(&video).unwrap().transform.opacity, 0.75);

    // Edits keep working against the stored ids, and the ids are written back as-is.
    assert!(project.update_clip(&video, ClipUpdate::new().name("Intro")));
    let value: serde_json::Value = serde_json::from_str(&project.to_json().unwrap()).unwrap();
    assert_eq!(value["id"], "k3j9x2m1a");
    assert_eq!(value["clips"][0]["id"], "a8f2k1z9q");
    assert_eq!(value["clips"][0]["name"], "Intro");
}

#[test]
fn test_loading_rejects_empty_ids() {
    let broken = SAVED_PROJECT.replace("\"a8f2k1z9q\"", "\"\"");
    assert!(matches!(
        Project::from_json(&broken),
        Err(ProjectError::Json(_))
    ));
}
