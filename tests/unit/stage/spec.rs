use super::*;

fn three_screen_def() -> StageDef {
    StageDef {
        height: 720,
        pillar_width: 200,
        center_width: 1280,
        screens: vec![
            ScreenDef::Pillar {
                id: "L".to_string(),
                label: None,
                x_offset: None,
            },
            ScreenDef::Center { x_offset: None },
            ScreenDef::Pillar {
                id: "R".to_string(),
                label: Some("Right".to_string()),
                x_offset: Some(1480),
            },
        ],
        hd_guide: Some(Dimensions::new(1280, 720)),
    }
}

#[test]
fn five_screen_def_matches_default_spec() {
    let spec = StageSpec::from_def(&StageDef::five_screen()).unwrap();
    assert_eq!(spec, StageSpec::default());
}

#[test]
fn default_offsets_follow_the_stage_plan() {
    let spec = StageSpec::default();
    assert_eq!(spec.total(), Dimensions::new(4140, 1080));
    assert_eq!(spec.pillar(), Dimensions::new(360, 1080));
    let offsets: Vec<u32> = spec.pillars().iter().map(|p| p.x_offset).collect();
    assert_eq!(offsets, vec![0, 360, 3420, 3780]);
    assert_eq!(spec.center().x_offset, 720);
    assert_eq!(spec.center().width, 2700);
    assert_eq!(spec.hd_guide().x_offset, 1110);
    assert_eq!(spec.hd_guide().width, 1920);
}

#[test]
fn zones_tile_total_width_without_gaps() {
    for spec in [
        StageSpec::default(),
        StageSpec::from_def(&three_screen_def()).unwrap(),
    ] {
        let mut x = 0;
        let mut sum = 0;
        for zone in spec.zones() {
            assert_eq!(zone.span.x_offset, x);
            x = zone.span.end();
            sum += zone.span.width;
        }
        assert_eq!(x, spec.total().width);
        assert_eq!(sum, spec.total().width);
    }
}

#[test]
fn zones_place_center_between_left_and_right_pillars() {
    let kinds: Vec<ZoneKind> = StageSpec::default().zones().map(|z| z.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ZoneKind::Pillar(0),
            ZoneKind::Pillar(1),
            ZoneKind::Center,
            ZoneKind::Pillar(2),
            ZoneKind::Pillar(3),
        ]
    );
}

#[test]
fn boundaries_are_interior_zone_edges() {
    assert_eq!(StageSpec::default().boundaries(), vec![360, 720, 3420, 3780]);
}

#[test]
fn custom_stage_derives_offsets_and_labels() {
    let spec = StageSpec::from_def(&three_screen_def()).unwrap();
    assert_eq!(spec.total(), Dimensions::new(1680, 720));
    assert_eq!(spec.pillars()[0].label, "L");
    assert_eq!(spec.pillars()[1].label, "Right");
    assert_eq!(spec.pillars()[1].x_offset, 1480);
    assert_eq!(spec.hd_guide().x_offset, 200);
    assert_eq!(spec.pillar_span(1).unwrap().end(), 1680);
    assert!(spec.pillar_span(2).is_none());
}

#[test]
fn center_only_stage_is_valid() {
    let def = StageDef {
        height: 1080,
        pillar_width: 0,
        center_width: 1920,
        screens: vec![ScreenDef::Center { x_offset: Some(0) }],
        hd_guide: Some(Dimensions::new(1920, 1080)),
    };
    let spec = StageSpec::from_def(&def).unwrap();
    assert!(spec.pillars().is_empty());
    assert!(spec.boundaries().is_empty());
    assert_eq!(spec.total(), Dimensions::new(1920, 1080));
}

#[test]
fn rejects_mismatched_explicit_offset() {
    let mut def = three_screen_def();
    def.screens[2] = ScreenDef::Pillar {
        id: "R".to_string(),
        label: None,
        x_offset: Some(1400),
    };
    let err = StageSpec::from_def(&def).unwrap_err();
    assert!(err.to_string().contains("x_offset 1400"));
}

#[test]
fn rejects_missing_or_duplicate_center() {
    let mut def = three_screen_def();
    def.screens.remove(1);
    assert!(StageSpec::from_def(&def).is_err());

    let mut def = three_screen_def();
    def.screens.push(ScreenDef::Center { x_offset: None });
    assert!(StageSpec::from_def(&def).is_err());
}

#[test]
fn rejects_duplicate_and_empty_pillar_ids() {
    let mut def = three_screen_def();
    def.screens[2] = ScreenDef::Pillar {
        id: "L".to_string(),
        label: None,
        x_offset: None,
    };
    assert!(
        StageSpec::from_def(&def)
            .unwrap_err()
            .to_string()
            .contains("duplicate pillar id")
    );

    let mut def = three_screen_def();
    def.screens[0] = ScreenDef::Pillar {
        id: " ".to_string(),
        label: None,
        x_offset: None,
    };
    assert!(StageSpec::from_def(&def).is_err());
}

#[test]
fn rejects_zero_sizes_and_oversized_guide() {
    let mut def = three_screen_def();
    def.height = 0;
    assert!(StageSpec::from_def(&def).is_err());

    let mut def = three_screen_def();
    def.pillar_width = 0;
    assert!(StageSpec::from_def(&def).is_err());

    let mut def = three_screen_def();
    def.hd_guide = Some(Dimensions::new(1281, 720));
    assert!(StageSpec::from_def(&def).is_err());

    let mut def = three_screen_def();
    def.hd_guide = Some(Dimensions::new(0, 720));
    assert!(StageSpec::from_def(&def).is_err());
}

#[test]
fn json_definition_round_trips_through_validation() {
    let json = serde_json::to_string(&StageDef::five_screen()).unwrap();
    let spec = StageSpec::from_json_str(&json).unwrap();
    assert_eq!(spec, StageSpec::default());
}

#[test]
fn json_definition_reports_serde_errors() {
    let err = StageSpec::from_json_str(r#"{"height": 1080}"#).unwrap_err();
    assert!(matches!(err, StageQcError::Serde(_)));

    let err = StageSpec::from_json_str(
        r#"{"height":1080,"pillar_width":360,"center_width":2700,"screens":[{"kind":"center"}],"hd_guide":{"width":1920,"height":1080},"extra":1}"#,
    )
    .unwrap_err();
    assert!(matches!(err, StageQcError::Serde(_)));
}

#[test]
fn json_definition_without_hd_guide_uses_default_guide() {
    let spec = StageSpec::from_json_str(
        r#"{
            "height": 1080,
            "pillar_width": 360,
            "center_width": 2700,
            "screens": [
                { "kind": "pillar", "id": "P1", "label": "Pillar 1 (Left)" },
                { "kind": "pillar", "id": "P2", "label": "Pillar 2 (Left)" },
                { "kind": "center" },
                { "kind": "pillar", "id": "P3", "label": "Pillar 3 (Right)" },
                { "kind": "pillar", "id": "P4", "label": "Pillar 4 (Right)" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(spec, StageSpec::default());
    assert_eq!(spec.hd_guide().x_offset, 1110);
    assert_eq!(spec.hd_guide().width, 1920);
}

#[test]
fn missing_hd_guide_shrinks_to_a_small_center() {
    let mut def = three_screen_def();
    def.hd_guide = None;
    let spec = StageSpec::from_def(&def).unwrap();
    assert_eq!(
        spec.hd_guide(),
        ZoneSpan {
            x_offset: 200,
            width: 1280,
            height: 720,
        }
    );
}

#[test]
fn screen_with_misspelled_field_is_a_serde_error() {
    let err = StageSpec::from_json_str(
        r#"{"height":1080,"pillar_width":360,"center_width":2700,"screens":[{"kind":"pillar","id":"P1","x_ofset":999},{"kind":"center"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, StageQcError::Serde(_)), "{err}");
    assert!(err.to_string().contains("x_ofset"), "{err}");

    let err = StageSpec::from_json_str(
        r#"{"height":1080,"pillar_width":360,"center_width":2700,"screens":[{"kind":"center","label":"Main"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, StageQcError::Serde(_)), "{err}");
}

#[test]
fn missing_file_is_reported() {
    let err = StageSpec::from_path(Path::new("target/does-not-exist/stage.json")).unwrap_err();
    assert!(err.to_string().contains("read stage definition"));
}
