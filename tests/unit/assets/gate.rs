use super::*;

#[test]
fn allow_list_maps_to_kinds() {
    for mime in ["image/png", "image/jpeg", "image/jpg"] {
        assert_eq!(media_kind_for_mime(mime), Some(MediaKind::Image));
    }
    for mime in ["video/mp4", "video/quicktime", "video/x-m4v"] {
        assert_eq!(media_kind_for_mime(mime), Some(MediaKind::Video));
    }
    assert!(!is_accepted_mime("image/gif"));
    assert!(!is_accepted_mime("video/webm"));
    assert!(!is_accepted_mime("IMAGE/PNG"));
}

#[test]
fn extension_lookup_is_case_insensitive() {
    assert_eq!(mime_for_path(Path::new("a/b/show.PNG")), Some("image/png"));
    assert_eq!(mime_for_path(Path::new("show.Jpeg")), Some("image/jpeg"));
    assert_eq!(mime_for_path(Path::new("loop.MOV")), Some("video/quicktime"));
    assert_eq!(mime_for_path(Path::new("loop.m4v")), Some("video/x-m4v"));
    assert_eq!(mime_for_path(Path::new("loop.webm")), None);
    assert_eq!(mime_for_path(Path::new("README")), None);
}

#[test]
fn size_limit_is_inclusive() {
    assert!(check_file_size(MAX_FILE_SIZE_BYTES).is_ok());
    let err = check_file_size(MAX_FILE_SIZE_BYTES + 1).unwrap_err();
    assert!(matches!(err, StageQcError::Rejected(_)));
}

#[test]
fn gate_accepts_small_png_and_rejects_unknown_types() {
    let dir = PathBuf::from("target").join("unit_gate");
    std::fs::create_dir_all(&dir).unwrap();

    let png = dir.join("tiny.png");
    std::fs::write(&png, b"not really a png").unwrap();
    let gated = gate_file(&png).unwrap();
    assert_eq!(gated.kind, MediaKind::Image);
    assert_eq!(gated.mime, "image/png");
    assert_eq!(gated.file_name, "tiny.png");
    assert_eq!(gated.size_bytes, 16);

    let txt = dir.join("notes.txt");
    std::fs::write(&txt, b"hello").unwrap();
    assert!(matches!(gate_file(&txt), Err(StageQcError::Rejected(_))));

    let missing = dir.join("missing.mp4");
    let _ = std::fs::remove_file(&missing);
    assert!(matches!(gate_file(&missing), Err(StageQcError::Other(_))));
}
