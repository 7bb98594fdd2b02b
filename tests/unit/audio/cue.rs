use super::*;

#[test]
fn cue_resource_is_keyed_by_frame() {
    let cue = ToneCue::for_frame(FrameIndex(3));
    assert_eq!(cue.resource, "tone-3.mp3");
    assert_eq!(cue.volume, 0.4);
}

#[test]
fn tone_dir_sink_fails_on_missing_file() {
    let dir = PathBuf::from("target").join("unit_tone_dir_missing");
    std::fs::create_dir_all(&dir).unwrap();
    let _ = std::fs::remove_file(dir.join("tone-9.mp3"));

    let mut sink = ToneDirSink::new(&dir);
    assert!(sink.play(&ToneCue::for_frame(FrameIndex(9))).is_err());
    assert!(sink.played().is_empty());
}

#[test]
fn tone_dir_sink_records_resolved_paths() {
    let dir = PathBuf::from("target").join("unit_tone_dir_present");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("tone-1.mp3"), b"").unwrap();

    let mut sink = ToneDirSink::new(&dir);
    sink.play(&ToneCue::for_frame(FrameIndex(1))).unwrap();
    assert_eq!(sink.played(), &[dir.join("tone-1.mp3")]);
}
