use zipformer_asr_api::domain::UploadedAudio;

#[test]
fn given_mixed_case_hints_when_creating_then_normalizes_them() {
    let upload = UploadedAudio::new(vec![1, 2, 3], Some(" Clip.WAV "), Some("Audio/X-WAV"));

    assert_eq!(upload.filename(), "clip.wav");
    assert_eq!(upload.content_type(), "audio/x-wav");
    assert_eq!(upload.data(), &[1, 2, 3]);
    assert_eq!(upload.size_bytes(), 3);
}

#[test]
fn given_missing_hints_when_creating_then_uses_empty_strings() {
    let upload = UploadedAudio::new(Vec::new(), None, None);

    assert!(upload.filename().is_empty());
    assert!(upload.content_type().is_empty());
    assert_eq!(upload.size_bytes(), 0);
}
