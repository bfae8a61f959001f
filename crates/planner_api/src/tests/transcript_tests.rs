use super::*;
use crate::catalog::Catalog;

fn fresh() -> SessionState {
    SessionState::new(&Catalog::ucr()).expect("state")
}

fn incoming(filename: &str, size_bytes: u64) -> IncomingTranscript {
    IncomingTranscript {
        filename: filename.to_string(),
        content_type: Some("application/pdf".into()),
        size_bytes,
    }
}

#[test]
fn pdf_extension_check_is_case_insensitive() {
    assert!(is_pdf("transcript.pdf"));
    assert!(is_pdf("Transcript.PDF"));
    assert!(!is_pdf("transcript.docx"));
    assert!(!is_pdf("pdf"));
    assert!(!is_pdf(".pdf"));
}

#[test]
fn accepted_transcript_records_metadata_only() {
    let now = Utc::now();
    let state = accept_transcript(fresh(), incoming("record.pdf", 2048), 4096, now)
        .expect("accepted");
    let upload = state.profile.transcript.expect("transcript");
    assert_eq!(upload.filename, "record.pdf");
    assert_eq!(upload.size_bytes, 2048);
    assert_eq!(upload.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(upload.uploaded_at, now);
}

#[test]
fn later_upload_replaces_earlier_one() {
    let now = Utc::now();
    let state = accept_transcript(fresh(), incoming("fall.pdf", 10), 4096, now).expect("first");
    let state = accept_transcript(state, incoming("winter.pdf", 20), 4096, now).expect("second");
    assert_eq!(
        state.profile.transcript.map(|t| t.filename).as_deref(),
        Some("winter.pdf")
    );
}

#[test]
fn rejects_non_pdf_and_empty_files() {
    let err = accept_transcript(fresh(), incoming("notes.txt", 10), 4096, Utc::now())
        .expect_err("not a pdf");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = accept_transcript(fresh(), incoming("empty.pdf", 0), 4096, Utc::now())
        .expect_err("empty");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = accept_transcript(fresh(), incoming("../etc.pdf", 10), 4096, Utc::now())
        .expect_err("path");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn rejects_oversized_files() {
    let err = accept_transcript(fresh(), incoming("big.pdf", 4097), 4096, Utc::now())
        .expect_err("too large");
    assert_eq!(err.code, ErrorCode::PayloadTooLarge);
}
