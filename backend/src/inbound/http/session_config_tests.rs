//! Regression coverage for this module.

use std::io::Write;

use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'a'; len]).expect("write key");
    file
}

#[fixture]
fn settings() -> ConsoleSettings {
    ConsoleSettings {
        bind_addr: None,
        supabase_url: None,
        supabase_anon_key: None,
        supabase_service_key: None,
        storage_bucket: None,
        invite_base_url: None,
        http_timeout_secs: None,
        session_key_file: Some(PathBuf::from("/nonexistent/session_key")),
        cookie_secure: None,
        same_site: None,
        allow_ephemeral_session: false,
        demo_admin_email: None,
        demo_admin_password: None,
    }
}

#[rstest]
fn release_accepts_a_long_key(mut settings: ConsoleSettings) {
    let key = key_file(64);
    settings.session_key_file = Some(key.path().to_path_buf());
    settings.cookie_secure = Some(true);
    settings.same_site = Some("Strict".to_owned());

    let session = session_settings(&settings, BuildMode::Release).expect("valid release config");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Strict);
}

#[rstest]
fn release_rejects_a_short_key(mut settings: ConsoleSettings) {
    let key = key_file(16);
    settings.session_key_file = Some(key.path().to_path_buf());

    let err = session_settings(&settings, BuildMode::Release)
        .err()
        .expect("short key rejected");
    assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
}

#[rstest]
fn release_requires_a_readable_key(settings: ConsoleSettings) {
    let err = session_settings(&settings, BuildMode::Release)
        .err()
        .expect("missing key rejected");
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_generates_a_temporary_key(settings: ConsoleSettings) {
    let session = session_settings(&settings, BuildMode::Debug).expect("debug fallback");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Lax);
}

#[rstest]
fn release_refuses_ephemeral_keys(mut settings: ConsoleSettings) {
    settings.allow_ephemeral_session = true;
    let err = session_settings(&settings, BuildMode::Release)
        .err()
        .expect("ephemeral refused");
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case(BuildMode::Release, Some("None"), false, None)]
#[case(BuildMode::Debug, Some("None"), false, Some(SameSite::None))]
#[case(BuildMode::Release, Some("None"), true, Some(SameSite::None))]
#[case(BuildMode::Release, Some("bogus"), true, None)]
#[case(BuildMode::Debug, Some("bogus"), true, Some(SameSite::Lax))]
#[case(BuildMode::Release, None, true, Some(SameSite::Strict))]
fn same_site_policy(
    #[case] mode: BuildMode,
    #[case] raw: Option<&str>,
    #[case] secure: bool,
    #[case] expected: Option<SameSite>,
) {
    assert_eq!(same_site(raw, mode, secure).ok(), expected);
}
