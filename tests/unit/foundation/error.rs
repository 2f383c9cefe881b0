use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlypathError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FlypathError::input("x").to_string().contains("input error:"));
    assert!(
        FlypathError::lookup("x")
            .to_string()
            .contains("lookup error:")
    );
    assert!(
        FlypathError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        FlypathError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlypathError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn input_errors_surface_their_bare_message() {
    let err = FlypathError::input("Please add a group.");
    assert_eq!(err.user_message(), "Please add a group.");
    assert_eq!(
        FlypathError::lookup("miss").user_message(),
        "lookup error: miss"
    );
}

#[test]
fn json_errors_convert_to_serde() {
    let err: FlypathError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, FlypathError::Serde(_)));
}
