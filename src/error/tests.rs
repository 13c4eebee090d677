use super::*;

#[test]
fn test_check_length() {
    assert!(Error::check_length("buffer", 32, 32).is_ok());

    let err = Error::check_length("buffer", 16, 32).unwrap_err();
    match err {
        Error::Length {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "buffer");
            assert_eq!(expected, 32);
            assert_eq!(actual, 16);
        }
        _ => panic!("Expected Length error"),
    }
}

#[test]
fn test_param_constructor() {
    let err = Error::param("AES key", "length must be 16, 24, or 32 bytes");
    match err {
        Error::Parameter { name, reason } => {
            assert_eq!(name, "AES key");
            assert_eq!(reason, "length must be 16, 24, or 32 bytes");
        }
        _ => panic!("Expected Parameter error"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::param("AES key", "length must be 16, 24, or 32 bytes");
    assert_eq!(
        err.to_string(),
        "Invalid parameter 'AES key': length must be 16, 24, or 32 bytes"
    );

    let err = Error::check_length("AES block", 8, 16).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid length for AES block: expected 16, got 8"
    );
}
