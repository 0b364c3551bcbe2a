use resample_rs::internals::primitives::errors::ResampleError;

#[test]
fn test_resample_error_display() {
    // EmptyInput
    let err = ResampleError::EmptyInput;
    assert_eq!(format!("{}", err), "Input table has no usable time columns");

    // InvalidInput
    let err = ResampleError::InvalidInput("test error".to_string());
    assert_eq!(format!("{}", err), "Invalid input: test error");

    // InsufficientData
    let err = ResampleError::InsufficientData { got: 3, min: 6 };
    assert_eq!(
        format!("{}", err),
        "Insufficient data: got 3 time columns, need at least 6"
    );

    // MismatchedInputs
    let err = ResampleError::MismatchedInputs {
        expected: 4,
        got: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Length mismatch: expected 4 values per column, got 2"
    );

    // InvalidNumericValue
    let err = ResampleError::InvalidNumericValue("NaN detected".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: NaN detected");

    // DuplicateParameter
    let err = ResampleError::DuplicateParameter { parameter: "step" };
    assert_eq!(format!("{}", err), "Parameter 'step' was set multiple times");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tsv");
    let err: ResampleError = io.into();

    assert!(matches!(err, ResampleError::Io(_)));
    assert!(format!("{}", err).starts_with("I/O error:"));
    assert!(std::error::Error::source(&err).is_some());
}
