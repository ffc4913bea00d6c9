use super::*;

#[test]
fn missing_credentials_maps_to_bad_request() {
    assert_eq!(AppError::MissingCredentials.status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::MissingCredentials.to_string(), "Email and password are required");
}

#[test]
fn not_found_maps_to_404() {
    assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
}

#[test]
fn internal_maps_to_500() {
    let err = AppError::Internal("clock".into());
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "Internal error: clock");
}

#[test]
fn into_response_carries_status() {
    let response = AppError::MissingCredentials.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
