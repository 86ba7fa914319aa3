use super::*;
use crate::{encoding, test_vectors, ControlFlags, FormatError};

fn hex(value: &str) -> Vec<u8> {
    encoding::try_from_hex(value).unwrap()
}

fn array(value: &str) -> [u8; 32] {
    hex(value).try_into().unwrap()
}

fn vector_register_response() -> RegisterResponse {
    RegisterResponse {
        public_key: PublicKey::decode(&hex(test_vectors::USER_PUBLIC_KEY_ENROLL_HEX)).unwrap(),
        key_handle: hex(test_vectors::KEY_HANDLE_HEX),
        attestation_certificate: hex(test_vectors::VENDOR_CERTIFICATE_HEX),
        signature: hex(test_vectors::SIGNATURE_REGISTER_HEX),
    }
}

fn vector_authentication_request() -> AuthenticationRequest {
    AuthenticationRequest {
        parameter: AuthenticationParameter::EnforceUserPresence,
        challenge: array(test_vectors::BROWSER_DATA_SIGN_SHA256_HEX),
        application: array(test_vectors::APP_ID_SIGN_SHA256_HEX),
        key_handle: hex(test_vectors::KEY_HANDLE_HEX),
    }
}

fn vector_authentication_response() -> AuthenticationResponse {
    AuthenticationResponse {
        user_presence: ControlFlags::USER_PRESENCE,
        counter: test_vectors::COUNTER_VALUE,
        signature: hex(test_vectors::SIGNATURE_AUTHENTICATE_HEX),
    }
}

#[test]
fn register_request_matches_vector() {
    let request = RegisterRequest {
        challenge: array(test_vectors::BROWSER_DATA_ENROLL_SHA256_HEX),
        application: array(test_vectors::APP_ID_ENROLL_SHA256_HEX),
    };
    let encoded = hex(test_vectors::REGISTRATION_REQUEST_DATA_HEX);

    assert_eq!(request.encode(), encoded);
    assert_eq!(RegisterRequest::decode(&encoded), Ok(request));
}

#[test]
fn register_response_matches_vector() {
    let encoded = hex(test_vectors::REGISTRATION_RESPONSE_DATA_HEX);
    let response = vector_register_response();

    assert_eq!(response.encode().unwrap(), encoded);
    assert_eq!(RegisterResponse::decode(&encoded), Ok(response));
}

#[test]
fn authentication_request_matches_vector() {
    let encoded = hex(test_vectors::SIGN_REQUEST_DATA_HEX);
    let request = vector_authentication_request();

    assert_eq!(request.encode().unwrap(), encoded);
    assert_eq!(AuthenticationRequest::decode(&encoded), Ok(request));
}

#[test]
fn authentication_response_matches_vector() {
    let encoded = hex(test_vectors::SIGN_RESPONSE_DATA_HEX);
    let response = vector_authentication_response();

    assert_eq!(response.encode(), encoded);
    assert_eq!(AuthenticationResponse::decode(&encoded), Ok(response));
}

#[test]
fn registration_signed_bytes_match_vector() {
    let response = vector_register_response();
    let signed = encode_registration_signed_bytes(
        &array(test_vectors::APP_ID_ENROLL_SHA256_HEX),
        &array(test_vectors::BROWSER_DATA_ENROLL_SHA256_HEX),
        &response.key_handle,
        &response.public_key,
    );

    assert_eq!(signed, hex(test_vectors::EXPECTED_REGISTER_SIGNED_BYTES_HEX));
}

#[test]
fn authentication_signed_bytes_match_vector() {
    let signed = encode_authentication_signed_bytes(
        &array(test_vectors::APP_ID_SIGN_SHA256_HEX),
        ControlFlags::USER_PRESENCE,
        test_vectors::COUNTER_VALUE,
        &array(test_vectors::BROWSER_DATA_SIGN_SHA256_HEX),
    );

    assert_eq!(
        signed,
        hex(test_vectors::EXPECTED_AUTHENTICATE_SIGNED_BYTES_HEX)
    );
}

#[test]
fn signed_bytes_are_deterministic() {
    let application = [0xaa; 32];
    let challenge = [0x55; 32];
    let public_key = vector_register_response().public_key;

    assert_eq!(
        encode_registration_signed_bytes(&application, &challenge, &[1, 2, 3], &public_key),
        encode_registration_signed_bytes(&application, &challenge, &[1, 2, 3], &public_key),
    );
    assert_eq!(
        encode_authentication_signed_bytes(&application, ControlFlags::empty(), 7, &challenge),
        encode_authentication_signed_bytes(&application, ControlFlags::empty(), 7, &challenge),
    );
    assert_ne!(
        encode_authentication_signed_bytes(&application, ControlFlags::empty(), 7, &challenge),
        encode_authentication_signed_bytes(&application, ControlFlags::empty(), 8, &challenge),
    );
}

/// Every strict prefix must be rejected, as must every single byte extension.
fn assert_strict<T: std::fmt::Debug>(
    encoded: &[u8],
    decode: impl Fn(&[u8]) -> Result<T, FormatError>,
) {
    for len in 0..encoded.len() {
        assert!(
            decode(&encoded[..len]).is_err(),
            "prefix of {len} bytes was accepted"
        );
    }
    for byte in [0x00, 0x90, 0xff] {
        let mut extended = encoded.to_vec();
        extended.push(byte);
        assert_eq!(
            decode(&extended).unwrap_err(),
            FormatError::UnexpectedTrailingData
        );
    }
}

#[test]
fn decoders_reject_truncated_and_extended_messages() {
    assert_strict(
        &hex(test_vectors::REGISTRATION_REQUEST_DATA_HEX),
        RegisterRequest::decode,
    );
    assert_strict(
        &hex(test_vectors::REGISTRATION_RESPONSE_DATA_HEX),
        RegisterResponse::decode,
    );
    assert_strict(
        &hex(test_vectors::SIGN_REQUEST_DATA_HEX),
        AuthenticationRequest::decode,
    );
    assert_strict(
        &hex(test_vectors::SIGN_RESPONSE_DATA_HEX),
        AuthenticationResponse::decode,
    );
}

#[test]
fn truncation_inside_a_field_reports_truncated_message() {
    let encoded = hex(test_vectors::SIGN_RESPONSE_DATA_HEX);
    assert_eq!(
        AuthenticationResponse::decode(&encoded[..3]),
        Err(FormatError::TruncatedMessage)
    );
    assert_eq!(
        AuthenticationResponse::decode(&encoded[..encoded.len() - 1]),
        Err(FormatError::TruncatedMessage)
    );

    let encoded = hex(test_vectors::SIGN_REQUEST_DATA_HEX);
    assert_eq!(
        AuthenticationRequest::decode(&encoded[..encoded.len() - 1]),
        Err(FormatError::TruncatedMessage)
    );
}

#[test]
fn register_response_rejects_wrong_reserved_byte() {
    let mut encoded = hex(test_vectors::REGISTRATION_RESPONSE_DATA_HEX);
    encoded[0] = 0x04;

    assert_eq!(
        RegisterResponse::decode(&encoded),
        Err(FormatError::InvalidReservedByte(0x04))
    );
}

#[test]
fn register_response_rejects_key_handle_past_the_end() {
    let encoded = hex(test_vectors::REGISTRATION_RESPONSE_DATA_HEX);
    // reserved byte, public key, then a length byte claiming 0x40 bytes
    let truncated = &encoded[..1 + PublicKey::LEN + 1 + 10];

    assert_eq!(
        RegisterResponse::decode(truncated),
        Err(FormatError::TruncatedMessage)
    );
}

#[test]
fn public_key_must_be_uncompressed() {
    let mut raw = hex(test_vectors::USER_PUBLIC_KEY_ENROLL_HEX);
    raw[0] = 0x02;

    assert_eq!(PublicKey::decode(&raw), Err(FormatError::InvalidPublicKey));
}

#[test]
fn unknown_control_byte_is_a_format_error() {
    let mut encoded = hex(test_vectors::SIGN_REQUEST_DATA_HEX);
    encoded[0] = 0x42;

    assert_eq!(
        AuthenticationRequest::decode(&encoded),
        Err(FormatError::InvalidControlByte(0x42))
    );
}

#[test]
fn key_handle_longer_than_255_bytes_cannot_be_encoded() {
    let mut request = vector_authentication_request();
    request.key_handle = vec![0; 256];
    assert_eq!(request.encode(), Err(FormatError::KeyHandleTooLong(256)));

    let mut response = vector_register_response();
    response.key_handle = vec![0; 300];
    assert_eq!(response.encode(), Err(FormatError::KeyHandleTooLong(300)));

    request.key_handle = vec![0; 255];
    let encoded = request.encode().unwrap();
    assert_eq!(AuthenticationRequest::decode(&encoded), Ok(request));
}

#[test]
fn control_flags_survive_the_response_round_trip() {
    let mut response = vector_authentication_response();
    response.user_presence = ControlFlags::from(0x03);
    let encoded = response.encode();

    assert_eq!(encoded[0], 0x03);
    assert_eq!(AuthenticationResponse::decode(&encoded), Ok(response));
}

#[test]
fn apdu_register_request_extended_length() {
    let payload = hex(test_vectors::REGISTRATION_REQUEST_DATA_HEX);
    let mut frame = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x40];
    frame.extend_from_slice(&payload);

    let request = Request::try_from(frame.as_slice()).unwrap();
    assert_eq!(request.ins, Command::Register);
    assert_eq!(request.data_len, 64);
    assert_eq!(
        request.data,
        RequestPayload::Register(RegisterRequest::decode(&payload).unwrap())
    );
    assert_eq!(request.encode().unwrap(), frame);

    // trailing extended Le
    frame.extend_from_slice(&[0x00, 0x00]);
    assert!(Request::try_from(frame.as_slice()).is_ok());
}

#[test]
fn apdu_authenticate_request_takes_control_from_p1() {
    let request = vector_authentication_request();
    let payload = request.encode_payload().unwrap();
    let mut frame = vec![0x00, 0x02, 0x03, 0x00, 0x00, 0x00];
    frame.push(u8::try_from(payload.len()).unwrap());
    frame.extend_from_slice(&payload);

    let parsed = Request::try_from(frame.as_slice()).unwrap();
    assert_eq!(parsed.p1, 0x03);
    assert_eq!(parsed.data, RequestPayload::Authenticate(request));

    frame[2] = 0x42;
    assert_eq!(
        Request::try_from(frame.as_slice()),
        Err(ResponseStatusWords::WrongData)
    );
}

#[test]
fn apdu_framing_errors() {
    assert_eq!(
        Request::try_from([0x00, 0x01, 0x00].as_slice()),
        Err(ResponseStatusWords::WrongLength)
    );
    assert_eq!(
        Request::try_from([0x80, 0x03, 0x00, 0x00].as_slice()),
        Err(ResponseStatusWords::ClaNotSupported)
    );
    assert_eq!(
        Request::try_from([0x00, 0x40, 0x00, 0x00].as_slice()),
        Err(ResponseStatusWords::InsNotSupported)
    );
    // Lc claims more data than present
    assert_eq!(
        Request::try_from([0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x40, 0x01].as_slice()),
        Err(ResponseStatusWords::WrongLength)
    );
    // register payload must be exactly 64 bytes
    assert_eq!(
        Request::try_from([0x00, 0x01, 0x00, 0x00, 0x02, 0xaa, 0xbb].as_slice()),
        Err(ResponseStatusWords::WrongLength)
    );
}

#[test]
fn apdu_version_request() {
    for frame in [
        vec![0x00, 0x03, 0x00, 0x00],
        vec![0x00, 0x03, 0x00, 0x00, 0x00],
        vec![0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00],
    ] {
        let request = Request::try_from(frame.as_slice()).unwrap();
        assert_eq!(request.data, RequestPayload::Version);
    }
    assert_eq!(Version.encode(), b"U2F_V2\x90\x00".to_vec());
}

#[test]
fn status_words_round_trip() {
    assert_eq!(
        ResponseStatusWords::try_from(0x6985_u16),
        Ok(ResponseStatusWords::ConditionsNotSatisfied)
    );
    assert_eq!(ResponseStatusWords::WrongData.as_primitive(), 0x6A80);
    assert_eq!(
        ResponseStatusWords::NoError.append_to(vec![0x01]),
        vec![0x01, 0x90, 0x00]
    );
}
