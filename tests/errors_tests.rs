use std::error::Error;
use sqs_jms::errors::JmsError;

#[test]
fn test_jms_error_implements_error_trait() {
    // Verify JmsError implements the Error trait and can cross threads
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    let error = JmsError::InvalidReplyTo("{}".to_string());
    assert_error(&error);
}

#[test]
fn test_jms_error_display() {
    let error = JmsError::UnknownMessageType("object".to_string());
    assert_eq!(format!("{error}"), "Unknown JMS message type: object");

    let error = JmsError::InvalidMessageType {
        entry_id: Some("e-2".to_string()),
        value: "bogus".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "JMSMessageType must be byte or text (entry e-2): bogus"
    );

    let error = JmsError::MissingMessageType { entry_id: None };
    assert_eq!(
        format!("{error}"),
        "Message missing attribute JMS_SQSMessageType (entry -)"
    );
}

#[test]
fn test_jms_error_from_conversions() {
    use base64::Engine as _;

    let decode_err = base64::engine::general_purpose::STANDARD
        .decode("***")
        .unwrap_err();
    let jms_err: JmsError = decode_err.into();
    assert!(matches!(jms_err, JmsError::InvalidBase64(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let jms_err: JmsError = json_err.into();
    assert!(matches!(jms_err, JmsError::Event(_)));

    // The AWS SDK conversion cannot be built without a live request, so only
    // check that it exists.
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_sdk_conversion<E: std::fmt::Display, R: std::fmt::Debug>(
        err: aws_sdk_sqs::error::SdkError<E, R>,
    ) -> JmsError {
        JmsError::from(err)
    }
}
