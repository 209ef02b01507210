use serde_json::{Value, json};
use sqs_jms::core::models::ReceiveMessageRequest;
use sqs_jms::errors::JmsError;
use sqs_jms::transport::InMemoryTransport;
use sqs_jms::worker::{EchoSummary, handle_event};
use sqs_jms::JmsClient;

const REPLIES: &str = "https://sqs.us-east-1.amazonaws.com/123456789012/replies";

fn record(message_id: &str, body: &str, attributes: Value) -> Value {
    json!({
        "messageId": message_id,
        "receiptHandle": format!("rh-{message_id}"),
        "body": body,
        "attributes": {"ApproximateReceiveCount": "1"},
        "messageAttributes": attributes,
        "eventSource": "aws:sqs",
        "eventSourceARN": "arn:aws:sqs:us-east-1:123456789012:requests",
        "awsRegion": "us-east-1"
    })
}

fn string_attribute(value: &str) -> Value {
    json!({"stringValue": value, "stringListValues": [], "binaryListValues": [], "dataType": "String"})
}

#[tokio::test]
async fn test_echo_replies_only_to_messages_with_reply_to() {
    let client = JmsClient::new(InMemoryTransport::new());
    let event = json!({
        "Records": [
            record("m-1", "ping", json!({
                "JMS_SQSMessageType": string_attribute("text"),
                "JMS_SQSCorrelationID": string_attribute("abc123"),
                "JMS_SQSReplyToQueueName": string_attribute("replies"),
                "JMS_SQSReplyToQueueURL": string_attribute(REPLIES)
            })),
            record("m-2", "AQID", json!({
                "JMS_SQSMessageType": string_attribute("byte"),
                "JMS_SQSReplyToQueueName": string_attribute("replies"),
                "JMS_SQSReplyToQueueURL": string_attribute(REPLIES)
            })),
            record("m-3", "fire and forget", json!({
                "JMS_SQSMessageType": string_attribute("text")
            }))
        ]
    });

    let summary = handle_event(&client, &event).await.unwrap();
    assert_eq!(
        summary,
        EchoSummary {
            received: 3,
            replied: 2
        }
    );

    let mut request = ReceiveMessageRequest::new(REPLIES);
    request.max_number_of_messages = Some(10);
    let replies = client.receive_jms_messages(request).await.unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].text(), Some("ping"));
    assert_eq!(replies[0].correlation_id(), Some("abc123"));
    assert_eq!(replies[1].body_bytes(), &[1, 2, 3]);
    assert_eq!(replies[1].correlation_id(), Some("m-2"));
}

#[tokio::test]
async fn test_untyped_record_fails_the_event() {
    let client = JmsClient::new(InMemoryTransport::new());
    let event = json!({"Records": [record("m-1", "plain", json!({}))]});

    let err = handle_event(&client, &event).await.unwrap_err();
    assert!(matches!(err, JmsError::MissingMessageType { .. }));
    assert_eq!(client.transport().depth(REPLIES), 0);
}

#[tokio::test]
async fn test_empty_event_is_a_no_op() {
    let client = JmsClient::new(InMemoryTransport::new());
    let summary = handle_event(&client, &json!({"Records": []})).await.unwrap();
    assert_eq!(summary, EchoSummary::default());
}
