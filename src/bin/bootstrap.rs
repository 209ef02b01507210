// This is the Lambda bootstrap entry point for the echo responder

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    sqs_jms::setup_logging();

    run(service_fn(sqs_jms::worker::handler)).await?;

    Ok(())
}
