use anyhow::{anyhow, Context, Result};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, LambdaEvent};
use s3_image_derivatives::client::{sdk_config, S3ObjectStore};
use s3_image_derivatives::compress::CompressHandler;
use s3_image_derivatives::conf;
use s3_image_derivatives::response::Response;
use s3_image_derivatives::trigger::ObjectRef;

/// Handle each record of an S3 event through the compressor.
async fn function_handler(
    handler: &CompressHandler<S3ObjectStore>,
    event: LambdaEvent<S3Event>,
) -> Result<Response> {
    let mut response = Response::ok(String::from("No records to process"));
    for object in ObjectRef::decode_all(&event.payload)? {
        response = handler
            .handle(&object)
            .await
            .with_context(|| format!("Failed to compress {:?}", object))?;
    }
    Ok(response)
}

/// Run an AWS Lambda function that reacts to S3 creation events by
/// re-encoding the new object as a reduced-quality JPEG under the
/// `compressed/` namespace of the same bucket.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    let settings = conf::load()?;
    let config = sdk_config().await;
    let handler = CompressHandler::new(S3ObjectStore::new(&config), settings.jpeg_quality);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        function_handler(handler, event).await
    }))
    .await
    .map_err(|e| anyhow!("{:?}", e))
}
