use aws_sdk_s3::{Client, Error};

use crate::error::RuntimeError;

/// Check that the bucket exists and that we are allowed to access it.
///
/// Not found, access denied, and transport errors are all reported the same way.
#[tracing::instrument(skip(client))]
pub async fn verify_bucket(client: &Client, bucket: &str) -> Result<(), RuntimeError> {
    tracing::info!("checking bucket");
    client
        .head_bucket()
        .bucket(bucket)
        .send()
        .await
        .map_err(Error::from)?;

    Ok(())
}
