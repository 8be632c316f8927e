use std::sync::Arc;

use items_lambda::{
    DynamoDbStoreProvider, StructuredHealthReporter, SystemConfigLoader, bootstrap_with,
};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let function = bootstrap_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
        &DynamoDbStoreProvider,
    )
    .await?;
    function.run().await
}
