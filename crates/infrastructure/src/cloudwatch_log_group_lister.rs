use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::Client;
use aws_sdk_cloudwatchlogs::config::{Builder as LogsConfigBuilder, Region};
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::LogGroup;
use loginventory_application::{LogGroupDescriptor, LogGroupLister, LogGroupPage};
use loginventory_core::{AppError, AppResult};
use tokio::sync::RwLock;
use tracing::debug;

/// Listing adapter backed by CloudWatch Logs `DescribeLogGroups`.
///
/// Keeps one client per region, all derived from the same SDK configuration.
pub struct CloudWatchLogGroupLister {
    sdk_config: SdkConfig,
    clients: RwLock<HashMap<String, Client>>,
}

impl CloudWatchLogGroupLister {
    /// Creates an adapter from a shared SDK configuration.
    #[must_use]
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    async fn client_for(&self, region: &str) -> Client {
        if let Some(client) = self.clients.read().await.get(region) {
            return client.clone();
        }

        let config = LogsConfigBuilder::from(&self.sdk_config)
            .region(Region::new(region.to_owned()))
            .build();
        debug!(region = %region, "created CloudWatch Logs client");

        self.clients
            .write()
            .await
            .entry(region.to_owned())
            .or_insert_with(|| Client::from_conf(config))
            .clone()
    }
}

#[async_trait]
impl LogGroupLister for CloudWatchLogGroupLister {
    async fn list_log_groups(
        &self,
        region: &str,
        next_token: Option<String>,
    ) -> AppResult<LogGroupPage> {
        let client = self.client_for(region).await;
        let output = client
            .describe_log_groups()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|error| {
                AppError::Provider(format!(
                    "failed to describe log groups in region '{region}': {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        let log_groups = output
            .log_groups()
            .iter()
            .map(|log_group| descriptor_from_log_group(region, log_group))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(LogGroupPage {
            log_groups,
            next_token: output.next_token().map(str::to_owned),
        })
    }
}

fn descriptor_from_log_group(region: &str, log_group: &LogGroup) -> AppResult<LogGroupDescriptor> {
    let name = required_field(region, "logGroupName", log_group.log_group_name())?;
    let arn = required_field(region, "arn", log_group.arn())?;
    let stored_bytes = required_field(region, "storedBytes", log_group.stored_bytes())?;
    let creation_time_millis = required_field(region, "creationTime", log_group.creation_time())?;

    let stored_bytes = u64::try_from(stored_bytes).map_err(|_| {
        AppError::Provider(format!(
            "log group '{name}' in region '{region}' reported negative stored bytes {stored_bytes}"
        ))
    })?;

    Ok(LogGroupDescriptor {
        name: name.to_owned(),
        arn: arn.to_owned(),
        kms_key_id: log_group.kms_key_id().map(str::to_owned),
        retention_in_days: log_group.retention_in_days(),
        stored_bytes,
        creation_time_millis,
    })
}

fn required_field<T>(region: &str, field: &str, value: Option<T>) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::Provider(format!(
            "log group in region '{region}' is missing required field '{field}'"
        ))
    })
}
