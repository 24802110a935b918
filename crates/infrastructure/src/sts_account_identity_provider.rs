use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::Client;
use aws_sdk_sts::error::DisplayErrorContext;
use loginventory_application::AccountIdentityProvider;
use loginventory_core::{AppError, AppResult};

/// Identity adapter backed by STS `GetCallerIdentity`.
#[derive(Clone)]
pub struct StsAccountIdentityProvider {
    client: Client,
}

impl StsAccountIdentityProvider {
    /// Creates an adapter from a shared SDK configuration.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl AccountIdentityProvider for StsAccountIdentityProvider {
    async fn account_id(&self) -> AppResult<String> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|error| {
                AppError::Provider(format!(
                    "failed to resolve caller identity: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        output
            .account()
            .filter(|account| !account.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::Provider("caller identity response did not include an account".to_owned())
            })
    }
}
