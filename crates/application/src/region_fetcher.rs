use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use loginventory_core::{AppError, AppResult};
use loginventory_domain::{LogGroupRecord, TimestampZone};

use crate::inventory_ports::LogGroupLister;

/// Fetches every log group of one region as inventory records.
#[derive(Clone)]
pub struct RegionFetcher {
    lister: Arc<dyn LogGroupLister>,
    timestamp_zone: TimestampZone,
}

impl RegionFetcher {
    /// Creates a fetcher over a listing port.
    #[must_use]
    pub fn new(lister: Arc<dyn LogGroupLister>, timestamp_zone: TimestampZone) -> Self {
        Self {
            lister,
            timestamp_zone,
        }
    }

    /// Drains the region's paginated listing into records.
    ///
    /// Stops when the provider returns no cursor (or an empty one). A cursor
    /// seen earlier in the same listing is reported as a provider error.
    pub async fn fetch(&self, region: &str, account_id: &str) -> AppResult<Vec<LogGroupRecord>> {
        let mut records = Vec::new();
        let mut seen_tokens = HashSet::new();
        let mut next_token: Option<String> = None;
        let mut page_number = 0_usize;

        loop {
            let page = self.lister.list_log_groups(region, next_token.take()).await?;
            page_number += 1;
            debug!(
                region = %region,
                page = page_number,
                log_group_count = page.log_groups.len(),
                "listed log group page"
            );

            for descriptor in page.log_groups {
                let input = descriptor.into_record_input(region, account_id);
                records.push(LogGroupRecord::new(input, self.timestamp_zone)?);
            }

            let Some(token) = page.next_token.filter(|token| !token.is_empty()) else {
                break;
            };

            if !seen_tokens.insert(token.clone()) {
                return Err(AppError::Provider(format!(
                    "log group listing in region '{region}' repeated pagination token '{token}'"
                )));
            }

            next_token = Some(token);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use loginventory_core::{AppError, AppResult};
    use loginventory_domain::{Retention, TimestampZone};

    use super::RegionFetcher;
    use crate::{LogGroupDescriptor, LogGroupLister, LogGroupPage};

    #[derive(Default)]
    struct ScriptedLister {
        pages: HashMap<Option<String>, AppResult<LogGroupPage>>,
        requested_tokens: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedLister {
        fn with_page(mut self, token: Option<&str>, page: AppResult<LogGroupPage>) -> Self {
            self.pages.insert(token.map(str::to_owned), page);
            self
        }
    }

    #[async_trait]
    impl LogGroupLister for ScriptedLister {
        async fn list_log_groups(
            &self,
            _region: &str,
            next_token: Option<String>,
        ) -> AppResult<LogGroupPage> {
            self.requested_tokens.lock().await.push(next_token.clone());
            match self.pages.get(&next_token) {
                Some(Ok(page)) => Ok(page.clone()),
                Some(Err(error)) => Err(AppError::Provider(error.to_string())),
                None => Err(AppError::Provider(format!(
                    "unexpected token {next_token:?}"
                ))),
            }
        }
    }

    fn descriptor(name: &str, stored_bytes: u64) -> LogGroupDescriptor {
        LogGroupDescriptor {
            name: name.to_owned(),
            arn: format!("arn:aws:logs:us-east-1:123456789012:log-group:{name}:*"),
            kms_key_id: None,
            retention_in_days: None,
            stored_bytes,
            creation_time_millis: 1_700_000_000_000,
        }
    }

    fn page(names: &[&str], next_token: Option<&str>) -> LogGroupPage {
        LogGroupPage {
            log_groups: names.iter().map(|name| descriptor(name, 100)).collect(),
            next_token: next_token.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn fetch_drains_every_page() {
        let lister = Arc::new(
            ScriptedLister::default()
                .with_page(None, Ok(page(&["a", "b"], Some("t1"))))
                .with_page(Some("t1"), Ok(page(&["c"], Some("t2"))))
                .with_page(Some("t2"), Ok(page(&["d"], None))),
        );
        let fetcher = RegionFetcher::new(lister.clone(), TimestampZone::Utc);

        let records = fetcher.fetch("us-east-1", "123456789012").await;
        assert!(records.is_ok());
        let records = records.unwrap_or_default();

        let names: Vec<&str> = records.iter().map(|record| record.name()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert!(records.iter().all(|record| record.region() == "us-east-1"
            && record.account_id() == "123456789012"
            && record.retention() == Retention::Never));
        assert_eq!(
            *lister.requested_tokens.lock().await,
            vec![None, Some("t1".to_owned()), Some("t2".to_owned())]
        );
    }

    #[tokio::test]
    async fn empty_token_ends_the_listing() {
        let lister = Arc::new(
            ScriptedLister::default().with_page(None, Ok(page(&["only"], Some("")))),
        );
        let fetcher = RegionFetcher::new(lister, TimestampZone::Utc);

        let records = fetcher.fetch("us-west-2", "123456789012").await;
        assert_eq!(records.map(|records| records.len()).ok(), Some(1));
    }

    #[tokio::test]
    async fn repeated_token_is_a_provider_error() {
        let lister = Arc::new(
            ScriptedLister::default()
                .with_page(None, Ok(page(&["a"], Some("loop"))))
                .with_page(Some("loop"), Ok(page(&["b"], Some("loop")))),
        );
        let fetcher = RegionFetcher::new(lister, TimestampZone::Utc);

        let result = fetcher.fetch("us-east-1", "123456789012").await;
        assert!(matches!(result, Err(AppError::Provider(message)) if message.contains("loop")));
    }

    #[tokio::test]
    async fn listing_failure_mid_pagination_is_returned() {
        let lister = Arc::new(
            ScriptedLister::default()
                .with_page(None, Ok(page(&["a"], Some("t1"))))
                .with_page(
                    Some("t1"),
                    Err(AppError::Provider("ThrottlingException".to_owned())),
                ),
        );
        let fetcher = RegionFetcher::new(lister, TimestampZone::Utc);

        let result = fetcher.fetch("us-east-1", "123456789012").await;
        assert!(
            matches!(result, Err(AppError::Provider(message)) if message.contains("ThrottlingException"))
        );
    }
}
