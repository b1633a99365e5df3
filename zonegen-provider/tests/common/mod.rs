//! Shared helpers for the live inventory tests

#![allow(dead_code)]

use std::sync::Arc;

use zonegen_provider::{AwsCredentials, InventorySource, ZoneInventory, create_inventory};

/// Returns early from a test when any of the named variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Asserts an `Option` is `Some` and unwraps it without panicking in the happy path.
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Asserts a `Result` is `Ok` and unwraps it.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(res.is_ok(), "{}: {res:?}", format_args!($($msg)+));
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub struct TestContext {
    pub inventory: Arc<dyn ZoneInventory>,
    /// Zone name from `TEST_ZONE`, without trailing dot.
    pub zone: String,
}

impl TestContext {
    pub fn route53() -> Option<Self> {
        let credentials = AwsCredentials::from_env()?;
        let zone = std::env::var("TEST_ZONE").ok()?;
        let inventory = create_inventory(InventorySource::Route53 {
            credentials,
            max_retries: 3,
        })
        .ok()?;
        Some(Self {
            inventory,
            zone: zone.trim_end_matches('.').to_string(),
        })
    }

    pub async fn find_zone_id(&self) -> Option<String> {
        let zones = self.inventory.list_zones().await.ok()?;
        zones
            .into_iter()
            .find(|z| z.name == self.zone)
            .map(|z| z.id)
    }
}
