//! Drives `start_server` the way a generated entry point does, with the
//! collaborators registered through the macros.
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use yep_core::config::{keys, SettingValue, Settings};
use yep_core::kernel::component::{LayerContext, Server};
use yep_core::kernel::shutdown::ShutdownSignal;
use yep_core::kernel::Result;
use yep_core::storage::{Connection, ConnectionDescriptor, DriverError, StorageDriver};
use yep_core::{register_module, register_server, register_storage_driver, Module};

static CALLS: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn record(call: impl Into<String>) {
    CALLS.lock().unwrap().push(call.into());
}

#[derive(Debug)]
struct NullConnection;

impl Connection for NullConnection {
    fn driver(&self) -> &str {
        "null"
    }
}

struct NullDriver;

#[async_trait]
impl StorageDriver for NullDriver {
    fn name(&self) -> &str {
        "null"
    }

    async fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> std::result::Result<Arc<dyn Connection>, DriverError> {
        record(format!("connect {}", descriptor.as_str()));
        Ok(Arc::new(NullConnection))
    }
}

/// Serves nothing and returns at once, ending the process normally.
struct OneShotServer;

#[async_trait]
impl Server for OneShotServer {
    fn name(&self) -> &str {
        "one-shot"
    }

    async fn load_internal_resources(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        record("load_internal_resources");
        Ok(())
    }

    async fn post_init(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        record("post_init");
        Ok(())
    }

    async fn run(&self, ctx: &LayerContext<'_>, _shutdown: ShutdownSignal) -> Result<()> {
        record(format!("run debug={}", ctx.mode.is_debug()));
        Ok(())
    }
}

struct Sales;

impl Module for Sales {
    fn name(&self) -> &str {
        "sales"
    }

    fn bootstrap_models(&self, ctx: &LayerContext<'_>) -> Result<()> {
        record(format!("sales models on {}", ctx.connection.driver()));
        Ok(())
    }

    fn bootstrap_controllers(&self, _ctx: &LayerContext<'_>) -> Result<()> {
        record("sales controllers");
        Ok(())
    }
}

register_storage_driver!(NullDriver);
register_server!(OneShotServer);
register_module!(Sales);

#[test]
fn test_start_server_runs_every_phase() {
    let settings = Settings::from_entries([
        (keys::DB_DRIVER, SettingValue::from("null")),
        (keys::DB_NAME, SettingValue::from("shop")),
        (keys::DEBUG, SettingValue::Bool(true)),
    ]);

    let code = yep_core::start_server(settings);

    assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));

    assert_eq!(
        *CALLS.lock().unwrap(),
        vec![
            "connect dbname=shop sslmode=disable",
            "sales models on null",
            "load_internal_resources",
            "sales controllers",
            "post_init",
            "run debug=true",
        ]
    );
}
