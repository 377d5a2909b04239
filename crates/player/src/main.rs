//! LiteraPlay Player - composition root binary.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use literaplay_player::application::BackendService;
use literaplay_player::infrastructure::messaging::{ConnectionKeepAlive, EventBus};
use literaplay_player::infrastructure::platform::create_platform;
use literaplay_player::infrastructure::websocket::create_connection;
use literaplay_player::ports::outbound::PlatformPort;
use literaplay_player::ui::{Backend, EventInbox};
use literaplay_player::PlayerConfig;
use literaplay_shared::BackendEvent;

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    let config = PlayerConfig::from_env();
    #[cfg(target_arch = "wasm32")]
    let config = PlayerConfig::from_location();

    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    tracing::info!(bridge_url = %config.bridge_url, "Starting LiteraPlay player");

    // Platform
    let platform: Arc<dyn PlatformPort> = Arc::new(create_platform());

    // Backend events flow bridge -> event bus -> this channel -> UI task
    let (event_tx, event_rx) = futures_channel::mpsc::unbounded::<BackendEvent>();
    let event_bus = EventBus::new();

    // The bridge gets its own runtime on desktop; it must outlive the UI.
    #[cfg(not(target_arch = "wasm32"))]
    let runtime = tokio::runtime::Runtime::new()?;

    #[cfg(not(target_arch = "wasm32"))]
    let connection = {
        runtime.block_on(event_bus.subscribe(move |event| {
            let _ = event_tx.unbounded_send(event);
        }));
        let _guard = runtime.enter();
        create_connection(&config.bridge_url, event_bus)
    };

    #[cfg(target_arch = "wasm32")]
    let connection = {
        event_bus.subscribe(move |event| {
            let _ = event_tx.unbounded_send(event);
        });
        create_connection(&config.bridge_url, event_bus)
    };

    let backend: Backend = Arc::new(BackendService::new(connection.command_bus.clone()));
    let keep_alive = ConnectionKeepAlive::new(connection.handle);

    // Launch Dioxus
    #[allow(unused_mut)]
    let mut builder = dioxus::LaunchBuilder::new();

    #[cfg(not(target_arch = "wasm32"))]
    {
        use literaplay_player::config::{MIN_WINDOW_SIZE, WINDOW_TITLE};

        let (min_width, min_height) = MIN_WINDOW_SIZE;
        let window = dioxus_desktop::WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_min_inner_size(dioxus_desktop::LogicalSize::new(min_width, min_height));
        let cfg = dioxus_desktop::Config::new().with_window(window);
        builder = builder.with_cfg(cfg);
    }

    builder
        .with_context(platform)
        .with_context(backend)
        .with_context(EventInbox::new(event_rx))
        .with_context(connection.state_observer)
        .with_context(keep_alive.clone())
        .launch(literaplay_player::app);

    // Desktop launch returns once the window closes.
    #[cfg(not(target_arch = "wasm32"))]
    {
        keep_alive.disconnect();
        drop(runtime);
    }

    Ok(())
}
