#[cfg(target_arch = "wasm32")]
fn main() {
    use staffboard_frontend::{config, router};

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Starting Staffboard frontend: initializing runtime config");

    wasm_bindgen_futures::spawn_local(async move {
        // Runtime config (API base URL, display time zone) loads before
        // the app mounts so the first fetches hit the right backend.
        config::init().await;
        log::info!("Runtime config initialized");
        router::mount_app();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("staffboard-frontend targets wasm32-unknown-unknown; build it with trunk");
}
