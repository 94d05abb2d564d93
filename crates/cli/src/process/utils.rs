/// Log panics through `tracing`, then hand them to the default hook.
///
/// Release builds abort on panic, so the non-blocking log writers may
///  never flush; the default hook still gets the message to stderr.
pub fn register_panic_logger() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        match panic.location() {
            Some(loc) => tracing::error!(
                message = %panic,
                panic.file = loc.file(),
                panic.line = loc.line(),
                "vault-copy panicked"
            ),
            None => tracing::error!(message = %panic, "vault-copy panicked"),
        }
        default_hook(panic);
    }));
}

pub fn report_build_info() {
    tracing::debug!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "build info"
    );
}
