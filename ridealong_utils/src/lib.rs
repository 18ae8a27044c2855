mod macros;

/// Version string reported by the binaries and the outbound `User-Agent`.
pub fn ridealong_version() -> &'static str {
    match option_env!("RIDEALONG_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}
