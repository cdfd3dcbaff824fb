use tracing_subscriber::fmt;

/// Installs a stderr subscriber when `verbose`. Safe to call repeatedly; a
/// subscriber installed by the host wins.
pub fn init(verbose: bool) {
    if !verbose {
        return;
    }
    let _ = fmt()
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}
