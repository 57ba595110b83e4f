/// Route `log` output to the test harness; repeated calls are no-ops.
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
