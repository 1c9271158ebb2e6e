/// Integration tests for the goreg CLI
///
/// One test binary for all CLI tests, with shared helpers in `helpers`.
mod generate;
mod help;
mod helpers;
mod modcache;
