pub mod generate;
pub mod modcache;
