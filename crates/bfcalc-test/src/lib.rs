pub mod fs;
pub mod strategies;

pub use fs::create_file;
pub use scopeguard::defer;
