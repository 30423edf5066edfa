pub mod traits;
pub mod yaml;

pub use yaml::YamlConnection;
