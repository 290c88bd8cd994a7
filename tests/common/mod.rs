pub mod app;
pub mod upstream;

pub use app::TestApp;
#[allow(unused_imports)]
pub use upstream::{closed_port_url, spawn_upstream};
