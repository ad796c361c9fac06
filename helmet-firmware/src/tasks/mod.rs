// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über Embassy Channels (HTTP → Game Loop → HTTP).

pub mod game_loop;
pub mod http;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use game_loop::game_loop_task;
pub use http::http_server_task;
pub use wifi::{connection_task, dhcp_task, net_task};
