//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements   | Connects to                  |
//! |------------------|--------------|------------------------------|
//! | `http_backend`   | BackendPort  | Installation backend (HTTP)  |
//! | `log_sink`       | EventSink    | Console log output           |
//! | `config_file`    | ConfigPort   | JSON config file             |
//! | `time`           | ClockPort    | `Instant` + local wall clock |
//! | `stdin_operator` | —            | Terminal → operator channel  |

pub mod config_file;
pub mod http_backend;
pub mod log_sink;
pub mod stdin_operator;
pub mod time;
