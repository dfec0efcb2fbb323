//! Process runtime: the executor-driven control loop, the backend I/O
//! workers and the channels between them.

pub mod channels;
pub mod io_task;
pub mod monitor;
