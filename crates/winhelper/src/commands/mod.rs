pub mod init;
pub mod set_resolution;
pub mod window;

#[cfg(windows)]
pub mod call;
#[cfg(windows)]
pub mod displays;
#[cfg(windows)]
pub mod listen;
#[cfg(windows)]
pub mod restart;
#[cfg(windows)]
mod session;

#[cfg(windows)]
pub use session::Session;
