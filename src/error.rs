use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No `IF_<N>`/`ADDR_<N>` pair is provisioned for the index.
    #[error("unknown test case {index}: {name} is not defined")]
    UnknownTestCase { index: String, name: String },

    #[error("invalid address '{value}' for {name}")]
    InvalidAddress { name: String, value: String },

    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("socket error: {0}")]
    Socket(#[from] nix::Error),

    #[error("short send: {sent} of {len} bytes")]
    Send { sent: usize, len: usize },
}
