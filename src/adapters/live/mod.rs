//! Live adapters that touch real processes, disks and networks.

pub mod command;
pub mod credentials;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod profile;

pub use command::{InProcessExecutor, ProcessExecutor};
pub use credentials::PemCredentialStore;
pub use filesystem::LiveFileProbe;
pub use http::ReqwestTransport;
pub use id_gen::RandomIdGenerator;
pub use profile::JsonProfileLoader;
