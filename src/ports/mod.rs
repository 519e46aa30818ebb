//! Port traits defining the collaborators a test session drives.
//!
//! Each trait is a boundary between the session and something it would
//! otherwise have to patch at runtime (process spawning, HTTP, credential
//! files, configuration files, profiles, identifiers). Implementations live
//! in `src/adapters/`.

pub mod command;
pub mod credentials;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod profile;

pub use command::{CommandExecutor, CommandOutput, Invocation};
pub use credentials::{CredentialStore, Credentials};
pub use filesystem::FileProbe;
pub use http::{
    BodyMatcher, CallDescriptor, HttpFuture, HttpInterception, HttpRequest, HttpResponse,
    HttpTransport, RecordedLine,
};
pub use id_gen::IdGenerator;
pub use profile::{Profile, ProfileLoader, Subscription};
