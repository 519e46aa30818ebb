//! Mocked stand-ins installed by a test session.
//!
//! Each stand-in answers the calls a test must not send to the real
//! collaborator and delegates the rest to the original collaborator.

pub mod credentials;
pub mod filesystem;
pub mod http;
pub mod id_gen;
pub mod profile;

pub use credentials::FixedCredentialStore;
pub use filesystem::StubFileProbe;
pub use http::ScopeRegistry;
pub use id_gen::SequentialIdGenerator;
pub use profile::TestProfileLoader;
