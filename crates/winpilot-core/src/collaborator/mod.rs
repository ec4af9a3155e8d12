mod errors;
mod system;
mod traits;

pub use errors::{CollaboratorError, DomainError};
pub use system::SystemCollaborator;
pub use traits::Collaborator;

#[cfg(test)]
pub(crate) use traits::stub::StubCollaborator;
