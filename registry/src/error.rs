use agora_engine::ElectionError;
use agora_types::{ConfigError, ElectionId, Identity, LogicVersion};
use thiserror::Error;

/// Errors surfaced by registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("caller {0} is not the registry owner")]
    NotAuthorized(Identity),

    #[error("unknown election id {0}")]
    NotFound(ElectionId),

    #[error("no logic installed for version {0}")]
    UnknownLogicVersion(LogicVersion),

    #[error("logic version {proposed} does not supersede current version {current}")]
    StaleLogicVersion {
        current: LogicVersion,
        proposed: LogicVersion,
    },

    #[error(transparent)]
    Election(#[from] ElectionError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
