use thiserror::Error;

use crate::core::sites::{Body, BodyKind, Site};
use crate::core::switching::SwitchError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum DescriptorError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("No primitive variables were defined")]
    NoVariables,

    #[error("At most {max} primitive variables are supported, got {found}")]
    TooManyVariables { max: usize, found: usize },

    #[error("Site {site} does not exist on a {kind:?} body")]
    UnknownSite { site: Site, kind: BodyKind },

    #[error("Variable {index} couples site {site} with itself")]
    SelfInteraction { index: usize, site: Site },

    #[error("Controlling site {0} must be a real atom")]
    VirtualControllingSite(Site),

    #[error("Controlling sites {first} and {second} must belong to different bodies")]
    ControllingSitesOnSameBody { first: Site, second: Site },

    #[error("Invalid switching radii: {0}")]
    Switch(#[from] SwitchError),
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Invalid pair descriptor: {source}")]
    Descriptor {
        #[from]
        source: DescriptorError,
    },

    #[error("Polynomial takes {found} variables but the descriptor defines {expected}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Body {body:?} expects {expected} atom position(s), got {found}")]
    AtomCountMismatch {
        body: Body,
        expected: usize,
        found: usize,
    },
}
