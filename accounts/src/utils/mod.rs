//! Collaborators the account service delegates to: credential encoding and
//! entity/transfer object mapping.

pub mod encoder;
pub mod mapper;
