//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Command handlers own all terminal interaction; the engine modules never
//! print or prompt.

pub mod generate;

pub use generate::{execute_generate, GenerateOptions};
