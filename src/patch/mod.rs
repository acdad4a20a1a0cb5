//! @acp:module "Htaccess Patcher"
//! @acp:summary "Comment out ErrorDocument directives when no 404 page ships"
//! @acp:domain cli
//! @acp:layer io

use std::path::{Path, PathBuf};

use crate::choices::{ChoiceSet, OtherFile};
use crate::error::{Result, ScaffoldError};

pub const HTACCESS: &str = ".htaccess";

const DIRECTIVE: &str = "ErrorDocument";
const COMMENTED_DIRECTIVE: &str = "# ErrorDocument";

/// Comment out every `ErrorDocument` directive
pub fn comment_error_documents(text: &str) -> String {
    text.replace(DIRECTIVE, COMMENTED_DIRECTIVE)
}

/// The patch applies only when `.htaccess` ships without the custom 404 page
pub fn needs_patch(choices: &ChoiceSet) -> bool {
    choices.other_files.is_enabled(OtherFile::Htaccess)
        && !choices.other_files.is_enabled(OtherFile::NotFoundPage)
}

/// Read the template `.htaccess`, patch it, write it to `dest_root`
pub fn write_patched_htaccess(template: &Path, dest_root: &Path) -> Result<PathBuf> {
    let source = template.join(HTACCESS);
    let text = std::fs::read_to_string(&source)
        .map_err(|err| ScaffoldError::Read { path: source.clone(), source: err })?;

    let target = dest_root.join(HTACCESS);
    if !dest_root.exists() {
        std::fs::create_dir_all(dest_root)?;
    }
    std::fs::write(&target, comment_error_documents(&text)).map_err(|source| {
        ScaffoldError::Write {
            path: target.clone(),
            source,
        }
    })?;
    tracing::info!("Wrote patched {}", target.display());
    Ok(target)
}
