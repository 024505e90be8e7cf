//! Headers for generated files.

use std::path::Path;

const REGENERATE: &str = "vcodeowners";

/// Header for the generated CODEOWNERS file.
pub fn codeowners_header(virtual_code_owners: &Path, team_map: &Path) -> String {
    format!(
        "#
# DO NOT EDIT - this file is generated and your edits will be overwritten
#
# To make changes:
#
#   - edit {}
#   - and/ or add teams (& members) to {}
#   - run '{}'
#

",
        virtual_code_owners.display(),
        team_map.display(),
        REGENERATE
    )
}

/// Header for the generated labeler file.
pub fn labeler_header(virtual_code_owners: &Path, team_map: &Path) -> String {
    format!(
        "#
# DO NOT EDIT - this file is generated and your edits will be overwritten
#
# To make changes:
#
#   - edit {}
#   - and/ or add teams (& members) to {}
#   - run '{} --emit-labeler'
#

",
        virtual_code_owners.display(),
        team_map.display(),
        REGENERATE
    )
}
