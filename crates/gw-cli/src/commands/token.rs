use gw_auth::TokenSigner;
use gw_config::GradewatchConfig;
use gw_core::access::Caller;
use tracing::info;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TokenArgs;
use crate::output::output;

/// Handle `gradewatch token`.
///
/// Tutors and administrators have no login route; their tokens are minted
/// here with the server's secret.
pub fn handle(args: &TokenArgs, config: &GradewatchConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let signer = TokenSigner::new(&config.auth.token_secret, config.auth.token_ttl_hours)?;
    let caller = Caller::new(args.role.into(), args.id);
    let issued = signer.issue(caller, None)?;
    info!(role = %caller.role(), id = args.id, "token issued");
    output(&issued, flags)
}
