use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Outline(args) => commands::outline::handle(args, ctx, flags),
        Commands::Elements(args) => commands::elements::handle(args, ctx, flags),
        Commands::Skeleton(args) => commands::skeleton::handle(args, ctx, flags),
        Commands::At(args) => commands::at::handle(args, ctx, flags),
        Commands::Select(args) => commands::select::handle(args, ctx, flags),
    }
}
