pub mod add;
pub mod delete;
pub mod edit;
pub mod show;

pub use add::handle_add;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use show::handle_show;

use crate::app::AppContext;
use crate::cli::{RecurringShowArgs, RecurringSubcommand};

pub fn handle(ctx: &AppContext, command: Option<&RecurringSubcommand>) -> anyhow::Result<()> {
    match command {
        None => handle_show(ctx, &RecurringShowArgs::default()),
        Some(RecurringSubcommand::Show(args)) => handle_show(ctx, args),
        Some(RecurringSubcommand::Add(args)) => handle_add(ctx, args),
        Some(RecurringSubcommand::Edit(args)) => handle_edit(ctx, args),
        Some(RecurringSubcommand::Delete(args)) => handle_delete(ctx, args),
    }
}
