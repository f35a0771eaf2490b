use budget_core::recurrence::delete_template;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::confirm_delete;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let accounts = data.load_accounts()?;
    let mut templates = data.load_recurrings(&accounts)?;

    let name = templates.get(args.id)?.name.clone();
    if !confirm_delete(&format!("recurring expense {} ({})", args.id, name), args.yes)? {
        return Ok(());
    }
    delete_template(&mut templates, args.id)?;
    data.save(&mut templates)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Recurring expense {} has been deleted", args.id);
        println!("Note: The generated expenses have not been deleted");
    }
    Ok(())
}
