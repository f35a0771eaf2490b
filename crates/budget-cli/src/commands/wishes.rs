use budget_core::model::wish::{mark_paid, open_wishes};
use budget_core::model::Wish;

use crate::app::AppContext;
use crate::cli::{DeleteArgs, WishAddArgs, WishListArgs, WishPaidArgs, WishSubcommand};
use crate::helpers::confirm_delete;
use crate::output::{format_amount, print_json, render_table};

pub fn handle(ctx: &AppContext, command: &WishSubcommand) -> anyhow::Result<()> {
    match command {
        WishSubcommand::List(args) => handle_list(ctx, args),
        WishSubcommand::Add(args) => handle_add(ctx, args),
        WishSubcommand::Paid(args) => handle_paid(ctx, args),
        WishSubcommand::Delete(args) => handle_delete(ctx, args),
    }
}

fn handle_list(ctx: &AppContext, args: &WishListArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let wishes = data.load_wishes()?;
    let listed: Vec<&Wish> = if args.all {
        wishes.iter().collect()
    } else {
        open_wishes(&wishes)
    };

    if args.json {
        return print_json(&listed);
    }
    if listed.is_empty() {
        if !ctx.quiet() {
            println!("No wishes found.");
        }
        return Ok(());
    }

    let currency = ctx.currency()?;
    let rows = listed
        .iter()
        .map(|wish| {
            let paid = if wish.paid {
                format_amount(wish.paid_amount, currency)
            } else {
                "-".to_string()
            };
            vec![
                wish.id.to_string(),
                wish.date.to_string(),
                wish.name.clone(),
                format_amount(wish.amount, currency),
                wish.importance.to_string(),
                wish.urgency.to_string(),
                paid,
            ]
        })
        .collect();
    println!(
        "{}",
        render_table(
            &["ID", "Date", "Name", "Amount", "Importance", "Urgency", "Paid"],
            rows,
            ctx.unicode()
        )
    );
    Ok(())
}

fn handle_add(ctx: &AppContext, args: &WishAddArgs) -> anyhow::Result<()> {
    let date = args.date.unwrap_or_else(|| ctx.today());
    let wish = Wish::new(
        date,
        args.name.trim(),
        args.amount,
        args.importance,
        args.urgency,
    )?;

    let mut data = ctx.open_data()?;
    let mut wishes = data.load_wishes()?;
    let id = wishes.create(wish);
    data.save(&mut wishes)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Wish {} has been created", id);
    }
    Ok(())
}

fn handle_paid(ctx: &AppContext, args: &WishPaidArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let mut wishes = data.load_wishes()?;
    mark_paid(&mut wishes, args.id, args.amount)?;
    data.save(&mut wishes)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Wish {} has been marked as paid", args.id);
    }
    Ok(())
}

fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut data = ctx.open_data()?;
    let mut wishes = data.load_wishes()?;

    let name = wishes.get(args.id)?.name.clone();
    if !confirm_delete(&format!("wish {} ({})", args.id, name), args.yes)? {
        return Ok(());
    }
    wishes.remove(args.id)?;
    data.save(&mut wishes)?;
    data.flush()?;

    if !ctx.quiet() {
        println!("Wish {} has been deleted", args.id);
    }
    Ok(())
}
