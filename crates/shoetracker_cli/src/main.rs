//! Command-line front end for the ShoeTracker core.
//!
//! # Responsibility
//! - Act as a thin presentation layer: parse commands, call core services,
//!   print results.
//! - Resolve storage and logging from `SHOETRACKER_*` environment variables.

use log::info;
use shoetracker_core::db::open_db;
use shoetracker_core::service::detail::{
    details_preview, format_date_short, format_rating, purchase_label,
};
use shoetracker_core::{
    init_logging, CoreConfig, PurchaseFilter, SqliteTryOnRepository, StarFill, TryOnDetail,
    TryOnDraft, TryOnFilter, TryOnId, TryOnService,
};
use std::process::ExitCode;

const USAGE: &str = "usage: shoetracker <command> [options]

commands:
  ping
  version
  list   [--query TEXT] [--purchased | --not-purchased | --filter all|purchased|not_purchased]
         [--min-rating N]
  show   ID
  share  ID
  add    --name NAME [--size S] [--width W] [--color C] [--rating R]
         [--purchased] [--date EPOCH_MS] [--location L] [--details D]
  delete ID --yes";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Ping,
    Version,
    List(TryOnFilter),
    Show(TryOnId),
    Share(TryOnId),
    Add(TryOnDraft),
    Delete { id: TryOnId, confirmed: bool },
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_command(&args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Ping => {
            println!("shoetracker_core ping={}", shoetracker_core::ping());
            return Ok(());
        }
        Command::Version => {
            println!("shoetracker_core version={}", shoetracker_core::core_version());
            return Ok(());
        }
        _ => {}
    }

    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }
    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;
    let mut service = TryOnService::new(SqliteTryOnRepository::new(&conn));
    info!(
        "event=cli_run module=cli status=start db_path={}",
        config.db_path.display()
    );

    match command {
        Command::List(filter) => {
            let try_ons = service.search(&filter).map_err(|err| err.to_string())?;
            if try_ons.is_empty() {
                if filter.is_active() {
                    println!("No try-ons match the current filters.");
                } else {
                    println!("No shoes. Use `shoetracker add --name NAME` to log one.");
                }
            }
            for try_on in &try_ons {
                println!(
                    "{}  {}  {}  {}  {}",
                    try_on.id,
                    format_date_short(try_on.date),
                    format_rating(try_on.rating),
                    purchase_label(try_on.purchased),
                    try_on.name
                );
                if let Some(preview) = details_preview(&try_on.details) {
                    println!("    {preview}");
                }
            }
        }
        Command::Show(id) => {
            let try_on = service
                .get(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("try-on not found: {id}"))?;
            print_detail(&TryOnDetail::from(&try_on));
        }
        Command::Share(id) => {
            let try_on = service
                .get(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("try-on not found: {id}"))?;
            println!("{}", TryOnDetail::from(&try_on).share_text);
        }
        Command::Add(draft) => {
            let created = service.create(draft).map_err(|err| err.to_string())?;
            println!("Try-on created: {}", created.id);
        }
        Command::Delete { id, confirmed } => {
            if !confirmed {
                return Err(format!(
                    "deleting {id} cannot be undone; re-run with --yes to confirm"
                ));
            }
            service.delete(id).map_err(|err| err.to_string())?;
            println!("Try-on deleted: {id}");
        }
        Command::Ping | Command::Version => {}
    }

    Ok(())
}

fn print_detail(detail: &TryOnDetail) {
    let stars: String = detail
        .stars
        .iter()
        .map(|star| match star {
            StarFill::Full => '★',
            StarFill::Half => '⯪',
            StarFill::Empty => '☆',
        })
        .collect();

    println!("{}  [{}]", detail.name, detail.purchase_label);
    println!("Fit rating: {} {}", detail.rating, stars);
    println!("Size:     {}", detail.size);
    println!("Width:    {}", detail.width);
    println!("Color:    {}", detail.color);
    println!("Date:     {}", detail.date);
    println!("Location: {}", detail.location);
    println!("Notes:    {}", detail.details);
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Err(USAGE.to_string());
    };

    match name.as_str() {
        "ping" => Ok(Command::Ping),
        "version" => Ok(Command::Version),
        "list" => parse_list(rest).map(Command::List),
        "show" => parse_id_only(rest).map(Command::Show),
        "share" => parse_id_only(rest).map(Command::Share),
        "add" => parse_add(rest).map(Command::Add),
        "delete" => parse_delete(rest),
        "help" | "--help" | "-h" => Err(USAGE.to_string()),
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn parse_list(args: &[String]) -> Result<TryOnFilter, String> {
    let mut filter = TryOnFilter::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--query" => filter.query = take_value(&mut iter, flag)?,
            "--purchased" => filter.purchase = PurchaseFilter::PurchasedOnly,
            "--not-purchased" => filter.purchase = PurchaseFilter::NotPurchasedOnly,
            "--filter" => {
                filter.purchase = take_value(&mut iter, flag)?
                    .parse::<PurchaseFilter>()
                    .map_err(|err| err.to_string())?
            }
            "--min-rating" => filter.min_rating = Some(parse_number(&mut iter, flag)?),
            other => return Err(format!("unknown option `{other}` for list")),
        }
    }
    Ok(filter)
}

fn parse_add(args: &[String]) -> Result<TryOnDraft, String> {
    let mut draft = TryOnDraft::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--name" => draft.name = take_value(&mut iter, flag)?,
            "--size" => draft.size = take_value(&mut iter, flag)?,
            "--width" => draft.width = take_value(&mut iter, flag)?,
            "--color" => draft.color = take_value(&mut iter, flag)?,
            "--rating" => draft.rating = parse_number(&mut iter, flag)?,
            "--purchased" => draft.purchased = true,
            "--date" => {
                let raw = take_value(&mut iter, flag)?;
                draft.date = raw
                    .parse()
                    .map_err(|_| format!("`{raw}` is not a valid epoch millisecond value"))?;
            }
            "--location" => draft.location = take_value(&mut iter, flag)?,
            "--details" => draft.details = take_value(&mut iter, flag)?,
            other => return Err(format!("unknown option `{other}` for add")),
        }
    }
    Ok(draft)
}

fn parse_delete(args: &[String]) -> Result<Command, String> {
    let mut id = None;
    let mut confirmed = false;
    for arg in args {
        match arg.as_str() {
            "--yes" | "-y" => confirmed = true,
            value if id.is_none() => id = Some(parse_id(value)?),
            other => return Err(format!("unexpected argument `{other}` for delete")),
        }
    }
    let id = id.ok_or_else(|| "delete requires an ID".to_string())?;
    Ok(Command::Delete { id, confirmed })
}

fn parse_id_only(args: &[String]) -> Result<TryOnId, String> {
    match args {
        [id] => parse_id(id),
        _ => Err("expected exactly one ID".to_string()),
    }
}

fn parse_id(value: &str) -> Result<TryOnId, String> {
    uuid::Uuid::parse_str(value.trim()).map_err(|_| format!("`{value}` is not a valid ID"))
}

fn take_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<String, String> {
    iter.next()
        .cloned()
        .ok_or_else(|| format!("option `{flag}` requires a value"))
}

fn parse_number<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<f64, String> {
    let raw = take_value(iter, flag)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("`{raw}` is not a finite number for `{flag}`")),
    }
}
