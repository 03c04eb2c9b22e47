//! List animals command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use keeper_core::{Animal, Resource};

use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring filter over all fields
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by field (id, name, type, age)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending (with --sort)
    #[arg(long)]
    pub desc: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, url: Option<String>) -> Result<()> {
    let controller = super::mounted(url).await?;

    if let Some(ref search) = args.search {
        controller.set_search(search.clone());
    }
    if let Some(ref name) = args.sort {
        let field = Animal::field_by_name(name)
            .with_context(|| format!("Unknown sort field '{}'", name))?;
        controller.set_sort(field);
        if args.desc {
            // Selecting the active column again flips the direction.
            controller.set_sort(field);
        }
    }

    let rows = controller.rows();
    if rows.is_empty() {
        eprintln!("{}", "Nothing found.".dimmed());
        return Ok(());
    }

    if args.json {
        output::json(&rows)?;
    } else {
        output::table(&rows);
    }

    Ok(())
}
