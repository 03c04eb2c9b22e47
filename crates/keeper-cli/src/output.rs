//! Output formatting helpers and the notification bridge.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use keeper_core::{ActionKind, ActionOutcome, FieldErrors, Resource, ResourceKind};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print validation errors, one red line per failing field.
pub fn field_errors(errors: &FieldErrors) {
    for err in errors.errors() {
        eprintln!("  {}", format!("{}: {}", err.field, err.issue).red());
    }
}

/// A notifier that prints one line per settled mutation, e.g.
/// "✓ user added" or "✗ animal edit failed".
pub fn notifier(kind: ResourceKind) -> impl Fn(ActionOutcome) + Send + Sync + 'static {
    move |outcome| {
        if outcome.success {
            success(&format!("{} {}", kind.label(), outcome.action));
        } else {
            error(&format!("{} {} failed", kind.label(), verb(outcome.action)));
        }
    }
}

/// Infinitive form of an action, for failure lines.
fn verb(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Added => "add",
        ActionKind::Edited => "edit",
        ActionKind::Deleted => "delete",
        ActionKind::Banned => "ban",
        ActionKind::Unbanned => "unban",
    }
}

/// Print records as an aligned table, headers from the field registry.
pub fn table<R: Resource>(rows: &[R]) {
    let fields = R::fields();

    let mut widths: Vec<usize> = fields
        .iter()
        .map(|&f| R::field_name(f).len())
        .collect();
    for row in rows {
        for (i, &f) in fields.iter().enumerate() {
            widths[i] = widths[i].max(row.field_text(f).len());
        }
    }

    let header = fields
        .iter()
        .enumerate()
        .map(|(i, &f)| format!("{:<width$}", R::field_name(f), width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.bold());

    for row in rows {
        let line = fields
            .iter()
            .enumerate()
            .map(|(i, &f)| format!("{:<width$}", row.field_text(f), width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line);
    }
}
