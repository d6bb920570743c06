use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tracing::{debug, warn};

use chunkdiff_engine::diff_lines;
use chunkdiff_map::{unchanged_regions, PositionMapper};
use chunkdiff_patch::{apply_patch, format_patch, reconstruct_text, split_lines, Patch, PatchOptions};
use chunkdiff_types::{Position, Side};

use crate::cli::*;
use crate::config::Settings;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");

    match cli.command {
        Command::Diff(args) => cmd_diff(args, &settings, cli.format),
        Command::Apply(args) => cmd_apply(args, cli.format),
        Command::Map(args) => cmd_map(args, &settings, cli.format),
        Command::Split(args) => cmd_split(args, cli.format),
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn cmd_diff(args: DiffArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<()> {
    let old = split_lines(&read(&args.old)?);
    let new = split_lines(&read(&args.new)?);

    let mut options = settings.diff.clone();
    if args.ignore_whitespace {
        options.ignore_trim_whitespace = true;
    }
    if let Some(ms) = args.timeout_ms {
        options.max_computation_time_ms = ms;
    }

    let diff = diff_lines(&old, &new, &options);
    if diff.exceeds_limit {
        warn!(chunks = diff.len(), "diff has more chunks than max_diffs");
    }

    match format {
        OutputFormat::Json => {
            let folds = unchanged_regions(&diff.chunks, old.len(), new.len(), &settings.fold);
            let out = json!({
                "chunks": diff.chunks,
                "additions": diff.additions(),
                "deletions": diff.deletions(),
                "timed_out": diff.timed_out,
                "exceeds_limit": diff.exceeds_limit,
                "unchanged": folds,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            let name = args
                .name
                .unwrap_or_else(|| args.new.display().to_string());
            let patch_options = args
                .context
                .map(PatchOptions::with_context)
                .unwrap_or_else(|| settings.patch.clone());
            let patch = format_patch(&old, &new, &diff.chunks, &name, &patch_options)?;
            print!("{}", render_patch(&patch, args.color));
        }
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let original = read(&args.original)?;
    let patch: Patch = read(&args.patch)?
        .parse()
        .with_context(|| format!("parsing {}", args.patch.display()))?;
    let patched = apply_patch(&original, &patch)
        .with_context(|| format!("applying {} to {}", args.patch.display(), args.original.display()))?;

    match (&args.output, format) {
        (None, _) => print!("{patched}"),
        (Some(out), OutputFormat::Text) => {
            write(out, &patched)?;
            println!(
                "{} Applied {} hunk(s) to {} ({}, {})",
                "✓".green().bold(),
                patch.hunks.len(),
                out.display().to_string().bold(),
                format!("+{}", patch.additions()).green(),
                format!("-{}", patch.deletions()).red(),
            );
        }
        (Some(out), OutputFormat::Json) => {
            write(out, &patched)?;
            let summary = json!({
                "output": out.display().to_string(),
                "hunks": patch.hunks.len(),
                "additions": patch.additions(),
                "deletions": patch.deletions(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn cmd_map(args: MapArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<()> {
    let old = split_lines(&read(&args.old)?);
    let new = split_lines(&read(&args.new)?);
    let chunks = diff_lines(&old, &new, &settings.diff).into_chunks();

    let from = match args.from {
        SideArg::Old => Side::Old,
        SideArg::New => Side::New,
    };
    let mapper = PositionMapper::new(&chunks, &old, &new);
    let mapped = mapper.map_position(Position::new(args.row, args.column), from);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&mapped)?),
        OutputFormat::Text => println!(
            "{}:{} ({}) -> {}:{} ({})",
            args.row,
            args.column,
            from,
            mapped.row.to_string().yellow(),
            mapped.column.to_string().yellow(),
            from.opposite()
        ),
    }
    Ok(())
}

fn cmd_split(args: SplitArgs, format: OutputFormat) -> anyhow::Result<()> {
    let versions = reconstruct_text(&read(&args.patch)?)
        .with_context(|| format!("rebuilding versions from {}", args.patch.display()))?;
    write(&args.old_out, &versions.old)?;
    write(&args.new_out, &versions.new)?;

    match format {
        OutputFormat::Json => {
            let out = json!({
                "old": args.old_out.display().to_string(),
                "new": args.new_out.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!(
            "{} Wrote {} and {}",
            "✓".green().bold(),
            args.old_out.display().to_string().bold(),
            args.new_out.display().to_string().bold()
        ),
    }
    Ok(())
}

/// Patch text, optionally with ANSI colors per line kind.
fn render_patch(patch: &Patch, color: bool) -> String {
    let text = patch.to_string();
    if !color {
        return text;
    }

    let mut out = String::with_capacity(text.len() * 2);
    let mut in_hunks = false;
    for line in text.lines() {
        let styled = if line.starts_with("@@") {
            in_hunks = true;
            line.cyan().to_string()
        } else if !in_hunks {
            line.bold().to_string()
        } else if line.starts_with('+') {
            line.green().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('\\') {
            line.dimmed().to_string()
        } else {
            line.to_string()
        };
        out.push_str(&styled);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patch {
        "--- a/f\n+++ b/f\n@@ -1,2 +1,2 @@\n keep\n--x\n+-y\n".parse().unwrap()
    }

    #[test]
    fn plain_render_is_display() {
        let patch = sample();
        assert_eq!(render_patch(&patch, false), patch.to_string());
    }

    #[test]
    fn colored_render_keeps_text() {
        colored::control::set_override(true);
        let rendered = render_patch(&sample(), true);
        assert!(rendered.contains("\u{1b}["));
        assert_eq!(rendered.lines().count(), sample().to_string().lines().count());
        // "--x" is a removed line, not a header.
        let removed = rendered.lines().find(|l| l.contains("--x")).unwrap();
        assert_eq!(removed, "--x".red().to_string());
    }

    #[test]
    fn empty_patch_renders_nothing() {
        assert_eq!(render_patch(&Patch::default(), true), "");
    }
}
