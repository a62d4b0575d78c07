//! Assistant step catalog commands.

use console::style;

use typewriter::assistants::{
    builder_node_templates, sidebar_step_map, step, step_definitions, StepType, MOCK_STEP_COUNT,
    SOURCE_OPTIONS,
};
use typewriter::config::Config;
use typewriter::render::{render, CancelToken, RenderOptions, TerminalTarget};

use super::PacingArgs;
use crate::cli::helpers::{print_json, truncate};
use crate::cli::icons::{bullet, dim_arrow, error, warn};

/// List catalog steps.
pub fn cmd_steps_list(json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&sidebar_step_map());
    }

    println!("\n{}", style("Assistant Steps").bold());
    println!("{}", "-".repeat(60));
    println!("{:<4} {:<10} {:<18} Title", "ID", "Type", "Pill");
    println!("{}", "-".repeat(60));

    for step in step_definitions() {
        println!(
            "{:<4} {:<10} {:<18} {}",
            step.id,
            step.step_type.as_str(),
            truncate(step.pill_label(), 17),
            step.title
        );
    }

    Ok(())
}

/// Show one step and type out its narrative.
pub async fn cmd_steps_show(
    config: &Config,
    id: u32,
    json: bool,
    args: &PacingArgs,
) -> anyhow::Result<()> {
    let Some(step) = step(id) else {
        eprintln!(
            "{} Step {} not found (catalog has {} steps)",
            error(),
            id,
            MOCK_STEP_COUNT
        );
        std::process::exit(1);
    };

    if json {
        return print_json(&step);
    }

    let meta = step.type_meta();
    println!(
        "\n{} {}  {}",
        style(format!("#{}", step.id)).dim(),
        style(&step.title).bold(),
        style(format!("[{}]", step.pill_label())).cyan()
    );
    println!("  {} type: {} ({})", dim_arrow(), meta.label, meta.bg_class);

    for source in &step.sources {
        println!("  {} source: {}", dim_arrow(), source.label);
    }

    for row in &step.rows {
        match (&row.value, &row.code) {
            (Some(value), _) => println!("  {} {}: {}", bullet(), row.key, value),
            (None, Some(code)) => println!("  {} {}: {}", bullet(), row.key, style(code).cyan()),
            (None, None) => println!("  {} {}: {}", bullet(), row.key, style("(empty)").dim()),
        }
        if row.show_warning {
            println!("    {} needs review", warn());
        }
    }

    if !step.comments.is_empty() {
        println!("\n{}", style("Comments").bold());
        for comment in &step.comments {
            println!(
                "  {} {} {}",
                style(&comment.author).bold(),
                style(&comment.stamp).dim(),
                comment.body
            );
        }
    }

    println!("\n{}", style("Ivy says").bold());
    let pacing = args.apply(config.render.clone());
    let token = CancelToken::new();
    if let Some(secs) = args.timeout {
        token.cancel_after(std::time::Duration::from_secs(secs));
    }

    let mut terminal = TerminalTarget::new(std::io::stdout(), "p");
    let options = RenderOptions::new()
        .pacing(pacing.pacing())
        .delay_policy(pacing.delay_policy())
        .cancel_token(&token);
    let outcome = render(&mut terminal, &step.ivy_says, options).await;
    terminal.finish()?;

    if outcome.is_err() {
        eprintln!("{} Narrative cancelled", warn());
    }
    Ok(())
}

/// Print builder node templates as JSON.
pub fn cmd_steps_builder(count: Option<usize>) -> anyhow::Result<()> {
    print_json(&builder_node_templates(count.unwrap_or(MOCK_STEP_COUNT)))
}

/// List step types.
pub fn cmd_steps_types() -> anyhow::Result<()> {
    println!("\n{}", style("Step Types").bold());
    println!("{}", "-".repeat(60));
    println!("{:<10} {:<12} {:<12} Icon", "Type", "Label", "Class");
    println!("{}", "-".repeat(60));

    for step_type in StepType::ALL {
        let meta = step_type.meta();
        println!(
            "{:<10} {:<12} {:<12} {}{}",
            step_type.as_str(),
            meta.label,
            meta.bg_class,
            meta.icon,
            if meta.icon_invert { " (inverted)" } else { "" }
        );
    }

    Ok(())
}

/// List data source options.
pub fn cmd_steps_sources() -> anyhow::Result<()> {
    for source in SOURCE_OPTIONS {
        println!("{} {}", bullet(), source);
    }
    Ok(())
}
