//! Route table command.

use console::style;

use typewriter::routes::{resolve, routes};

use crate::cli::helpers::print_json;
use crate::cli::icons::{error, success};

/// List routes, or resolve a single path.
pub fn cmd_routes(path: Option<&str>, json: bool) -> anyhow::Result<()> {
    if let Some(path) = path {
        let Some(route) = resolve(path) else {
            eprintln!("{} No route matches '{}'", error(), path);
            std::process::exit(1);
        };
        if json {
            return print_json(route);
        }
        println!(
            "{} {} {} {}",
            success(),
            route.path,
            style("→").dim(),
            route.component
        );
        return Ok(());
    }

    if json {
        return print_json(routes());
    }

    println!("\n{}", style("Routes").bold());
    println!("{}", "-".repeat(60));
    println!("{:<18} {:<16} {:<16} Layout", "Path", "Name", "Component");
    println!("{}", "-".repeat(60));

    for route in routes() {
        println!(
            "{:<18} {:<16} {:<16} {}",
            route.path,
            route.name,
            route.component,
            if route.split_content { "split" } else { "full" }
        );
    }

    Ok(())
}
