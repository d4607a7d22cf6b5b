use anyhow::{Context, Result};
use eoplot::parse::{ColConfig, Command, InfoConfig, PlotConfig, parse_args};
use eoplot::{colocate, io, plot};
use serde_json::json;

fn main() -> Result<()> {
    env_logger::init();
    let command = match parse_args(std::env::args_os().skip(1)) {
        Ok(command) => command,
        Err(e) => e.exit(),
    };
    match command {
        Command::Plot(config) => cmd_plot(config),
        Command::Info(config) => cmd_info(&config),
        Command::Col(config) => cmd_col(&config),
    }
}

fn cmd_plot(mut config: PlotConfig) -> Result<()> {
    let mut items = Vec::new();
    for spec in &config.series {
        let loaded = io::read(&spec.filename, std::slice::from_ref(&spec.variable))
            .with_context(|| format!("reading {}", spec.filename.display()))?;
        items.extend(loaded);
    }
    let out = plot::render_plot(&items, &mut config)?;
    eprintln!("Wrote plot to {}", out.display());
    Ok(())
}

fn cmd_info(config: &InfoConfig) -> Result<()> {
    let (sd_vars, vd_vars) = io::file_variables(&config.filename)
        .with_context(|| format!("reading {}", config.filename.display()))?;
    let details = if config.variables.is_empty() {
        Vec::new()
    } else {
        io::describe(&config.filename, &config.variables)?
    };

    if config.json {
        let doc = json!({
            "filename": config.filename,
            "sd_variables": sd_vars,
            "vd_variables": vd_vars,
            "variables": details,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("{}:", config.filename.display());
    println!("  SD variables: {}", sd_vars.join(", "));
    println!("  VD variables: {}", vd_vars.join(", "));
    for info in details {
        let shape = info
            .shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" x ");
        let long_name = info.long_name.as_deref().unwrap_or("-");
        println!(
            "  {}: shape [{}], units '{}', long name '{}'",
            info.name, shape, info.units, long_name
        );
    }
    Ok(())
}

fn cmd_col(config: &ColConfig) -> Result<()> {
    let rows = colocate::collocate(config)?;
    eprintln!("Wrote {} rows to {}", rows, config.output.display());
    Ok(())
}
