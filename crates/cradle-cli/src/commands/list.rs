//! Implementation of the `cradle list` command.

use cradle_core::application::ProviderInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::build_service(&config);

    if args.templates {
        let ids = service.list_templates()?;
        return match args.format {
            ListFormat::Json => Ok(output.json(&ids)?),
            ListFormat::Table => {
                output.header("Available Templates:")?;
                for id in &ids {
                    output.print(&format!("  {id}"))?;
                }
                Ok(())
            }
            ListFormat::List => {
                for id in &ids {
                    output.print(id.as_str())?;
                }
                Ok(())
            }
        };
    }

    let providers = service.list_providers();
    match args.format {
        ListFormat::Table => {
            print_table(&output, "Languages:", providers.iter().filter(|p| p.kind == "language"))?;
            output.print("")?;
            print_table(&output, "CI Providers:", providers.iter().filter(|p| p.kind == "ci"))?;
        }
        ListFormat::List => {
            for provider in &providers {
                output.print(&provider.tag)?;
            }
        }
        ListFormat::Json => output.json(&providers)?,
    }

    Ok(())
}

fn print_table<'a>(
    output: &OutputManager,
    title: &str,
    providers: impl Iterator<Item = &'a ProviderInfo>,
) -> CliResult<()> {
    output.header(title)?;
    for provider in providers {
        let mut notes = Vec::new();
        if !provider.helpers.is_empty() {
            notes.push(format!("helpers: {}", provider.helpers.join(", ")));
        }
        if provider.scripts_mixin.is_some() {
            notes.push("adds npm scripts".to_string());
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join("; "))
        };

        output.print(&format!(
            "  {} - {} file(s){notes}",
            provider.tag,
            provider.templates.len()
        ))?;
        for (template, destination) in &provider.templates {
            output.print(&format!("      {destination:<36} <- {template}"))?;
        }
    }
    Ok(())
}
