use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use atlas_pages::{
    generate, GenerateConfig, Markup, NavigationStyle, RenderOptions, SectionFilter,
};

/// Generate one linked HTML page per taxonomy node.
#[derive(Debug, Parser)]
#[command(name = "atlas-pages", version, about)]
struct Cli {
    /// Taxonomy XML file
    taxonomy: PathBuf,

    /// Destinations XML file
    destinations: PathBuf,

    /// Existing directory to write pages into
    output_dir: PathBuf,

    /// Destination sections to include in descriptions [default: overview]
    sections: Vec<String>,

    /// HTML-escape names and section text instead of copying them verbatim
    #[arg(long)]
    escape_text: bool,

    /// Link to every ancestor, not just the parent
    #[arg(long)]
    breadcrumbs: bool,

    /// Put a heading above each section of a description
    #[arg(long)]
    section_headings: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn into_config(self) -> GenerateConfig {
        let options = RenderOptions::new()
            .with_navigation(if self.breadcrumbs {
                NavigationStyle::Ancestors
            } else {
                NavigationStyle::Parent
            })
            .with_section_headings(self.section_headings)
            .with_markup(if self.escape_text {
                Markup::Escaped
            } else {
                Markup::Verbatim
            });

        GenerateConfig::new(self.taxonomy, self.destinations, self.output_dir)
            .with_sections(SectionFilter::new(self.sections))
            .with_options(options)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.into_config();
    let report = generate(&config).with_context(|| {
        format!(
            "failed to generate pages from {} and {}",
            config.taxonomy_path.display(),
            config.destinations_path.display()
        )
    })?;

    info!(
        "done: {} pages, {} nodes skipped, {} destinations indexed, output in {}",
        report.pages_written,
        report.nodes_skipped,
        report.destinations_indexed,
        report.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["atlas-pages", "tax.xml", "dest.xml", "out"]).unwrap();
        assert_eq!(cli.log_level(), "warn");

        let config = cli.into_config();
        assert_eq!(config.sections, SectionFilter::default());
        assert_eq!(config.options.navigation, NavigationStyle::Parent);
        assert_eq!(config.options.markup, Markup::Verbatim);
        assert!(!config.options.section_headings);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_sections_and_flags() {
        let cli = Cli::try_parse_from([
            "atlas-pages",
            "tax.xml",
            "dest.xml",
            "out",
            "history",
            "money",
            "--breadcrumbs",
            "--escape-text",
            "--section-headings",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "debug");

        let config = cli.into_config();
        assert_eq!(config.sections, SectionFilter::new(["history", "money"]));
        assert_eq!(config.options.navigation, NavigationStyle::Ancestors);
        assert_eq!(config.options.markup, Markup::Escaped);
        assert!(config.options.section_headings);
    }

    #[test]
    fn test_cli_requires_three_paths() {
        assert!(Cli::try_parse_from(["atlas-pages", "tax.xml", "dest.xml"]).is_err());
    }
}
