//! Application logic behind the CLI subcommands

use crate::cli::{Cli, Command, ValueKind};
use crate::convert::ConfigValue;
use crate::error::{ConfigError, Result};
use crate::model::{Configuration, Section, Setting};
use colored::Colorize;
use std::path::Path;

/// Runs one CLI invocation against the library.
pub struct App {
    cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        if cli.no_color {
            colored::control::set_override(false);
        }
        Self { cli }
    }

    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Inspect { file } => self.inspect(file),
            Command::Get {
                file,
                section,
                setting,
                kind,
                array,
            } => self.get(file, section, setting, *kind, *array),
            Command::Strip { file, output } => self.strip(file, output.as_deref()),
            Command::Pack { file, output } => self.pack(file, output),
            Command::Unpack { file, output } => self.unpack(file, output),
        }
    }

    fn inspect(&self, file: &Path) -> Result<()> {
        let config = Configuration::from_file(file)?;

        println!(
            "{} ({} sections)",
            file.display().to_string().bold(),
            config.len()
        );
        for section in config.iter() {
            println!(
                "  {} {}",
                format!("[{}]", section.name()).cyan().bold(),
                format!("{} settings", section.len()).dimmed()
            );
            if self.cli.verbose {
                for setting in section.iter() {
                    let shape = match setting.array_size(config.options()) {
                        Some(size) => format!("array[{}]", size),
                        None => "scalar".to_string(),
                    };
                    println!(
                        "    {} = {} {}",
                        setting.name().green(),
                        setting.raw_value(),
                        format!("({})", shape).dimmed()
                    );
                }
            }
        }
        Ok(())
    }

    fn get(
        &self,
        file: &Path,
        section_name: &str,
        setting_name: &str,
        kind: ValueKind,
        array: bool,
    ) -> Result<()> {
        let config = Configuration::from_file(file)?;
        let section = find_section(&config, section_name)?;
        let setting = find_setting(section, setting_name)?;

        if array {
            match kind {
                ValueKind::Bool => print_array::<bool>(setting, &config)?,
                ValueKind::Int => print_array::<i64>(setting, &config)?,
                ValueKind::Float => print_array::<f64>(setting, &config)?,
                ValueKind::String => print_array::<String>(setting, &config)?,
            }
        } else {
            match kind {
                ValueKind::Bool => println!("{}", setting.value::<bool>(config.options())?),
                ValueKind::Int => println!("{}", setting.value::<i64>(config.options())?),
                ValueKind::Float => println!("{}", setting.value::<f64>(config.options())?),
                ValueKind::String => println!("{}", setting.value::<String>(config.options())?),
            }
        }
        Ok(())
    }

    fn strip(&self, file: &Path, output: Option<&Path>) -> Result<()> {
        let mut config = Configuration::from_file(file)?;
        config.options_mut().set_parse_inline_comments(false);
        config.options_mut().set_parse_pre_comments(false);

        match output {
            Some(path) => {
                config.save_to_file(path)?;
                self.report_written(path);
            }
            None => print!("{}", config.save_to_string()),
        }
        Ok(())
    }

    fn pack(&self, file: &Path, output: &Path) -> Result<()> {
        let config = Configuration::from_file(file)?;
        config.save_to_binary_file(output)?;
        self.report_written(output);
        Ok(())
    }

    fn unpack(&self, file: &Path, output: &Path) -> Result<()> {
        let config = Configuration::from_binary_file(file)?;
        config.save_to_file(output)?;
        self.report_written(output);
        Ok(())
    }

    fn report_written(&self, path: &Path) {
        if self.cli.verbose {
            eprintln!("{} {}", "wrote".green(), path.display());
        }
    }
}

fn find_section<'a>(config: &'a Configuration, name: &str) -> Result<&'a Section> {
    config
        .find_section(name)
        .ok_or_else(|| ConfigError::NotFound {
            kind: "section",
            name: name.to_string(),
        })
}

fn find_setting<'a>(section: &'a Section, name: &str) -> Result<&'a Setting> {
    section
        .find_setting(name)
        .ok_or_else(|| ConfigError::NotFound {
            kind: "setting",
            name: name.to_string(),
        })
}

fn print_array<T>(setting: &Setting, config: &Configuration) -> Result<()>
where
    T: ConfigValue + std::fmt::Display,
{
    let values = setting
        .array_value::<T>(config.options())?
        .ok_or_else(|| ConfigError::NotAScalar {
            name: setting.name().to_string(),
            detail: "the setting does not hold an array value".to_string(),
        })?;
    for value in values {
        println!("{}", value);
    }
    Ok(())
}
