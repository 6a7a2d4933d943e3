// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `pkgdesc show` command.

use std::collections::BTreeMap;

use clap::Args;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use pkgdesc::{ResolvedFile, TargetDescriptor};

/// Display resolved package descriptors
#[derive(Debug, Args)]
pub struct CmdShow {
    #[clap(flatten)]
    package: crate::PackageFlags,

    /// Output format: table, yaml, json
    #[clap(short, long, default_value = "table")]
    output: String,
}

impl CmdShow {
    pub fn run(&mut self) -> Result<i32> {
        let request = self.package.load()?;
        let descriptors = pkgdesc::resolve_all(
            &request.spec,
            &request.ident,
            &request.formats,
            &pkgdesc::ExprEngine,
        )?;

        match self.output.as_str() {
            "yaml" => print!("{}", serde_yaml::to_string(&descriptors).into_diagnostic()?),
            "json" => println!(
                "{}",
                serde_json::to_string_pretty(&descriptors).into_diagnostic()?
            ),
            "table" => {
                if descriptors.is_empty() {
                    println!("{}", "(no formats requested, use --deb, --rpm or --format)".dimmed());
                }
                for (i, descriptor) in descriptors.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    self.show_table(descriptor);
                }
            }
            other => {
                return Err(miette::miette!(
                    "Unknown output format '{other}', expected table, yaml or json"
                ));
            }
        }

        Ok(0)
    }

    fn show_table(&self, descriptor: &TargetDescriptor) {
        println!(
            "{} {}",
            descriptor.filename.bold(),
            format!("[{} / {}]", descriptor.format, descriptor.arch).yellow()
        );

        let meta = &descriptor.meta;
        if !meta.description.is_empty() {
            println!("  {}", meta.description.dimmed());
        }
        println!("  license: {}  vendor: {}", meta.license, meta.vendor);
        println!("  maintainer: {}", meta.maintainer);
        if !descriptor.user.is_empty() {
            println!("  user: {}", descriptor.user);
        }

        show_files("Files:", &descriptor.files);
        show_files("Config Files:", &descriptor.config_files);

        if !descriptor.dirs.is_empty() {
            println!("  {}", "Directories:".bold());
            for dir in &descriptor.dirs {
                println!("    {}", dir.cyan());
            }
        }

        println!("  {}", "Units:".bold());
        if descriptor.units.is_empty() {
            println!("    {}", "(no units)".dimmed());
        }
        for (i, unit) in descriptor.units.iter().enumerate() {
            println!("    {}. {}", i + 1, unit.green());
        }

        if !descriptor.scripts.is_empty() {
            println!("  {}", "Scripts:".bold());
            for (phase, script) in &descriptor.scripts {
                println!("    {}: {}", phase.to_string().cyan(), script.display());
            }
        }
    }
}

fn show_files(title: &str, files: &BTreeMap<String, ResolvedFile>) {
    if files.is_empty() {
        return;
    }
    println!("  {}", title.bold());
    for (target, file) in files {
        println!(
            "    {} <- {} ({}:{})",
            target.cyan(),
            file.source.display(),
            file.owner,
            file.mode.yellow()
        );
    }
}
