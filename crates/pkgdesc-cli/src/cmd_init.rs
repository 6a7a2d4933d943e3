// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `pkgdesc init` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;

#[cfg(test)]
#[path = "./cmd_init_test.rs"]
mod cmd_init_test;

/// Create a new package.yaml file
#[derive(Debug, Args)]
pub struct CmdInit {
    /// Directory to create file in
    #[clap(default_value = ".")]
    path: PathBuf,

    /// Add an initial service unit
    #[clap(long = "unit")]
    units: Vec<String>,

    /// Template to use: minimal, standard, full
    #[clap(long, default_value = "standard")]
    template: String,
}

impl CmdInit {
    pub fn run(&mut self) -> Result<i32> {
        let spec_path = self.path.join(pkgdesc::PKGDESC_FILENAME);

        if spec_path.exists() {
            return Err(miette::miette!(
                "{} already exists at {:?}",
                pkgdesc::PKGDESC_FILENAME,
                spec_path
            ));
        }

        let content = self.render();
        std::fs::write(&spec_path, content).map_err(|e| {
            miette::miette!("Failed to write {}: {}", pkgdesc::PKGDESC_FILENAME, e)
        })?;

        println!("Created {} at {:?}", pkgdesc::PKGDESC_FILENAME, spec_path);
        println!();
        println!("Next steps:");
        println!("  1. Edit the file to list your files and units");
        println!("  2. Run 'pkgdesc check --name <name> --version <version> --deb --rpm'");
        println!("  3. Run 'pkgdesc build --name <name> --version <version> --deb --rpm'");

        Ok(0)
    }

    fn render(&self) -> String {
        match self.template.as_str() {
            "minimal" => self.generate_minimal_template(),
            "full" => self.generate_full_template(),
            _ => self.generate_standard_template(),
        }
    }

    fn units_section(&self) -> String {
        if self.units.is_empty() {
            return "units: []\n".to_string();
        }
        format!(
            "units:\n{}\n",
            self.units
                .iter()
                .map(|u| format!("  - {u}"))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }

    fn generate_minimal_template(&self) -> String {
        format!(
            "api: pkgdesc/v0\n\
            \n\
            meta:\n  \
              description: \"\"\n  \
              license: \"\"\n  \
              vendor: \"\"\n  \
              maintainer: \"\"\n\
            \n\
            files: {{}}\n\
            \n\
            {}",
            self.units_section()
        )
    }

    fn generate_standard_template(&self) -> String {
        format!(
            "# pkgdesc package specification\n\
            \n\
            api: pkgdesc/v0\n\
            \n\
            meta:\n  \
              description: \"My service\"\n  \
              license: MIT\n  \
              vendor: \"\"\n  \
              maintainer: \"\"\n\
            \n\
            # Files keyed by install path\n\
            # files:\n\
            #   /usr/bin/myservice:\n\
            #     file: target/release/myservice\n\
            #     mode: \"0755\"\n\
            #   /etc/myservice/config.toml:\n\
            #     file: config/default.toml\n\
            #     keep: true\n\
            \n\
            {}\
            \n\
            # Units added only when the expression holds\n\
            # Available variables: arch, version, format\n\
            # conditional:\n\
            #   - when: format == \"deb\"\n\
            #     units:\n\
            #       - myservice-debian.service\n",
            self.units_section()
        )
    }

    fn generate_full_template(&self) -> String {
        format!(
            "# pkgdesc package specification\n\
            # Full example with all fields documented\n\
            \n\
            api: pkgdesc/v0\n\
            \n\
            meta:\n  \
              description: \"Full example service\"\n  \
              license: Apache-2.0\n  \
              vendor: Example Corp\n  \
              maintainer: ops@example.com\n  \
              homepage: https://example.com\n\
            \n\
            files:\n  \
              /usr/bin/myservice:\n    \
                file: target/release/myservice\n    \
                mode: \"0755\"\n  \
              /etc/myservice/config.toml:\n    \
                file: config/default.toml\n    \
                user: myservice\n    \
                keep: true\n\
            \n\
            dirs:\n  \
              - /var/lib/myservice\n\
            \n\
            {}\
            \n\
            scripts:\n  \
              post-install: scripts/postinstall.sh\n  \
              pre-remove: scripts/preremove.sh\n\
            \n\
            conditional:\n  \
              - when: format == \"deb\" && arch in (\"x86_64\", \"aarch64\")\n    \
                units:\n      \
                  - myservice-debian.service\n\
            \n\
            user: myservice\n",
            self.units_section()
        )
    }
}
