// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use pkgdesc::{Context, ExprEngine, Format, PackageSpec, PredicateEngine};
use rstest::rstest;

use super::*;

fn init(template: &str, units: &[&str], path: PathBuf) -> CmdInit {
    CmdInit {
        path,
        units: units.iter().map(|u| u.to_string()).collect(),
        template: template.to_string(),
    }
}

#[rstest]
#[case("minimal")]
#[case("standard")]
#[case("full")]
#[case("unknown")]
fn test_templates_parse(#[case] template: &str) {
    let cmd = init(template, &["app.service"], PathBuf::from("."));
    let spec = PackageSpec::from_yaml(cmd.render()).expect("template should parse");
    spec.validate().expect("template should validate");
    assert_eq!(spec.units, vec!["app.service".to_string()]);
}

#[rstest]
fn test_full_template_conditions_compile() {
    let cmd = init("full", &[], PathBuf::from("."));
    let spec = PackageSpec::from_yaml(cmd.render()).unwrap();
    assert!(!spec.conditionals.is_empty());

    let engine = ExprEngine;
    let context = Context::new(pkgdesc::Arch::X86_64, "1.0.0", Format::Deb);
    for cond in &spec.conditionals {
        let compiled = engine.compile(&cond.when).unwrap();
        assert!(engine.evaluate(&compiled, &context).unwrap());
    }
}

#[rstest]
fn test_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = init("minimal", &[], dir.path().to_path_buf());
    assert_eq!(cmd.run().unwrap(), 0);

    let written = std::fs::read_to_string(dir.path().join(pkgdesc::PKGDESC_FILENAME)).unwrap();
    let spec = PackageSpec::from_yaml(written).unwrap();
    assert!(spec.units.is_empty());
}

#[rstest]
fn test_init_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join(pkgdesc::PKGDESC_FILENAME);
    std::fs::write(&existing, "units: []\n").unwrap();

    let mut cmd = init("standard", &[], dir.path().to_path_buf());
    assert!(cmd.run().is_err());
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "units: []\n");
}
