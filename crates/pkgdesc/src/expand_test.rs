// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_expand_empty() {
    let selection = FormatSelection::default();
    assert!(selection.expand().is_empty());
}

#[rstest]
fn test_expand_switches_in_canonical_order() {
    let selection = FormatSelection {
        deb: true,
        rpm: true,
        formats: Vec::new(),
    };
    let formats: Vec<_> = selection.expand().into_iter().collect();
    assert_eq!(formats, vec![Format::Deb, Format::Rpm]);
}

#[rstest]
fn test_expand_list_keeps_given_order() {
    let selection = FormatSelection {
        deb: false,
        rpm: false,
        formats: vec![Format::Rpm, Format::Deb],
    };
    let formats: Vec<_> = selection.expand().into_iter().collect();
    assert_eq!(formats, vec![Format::Rpm, Format::Deb]);
}

#[rstest]
fn test_expand_removes_duplicates() {
    let selection = FormatSelection {
        deb: false,
        rpm: true,
        formats: vec![Format::Deb, Format::Rpm, Format::Deb],
    };
    let formats: Vec<_> = selection.expand().into_iter().collect();
    assert_eq!(formats, vec![Format::Rpm, Format::Deb]);
}
